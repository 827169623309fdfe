use crate::{atlas::Atlas, definition::AtlasDefinition, error::DefinitionError};
use serde::{Deserialize, Serialize};

const SQUARES: &str = r#"{
    "name": "Square",
    "shapes": {
        "S": { "name": "square", "angles": [90, 90, 90, 90] }
    },
    "vertices": [{ "name": "square", "vertex": "S0-S0-S0-S0" }]
}"#;

const TRIANGLES: &str = r#"{
    "name": "Triangle",
    "shapes": {
        "T": {
            "name": "triangle",
            "angles": [60, 60, 60],
            "colorPatterns": [[[0, 1, 2]], [[0, 1, 1]], [[0, 0, 0]]]
        }
    },
    "vertices": [{ "name": "triangle", "vertex": "T0-T0-T0-T0-T0-T0" }]
}"#;

const HEXAGONS: &str = r#"{
    "name": "Hexagon",
    "shapes": {
        "H": { "name": "hexagon", "angles": [120, 120, 120, 120, 120, 120] }
    }
}"#;

const RHOMBUS: &str = r#"{
    "name": "Rhombus-60-120",
    "shapes": {
        "L": { "name": "rhombus", "angles": [60, 120, 60, 120] }
    },
    "vertices": [
        { "name": "a", "vertex": "L0-L0-L0-L0-L0-L0" },
        { "name": "b", "vertex": "L1-L0-L0-L0-L0" },
        { "name": "c", "vertex": "L1-L1-L0-L0" },
        { "name": "d", "vertex": "L1-L0-L1-L0" },
        { "name": "e", "vertex": "L1-L1-L1" }
    ]
}"#;

const PENROSE: &str = r#"{
    "name": "Penrose-3",
    "shapes": {
        "L": { "name": "rhombus-wide", "angles": [72, 108, 72, 108], "frequency": 5 },
        "S": { "name": "rhombus-narrow", "angles": [36, 144, 36, 144], "frequency": 3 }
    },
    "vertices": [
        { "name": "kite", "vertex": "L1-S1-L1" },
        { "name": "deuce", "vertex": "S1-L0-S1" },
        { "name": "jack", "vertex": "L0-L0-L0-S1" },
        { "name": "ace", "vertex": "L1-S0-L0-S0-L1" },
        { "name": "king", "vertex": "L0-L0-S0-S0-L0-L0" },
        { "name": "queen", "vertex": "L0-S0-S0-L0-S0-S0-L0" },
        { "name": "sun/star", "vertex": "L0-L0-L0-L0-L0" }
    ]
}"#;

const PENROSE_FREE: &str = r#"{
    "name": "Penrose-3-free",
    "shapes": {
        "L": { "name": "rhombus-wide", "angles": [72, 108, 72, 108], "frequency": 5 },
        "S": { "name": "rhombus-narrow", "angles": [36, 144, 36, 144], "frequency": 3 }
    }
}"#;

const SNUB_SQUARE: &str = r#"{
    "name": "Snub-Square",
    "shapes": {
        "S": {
            "name": "square",
            "angles": [90, 90, 90, 90],
            "frequency": 1,
            "colorPatterns": [[[0, 1, 2, 3]], [[0, 0, 1, 1], [0, 1, 1, 0]], [[0, 0, 0, 0]]]
        },
        "T": {
            "name": "triangle",
            "angles": [60, 60, 60],
            "frequency": 2,
            "colorPatterns": [[[0, 1, 2]], [[0, 0, 1], [0, 1, 0], [1, 0, 0]], [[0, 0, 0]]]
        }
    },
    "vertices": [{ "name": "a", "vertex": "S0-T0-S0-T0-T0" }]
}"#;

const SNUB_SQUARE_FREE: &str = r#"{
    "name": "Snub-Square-free",
    "shapes": {
        "S": {
            "name": "square",
            "angles": [90, 90, 90, 90],
            "frequency": 1,
            "colorPatterns": [[[0, 1, 2, 3]], [[0, 0, 1, 1], [0, 1, 1, 0]], [[0, 0, 0, 0]]]
        },
        "T": {
            "name": "triangle",
            "angles": [60, 60, 60],
            "frequency": 2,
            "colorPatterns": [[[0, 1, 2]], [[0, 0, 1], [0, 1, 0], [1, 0, 0]], [[0, 0, 0]]]
        }
    }
}"#;

pub fn squares_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(SQUARES)
}

pub fn triangles_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(TRIANGLES)
}

pub fn hexagons_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(HEXAGONS)
}

pub fn rhombus_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(RHOMBUS)
}

// penrose_atlas is the P3 rhomb tiling restricted to the seven vertex configurations of a proper Penrose tiling
pub fn penrose_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(PENROSE)
}

pub fn penrose_free_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(PENROSE_FREE)
}

pub fn snub_square_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(SNUB_SQUARE)
}

pub fn snub_square_free_atlas() -> Result<Atlas, DefinitionError> {
    Atlas::from_json(SNUB_SQUARE_FREE)
}

// BuiltinAtlas names one of the atlases that ship with the crate
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinAtlas {
    #[default]
    Squares,
    Triangles,
    Hexagons,
    Rhombus,
    Penrose,
    PenroseFree,
    SnubSquare,
    SnubSquareFree,
}

impl BuiltinAtlas {
    pub const ALL: [BuiltinAtlas; 8] = [
        BuiltinAtlas::Squares,
        BuiltinAtlas::Triangles,
        BuiltinAtlas::Hexagons,
        BuiltinAtlas::Rhombus,
        BuiltinAtlas::Penrose,
        BuiltinAtlas::PenroseFree,
        BuiltinAtlas::SnubSquare,
        BuiltinAtlas::SnubSquareFree,
    ];

    pub fn build(&self) -> Result<Atlas, DefinitionError> {
        match self {
            BuiltinAtlas::Squares => squares_atlas(),
            BuiltinAtlas::Triangles => triangles_atlas(),
            BuiltinAtlas::Hexagons => hexagons_atlas(),
            BuiltinAtlas::Rhombus => rhombus_atlas(),
            BuiltinAtlas::Penrose => penrose_atlas(),
            BuiltinAtlas::PenroseFree => penrose_free_atlas(),
            BuiltinAtlas::SnubSquare => snub_square_atlas(),
            BuiltinAtlas::SnubSquareFree => snub_square_free_atlas(),
        }
    }

    // definition returns the JSON document of the atlas
    pub fn definition(&self) -> Result<AtlasDefinition, DefinitionError> {
        let json = match self {
            BuiltinAtlas::Squares => SQUARES,
            BuiltinAtlas::Triangles => TRIANGLES,
            BuiltinAtlas::Hexagons => HEXAGONS,
            BuiltinAtlas::Rhombus => RHOMBUS,
            BuiltinAtlas::Penrose => PENROSE,
            BuiltinAtlas::PenroseFree => PENROSE_FREE,
            BuiltinAtlas::SnubSquare => SNUB_SQUARE,
            BuiltinAtlas::SnubSquareFree => SNUB_SQUARE_FREE,
        };
        Ok(serde_json::from_str(json)?)
    }
}
