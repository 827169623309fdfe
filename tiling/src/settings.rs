use crate::error::GameError;
use atlas::{Atlas, AtlasDefinition, BuiltinAtlas, ColorPattern};
use coloring::{ColorPatternsByShape, RuleSetKind};
use grid::{Color, DEFAULT_TILE_CENTER_WEIGHT};
use scorer::ScorerKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE: [&str; 4] = ["#00c0ef", "#dd4b39", "#f39c12", "#00a65a"];
pub const DEFAULT_COLORING_ATTEMPTS: usize = 10;

// AtlasSource is either the name of a builtin atlas or a full atlas definition
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AtlasSource {
    Builtin(BuiltinAtlas),
    Definition(AtlasDefinition),
}

impl Default for AtlasSource {
    fn default() -> AtlasSource {
        AtlasSource::Builtin(BuiltinAtlas::default())
    }
}

impl AtlasSource {
    pub fn build(&self) -> Result<Atlas, GameError> {
        Ok(match self {
            AtlasSource::Builtin(builtin) => builtin.build()?,
            AtlasSource::Definition(definition) => Atlas::from_definition(definition)?,
        })
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSettings {
    pub atlas: AtlasSource,
    pub rules: RuleSetKind,
    pub scorer: ScorerKind,
    pub palette: Vec<Color>,
    // segments picks the color pattern of every shape, 0 being the pattern with the most colors
    pub segments: usize,
    pub unique_tile_colors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_game: Option<DemoGameSettings>,
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            atlas: AtlasSource::default(),
            rules: RuleSetKind::default(),
            scorer: ScorerKind::default(),
            palette: DEFAULT_PALETTE.iter().map(|color| Color::from(*color)).collect(),
            segments: 0,
            unique_tile_colors: false,
            demo_game: None,
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<GameSettings, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    // color_patterns gives every shape of the atlas the pattern selected by segments,
    // or its last pattern when it has fewer
    pub fn color_patterns(&self, atlas: &Atlas) -> ColorPatternsByShape {
        atlas
            .shapes()
            .iter()
            .map(|shape| {
                let pattern = shape
                    .color_patterns
                    .get(self.segments)
                    .or_else(|| shape.color_patterns.last())
                    .cloned()
                    .unwrap_or_else(|| ColorPattern::single(shape.size()));
                (shape.clone(), vec![pattern])
            })
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoGameSettings {
    pub seed: u32,
    pub number_of_tiles: usize,
    pub tile_center_weight: f64,
    pub coloring_attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
}

impl Default for DemoGameSettings {
    fn default() -> DemoGameSettings {
        DemoGameSettings {
            seed: 1,
            number_of_tiles: 20,
            tile_center_weight: DEFAULT_TILE_CENTER_WEIGHT,
            coloring_attempts: DEFAULT_COLORING_ATTEMPTS,
            points: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::from_json("{}").unwrap();
        assert_eq!(GameSettings::default(), settings);
        assert_eq!(4, settings.palette.len());
        assert_eq!("Square", settings.atlas.build().unwrap().name);
    }

    #[test]
    fn test_from_json() {
        let settings = GameSettings::from_json(
            r##"{
                "atlas": "snub-square",
                "rules": "different-edge-colors",
                "scorer": "full-tiles",
                "palette": ["red", "blue"],
                "segments": 2,
                "uniqueTileColors": true,
                "demoGame": { "seed": 7, "numberOfTiles": 12 }
            }"##,
        )
        .unwrap();
        assert_eq!(AtlasSource::Builtin(BuiltinAtlas::SnubSquare), settings.atlas);
        assert_eq!(RuleSetKind::DifferentEdgeColors, settings.rules);
        assert_eq!(ScorerKind::FullTiles, settings.scorer);
        assert_eq!(vec![Color::from("red"), Color::from("blue")], settings.palette);
        assert!(settings.unique_tile_colors);
        let demo = settings.demo_game.unwrap();
        assert_eq!(7, demo.seed);
        assert_eq!(12, demo.number_of_tiles);
        assert_eq!(DEFAULT_TILE_CENTER_WEIGHT, demo.tile_center_weight);
        assert_eq!(DEFAULT_COLORING_ATTEMPTS, demo.coloring_attempts);
    }

    #[test]
    fn test_atlas_definition() {
        let settings = GameSettings::from_json(
            r#"{ "atlas": { "name": "Hex", "shapes": { "H": { "angles": [120, 120, 120, 120, 120, 120] } } } }"#,
        )
        .unwrap();
        assert_eq!("Hex", settings.atlas.build().unwrap().name);
        assert!(GameSettings::from_json(r#"{ "atlas": "no-such-atlas" }"#).is_err());
    }

    #[test]
    fn test_color_patterns() {
        let atlas = BuiltinAtlas::SnubSquare.build().unwrap();
        let settings = GameSettings { segments: 2, ..GameSettings::default() };
        let patterns = settings.color_patterns(&atlas);
        assert_eq!(2, patterns.len());
        assert!(patterns.values().all(|patterns| patterns.len() == 1 && patterns[0].num_colors == 1));

        let settings = GameSettings { segments: 9, ..GameSettings::default() };
        let patterns = settings.color_patterns(&atlas);
        assert!(patterns.values().all(|patterns| patterns[0].num_colors == 1));
    }
}
