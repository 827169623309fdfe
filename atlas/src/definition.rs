use crate::{
    atlas::Atlas,
    error::DefinitionError,
    pattern::VertexPattern,
    shape::{ColorPattern, CornerType, Shape},
};
use common::canonical_rotation;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// FULL_TURN_DEG is the angle that the corners of a vertex must fill
const FULL_TURN_DEG: i64 = 360;

// AtlasDefinition is the short notation of an atlas used in JSON documents.
// Shapes are keyed by a single letter that vertex strings refer to.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub shapes: IndexMap<String, ShapeDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertices: Option<Vec<VertexDefinition>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    // angles greater than 5 are read as degrees, all others as radians
    pub angles: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_patterns: Option<Vec<Vec<Vec<usize>>>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct VertexDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertex: String,
}

impl Atlas {
    pub fn from_json(json: &str) -> Result<Atlas, DefinitionError> {
        let definition: AtlasDefinition = serde_json::from_str(json)?;
        Atlas::from_definition(&definition)
    }

    // from_definition builds the shapes in document order, parses the listed vertices, or derives
    // every vertex pattern the shapes allow when no vertices are listed
    pub fn from_definition(definition: &AtlasDefinition) -> Result<Atlas, DefinitionError> {
        let mut shapes: IndexMap<String, Arc<Shape>> = IndexMap::with_capacity(definition.shapes.len());
        let mut frequencies: Vec<f64> = Vec::with_capacity(definition.shapes.len());
        for (key, shape_definition) in definition.shapes.iter() {
            let name = shape_definition.name.clone().unwrap_or_default();
            let mut shape = Shape::from_mixed_angles(name, &shape_definition.angles)?;
            if let Some(pattern_sets) = shape_definition.color_patterns.as_ref() {
                let color_patterns = pattern_sets
                    .iter()
                    .map(|pattern_set| ColorPattern::from_definition(shape.size(), pattern_set))
                    .collect::<Result<Vec<ColorPattern>, DefinitionError>>()?;
                shape = shape.with_color_patterns(color_patterns);
            }
            if shapes.values().any(|other| shape.equal_angles(other)) {
                return Err(DefinitionError::DuplicateShape(key.clone()));
            }
            shapes.insert(key.clone(), Arc::new(shape));
            frequencies.push(shape_definition.frequency.unwrap_or(1.));
        }

        let patterns = match definition.vertices.as_ref() {
            Some(vertices) => vertices
                .iter()
                .map(|vertex| VertexPattern::from_string(&vertex.vertex, &shapes))
                .collect::<Result<Vec<VertexPattern>, DefinitionError>>()?,
            None => derive_vertex_patterns(&shapes.values().cloned().collect::<Vec<Arc<Shape>>>())?,
        };

        Atlas::new(
            definition.name.clone().unwrap_or_default(),
            shapes.into_iter().map(|(_, shape)| shape).collect(),
            patterns,
            Some(frequencies),
        )
    }
}

// derive_vertex_patterns lists every cyclic sequence of corners whose whole-degree angles sum to 360,
// taking one corner of each corner type per shape and keeping one sequence per rotation class
pub fn derive_vertex_patterns(shapes: &[Arc<Shape>]) -> Result<Vec<VertexPattern>, DefinitionError> {
    // collect unique corner types
    let mut corners: Vec<(usize, usize, i64)> = vec![];
    for (shape_index, shape) in shapes.iter().enumerate() {
        let mut seen: IndexSet<CornerType> = IndexSet::new();
        for (vertex_index, corner_type) in shape.corner_types.iter().enumerate() {
            if !seen.insert(*corner_type) {
                continue;
            }
            let angle = shape.corner_angles_deg[vertex_index].round() as i64;
            if angle > 0 {
                corners.push((shape_index, vertex_index, angle));
            }
        }
    }

    let mut combinations: IndexMap<Vec<usize>, Vec<usize>> = IndexMap::new();
    walk(&corners, &mut vec![], 0, &mut combinations);

    let patterns = combinations
        .into_iter()
        .map(|(_, sequence)| sequence)
        .map(|sequence| {
            VertexPattern::new(
                sequence
                    .into_iter()
                    .map(|i| (shapes[corners[i].0].clone(), corners[i].1))
                    .collect(),
            )
        })
        .collect::<Result<Vec<VertexPattern>, DefinitionError>>()?;
    debug!("derived {} vertex patterns from {} corner types", patterns.len(), corners.len());
    Ok(patterns)
}

fn walk(
    corners: &[(usize, usize, i64)],
    sequence: &mut Vec<usize>,
    sum: i64,
    combinations: &mut IndexMap<Vec<usize>, Vec<usize>>,
) {
    for (i, (_, _, angle)) in corners.iter().enumerate() {
        let next = sum + angle;
        if next > FULL_TURN_DEG {
            continue;
        }
        sequence.push(i);
        if next == FULL_TURN_DEG {
            combinations.entry(canonical_rotation(sequence.as_slice())).or_insert_with(|| sequence.clone());
        } else {
            walk(corners, sequence, next, combinations);
        }
        sequence.pop();
    }
}
