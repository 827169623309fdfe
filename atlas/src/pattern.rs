use crate::{
    error::DefinitionError,
    shape::{CornerType, Shape},
};
use common::{rad2deg, EPSILON};
use indexmap::IndexMap;
use std::sync::Arc;

// VertexCorner is the view of a placed corner that vertex patterns are matched against.
// Corners handed to a pattern must be sorted by ascending edge angle.
pub trait VertexCorner {
    // edge_angle is the angle of the edge leaving the vertex, in grid coordinates
    fn edge_angle(&self) -> f64;
    fn shape(&self) -> &Shape;
    fn corner_type(&self) -> CornerType;
}

#[derive(Clone, Debug)]
pub struct PatternCorner {
    pub shape: Arc<Shape>,
    pub vertex_index: usize,
    pub corner_type: CornerType,
    pub corner_angle: f64,
}

// VertexPattern is a cyclic list of the corners that meet around one vertex
#[derive(Clone, Debug)]
pub struct VertexPattern {
    pub corners: Vec<PatternCorner>,
}

impl VertexPattern {
    pub fn new(corners: Vec<(Arc<Shape>, usize)>) -> Result<VertexPattern, DefinitionError> {
        let corners = corners
            .into_iter()
            .map(|(shape, vertex_index)| {
                let (corner_type, corner_angle) = match (
                    shape.corner_types.get(vertex_index),
                    shape.corner_angles.get(vertex_index),
                ) {
                    (Some(corner_type), Some(corner_angle)) => (*corner_type, *corner_angle),
                    _ => return Err(DefinitionError::InvalidComponent(format!("{}{}", shape.name, vertex_index))),
                };
                Ok(PatternCorner { shape, vertex_index, corner_type, corner_angle })
            })
            .collect::<Result<Vec<PatternCorner>, DefinitionError>>()?;
        Ok(VertexPattern { corners })
    }

    // from_string parses the short notation "S0-T1-..." where each component names a shape key
    // followed by one digit for the vertex index of that shape
    pub fn from_string(vertex: &str, shapes: &IndexMap<String, Arc<Shape>>) -> Result<VertexPattern, DefinitionError> {
        let corners = vertex
            .split('-')
            .map(|component| {
                let chars = component.chars().collect::<Vec<char>>();
                let (key, index) = match chars.as_slice() {
                    [key, index] if key.is_ascii_alphabetic() && index.is_ascii_digit() => (*key, *index),
                    _ => return Err(DefinitionError::InvalidComponent(String::from(component))),
                };
                let shape = shapes
                    .get(&key.to_string())
                    .ok_or_else(|| DefinitionError::UndefinedShape(key.to_string()))?;
                let vertex_index = index.to_digit(10).unwrap_or_default() as usize;
                if vertex_index >= shape.size() {
                    return Err(DefinitionError::InvalidComponent(String::from(component)));
                }
                Ok((shape.clone(), vertex_index))
            })
            .collect::<Result<Vec<(Arc<Shape>, usize)>, DefinitionError>>()?;
        VertexPattern::new(corners)
    }

    pub fn size(&self) -> usize {
        self.corners.len()
    }

    // angle_sum returns the total angle of the pattern in radians
    pub fn angle_sum(&self) -> f64 {
        self.corners.iter().map(|corner| corner.corner_angle).sum()
    }

    pub fn angle_sum_deg(&self) -> f64 {
        rad2deg(self.angle_sum())
    }

    // check_match tries every starting corner of the pattern and walks the placed corners in lockstep,
    // skipping pattern corners that fall into gaps between placed corners
    pub fn check_match<C: VertexCorner>(&self, corners: &[C]) -> bool {
        let first = match corners.first() {
            Some(first) => first,
            None => return true,
        };
        let def = &self.corners;
        let n = def.len();
        (0..n).any(|start| {
            let mut cur_angle = first.edge_angle();
            let mut def_index = 0;
            for corner in corners.iter() {
                // skip over unused corners
                while cur_angle < corner.edge_angle() - EPSILON && def_index < n {
                    cur_angle += def[(def_index + start) % n].corner_angle;
                    def_index += 1;
                }
                if def_index >= n {
                    return false;
                }
                let expected = &def[(def_index + start) % n];
                if (cur_angle - corner.edge_angle()).abs() > EPSILON
                    || *corner.shape() != *expected.shape
                    || corner.corner_type() != expected.corner_type
                {
                    return false;
                }
                cur_angle += expected.corner_angle;
                def_index += 1;
            }
            true
        })
    }
}

impl std::fmt::Display for VertexPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.corners
                .iter()
                .map(|corner| format!("{}{}", corner.shape.name, corner.vertex_index))
                .collect::<Vec<String>>()
                .join("-")
        )
    }
}
