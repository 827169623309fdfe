use crate::{
    error::DefinitionError,
    pattern::{VertexCorner, VertexPattern},
    shape::Shape,
};
use common::{deg2rad, fmt_float, DEFAULT_F64_MARGIN};
use float_cmp::ApproxEq;
use indexmap::IndexSet;
use log::debug;
use std::{
    f64::consts::TAU,
    sync::{Arc, OnceLock},
};

// MAX_ORIENTATIONS bounds the orientation closure for atlases whose angles never close
pub const MAX_ORIENTATIONS: usize = 100;

#[derive(Clone, Debug)]
struct Orientations {
    degrees: Vec<i64>,
    radians: Vec<f64>,
}

// Atlas is a set of shapes and the vertex patterns in which they may meet
#[derive(Clone, Debug)]
pub struct Atlas {
    pub name: String,
    shapes: Vec<Arc<Shape>>,
    patterns: Vec<VertexPattern>,
    shape_frequencies: Vec<f64>,
    orientations: OnceLock<Orientations>,
}

impl Atlas {
    // new validates the patterns and normalizes the shape frequencies to a minimum of 1.
    // Missing or non-positive frequencies count as 1.
    pub fn new<S: Into<String>>(
        name: S,
        shapes: Vec<Arc<Shape>>,
        patterns: Vec<VertexPattern>,
        frequencies: Option<Vec<f64>>,
    ) -> Result<Atlas, DefinitionError> {
        if patterns.is_empty() {
            return Err(DefinitionError::EmptyAtlas);
        }
        for pattern in patterns.iter() {
            let sum = pattern.angle_sum();
            if !sum.approx_eq(TAU, DEFAULT_F64_MARGIN) {
                return Err(DefinitionError::VertexAngleSum {
                    pattern: pattern.to_string(),
                    actual: pattern.angle_sum_deg(),
                });
            }
        }

        let frequencies = (0..shapes.len())
            .map(|i| {
                frequencies
                    .as_ref()
                    .and_then(|frequencies| frequencies.get(i).copied())
                    .filter(|frequency| *frequency > 0.)
                    .unwrap_or(1.)
            })
            .collect::<Vec<f64>>();
        let min = frequencies.iter().copied().fold(f64::INFINITY, f64::min);
        let shape_frequencies = frequencies.iter().map(|frequency| frequency / min).collect();

        Ok(Atlas { name: name.into(), shapes, patterns, shape_frequencies, orientations: OnceLock::new() })
    }

    pub fn shapes(&self) -> &[Arc<Shape>] {
        &self.shapes
    }

    pub fn patterns(&self) -> &[VertexPattern] {
        &self.patterns
    }

    // shape_frequency returns the normalized frequency of the shape, or 1 for shapes outside the atlas
    pub fn shape_frequency(&self, shape: &Shape) -> f64 {
        self.shapes
            .iter()
            .position(|other| **other == *shape)
            .and_then(|i| self.shape_frequencies.get(i).copied())
            .unwrap_or(1.)
    }

    // check_match checks the corners of a vertex against all patterns of the atlas
    pub fn check_match<C: VertexCorner>(&self, corners: &[C]) -> bool {
        self.patterns.iter().any(|pattern| pattern.check_match(corners))
    }

    // orientations returns every absolute rotation a tile can take in this atlas, in radians, ascending
    pub fn orientations(&self) -> &[f64] {
        &self.compute_orientations().radians
    }

    pub fn orientations_deg(&self) -> &[i64] {
        &self.compute_orientations().degrees
    }

    // compute_orientations walks the corners of every shape starting from every known angle,
    // rounding to whole degrees, until no new angle appears or MAX_ORIENTATIONS are known
    fn compute_orientations(&self) -> &Orientations {
        self.orientations.get_or_init(|| {
            let mut angles = IndexSet::<i64>::new();
            angles.insert(0);
            let mut next = 0;
            while angles.len() < MAX_ORIENTATIONS {
                let start = match angles.get_index(next) {
                    Some(start) => *start,
                    None => break,
                };
                next += 1;
                for shape in self.shapes.iter() {
                    let mut angle = start as f64;
                    for corner_angle in shape.corner_angles_deg.iter() {
                        let rounded = (angle.round() as i64).rem_euclid(360);
                        if angles.len() < MAX_ORIENTATIONS {
                            angles.insert(rounded);
                        }
                        angle = rounded as f64 + corner_angle;
                    }
                }
            }
            let mut degrees = angles.into_iter().collect::<Vec<i64>>();
            degrees.sort_unstable();
            debug!(
                "atlas {}: {} orientations [{}]",
                self.name,
                degrees.len(),
                degrees.iter().map(|angle| fmt_float(*angle as f64, 0)).collect::<Vec<String>>().join(",")
            );
            let radians = degrees.iter().map(|angle| deg2rad(*angle as f64)).collect();
            Orientations { degrees, radians }
        })
    }
}
