use crate::error::{DefinitionError, ShapeDefinitionError};
use common::{
    deg2rad, divisors, hash_float, is_cyclic_rotation, map_to_index, rad2deg, rotate_array, DEFAULT_PRECISION,
    EPSILON,
};
use geometry::{Edge, Point, Polygon};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::{
    f64::consts::PI,
    hash::{Hash, Hasher},
};

// DEGREE_THRESHOLD separates angles given in radians from angles given in degrees in definitions
pub const DEGREE_THRESHOLD: f64 = 5.;

// CornerType identifies corners that can be matched onto each other by rotating the shape
pub type CornerType = usize;

// ColorPattern is one way to color the segments of a shape. Each entry of segment_colors is a
// rotation variant of the same scheme, with colors renumbered in order of first appearance.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPattern {
    pub num_colors: usize,
    pub segment_colors: Vec<Vec<usize>>,
}

impl ColorPattern {
    // single colors every segment of an n-sided shape the same
    pub fn single(num_segments: usize) -> ColorPattern {
        ColorPattern { num_colors: 1, segment_colors: vec![vec![0; num_segments]] }
    }

    // from_definition validates a set of segment colorings written out for a shape with num_segments sides
    pub fn from_definition(num_segments: usize, pattern_set: &[Vec<usize>]) -> Result<ColorPattern, DefinitionError> {
        let mut set_num_colors: Option<usize> = None;
        for pattern in pattern_set.iter() {
            if pattern.len() != num_segments {
                return Err(DefinitionError::InvalidColorPattern(format!(
                    "number of colors {} does not match number of segments {}",
                    pattern.len(),
                    num_segments,
                )));
            }
            let num_colors = pattern.iter().collect::<IndexSet<_>>().len();
            if let Some(expected) = set_num_colors {
                if expected != num_colors {
                    return Err(DefinitionError::InvalidColorPattern(String::from(
                        "all patterns in a set should have the same number of colors",
                    )));
                }
            }
            set_num_colors = Some(num_colors);
            if pattern.iter().any(|color| *color >= num_colors) {
                return Err(DefinitionError::InvalidColorPattern(format!("incorrect color indices in {:?}", pattern)));
            }
        }
        match set_num_colors {
            Some(num_colors) => Ok(ColorPattern { num_colors, segment_colors: pattern_set.to_vec() }),
            None => Err(DefinitionError::InvalidColorPattern(String::from("empty set"))),
        }
    }
}

// Shape describes an equilateral polygon by its interior angles
#[derive(Clone, Debug)]
pub struct Shape {
    pub name: String,
    // corner_angles are the interior angles in radians
    pub corner_angles: Vec<f64>,
    pub corner_angles_deg: Vec<f64>,
    pub corner_types: Vec<CornerType>,
    // rotational_symmetries lists the steps r for which rotating corner i to i+r gives the same shape
    pub rotational_symmetries: Vec<usize>,
    // unique_rotations lists the rotation steps that give a differently placed shape,
    // every step up to the first non-zero symmetry
    pub unique_rotations: Vec<usize>,
    pub color_patterns: Vec<ColorPattern>,
    angle_keys: Vec<i64>,
}

impl Shape {
    pub fn new<S: Into<String>>(name: S, corner_angles: Vec<f64>) -> Result<Shape, ShapeDefinitionError> {
        let name = name.into();
        let corner_angles_deg = corner_angles.iter().map(|angle| rad2deg(*angle)).collect::<Vec<f64>>();
        let angle_keys = corner_angles_deg
            .iter()
            .map(|angle| hash_float(*angle, DEFAULT_PRECISION))
            .collect::<Vec<i64>>();
        let mut shape = Shape {
            name,
            corner_angles,
            corner_angles_deg,
            corner_types: vec![],
            rotational_symmetries: vec![],
            unique_rotations: vec![],
            color_patterns: vec![],
            angle_keys,
        };
        shape.check_angles()?;

        shape.corner_types = map_to_index(&shape.angle_keys);
        shape.rotational_symmetries = shape.compute_rotational_symmetries();
        let n = shape.size();
        shape.unique_rotations = (0..shape.rotational_symmetries.get(1).copied().unwrap_or(n)).collect();
        shape.color_patterns = shape.compute_color_patterns();
        Ok(shape)
    }

    pub fn from_degrees<S: Into<String>>(name: S, corner_angles_deg: &[f64]) -> Result<Shape, ShapeDefinitionError> {
        Shape::new(name, corner_angles_deg.iter().map(|angle| deg2rad(*angle)).collect())
    }

    // from_mixed_angles reads angles greater than DEGREE_THRESHOLD as degrees and all others as radians
    pub fn from_mixed_angles<S: Into<String>>(name: S, angles: &[f64]) -> Result<Shape, ShapeDefinitionError> {
        Shape::new(
            name,
            angles.iter().map(|angle| if *angle > DEGREE_THRESHOLD { deg2rad(*angle) } else { *angle }).collect(),
        )
    }

    // with_color_patterns replaces the computed color patterns
    pub fn with_color_patterns(mut self, color_patterns: Vec<ColorPattern>) -> Shape {
        self.color_patterns = color_patterns;
        self
    }

    pub fn size(&self) -> usize {
        self.corner_angles.len()
    }

    // equal_angles checks whether the other shape has the same angles up to rotation
    pub fn equal_angles(&self, other: &Shape) -> bool {
        is_cyclic_rotation(&self.angle_keys, &other.angle_keys)
    }

    // construct_polygon_xyr places edge 0 horizontally from (x, y) with sides of the given length
    pub fn construct_polygon_xyr(&self, x: f64, y: f64, length: f64) -> Polygon {
        self.construct_polygon_ab(&Point(x, y), &Point(x + length, y), 0)
    }

    pub fn construct_polygon_edge(&self, edge: &Edge, edge_index: usize) -> Polygon {
        self.construct_polygon_ab(edge.a(), edge.b(), edge_index)
    }

    // construct_polygon_ab places vertex edge_index at a and vertex edge_index+1 at b,
    // then walks the remaining vertices counter-clockwise
    pub fn construct_polygon_ab(&self, a: &Point, b: &Point, edge_index: usize) -> Polygon {
        let n = self.size();
        let edge_index = edge_index % n;
        let length = a.distance(b);
        let mut angle = (b - a).arg();
        let mut vertices = vec![Point::default(); n];
        vertices[edge_index] = *a;
        vertices[(edge_index + 1) % n] = *b;
        let mut point = *b;
        for i in 2..n {
            angle += PI - self.corner_angles[(i + edge_index - 1) % n];
            point = &point + &Point(length * angle.cos(), length * angle.sin());
            vertices[(i + edge_index) % n] = point;
        }
        Polygon::new(vertices)
    }

    fn check_angles(&self) -> Result<(), ShapeDefinitionError> {
        let n = self.size();
        if n < 3 {
            return Err(ShapeDefinitionError::TooFewAngles(self.name.clone(), n));
        }
        if self.corner_angles.iter().any(|angle| *angle <= 0.) {
            return Err(ShapeDefinitionError::NonPositiveAngle(self.name.clone()));
        }
        let expected = (n - 2) as f64 * 180.;
        let actual = self.corner_angles_deg.iter().sum::<f64>();
        if (actual - expected).abs() > EPSILON {
            return Err(ShapeDefinitionError::AngleSum { name: self.name.clone(), expected, actual });
        }
        let polygon = self.construct_polygon_ab(&Point(0., 0.), &Point(1., 0.), 0);
        let vertices = polygon.vertices();
        if (vertices[0].distance(&vertices[1]) - vertices[0].distance(&vertices[n - 1])).abs() > EPSILON {
            return Err(ShapeDefinitionError::NotEquilateral(self.name.clone()));
        }
        Ok(())
    }

    fn compute_rotational_symmetries(&self) -> Vec<usize> {
        let n = self.size();
        (0..n)
            .filter(|r| (0..n).all(|i| self.angle_keys[i] == self.angle_keys[(i + r) % n]))
            .collect()
    }

    // compute_color_patterns links runs of `linked` adjacent segments to one color for every divisor
    // of the number of sides, starting the runs at each unique rotation
    fn compute_color_patterns(&self) -> Vec<ColorPattern> {
        let n = self.size();
        let mut color_patterns = vec![];
        for linked in divisors(n) {
            for r in self.unique_rotations.iter().copied() {
                // rotating a single color or all unique colors gives nothing new
                if (linked == 1 || linked == n) && r != 0 {
                    continue;
                }
                let mut segment_colors = vec![0; n];
                for i in 0..n {
                    segment_colors[(i + n - r) % n] = i / linked;
                }
                let variants = self
                    .rotational_symmetries
                    .iter()
                    .map(|rotation| map_to_index(&rotate_array(&segment_colors, *rotation)))
                    .collect::<IndexSet<Vec<usize>>>();
                let pattern = ColorPattern { num_colors: n / linked, segment_colors: variants.into_iter().collect() };
                // runs started `linked` apart color the same segments together
                if !color_patterns.contains(&pattern) {
                    color_patterns.push(pattern);
                }
            }
        }
        color_patterns
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.angle_keys.hash(state);
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.angle_keys == other.angle_keys
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({})",
            self.name,
            self.corner_angles_deg.iter().map(|angle| common::fmt_float(*angle, 0)).collect::<Vec<String>>().join(","),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::approx_eq;
    use std::f64::consts::TAU;

    #[test]
    fn test_shape_square() {
        let square = Shape::from_degrees("square", &[90., 90., 90., 90.]).unwrap();
        assert_eq!(vec![0, 0, 0, 0], square.corner_types);
        assert_eq!(vec![0, 1, 2, 3], square.rotational_symmetries);
        assert_eq!(vec![0], square.unique_rotations);
        approx_eq!(f64, PI / 2., square.corner_angles[0]);
        approx_eq!(f64, 90., square.corner_angles_deg[3]);
        assert_eq!("square(90,90,90,90)", format!("{}", square));
    }

    #[test]
    fn test_shape_rhombus() {
        let rhombus = Shape::from_degrees("rhombus", &[60., 120., 60., 120.]).unwrap();
        assert_eq!(vec![0, 1, 0, 1], rhombus.corner_types);
        assert_eq!(vec![0, 2], rhombus.rotational_symmetries);
        assert_eq!(vec![0, 1], rhombus.unique_rotations);
    }

    #[test]
    fn test_shape_without_symmetry() {
        let trapezoid = Shape::from_degrees("trapezoid", &[60., 180., 60., 120., 120.]).unwrap();
        assert_eq!(vec![0, 1, 0, 2, 2], trapezoid.corner_types);
        assert_eq!(vec![0], trapezoid.rotational_symmetries);
        assert_eq!(vec![0, 1, 2, 3, 4], trapezoid.unique_rotations);
    }

    #[test]
    fn test_shape_mixed_angles() {
        let triangle = Shape::from_mixed_angles("triangle", &[60., PI / 3., 60.]).unwrap();
        for angle in triangle.corner_angles.iter() {
            approx_eq!(f64, PI / 3., *angle);
        }
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            ShapeDefinitionError::TooFewAngles(String::from("line"), 2),
            Shape::from_degrees("line", &[90., 90.]).unwrap_err()
        );
        assert_eq!(
            ShapeDefinitionError::NonPositiveAngle(String::from("bad")),
            Shape::from_degrees("bad", &[0., 90., 90.]).unwrap_err()
        );
        assert!(matches!(
            Shape::from_degrees("bad", &[90., 90., 90.]).unwrap_err(),
            ShapeDefinitionError::AngleSum { .. }
        ));
        assert_eq!(
            ShapeDefinitionError::NotEquilateral(String::from("kite")),
            Shape::from_degrees("kite", &[120., 90., 60., 90.]).unwrap_err()
        );
    }

    #[test]
    fn test_construct_polygon() {
        for (name, angles) in [
            ("triangle", vec![60., 60., 60.]),
            ("square", vec![90., 90., 90., 90.]),
            ("rhombus", vec![60., 120., 60., 120.]),
            ("narrow", vec![36., 144., 36., 144.]),
            ("hexagon", vec![120.; 6]),
        ] {
            let shape = Shape::from_degrees(name, &angles).unwrap();
            for edge_index in 0..shape.size() {
                let polygon = shape.construct_polygon_ab(&Point(1., 2.), &Point(1., 4.), edge_index);
                assert_eq!(Point(1., 2.), polygon.vertices()[edge_index]);
                assert_eq!(Point(1., 4.), polygon.vertices()[(edge_index + 1) % shape.size()]);
                for length in polygon.side_lengths() {
                    approx_eq!(f64, 2., length);
                }
                for (expected, actual) in shape.corner_angles.iter().zip(polygon.angles()) {
                    approx_eq!(f64, *expected, actual);
                }
                approx_eq!(f64, (shape.size() - 2) as f64 * PI, polygon.angles().iter().sum());
                assert!(polygon.signed_area() > 0.);
            }
        }
    }

    #[test]
    fn test_construct_polygon_xyr() {
        let square = Shape::from_degrees("square", &[90.; 4]).unwrap();
        let polygon = square.construct_polygon_xyr(0., 0., 1.);
        assert_eq!(
            vec![Point(0., 0.), Point(1., 0.), Point(1., 1.), Point(0., 1.)],
            polygon.vertices().to_vec()
        );
        let polygon = square.construct_polygon_edge(&Edge(Point(0., 0.), Point(0., 1.)), 2);
        assert_eq!(Point(0., 0.), polygon.vertices()[2]);
        assert_eq!(Point(-1., 1.), polygon.vertices()[0]);
        approx_eq!(f64, TAU / 4., polygon.angle(1));
    }

    #[test]
    fn test_equal_angles() {
        let a = Shape::from_degrees("a", &[60., 120., 60., 120.]).unwrap();
        let b = Shape::from_degrees("b", &[120., 60., 120., 60.]).unwrap();
        let c = Shape::from_degrees("c", &[90., 90., 90., 90.]).unwrap();
        assert!(a.equal_angles(&b));
        assert!(b.equal_angles(&a));
        assert!(!a.equal_angles(&c));
    }

    #[test]
    fn test_color_patterns_square() {
        let square = Shape::from_degrees("square", &[90.; 4]).unwrap();
        assert_eq!(
            vec![
                ColorPattern { num_colors: 4, segment_colors: vec![vec![0, 1, 2, 3]] },
                ColorPattern { num_colors: 2, segment_colors: vec![vec![0, 0, 1, 1], vec![0, 1, 1, 0]] },
                ColorPattern { num_colors: 1, segment_colors: vec![vec![0, 0, 0, 0]] },
            ],
            square.color_patterns
        );
    }

    #[test]
    fn test_color_patterns_rhombus() {
        let rhombus = Shape::from_degrees("rhombus", &[60., 120., 60., 120.]).unwrap();
        assert_eq!(
            vec![
                ColorPattern { num_colors: 4, segment_colors: vec![vec![0, 1, 2, 3]] },
                ColorPattern { num_colors: 2, segment_colors: vec![vec![0, 0, 1, 1]] },
                ColorPattern { num_colors: 2, segment_colors: vec![vec![0, 1, 1, 0]] },
                ColorPattern { num_colors: 1, segment_colors: vec![vec![0, 0, 0, 0]] },
            ],
            rhombus.color_patterns
        );
    }

    #[test]
    fn test_color_patterns_without_symmetry() {
        let hexagon = Shape::from_degrees("hexagon", &[60., 120., 120., 120., 120., 180.]).unwrap();
        assert_eq!(6, hexagon.unique_rotations.len());
        let patterns = hexagon.color_patterns.iter().map(|p| p.segment_colors.clone()).collect::<Vec<_>>();
        // pairs and triples of adjacent segments, starting at every corner that gives a new grouping
        assert_eq!(
            vec![
                vec![vec![0, 1, 2, 3, 4, 5]],
                vec![vec![0, 0, 1, 1, 2, 2]],
                vec![vec![0, 1, 1, 2, 2, 0]],
                vec![vec![0, 0, 0, 1, 1, 1]],
                vec![vec![0, 0, 1, 1, 1, 0]],
                vec![vec![0, 1, 1, 1, 0, 0]],
                vec![vec![0, 0, 0, 0, 0, 0]],
            ],
            patterns
        );
        assert!(hexagon.color_patterns.iter().all(|p| p.segment_colors.len() == 1));
    }

    #[test]
    fn test_color_pattern_from_definition() {
        let pattern = ColorPattern::from_definition(3, &[vec![0, 0, 1], vec![0, 1, 0], vec![1, 0, 0]]).unwrap();
        assert_eq!(2, pattern.num_colors);
        assert_eq!(3, pattern.segment_colors.len());

        for invalid in [
            vec![vec![0, 1]],
            vec![vec![0, 1, 2], vec![0, 0, 1]],
            vec![vec![0, 2, 2]],
            vec![],
        ] {
            assert!(matches!(
                ColorPattern::from_definition(3, &invalid),
                Err(DefinitionError::InvalidColorPattern(_))
            ));
        }
    }
}
