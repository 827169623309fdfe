use crate::point::Point;

// BBox is an axis aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    // from_points returns the smallest box containing every point, or None for an empty slice
    pub fn from_points(points: &[Point]) -> Option<BBox> {
        let first = points.first()?;
        Some(points.iter().skip(1).fold(
            BBox { min_x: first.0, min_y: first.1, max_x: first.0, max_y: first.1 },
            |bbox, point| BBox {
                min_x: bbox.min_x.min(point.0),
                min_y: bbox.min_y.min(point.1),
                max_x: bbox.max_x.max(point.0),
                max_y: bbox.max_y.max(point.1),
            },
        ))
    }

    pub fn merge(&self, other: &BBox) -> BBox {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    // intersects reports whether the boxes share more than a margin wide strip
    pub fn intersects(&self, other: &BBox, margin: f64) -> bool {
        self.min_x < other.max_x - margin
            && other.min_x < self.max_x - margin
            && self.min_y < other.max_y - margin
            && other.min_y < self.max_y - margin
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.min_x <= point.0 && point.0 <= self.max_x && self.min_y <= point.1 && point.1 <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
