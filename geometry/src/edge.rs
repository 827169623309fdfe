use crate::point::Point;

// Edge is a directed line segment from .0 to .1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge(pub Point, pub Point);

impl Edge {
    pub fn a(&self) -> &Point {
        &self.0
    }

    pub fn b(&self) -> &Point {
        &self.1
    }

    // angle returns the angle of the edge relative to the x axis, in (-PI, PI]
    pub fn angle(&self) -> f64 {
        (self.1 - self.0).arg()
    }

    pub fn length(&self) -> f64 {
        self.0.distance(&self.1)
    }

    pub fn midpoint(&self) -> Point {
        self.0.midpoint(&self.1)
    }

    pub fn reversed(&self) -> Edge {
        Edge(self.1, self.0)
    }

    // crosses reports whether the two edges intersect in a single point strictly inside both,
    // so edges that only touch at an endpoint or run along each other do not cross
    pub fn crosses(&self, other: &Edge, margin: f64) -> bool {
        let d1 = orientation(&other.0, &other.1, &self.0);
        let d2 = orientation(&other.0, &other.1, &self.1);
        let d3 = orientation(&self.0, &self.1, &other.0);
        let d4 = orientation(&self.0, &self.1, &other.1);
        if d1.abs() < margin || d2.abs() < margin || d3.abs() < margin || d4.abs() < margin {
            return false;
        }
        (d1 > 0.) != (d2 > 0.) && (d3 > 0.) != (d4 > 0.)
    }
}

// orientation is positive when c lies to the left of the line a->b
fn orientation(a: &Point, b: &Point, c: &Point) -> f64 {
    (b - a).cross(&(c - a))
}
