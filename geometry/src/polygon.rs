use crate::{bbox::BBox, edge::Edge, point::Point};
use common::rad;
use itertools::Itertools;
use std::sync::OnceLock;

// INSET is the fraction by which vertices are pulled towards the centroid in overlap checks
const INSET: f64 = 1e-3;

// Polygon is an immutable ring of vertices in counter-clockwise order (clockwise on screen).
// Edges, area, centroid and bounding box are computed on first use and cached.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
    edges: OnceLock<Vec<Edge>>,
    outside_edges: OnceLock<Vec<Edge>>,
    area: OnceLock<f64>,
    centroid: OnceLock<Point>,
    bbox: OnceLock<BBox>,
}

impl Polygon {
    pub fn new(mut vertices: Vec<Point>) -> Polygon {
        vertices.shrink_to_fit();
        Polygon {
            vertices,
            edges: OnceLock::new(),
            outside_edges: OnceLock::new(),
            area: OnceLock::new(),
            centroid: OnceLock::new(),
            bbox: OnceLock::new(),
        }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    // edges returns the inside edges, edge i running from vertex i to vertex i+1
    pub fn edges(&self) -> &[Edge] {
        self.edges.get_or_init(|| {
            let n = self.vertices.len();
            (0..n).map(|i| Edge(self.vertices[i], self.vertices[(i + 1) % n])).collect()
        })
    }

    // outside_edges returns the inside edges reversed, edge i running from vertex i+1 to vertex i
    pub fn outside_edges(&self) -> &[Edge] {
        self.outside_edges.get_or_init(|| self.edges().iter().map(Edge::reversed).collect())
    }

    // signed_area is positive for counter-clockwise vertices
    pub fn signed_area(&self) -> f64 {
        self.edges().iter().map(|Edge(p0, p1)| p0.cross(p1)).sum::<f64>() / 2.
    }

    pub fn area(&self) -> f64 {
        *self.area.get_or_init(|| self.signed_area().abs())
    }

    // centroid computes the area centroid of the polygon, falling back to the
    // vertex average for degenerate polygons
    pub fn centroid(&self) -> Point {
        *self.centroid.get_or_init(|| {
            let terms = self
                .edges()
                .iter()
                .map(|Edge(p0, p1)| {
                    let conv = p0.cross(p1);
                    (conv, conv * (p0.0 + p1.0), conv * (p0.1 + p1.1))
                })
                .fold((0., 0., 0.), |(a0, a1, a2), (e0, e1, e2)| (a0 + e0, a1 + e1, a2 + e2));
            let area = terms.0 / 2.;
            if area.abs() < f64::EPSILON {
                let n = self.vertices.len().max(1) as f64;
                let sum = self.vertices.iter().fold(Point(0., 0.), |acc, point| &acc + point);
                return sum.mul(1. / n);
            }
            Point(terms.1 / (6. * area), terms.2 / (6. * area))
        })
    }

    pub fn bbox(&self) -> BBox {
        *self.bbox.get_or_init(|| {
            BBox::from_points(&self.vertices).unwrap_or(BBox { min_x: 0., min_y: 0., max_x: 0., max_y: 0. })
        })
    }

    // angle returns the interior angle in radians at the given vertex
    pub fn angle(&self, index: usize) -> f64 {
        let n = self.vertices.len();
        let point = &self.vertices[index % n];
        let prev = &self.vertices[(index + n - 1) % n];
        let next = &self.vertices[(index + 1) % n];
        rad((prev - point).arg() - (next - point).arg())
    }

    pub fn angles(&self) -> Vec<f64> {
        (0..self.size()).map(|index| self.angle(index)).collect()
    }

    pub fn side_lengths(&self) -> Vec<f64> {
        self.edges().iter().map(Edge::length).collect()
    }

    // segment splits the polygon into one triangle per edge, each connecting the edge to the centroid
    pub fn segment(&self) -> Vec<Polygon> {
        let centroid = self.centroid();
        self.edges()
            .iter()
            .map(|Edge(a, b)| Polygon::new(vec![*a, *b, centroid]))
            .collect()
    }

    // contains determines whether or not the provided point is contained within the polygon
    // https://alienryderflex.com/polygon
    pub fn contains(&self, point: &Point) -> bool {
        let mut odd_nodes = false;
        for Edge(start, stop) in self.edges().iter() {
            if ((stop.1 < point.1 && start.1 >= point.1) || (start.1 < point.1 && stop.1 >= point.1))
                && (start.0 <= point.0 || stop.0 <= point.0)
            {
                odd_nodes ^= (stop.0 + (point.1 - stop.1) / (start.1 - stop.1) * (start.0 - stop.0)) < point.0;
            }
        }
        odd_nodes
    }

    // overlaps reports whether the interiors of the polygons intersect;
    // polygons that only share edges or vertices do not overlap
    pub fn overlaps(&self, other: &Polygon, margin: f64) -> bool {
        if !self.bbox().intersects(&other.bbox(), margin) {
            return false;
        }
        let crossing = self
            .edges()
            .iter()
            .cartesian_product(other.edges().iter())
            .any(|(a, b)| a.crosses(b, margin));
        crossing
            || other.contains(&self.centroid())
            || self.contains(&other.centroid())
            || self.inset_vertices().iter().any(|point| other.contains(point))
            || other.inset_vertices().iter().any(|point| self.contains(point))
    }

    // inset_vertices moves every vertex a small step towards the centroid
    fn inset_vertices(&self) -> Vec<Point> {
        let centroid = self.centroid();
        self.vertices
            .iter()
            .map(|point| Point::weighted_sum(point, &centroid, 1. - INSET, INSET, 1.))
            .collect()
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}
