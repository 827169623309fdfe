use crate::ids::{TileId, VertexId};
use atlas::{CornerType, Shape, VertexCorner};
use common::EPSILON;
use geometry::{Point, Polygon};
use std::{f64::consts::TAU, ops::Deref, sync::Arc};

// Corner is the corner of a tile at one grid vertex. It spans counter-clockwise
// from the angle of the tile edge leaving the vertex.
#[derive(Clone, Debug)]
pub struct Corner {
    pub tile: TileId,
    pub vertex_index: usize,
    pub edge_angle: f64,
    pub corner_angle: f64,
    pub shape: Arc<Shape>,
    pub corner_type: CornerType,
}

impl Corner {
    pub fn new(tile: TileId, shape: &Arc<Shape>, polygon: &Polygon, vertex_index: usize) -> Corner {
        Corner {
            tile,
            vertex_index,
            edge_angle: polygon.edges()[vertex_index].angle(),
            corner_angle: shape.corner_angles[vertex_index],
            shape: shape.clone(),
            corner_type: shape.corner_types[vertex_index],
        }
    }

    // end_angle is the angle at which the next corner counter-clockwise should start
    pub fn end_angle(&self) -> f64 {
        self.edge_angle + self.corner_angle
    }
}

impl VertexCorner for Corner {
    fn edge_angle(&self) -> f64 {
        self.edge_angle
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn corner_type(&self) -> CornerType {
        self.corner_type
    }
}

// SortedCorners keeps the corners of a vertex ordered by ascending edge angle
#[derive(Clone, Debug, Default)]
pub struct SortedCorners(Vec<Corner>);

impl SortedCorners {
    pub fn new() -> SortedCorners {
        SortedCorners(vec![])
    }

    // add inserts the corner before the first corner whose edge angle is not smaller
    pub fn add(&mut self, corner: Corner) {
        let index = self.0.iter().position(|other| corner.edge_angle <= other.edge_angle).unwrap_or(self.0.len());
        self.0.insert(index, corner);
    }

    // remove_tile drops every corner of the tile and returns how many were dropped
    pub fn remove_tile(&mut self, tile: TileId) -> usize {
        let before = self.0.len();
        self.0.retain(|corner| corner.tile != tile);
        before - self.0.len()
    }

    pub fn find(&self, tile: TileId) -> Option<&Corner> {
        self.0.iter().find(|corner| corner.tile == tile)
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        self.0.iter().map(|corner| corner.tile)
    }

    pub fn total_angle(&self) -> f64 {
        self.0.iter().map(|corner| corner.corner_angle).sum()
    }

    // is_complete checks whether the corners fill the full turn around the vertex
    pub fn is_complete(&self) -> bool {
        (self.total_angle() - TAU).abs() < EPSILON
    }

    pub fn as_slice(&self) -> &[Corner] {
        &self.0
    }

    // with_corner returns a copy of the corners with one more corner added
    pub fn with_corner(&self, corner: Corner) -> SortedCorners {
        let mut corners = self.clone();
        corners.add(corner);
        corners
    }
}

impl Deref for SortedCorners {
    type Target = [Corner];

    fn deref(&self) -> &[Corner] {
        &self.0
    }
}

// GridVertex is a point of the grid where tile corners meet
#[derive(Clone, Debug)]
pub struct GridVertex {
    pub id: VertexId,
    pub point: Point,
    pub corners: SortedCorners,
}

impl GridVertex {
    pub(crate) fn new(id: VertexId, point: Point) -> GridVertex {
        GridVertex { id, point, corners: SortedCorners::new() }
    }

    pub fn is_complete(&self) -> bool {
        self.corners.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{approx_eq, deg2rad};

    fn square() -> Arc<Shape> {
        Arc::new(Shape::from_degrees("square", &[90.; 4]).unwrap())
    }

    #[test]
    fn test_corner_new() {
        let square = square();
        let polygon = square.construct_polygon_xyr(0., 0., 1.);
        let corner = Corner::new(TileId(0), &square, &polygon, 1);
        approx_eq!(f64, deg2rad(90.), corner.edge_angle);
        approx_eq!(f64, deg2rad(90.), corner.corner_angle);
        approx_eq!(f64, deg2rad(180.), corner.end_angle());
    }

    #[test]
    fn test_sorted_corners() {
        let square = square();
        // the four squares around the origin
        let polygons = [(0., 0.), (-1., 0.), (-1., -1.), (0., -1.)]
            .iter()
            .map(|(x, y)| square.construct_polygon_xyr(*x, *y, 1.))
            .collect::<Vec<Polygon>>();
        let vertex_indices = [0, 1, 2, 3];
        let mut corners = SortedCorners::new();
        for (i, (polygon, vertex_index)) in polygons.iter().zip(vertex_indices.iter()).enumerate() {
            assert!(polygon.vertices()[*vertex_index].distance(&Point(0., 0.)) < 1e-9);
            corners.add(Corner::new(TileId(i), &square, polygon, *vertex_index));
        }
        assert_eq!(4, corners.len());
        assert!(corners.windows(2).all(|w| w[0].edge_angle <= w[1].edge_angle));
        assert!(corners.is_complete());
        assert_eq!(Some(2), corners.find(TileId(2)).map(|corner| corner.vertex_index));

        assert_eq!(1, corners.remove_tile(TileId(2)));
        assert_eq!(0, corners.remove_tile(TileId(2)));
        assert!(!corners.is_complete());
        assert_eq!(vec![TileId(3), TileId(0), TileId(1)], corners.tiles().collect::<Vec<TileId>>());
    }
}
