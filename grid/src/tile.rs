use crate::{
    color::Color,
    ids::{EdgeId, SegmentId, TileId, VertexId},
};
use atlas::Shape;
use geometry::{BBox, Point, Polygon};
use std::sync::Arc;

// TileSegment is the triangle between one tile edge and the tile centroid
#[derive(Clone, Debug)]
pub struct TileSegment {
    pub id: SegmentId,
    pub polygon: Polygon,
    pub color: Option<Color>,
}

// Tile is a shape placed on the grid. Vertex i and edge i of the tile follow vertex i and edge i of its polygon.
#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub shape: Arc<Shape>,
    pub polygon: Polygon,
    pub segments: Vec<TileSegment>,
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
}

impl Tile {
    pub(crate) fn new(id: TileId, shape: Arc<Shape>, polygon: Polygon) -> Tile {
        let segments = polygon
            .segment()
            .into_iter()
            .enumerate()
            .map(|(index, polygon)| TileSegment { id: SegmentId::new(id, index), polygon, color: None })
            .collect();
        Tile { id, shape, polygon, segments, vertices: vec![], edges: vec![] }
    }

    pub fn size(&self) -> usize {
        self.polygon.size()
    }

    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    pub fn centroid(&self) -> Point {
        self.polygon.centroid()
    }

    pub fn bbox(&self) -> BBox {
        self.polygon.bbox()
    }

    pub fn segment(&self, index: usize) -> Option<&TileSegment> {
        self.segments.get(index)
    }

    // colors returns the segment colors, or None while any segment is uncolored
    pub fn colors(&self) -> Option<Vec<Color>> {
        self.segments.iter().map(|segment| segment.color.clone()).collect()
    }

    pub fn is_colored(&self) -> bool {
        self.segments.iter().all(|segment| segment.color.is_some())
    }
}
