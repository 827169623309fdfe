use geometry::Edge;
use grid::{Color, Grid, SegmentId, TileId};
use indexmap::IndexSet;

// ScoredRegion is a set of segments found by a scorer from the last placed tile
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredRegion {
    pub origin: SegmentId,
    pub color: Option<Color>,
    pub tiles: IndexSet<TileId>,
    pub segments: IndexSet<SegmentId>,
    // edges outline the region, each running along a segment side that borders no segment of the region
    pub edges: Vec<Edge>,
    pub finished: bool,
    pub points: usize,
}

impl ScoredRegion {
    pub fn size(&self) -> usize {
        self.tiles.len()
    }
}

// boundary_edges returns the sides of the segments that face no other segment of the set.
// Segment i of a tile is the triangle (v[i], v[i+1], centroid).
pub fn boundary_edges(grid: &Grid, segments: &IndexSet<SegmentId>) -> Vec<Edge> {
    let mut edges = vec![];
    for id in segments.iter() {
        let (tile, neighbors) = match (grid.tile(id.tile), grid.segment_neighbors(*id)) {
            (Some(tile), Some(neighbors)) => (tile, neighbors),
            _ => continue,
        };
        let edge = tile.polygon.edges()[id.index];
        let centroid = tile.centroid();
        if !segments.contains(&neighbors.prev) {
            edges.push(Edge(centroid, edge.0));
        }
        if !neighbors.across.map_or(false, |across| segments.contains(&across)) {
            edges.push(edge);
        }
        if !segments.contains(&neighbors.next) {
            edges.push(Edge(edge.1, centroid));
        }
    }
    edges
}
