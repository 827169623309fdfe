use crate::{
    region::{boundary_edges, ScoredRegion},
    scorer::Scorer,
};
use common::wrap_index;
use grid::{Grid, SegmentId, TileId};
use indexmap::IndexSet;

// FullVertexScorer scores every vertex of the placed tile once tile corners surround it.
// A vertex is worth one point per corner, that is half the segments touching it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FullVertexScorer;

impl Scorer for FullVertexScorer {
    fn compute_scores(&self, grid: &Grid, tile: TileId, include_incomplete: bool) -> Vec<ScoredRegion> {
        let placed = match grid.tile(tile) {
            Some(placed) => placed,
            None => return vec![],
        };
        let origin = SegmentId::new(tile, 0);
        let color = grid.segment_color(origin).cloned();

        placed
            .vertices
            .iter()
            .filter_map(|vertex_id| grid.vertex(*vertex_id))
            .filter(|vertex| include_incomplete || vertex.is_complete())
            .map(|vertex| {
                let finished = vertex.is_complete();
                let mut tiles: IndexSet<TileId> = IndexSet::new();
                let mut segments: IndexSet<SegmentId> = IndexSet::new();
                for corner in vertex.corners.iter() {
                    let size = grid.tile(corner.tile).map_or(0, |tile| tile.size());
                    if size == 0 {
                        continue;
                    }
                    tiles.insert(corner.tile);
                    segments.insert(SegmentId::new(corner.tile, corner.vertex_index));
                    segments.insert(SegmentId::new(corner.tile, wrap_index(size, corner.vertex_index, -1)));
                }
                let edges = boundary_edges(grid, &segments);
                let points = if finished { segments.len() / 2 } else { 0 };
                ScoredRegion { origin, color: color.clone(), tiles, segments, edges, finished, points }
            })
            .collect()
    }
}
