use crate::{region::ScoredRegion, scorer::Scorer};
use grid::{Grid, SegmentId, TileId};

// FullTileScorer gives one point for every placed tile, whatever its colors
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FullTileScorer;

impl Scorer for FullTileScorer {
    fn compute_scores(&self, grid: &Grid, tile: TileId, _include_incomplete: bool) -> Vec<ScoredRegion> {
        let placed = match grid.tile(tile) {
            Some(placed) => placed,
            None => return vec![],
        };
        let origin = SegmentId::new(tile, 0);
        vec![ScoredRegion {
            origin,
            color: grid.segment_color(origin).cloned(),
            tiles: [tile].into_iter().collect(),
            segments: (0..placed.size()).map(|index| SegmentId::new(tile, index)).collect(),
            edges: placed.polygon.edges().to_vec(),
            finished: true,
            points: 1,
        }]
    }
}
