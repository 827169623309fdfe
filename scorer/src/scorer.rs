use crate::{connected::ConnectedSegmentScorer, full_tile::FullTileScorer, full_vertex::FullVertexScorer, region::ScoredRegion};
use grid::{Grid, TileId};
use serde::{Deserialize, Serialize};

// Scorer finds the regions completed by the last placed tile
pub trait Scorer {
    // compute_scores returns the regions that reach the tile. Unfinished regions are only
    // included when include_incomplete is set, and they are worth no points.
    fn compute_scores(&self, grid: &Grid, tile: TileId, include_incomplete: bool) -> Vec<ScoredRegion>;
}

// ScorerKind selects a scorer by name in game settings
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorerKind {
    #[default]
    ConnectedSegments,
    FullTiles,
    FullVertices,
}

impl Scorer for ScorerKind {
    fn compute_scores(&self, grid: &Grid, tile: TileId, include_incomplete: bool) -> Vec<ScoredRegion> {
        match self {
            ScorerKind::ConnectedSegments => {
                ConnectedSegmentScorer::default().compute_scores(grid, tile, include_incomplete)
            }
            ScorerKind::FullTiles => FullTileScorer.compute_scores(grid, tile, include_incomplete),
            ScorerKind::FullVertices => FullVertexScorer.compute_scores(grid, tile, include_incomplete),
        }
    }
}

// total_points sums the points of the regions
pub fn total_points(regions: &[ScoredRegion]) -> usize {
    regions.iter().map(|region| region.points).sum()
}
