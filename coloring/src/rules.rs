use geometry::Polygon;
use grid::{Color, Grid, SegmentId, TileId};
use serde::{Deserialize, Serialize};

// ColorConstraints lists the segments that must share the color of a segment and those that must not
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorConstraints {
    pub same: Vec<SegmentId>,
    pub different: Vec<SegmentId>,
}

pub trait RuleSet {
    fn compute_color_constraints(&self, grid: &Grid, segment: SegmentId) -> ColorConstraints;

    // check_colors checks whether the tile could take the colors, rotated by offset,
    // next to the colored tiles around it
    fn check_colors(&self, grid: &Grid, tile: TileId, colors: &[Color], offset: usize) -> bool;

    // check_placement checks whether a tile not yet in the grid could take the colors on the polygon
    fn check_placement(&self, grid: &Grid, polygon: &Polygon, colors: &[Color]) -> bool;
}

// MatchEdgeColorsRuleSet requires the segments on both sides of a tile edge to share a color
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchEdgeColorsRuleSet;

// DifferentEdgeColorsRuleSet requires the segments on both sides of a tile edge to differ
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DifferentEdgeColorsRuleSet;

impl RuleSet for MatchEdgeColorsRuleSet {
    fn compute_color_constraints(&self, grid: &Grid, segment: SegmentId) -> ColorConstraints {
        ColorConstraints { same: grid.segment_across(segment).into_iter().collect(), different: vec![] }
    }

    fn check_colors(&self, grid: &Grid, tile: TileId, colors: &[Color], offset: usize) -> bool {
        check_neighbor_colors(grid, &tile_neighbors(grid, tile, offset), colors, |color, neighbor| color == neighbor)
    }

    fn check_placement(&self, grid: &Grid, polygon: &Polygon, colors: &[Color]) -> bool {
        check_neighbor_colors(grid, &grid.polygon_neighbors(polygon), colors, |color, neighbor| color == neighbor)
    }
}

impl RuleSet for DifferentEdgeColorsRuleSet {
    fn compute_color_constraints(&self, grid: &Grid, segment: SegmentId) -> ColorConstraints {
        ColorConstraints { same: vec![], different: grid.segment_across(segment).into_iter().collect() }
    }

    fn check_colors(&self, grid: &Grid, tile: TileId, colors: &[Color], offset: usize) -> bool {
        check_neighbor_colors(grid, &tile_neighbors(grid, tile, offset), colors, |color, neighbor| color != neighbor)
    }

    fn check_placement(&self, grid: &Grid, polygon: &Polygon, colors: &[Color]) -> bool {
        check_neighbor_colors(grid, &grid.polygon_neighbors(polygon), colors, |color, neighbor| color != neighbor)
    }
}

// tile_neighbors lists the segment across edge i - offset of the tile for every i,
// or nothing for an unknown tile
fn tile_neighbors(grid: &Grid, tile: TileId, offset: usize) -> Vec<Option<SegmentId>> {
    let n = grid.tile(tile).map_or(0, |tile| tile.size());
    (0..n).map(|i| grid.segment_across(SegmentId::new(tile, (i + n - offset % n) % n))).collect()
}

// check_neighbor_colors compares colors[i] with the color of neighbors[i] where that segment is colored
fn check_neighbor_colors<F: Fn(&Color, &Color) -> bool>(
    grid: &Grid,
    neighbors: &[Option<SegmentId>],
    colors: &[Color],
    allowed: F,
) -> bool {
    if neighbors.is_empty() || colors.len() != neighbors.len() {
        return false;
    }
    colors.iter().zip(neighbors).all(|(color, neighbor)| {
        match neighbor.and_then(|neighbor| grid.segment_color(neighbor)) {
            Some(neighbor) => allowed(color, neighbor),
            None => true,
        }
    })
}

// RuleSetKind selects a rule set by name in game settings
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSetKind {
    #[default]
    MatchEdgeColors,
    DifferentEdgeColors,
}

impl RuleSet for RuleSetKind {
    fn compute_color_constraints(&self, grid: &Grid, segment: SegmentId) -> ColorConstraints {
        match self {
            RuleSetKind::MatchEdgeColors => MatchEdgeColorsRuleSet.compute_color_constraints(grid, segment),
            RuleSetKind::DifferentEdgeColors => DifferentEdgeColorsRuleSet.compute_color_constraints(grid, segment),
        }
    }

    fn check_colors(&self, grid: &Grid, tile: TileId, colors: &[Color], offset: usize) -> bool {
        match self {
            RuleSetKind::MatchEdgeColors => MatchEdgeColorsRuleSet.check_colors(grid, tile, colors, offset),
            RuleSetKind::DifferentEdgeColors => DifferentEdgeColorsRuleSet.check_colors(grid, tile, colors, offset),
        }
    }

    fn check_placement(&self, grid: &Grid, polygon: &Polygon, colors: &[Color]) -> bool {
        match self {
            RuleSetKind::MatchEdgeColors => MatchEdgeColorsRuleSet.check_placement(grid, polygon, colors),
            RuleSetKind::DifferentEdgeColors => DifferentEdgeColorsRuleSet.check_placement(grid, polygon, colors),
        }
    }
}
