use crate::{
    region::{boundary_edges, ScoredRegion},
    scorer::Scorer,
};
use grid::{Grid, SegmentId, TileId};
use indexmap::IndexSet;
use log::trace;
use std::collections::{HashSet, VecDeque};

// regions larger than this are worth double
pub const BONUS_THRESHOLD: usize = 3;

// ConnectedSegmentScorer scores the same colored regions reaching the placed tile.
// A region is finished when none of its segments borders empty space or a tile that is still uncolored.
// With open_boundary unset the outer boundary of the grid counts as a wall instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConnectedSegmentScorer {
    pub open_boundary: bool,
}

impl Default for ConnectedSegmentScorer {
    fn default() -> ConnectedSegmentScorer {
        ConnectedSegmentScorer { open_boundary: true }
    }
}

impl ConnectedSegmentScorer {
    pub fn new(open_boundary: bool) -> ConnectedSegmentScorer {
        ConnectedSegmentScorer { open_boundary }
    }

    // explore floods the region of the origin's color. Segments of other colors across
    // the edges of the placed tile are pushed to origins to be explored themselves.
    fn explore(
        &self,
        grid: &Grid,
        tile: TileId,
        origin: SegmentId,
        visited: &mut HashSet<SegmentId>,
        origins: &mut VecDeque<SegmentId>,
    ) -> Option<ScoredRegion> {
        let color = grid.segment_color(origin)?.clone();
        let mut segments: IndexSet<SegmentId> = IndexSet::new();
        let mut tiles: IndexSet<TileId> = IndexSet::new();
        let mut finished = true;
        let mut queue = VecDeque::from([origin]);
        visited.insert(origin);

        while let Some(current) = queue.pop_front() {
            segments.insert(current);
            tiles.insert(current.tile);
            let neighbors = match grid.segment_neighbors(current) {
                Some(neighbors) => neighbors,
                None => continue,
            };
            if neighbors.across.is_none() && self.open_boundary {
                finished = false;
            }
            for neighbor in neighbors.iter() {
                match grid.segment_color(neighbor) {
                    None => finished = false,
                    Some(neighbor_color) if *neighbor_color == color => {
                        if visited.insert(neighbor) {
                            queue.push_back(neighbor);
                        }
                    }
                    Some(_) => {
                        if current.tile == tile && neighbor.tile != tile && !visited.contains(&neighbor) {
                            origins.push_back(neighbor);
                        }
                    }
                }
            }
        }

        let edges = boundary_edges(grid, &segments);
        let points = if finished { region_points(tiles.len()) } else { 0 };
        Some(ScoredRegion { origin, color: Some(color), tiles, segments, edges, finished, points })
    }
}

// region_points is the score of a finished region spanning size tiles
pub fn region_points(size: usize) -> usize {
    if size > BONUS_THRESHOLD {
        2 * size
    } else {
        size
    }
}

impl Scorer for ConnectedSegmentScorer {
    fn compute_scores(&self, grid: &Grid, tile: TileId, include_incomplete: bool) -> Vec<ScoredRegion> {
        let size = match grid.tile(tile) {
            Some(tile) => tile.size(),
            None => return vec![],
        };
        let mut origins: VecDeque<SegmentId> = (0..size).map(|index| SegmentId::new(tile, index)).collect();
        let mut visited: HashSet<SegmentId> = HashSet::new();
        let mut regions = vec![];

        while let Some(origin) = origins.pop_front() {
            if visited.contains(&origin) {
                continue;
            }
            if let Some(region) = self.explore(grid, tile, origin, &mut visited, &mut origins) {
                trace!(
                    "region from {} of {} tiles, finished {}",
                    origin,
                    region.tiles.len(),
                    region.finished
                );
                regions.push(region);
            }
        }

        regions.into_iter().filter(|region| include_incomplete || region.finished).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::ScorerKind;
    use atlas::squares_atlas;
    use grid::{Color, TileColors};
    use std::sync::Arc;
    use test_log::test;

    // squares_grid lays out a width x height block of unit squares, row by row from the origin
    fn squares_grid(width: usize, height: usize) -> (Grid, Vec<TileId>) {
        let atlas = Arc::new(squares_atlas().unwrap());
        let square = atlas.shapes()[0].clone();
        let mut grid = Grid::new(Some(atlas));
        let mut ids = vec![];
        for y in 0..height {
            for x in 0..width {
                let polygon = square.construct_polygon_xyr(x as f64, y as f64, 1.);
                ids.push(grid.add_tile(square.clone(), polygon).unwrap());
            }
        }
        (grid, ids)
    }

    fn paint(grid: &mut Grid, tile: TileId, colors: &[&str]) {
        let colors = colors.iter().map(|color| Color::from(*color)).collect::<Vec<Color>>();
        grid.set_tile_colors(tile, &TileColors::PerSegment(colors)).unwrap();
    }

    #[test]
    fn test_red_block() {
        let (mut grid, ids) = squares_grid(2, 2);
        for id in ids.iter() {
            grid.set_tile_colors(*id, &TileColors::Uniform(Color::from("red"))).unwrap();
        }
        let regions = ConnectedSegmentScorer::new(false).compute_scores(&grid, ids[3], false);
        assert_eq!(1, regions.len());
        let region = &regions[0];
        assert!(region.finished);
        assert_eq!(4, region.size());
        assert_eq!(16, region.segments.len());
        assert_eq!(8, region.points);
        assert_eq!(Some(Color::from("red")), region.color);
        // the outline of the block
        assert_eq!(8, region.edges.len());
    }

    #[test]
    fn test_open_boundary() {
        let (mut grid, ids) = squares_grid(2, 2);
        for id in ids.iter() {
            grid.set_tile_colors(*id, &TileColors::Uniform(Color::from("red"))).unwrap();
        }
        let scorer = ConnectedSegmentScorer::default();
        assert!(scorer.open_boundary);
        assert!(scorer.compute_scores(&grid, ids[3], false).is_empty());
        let regions = scorer.compute_scores(&grid, ids[3], true);
        assert_eq!(1, regions.len());
        assert!(!regions[0].finished);
        assert_eq!(0, regions[0].points);
        assert_eq!(4, regions[0].size());
    }

    #[test]
    fn test_scorer_kind_leaves_boundary_open() {
        let (mut grid, ids) = squares_grid(2, 1);
        paint(&mut grid, ids[0], &["red", "red", "red", "red"]);
        paint(&mut grid, ids[1], &["blue", "blue", "blue", "blue"]);
        let kind = ScorerKind::ConnectedSegments;
        assert!(kind.compute_scores(&grid, ids[1], false).is_empty());
        let regions = kind.compute_scores(&grid, ids[1], true);
        assert_eq!(2, regions.len());
        assert!(regions.iter().all(|region| !region.finished && region.points == 0));
        // walls around the two tiles close both regions
        assert_eq!(2, ConnectedSegmentScorer::new(false).compute_scores(&grid, ids[1], false).len());
    }

    #[test]
    fn test_closed_grid_interior() {
        // the middle tile of a 3x3 block has a tile across every edge
        let (mut grid, ids) = squares_grid(3, 3);
        for id in ids.iter() {
            paint(&mut grid, *id, &["blue", "blue", "blue", "blue"]);
        }
        paint(&mut grid, ids[4], &["red", "red", "red", "red"]);
        let regions = ConnectedSegmentScorer::default().compute_scores(&grid, ids[4], true);
        let red = regions.iter().find(|region| region.color == Some(Color::from("red"))).unwrap();
        assert!(red.finished);
        assert_eq!(1, red.points);
        let blue = regions.iter().find(|region| region.color == Some(Color::from("blue"))).unwrap();
        assert!(!blue.finished);
        assert_eq!(8, blue.size());
    }

    #[test]
    fn test_uncolored_neighbor_opens_region() {
        let (mut grid, ids) = squares_grid(3, 1);
        grid.set_tile_colors(ids[0], &TileColors::Uniform(Color::from("red"))).unwrap();
        grid.set_tile_colors(ids[1], &TileColors::Uniform(Color::from("red"))).unwrap();
        let scorer = ConnectedSegmentScorer::new(false);
        assert!(scorer.compute_scores(&grid, ids[1], false).is_empty());

        let regions = scorer.compute_scores(&grid, ids[1], true);
        assert_eq!(1, regions.len());
        assert!(!regions[0].finished);
        assert_eq!(2, regions[0].size());

        grid.set_tile_colors(ids[2], &TileColors::Uniform(Color::from("red"))).unwrap();
        let regions = scorer.compute_scores(&grid, ids[2], false);
        assert_eq!(1, regions.len());
        assert_eq!(3, regions[0].points);
    }

    #[test]
    fn test_regions_of_placed_tile() {
        let (mut grid, ids) = squares_grid(2, 1);
        // the left tile is blue on its right segment, the right tile matches it on its left segment
        paint(&mut grid, ids[0], &["red", "blue", "red", "red"]);
        paint(&mut grid, ids[1], &["green", "green", "green", "blue"]);
        let regions = ConnectedSegmentScorer::new(false).compute_scores(&grid, ids[1], false);
        assert_eq!(2, regions.len());

        let green = regions.iter().find(|region| region.color == Some(Color::from("green"))).unwrap();
        assert_eq!(3, green.segments.len());
        assert_eq!(1, green.points);

        let blue = regions.iter().find(|region| region.color == Some(Color::from("blue"))).unwrap();
        assert_eq!(2, blue.segments.len());
        assert_eq!(2, blue.points);
    }

    #[test]
    fn test_neighbor_regions_closed_by_placement() {
        let (mut grid, ids) = squares_grid(2, 1);
        paint(&mut grid, ids[0], &["red", "red", "red", "red"]);
        let scorer = ConnectedSegmentScorer::new(false);
        // the red tile is still next to an uncolored tile
        assert!(scorer.compute_scores(&grid, ids[0], false).is_empty());

        paint(&mut grid, ids[1], &["blue", "blue", "blue", "blue"]);
        let regions = scorer.compute_scores(&grid, ids[1], false);
        assert_eq!(2, regions.len());
        assert_eq!(Some(Color::from("blue")), regions[0].color);
        assert_eq!(Some(Color::from("red")), regions[1].color);
        assert_eq!(SegmentId::new(ids[0], 1), regions[1].origin);
        assert!(regions.iter().all(|region| region.finished && region.points == 1));
    }

    #[test]
    fn test_region_points() {
        assert_eq!(1, region_points(1));
        assert_eq!(3, region_points(3));
        assert_eq!(8, region_points(4));
        assert_eq!(20, region_points(10));
    }

    #[test]
    fn test_unknown_tile() {
        let (grid, _) = squares_grid(1, 1);
        assert!(ConnectedSegmentScorer::new(false).compute_scores(&grid, TileId(7), true).is_empty());
    }
}
