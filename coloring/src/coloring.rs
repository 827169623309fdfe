use crate::{error::ColoringError, rules::RuleSet};
use atlas::{Atlas, ColorPattern, Shape};
use grid::{Color, Grid, SegmentId, TileColors};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace, warn};
use random::{select_random, shuffle, Prng};
use std::{collections::HashMap, sync::Arc};

pub type ColorPatternsByShape = IndexMap<Arc<Shape>, Vec<ColorPattern>>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GroupId(pub usize);

// color_patterns_of lists the color patterns of every shape of the atlas
pub fn color_patterns_of(atlas: &Atlas) -> ColorPatternsByShape {
    atlas.shapes().iter().map(|shape| (shape.clone(), shape.color_patterns.clone())).collect()
}

// single_color_patterns gives every shape of the atlas only the pattern that colors the whole tile alike
pub fn single_color_patterns(atlas: &Atlas) -> ColorPatternsByShape {
    atlas.shapes().iter().map(|shape| (shape.clone(), vec![ColorPattern::single(shape.size())])).collect()
}

// GridColoring partitions the segments of a grid into groups that must share a color,
// with conflicts between groups that must not
#[derive(Clone, Debug, Default)]
pub struct GridColoring {
    groups: IndexMap<GroupId, IndexSet<SegmentId>>,
    segment_to_group: HashMap<SegmentId, GroupId>,
    conflicts: IndexMap<GroupId, IndexSet<GroupId>>,
    next_group: usize,
}

impl GridColoring {
    // new groups the segments of the grid, in tile placement order, by the constraints of the rules
    pub fn new<R: RuleSet + ?Sized>(grid: &Grid, rules: &R) -> GridColoring {
        let mut coloring = GridColoring::default();
        for tile in grid.tiles() {
            for segment in tile.segments.iter() {
                let constraints = rules.compute_color_constraints(grid, segment.id);

                let mut main_group = coloring.group_of(segment.id);
                let mut new_segments = if main_group.is_some() { vec![] } else { vec![segment.id] };
                for other in constraints.same {
                    match (coloring.group_of(other), main_group) {
                        (None, _) => new_segments.push(other),
                        (Some(group), Some(main)) if group != main => coloring.merge_groups(main, group),
                        (Some(group), None) => main_group = Some(group),
                        _ => {}
                    }
                }
                let main_group = match main_group {
                    Some(group) => group,
                    None => coloring.new_group(),
                };
                for other in new_segments {
                    coloring.add_to_group(main_group, other);
                }

                for other in constraints.different {
                    let group = match coloring.group_of(other) {
                        Some(group) => group,
                        None => {
                            let group = coloring.new_group();
                            coloring.add_to_group(group, other);
                            group
                        }
                    };
                    coloring.add_conflict(main_group, group);
                }
            }
        }
        debug!(
            "grouped {} segments into {} groups with {} conflicts",
            coloring.segment_to_group.len(),
            coloring.groups.len(),
            coloring.conflict_count()
        );
        coloring
    }

    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &IndexSet<SegmentId>)> {
        self.groups.iter().map(|(id, segments)| (*id, segments))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, id: GroupId) -> Option<&IndexSet<SegmentId>> {
        self.groups.get(&id)
    }

    pub fn group_of(&self, segment: SegmentId) -> Option<GroupId> {
        self.segment_to_group.get(&segment).copied()
    }

    pub fn conflicts(&self, id: GroupId) -> impl Iterator<Item = GroupId> + '_ {
        self.conflicts.get(&id).into_iter().flatten().copied()
    }

    // conflict_count counts every conflicting pair once
    pub fn conflict_count(&self) -> usize {
        self.conflicts.values().map(IndexSet::len).sum::<usize>() / 2
    }

    // apply_color_pattern draws a random pattern and rotation for every tile and merges the groups of
    // segments that the pattern gives one color. With unique_tile_colors the remaining groups of
    // each tile conflict with each other.
    pub fn apply_color_pattern<R: Prng + ?Sized>(
        &mut self,
        grid: &Grid,
        patterns: &ColorPatternsByShape,
        unique_tile_colors: bool,
        rng: &mut R,
    ) -> Result<(), ColoringError> {
        for tile in grid.tiles() {
            let options = patterns.get(tile.shape.as_ref()).map(Vec::as_slice).unwrap_or_default();
            if options.is_empty() {
                return Err(ColoringError::MissingColorPattern(tile.shape.name.clone()));
            }
            let mut variants = options.iter().flat_map(|pattern| pattern.segment_colors.iter());
            if let Some(colors) = variants.find(|colors| colors.len() != tile.size()) {
                return Err(ColoringError::PatternSize {
                    shape: tile.shape.name.clone(),
                    expected: tile.size(),
                    actual: colors.len(),
                });
            }
            if let Some(segment) = tile.segments.iter().find(|segment| self.group_of(segment.id).is_none()) {
                return Err(ColoringError::UnknownSegment(segment.id));
            }
        }

        for tile in grid.tiles() {
            let options = patterns.get(tile.shape.as_ref()).map(Vec::as_slice).unwrap_or_default();
            let (pattern, segment_colors) = match select_random(options, rng.next_f64())
                .and_then(|pattern| Some((pattern, select_random(&pattern.segment_colors, rng.next_f64())?)))
            {
                Some(choice) => choice,
                None => continue,
            };
            trace!("{} takes color pattern {:?}", tile.id, segment_colors);

            if pattern.num_colors < segment_colors.len() {
                for color in 0..pattern.num_colors {
                    let mut main_group = None;
                    for (index, _) in segment_colors.iter().enumerate().filter(|(_, c)| **c == color) {
                        let group = match self.group_of(SegmentId::new(tile.id, index)) {
                            Some(group) => group,
                            None => continue,
                        };
                        match main_group {
                            None => main_group = Some(group),
                            Some(main) if main != group => self.merge_groups(main, group),
                            _ => {}
                        }
                    }
                }
            }

            if unique_tile_colors {
                let groups =
                    tile.segments.iter().filter_map(|segment| self.group_of(segment.id)).collect::<IndexSet<GroupId>>();
                for (i, a) in groups.iter().enumerate() {
                    for b in groups.iter().skip(i + 1) {
                        self.add_conflict(*a, *b);
                    }
                }
            }
        }
        debug!("color patterns left {} groups with {} conflicts", self.groups.len(), self.conflict_count());
        Ok(())
    }

    // assign_colors gives every group, in creation order, the first color of a freshly shuffled palette
    // that no conflicting group already has, and writes the colors to the tiles. Returns None when some
    // group has no color left; there is no backtracking.
    pub fn assign_colors<R: Prng + ?Sized>(
        &self,
        grid: &mut Grid,
        palette: &[Color],
        rng: &mut R,
    ) -> Option<IndexMap<GroupId, Color>> {
        let mut colors = palette.to_vec();
        let mut assignment: IndexMap<GroupId, Color> = IndexMap::with_capacity(self.groups.len());
        for group in self.groups.keys() {
            shuffle(&mut colors, rng);
            let color = colors
                .iter()
                .find(|color| self.conflicts(*group).all(|other| assignment.get(&other) != Some(*color)));
            match color {
                Some(color) => {
                    assignment.insert(*group, color.clone());
                }
                None => {
                    debug!("no color left for group {:?} after {} groups", group, assignment.len());
                    return None;
                }
            }
        }

        let tile_colors = grid
            .tiles()
            .map(|tile| {
                let colors = tile
                    .segments
                    .iter()
                    .map(|segment| self.group_of(segment.id).and_then(|group| assignment.get(&group)).cloned())
                    .collect::<Option<Vec<Color>>>();
                (tile.id, colors)
            })
            .collect::<Vec<_>>();
        for (tile, colors) in tile_colors {
            match colors {
                Some(colors) => {
                    if let Err(err) = grid.set_tile_colors(tile, &TileColors::PerSegment(colors)) {
                        warn!("could not color {}: {}", tile, err);
                    }
                }
                None => warn!("{} has segments without a color group", tile),
            }
        }
        Some(assignment)
    }

    fn new_group(&mut self) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        self.groups.insert(id, IndexSet::new());
        id
    }

    fn add_to_group(&mut self, group: GroupId, segment: SegmentId) {
        self.groups.entry(group).or_default().insert(segment);
        self.segment_to_group.insert(segment, group);
    }

    // merge_groups moves the members and conflicts of other into target and drops other
    fn merge_groups(&mut self, target: GroupId, other: GroupId) {
        if target == other {
            return;
        }
        let members = self.groups.shift_remove(&other).unwrap_or_default();
        for segment in members {
            self.add_to_group(target, segment);
        }
        for conflict in self.conflicts.shift_remove(&other).unwrap_or_default() {
            if let Some(conflicts) = self.conflicts.get_mut(&conflict) {
                conflicts.shift_remove(&other);
            }
            if conflict == target {
                trace!("merged conflicting groups {:?} and {:?}", target, other);
                continue;
            }
            self.add_conflict(target, conflict);
        }
    }

    fn add_conflict(&mut self, a: GroupId, b: GroupId) {
        if a == b {
            return;
        }
        self.conflicts.entry(a).or_default().insert(b);
        self.conflicts.entry(b).or_default().insert(a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{DifferentEdgeColorsRuleSet, MatchEdgeColorsRuleSet, RuleSetKind};
    use atlas::{squares_atlas, triangles_atlas};
    use grid::{CentricGridBuilder, GridBuilder, TileId};
    use random::SeededRandom;
    use test_log::test;

    // 2x2 block of squares: a b on the bottom row, c d on the top row
    fn block() -> (Grid, Vec<TileId>) {
        let atlas = Arc::new(squares_atlas().unwrap());
        let square = atlas.shapes()[0].clone();
        let mut grid = Grid::new(Some(atlas));
        let tiles = [(0., 0.), (1., 0.), (0., 1.), (1., 1.)]
            .iter()
            .map(|(x, y)| grid.add_tile(square.clone(), square.construct_polygon_xyr(*x, *y, 1.)).unwrap())
            .collect();
        (grid, tiles)
    }

    fn palette(names: &[&str]) -> Vec<Color> {
        names.iter().map(|name| Color::from(*name)).collect()
    }

    #[test]
    fn test_group_match_edge_colors() {
        let (grid, tiles) = block();
        let coloring = GridColoring::new(&grid, &MatchEdgeColorsRuleSet);
        // four shared edges join pairs, eight outer segments stay alone
        assert_eq!(12, coloring.group_count());
        assert_eq!(0, coloring.conflict_count());
        let group = coloring.group_of(SegmentId::new(tiles[0], 1)).unwrap();
        assert_eq!(Some(group), coloring.group_of(SegmentId::new(tiles[1], 3)));
        assert_eq!(2, coloring.group(group).unwrap().len());
    }

    #[test]
    fn test_group_different_edge_colors() {
        let (grid, tiles) = block();
        let coloring = GridColoring::new(&grid, &DifferentEdgeColorsRuleSet);
        assert_eq!(16, coloring.group_count());
        assert_eq!(4, coloring.conflict_count());
        let a = coloring.group_of(SegmentId::new(tiles[0], 1)).unwrap();
        let b = coloring.group_of(SegmentId::new(tiles[1], 3)).unwrap();
        assert_eq!(vec![b], coloring.conflicts(a).collect::<Vec<GroupId>>());
        assert_eq!(vec![a], coloring.conflicts(b).collect::<Vec<GroupId>>());
    }

    #[test]
    fn test_single_color_patterns_merge() {
        let (grid, _) = block();
        let atlas = grid.atlas().unwrap().clone();
        let mut coloring = GridColoring::new(&grid, &MatchEdgeColorsRuleSet);
        coloring.apply_color_pattern(&grid, &single_color_patterns(&atlas), false, &mut SeededRandom::new(1)).unwrap();
        assert_eq!(1, coloring.group_count());
        assert_eq!(16, coloring.group(coloring.groups().next().unwrap().0).unwrap().len());
    }

    #[test]
    fn test_merge_moves_conflicts() {
        let (mut grid, tiles) = block();
        let atlas = grid.atlas().unwrap().clone();
        let mut coloring = GridColoring::new(&grid, &DifferentEdgeColorsRuleSet);
        coloring.apply_color_pattern(&grid, &single_color_patterns(&atlas), false, &mut SeededRandom::new(1)).unwrap();
        // one group per tile, each conflicting with its two edge neighbors
        assert_eq!(4, coloring.group_count());
        assert_eq!(4, coloring.conflict_count());
        let group = |tile: TileId| coloring.group_of(SegmentId::new(tile, 0)).unwrap();
        let conflicts = coloring.conflicts(group(tiles[0])).collect::<IndexSet<GroupId>>();
        assert!(conflicts.contains(&group(tiles[1])));
        assert!(conflicts.contains(&group(tiles[2])));
        assert!(!conflicts.contains(&group(tiles[3])));

        let colors = palette(&["red", "green", "blue"]);
        let assignment = coloring.assign_colors(&mut grid, &colors, &mut SeededRandom::new(5)).unwrap();
        assert_eq!(4, assignment.len());
        let color = |tile: TileId| grid.tile_colors(tile).unwrap()[0].clone();
        assert_ne!(color(tiles[0]), color(tiles[1]));
        assert_ne!(color(tiles[0]), color(tiles[2]));
        assert_ne!(color(tiles[3]), color(tiles[1]));
        assert_ne!(color(tiles[3]), color(tiles[2]));
        for tile in tiles {
            assert!(grid.tile_colors(tile).unwrap().iter().all(|c| *c == color(tile)));
        }
    }

    #[test]
    fn test_unique_tile_colors() {
        let (mut grid, _) = block();
        let atlas = grid.atlas().unwrap().clone();
        let distinct = atlas
            .shapes()
            .iter()
            .map(|shape| (shape.clone(), vec![shape.color_patterns[0].clone()]))
            .collect::<ColorPatternsByShape>();
        assert_eq!(4, distinct.get_index(0).unwrap().1[0].num_colors);
        let mut coloring = GridColoring::new(&grid, &MatchEdgeColorsRuleSet);
        coloring.apply_color_pattern(&grid, &distinct, true, &mut SeededRandom::new(2)).unwrap();
        let four = palette(&["red", "green", "blue", "yellow"]);
        let mut rng = SeededRandom::new(3);
        let assignment = (0..20).find_map(|_| coloring.assign_colors(&mut grid, &four, &mut rng));
        assert!(assignment.is_some());
        for tile in grid.tiles() {
            let colors = tile.colors().unwrap().into_iter().collect::<IndexSet<Color>>();
            assert_eq!(4, colors.len());
        }
    }

    #[test]
    fn test_assign_colors_conflict_law() {
        let atlas = Arc::new(triangles_atlas().unwrap());
        let mut grid =
            CentricGridBuilder::default().build_grid(atlas.clone(), 40, &mut SeededRandom::new(8)).unwrap();
        let mut coloring = GridColoring::new(&grid, &RuleSetKind::DifferentEdgeColors);
        coloring.apply_color_pattern(&grid, &color_patterns_of(&atlas), false, &mut SeededRandom::new(9)).unwrap();
        let colors = palette(&["red", "green", "blue", "yellow", "purple"]);
        let mut rng = SeededRandom::new(10);
        let assignment = (0..20).find_map(|_| coloring.assign_colors(&mut grid, &colors, &mut rng)).unwrap();
        for (group, color) in assignment.iter() {
            for other in coloring.conflicts(*group) {
                assert_ne!(Some(color), assignment.get(&other));
            }
        }
    }

    #[test]
    fn test_assign_colors_is_reproducible() {
        let atlas = Arc::new(squares_atlas().unwrap());
        let run = || {
            let mut grid =
                CentricGridBuilder::default().build_grid(atlas.clone(), 100, &mut SeededRandom::new(12345)).unwrap();
            let mut coloring = GridColoring::new(&grid, &DifferentEdgeColorsRuleSet);
            coloring.apply_color_pattern(&grid, &single_color_patterns(&atlas), false, &mut SeededRandom::new(1)).unwrap();
            let colors = palette(&["red", "green", "blue", "yellow"]);
            let assignment = coloring.assign_colors(&mut grid, &colors, &mut SeededRandom::new(2));
            (coloring.group_count(), assignment)
        };
        let (groups, assignment) = run();
        assert_eq!(100, groups);
        assert_eq!((groups, assignment), run());
    }

    #[test]
    fn test_assign_colors_empty_palette() {
        let (mut grid, tiles) = block();
        let coloring = GridColoring::new(&grid, &MatchEdgeColorsRuleSet);
        assert_eq!(None, coloring.assign_colors(&mut grid, &[], &mut SeededRandom::new(1)));
        assert_eq!(None, grid.tile_colors(tiles[0]));
    }

    #[test]
    fn test_missing_color_pattern() {
        let (grid, _) = block();
        let mut coloring = GridColoring::new(&grid, &MatchEdgeColorsRuleSet);
        let result =
            coloring.apply_color_pattern(&grid, &ColorPatternsByShape::new(), false, &mut SeededRandom::new(1));
        assert_eq!(Err(ColoringError::MissingColorPattern(String::from("square"))), result);
        assert_eq!(12, coloring.group_count());
    }
}
