use std::sync::Arc;
use test_log::test;
use tiling::{
    atlas::{Atlas, BuiltinAtlas},
    coloring::{single_color_patterns, GridColoring, RuleSetKind},
    geometry::Point,
    grid::{CentricGridBuilder, Color, Grid, GridBuilder, TileColors, TileId},
    random::SeededRandom,
    scorer::{ConnectedSegmentScorer, Scorer},
    Game, GameError,
};

fn build(atlas: &Arc<Atlas>, number_of_tiles: usize, seed: u32) -> Grid {
    CentricGridBuilder::default().build_grid(atlas.clone(), number_of_tiles, &mut SeededRandom::new(seed)).unwrap()
}

#[test]
fn squares_group_count_is_reproducible() {
    let atlas = Arc::new(BuiltinAtlas::Squares.build().unwrap());
    let group_count = || {
        let grid = build(&atlas, 100, 12345);
        assert_eq!(100, grid.tile_count());
        let mut coloring = GridColoring::new(&grid, &RuleSetKind::MatchEdgeColors);
        coloring.apply_color_pattern(&grid, &single_color_patterns(&atlas), false, &mut SeededRandom::new(12345)).unwrap();
        coloring.group_count()
    };
    let first = group_count();
    assert_eq!(first, group_count());
    // every tile is one color and neighbors match, so the connected grid is a single group
    assert_eq!(1, first);
}

#[test]
fn grown_grids_match_their_atlas() {
    for builtin in BuiltinAtlas::ALL.iter() {
        let atlas = Arc::new(builtin.build().unwrap());
        let grid = build(&atlas, 25, 42);
        assert!(grid.tile_count() <= 25, "{:?}", builtin);
        for vertex in grid.vertices() {
            assert!(atlas.check_match(vertex.corners.as_slice()), "{:?} at {}", builtin, vertex.point);
        }
    }
}

#[test]
fn trapezoids_grow_in_every_rotation() {
    let atlas = Arc::new(Atlas::from_json(r#"{ "shapes": { "T": { "angles": [60, 180, 60, 120, 120] } } }"#).unwrap());
    assert_eq!(vec![0, 1, 2, 3, 4], atlas.shapes()[0].unique_rotations);
    let grid = build(&atlas, 30, 3);
    assert!(grid.tile_count() > 1 && grid.tile_count() <= 30);
    for vertex in grid.vertices() {
        assert!(atlas.check_match(vertex.corners.as_slice()), "at {}", vertex.point);
    }
    // a trapezoid can turn any of its edges onto an open edge
    let most = grid.frontier().iter().map(|edge_id| grid.compute_possibilities(*edge_id).len()).max();
    assert!(most.unwrap_or_default() > 1);
}

#[test]
fn assigned_colors_respect_conflicts() {
    let atlas = Arc::new(BuiltinAtlas::SnubSquare.build().unwrap());
    let palette = ["a", "b", "c", "d", "e", "f"].iter().map(|c| Color::from(*c)).collect::<Vec<Color>>();
    for seed in 1..6 {
        let mut grid = build(&atlas, 30, seed);
        let mut coloring = GridColoring::new(&grid, &RuleSetKind::DifferentEdgeColors);
        let patterns = single_color_patterns(&atlas);
        coloring.apply_color_pattern(&grid, &patterns, false, &mut SeededRandom::new(seed)).unwrap();
        if let Some(assignment) = coloring.assign_colors(&mut grid, &palette, &mut SeededRandom::new(seed)) {
            for (group, color) in assignment.iter() {
                for other in coloring.conflicts(*group) {
                    assert_ne!(Some(color), assignment.get(&other));
                }
            }
        }
    }
}

#[test]
fn red_block_scores_eight() {
    let atlas = Arc::new(BuiltinAtlas::Squares.build().unwrap());
    let square = atlas.shapes()[0].clone();
    let mut grid = Grid::new(Some(atlas));
    let mut last = TileId(0);
    for (x, y) in [(0., 0.), (1., 0.), (0., 1.), (1., 1.)] {
        last = grid.add_tile(square.clone(), square.construct_polygon_xyr(x, y, 1.)).unwrap();
        grid.set_tile_colors(last, &TileColors::Uniform(Color::from("red"))).unwrap();
    }
    let regions = ConnectedSegmentScorer::new(false).compute_scores(&grid, last, false);
    assert_eq!(1, regions.len());
    assert!(regions[0].finished);
    assert_eq!(4, regions[0].size());
    assert_eq!(8, regions[0].points);
    assert!(grid.vertex_at(&Point(1., 1.)).unwrap().is_complete());
    // the block still borders empty space
    assert!(ConnectedSegmentScorer::default().compute_scores(&grid, last, false).is_empty());
}

#[test]
fn game_from_json() {
    let game = Game::from_json(
        r#"{ "atlas": "triangles", "segments": 2, "demoGame": { "seed": 4, "numberOfTiles": 30 } }"#,
        &mut SeededRandom::new(1),
    )
    .unwrap();
    assert!(game.grid.tile_count() > 1 && game.grid.tile_count() <= 30);
    assert!(game.grid.tiles().all(|tile| tile.is_colored()));

    let result = Game::from_json(r#"{ "atlas": { "shapes": {} } }"#, &mut SeededRandom::new(1));
    assert!(matches!(result, Err(GameError::Definition(_))));
}
