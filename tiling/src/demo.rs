use crate::{
    error::GameError,
    game::Game,
    settings::{DemoGameSettings, GameSettings},
};
use coloring::GridColoring;
use grid::{CentricGridBuilder, GridBuilder};
use log::{debug, info};
use random::SeededRandom;
use std::sync::Arc;

// DemoGame fills the board with a grown and fully colored grid. The shapes, the color groups and the
// colors each draw from their own stream seeded with the demo seed. When the greedy coloring runs out
// of colors the group and color streams are reseeded with the next seed, up to coloring_attempts times.
pub struct DemoGame;

impl DemoGame {
    pub fn initialize(settings: GameSettings, demo: &DemoGameSettings) -> Result<Game, GameError> {
        if settings.palette.is_empty() {
            return Err(GameError::EmptyPalette);
        }
        let atlas = Arc::new(settings.atlas.build()?);
        let mut shape_rng = SeededRandom::new(demo.seed);
        let mut grid = CentricGridBuilder::new(demo.tile_center_weight).build_grid(
            atlas.clone(),
            demo.number_of_tiles,
            &mut shape_rng,
        )?;
        if grid.tile_count() < demo.number_of_tiles {
            info!("demo grid stopped at {} of {} tiles", grid.tile_count(), demo.number_of_tiles);
        }

        let color_patterns = settings.color_patterns(&atlas);
        let attempts = demo.coloring_attempts.max(1);
        for attempt in 0..attempts {
            let seed = demo.seed.wrapping_add(attempt as u32);
            let mut group_rng = SeededRandom::new(seed);
            let mut color_rng = SeededRandom::new(seed);

            let mut coloring = GridColoring::new(&grid, &settings.rules);
            coloring.apply_color_pattern(&grid, &color_patterns, settings.unique_tile_colors, &mut group_rng)?;
            if coloring.assign_colors(&mut grid, &settings.palette, &mut color_rng).is_some() {
                debug!(
                    "demo grid of {} tiles colored with {} groups on attempt {}",
                    grid.tile_count(),
                    coloring.group_count(),
                    attempt + 1
                );
                let mut game = Game::with_grid(settings, Some(grid))?;
                game.points = demo.points.unwrap_or_default();
                return Ok(game);
            }
        }
        Err(GameError::ColoringInfeasible(attempts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AtlasSource;
    use atlas::BuiltinAtlas;
    use coloring::RuleSetKind;
    use grid::Color;
    use test_log::test;

    fn demo(seed: u32, number_of_tiles: usize) -> DemoGameSettings {
        DemoGameSettings { seed, number_of_tiles, ..DemoGameSettings::default() }
    }

    #[test]
    fn test_demo_game() {
        let settings = GameSettings { segments: 2, ..GameSettings::default() };
        let game = DemoGame::initialize(settings, &demo(12345, 100)).unwrap();
        assert_eq!(100, game.grid.tile_count());
        assert!(game.grid.tiles().all(|tile| tile.is_colored()));
        assert_eq!(0, game.points);
    }

    #[test]
    fn test_demo_game_is_reproducible() {
        let settings = GameSettings {
            atlas: AtlasSource::Builtin(BuiltinAtlas::SnubSquare),
            segments: 0,
            ..GameSettings::default()
        };
        let a = DemoGame::initialize(settings.clone(), &demo(8, 30)).unwrap();
        let b = DemoGame::initialize(settings, &demo(8, 30)).unwrap();
        let colors = |game: &Game| game.grid.tiles().map(|tile| tile.colors()).collect::<Vec<_>>();
        assert_eq!(colors(&a), colors(&b));
    }

    #[test]
    fn test_demo_game_points() {
        let settings = GameSettings::default();
        let game = DemoGame::initialize(settings, &DemoGameSettings { points: Some(12), ..demo(3, 10) }).unwrap();
        assert_eq!(12, game.points);
    }

    #[test]
    fn test_coloring_infeasible() {
        // every tile takes a single color that differs from all of its neighbors, out of one color
        let settings = GameSettings {
            rules: RuleSetKind::DifferentEdgeColors,
            palette: vec![Color::from("red")],
            segments: 2,
            ..GameSettings::default()
        };
        let result = DemoGame::initialize(settings, &DemoGameSettings { coloring_attempts: 3, ..demo(1, 10) });
        assert!(matches!(result, Err(GameError::ColoringInfeasible(3))));
    }
}
