use crate::{demo::DemoGame, error::GameError, settings::GameSettings};
use atlas::{Atlas, Shape};
use coloring::{ColorPatternsByShape, RuleSet};
use common::rotate_array;
use geometry::Polygon;
use grid::{Color, Grid, Placement, TileColors, TileId};
use log::{debug, info};
use random::{select_random, shuffle, Prng};
use scorer::{total_points, ScoredRegion, Scorer};
use std::sync::Arc;

// PlacedTile records a move so that it can be undone
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlacedTile {
    pub tile: TileId,
    pub points: usize,
}

// Game holds the grid of a game in progress and the points scored so far
#[derive(Clone, Debug)]
pub struct Game {
    pub settings: GameSettings,
    pub atlas: Arc<Atlas>,
    pub grid: Grid,
    pub color_patterns: ColorPatternsByShape,
    pub points: usize,
    history: Vec<PlacedTile>,
}

impl Game {
    // new starts a demo game when the settings ask for one, and otherwise places a single initial tile
    // colored with the first variant of its color pattern
    pub fn new<R: Prng + ?Sized>(settings: GameSettings, rng: &mut R) -> Result<Game, GameError> {
        if settings.palette.is_empty() {
            return Err(GameError::EmptyPalette);
        }
        if let Some(demo) = settings.demo_game.clone() {
            return DemoGame::initialize(settings, &demo);
        }
        let mut game = Game::with_grid(settings, None)?;
        let tile = game.grid.add_initial_tile(rng)?;
        let colors = game.initial_colors(tile);
        game.grid.set_tile_colors(tile, &TileColors::PerSegment(colors))?;
        info!("new game with atlas {}", game.atlas.name);
        Ok(game)
    }

    pub fn from_json<R: Prng + ?Sized>(json: &str, rng: &mut R) -> Result<Game, GameError> {
        Game::new(GameSettings::from_json(json)?, rng)
    }

    // with_grid sets up a game on the grid, or on an empty grid of the settings' atlas
    pub(crate) fn with_grid(settings: GameSettings, grid: Option<Grid>) -> Result<Game, GameError> {
        let atlas = match grid.as_ref().and_then(Grid::atlas) {
            Some(atlas) => atlas.clone(),
            None => Arc::new(settings.atlas.build()?),
        };
        let color_patterns = settings.color_patterns(&atlas);
        let grid = grid.unwrap_or_else(|| Grid::new(Some(atlas.clone())));
        Ok(Game { settings, atlas, grid, color_patterns, points: 0, history: vec![] })
    }

    // initial_colors maps the first variant of the tile's color pattern onto the palette
    fn initial_colors(&self, tile: TileId) -> Vec<Color> {
        let palette = &self.settings.palette;
        let size = self.grid.tile(tile).map_or(0, |tile| tile.size());
        let variant = self
            .grid
            .tile(tile)
            .and_then(|tile| self.color_patterns.get(tile.shape.as_ref()))
            .and_then(|patterns| patterns.first())
            .and_then(|pattern| pattern.segment_colors.first())
            .cloned()
            .unwrap_or_else(|| vec![0; size]);
        variant.iter().map(|color| palette[color % palette.len()].clone()).collect()
    }

    // placements lists the shapes and positions that fit on the frontier of the grid
    pub fn placements(&self) -> Vec<Placement> {
        self.grid.frontier().iter().flat_map(|edge_id| self.grid.compute_possibilities(*edge_id)).collect()
    }

    // random_colors draws a random color pattern variant for the shape and fills it from the palette
    pub fn random_colors<R: Prng + ?Sized>(&self, shape: &Shape, rng: &mut R) -> Vec<Color> {
        let palette = &self.settings.palette;
        let variant = self
            .color_patterns
            .get(shape)
            .and_then(|patterns| select_random(patterns, rng.next_f64()))
            .and_then(|pattern| select_random(&pattern.segment_colors, rng.next_f64()))
            .cloned()
            .unwrap_or_else(|| vec![0; shape.size()]);
        let mut colors = palette.clone();
        if colors.is_empty() {
            return vec![];
        }
        shuffle(&mut colors, rng);
        variant.iter().map(|color| colors[color % colors.len()].clone()).collect()
    }

    // place_tile adds a tile with its colors rotated by offset, scores it and adds the points.
    // Nothing changes when the tile does not fit or its colors break the rules.
    pub fn place_tile(
        &mut self,
        shape: &Arc<Shape>,
        polygon: Polygon,
        colors: &TileColors,
        offset: usize,
    ) -> Result<Vec<ScoredRegion>, GameError> {
        if !self.grid.check_fit(shape, &polygon) {
            return Err(GameError::DoesNotFit(shape.name.clone()));
        }
        let colors = rotate_array(&colors.resolve(shape.size())?, offset);
        if !self.settings.rules.check_placement(&self.grid, &polygon, &colors) {
            return Err(GameError::ColorMismatch(shape.name.clone()));
        }
        let tile = self.grid.add_tile(shape.clone(), polygon)?;
        self.grid.set_tile_colors(tile, &TileColors::PerSegment(colors))?;

        let regions = self.settings.scorer.compute_scores(&self.grid, tile, false);
        let points = total_points(&regions);
        self.points += points;
        self.history.push(PlacedTile { tile, points });
        debug!("placed {} {}, {} regions worth {} points", tile, shape.name, regions.len(), points);
        Ok(regions)
    }

    // undo removes the last placed tile and takes back its points
    pub fn undo(&mut self) -> Result<PlacedTile, GameError> {
        let placed = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.grid.remove_tile(placed.tile)?;
        self.points = self.points.saturating_sub(placed.points);
        Ok(placed)
    }

    pub fn history(&self) -> &[PlacedTile] {
        &self.history
    }

    // hints returns the regions of the tile, open ones included, without scoring them
    pub fn hints(&self, tile: TileId) -> Vec<ScoredRegion> {
        self.settings.scorer.compute_scores(&self.grid, tile, true)
    }
}
