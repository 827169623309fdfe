use crate::{
    edge::GridEdge,
    error::GridError,
    grid::{Grid, Placement},
    ids::EdgeId,
    tile::Tile,
};
use atlas::Atlas;
use common::EPSILON;
use log::{debug, trace};
use random::{Prng, WeightedSampler};
use std::{collections::HashSet, sync::Arc};

pub const DEFAULT_TILE_CENTER_WEIGHT: f64 = 10.;

// GridBuilder grows a grid from one initial tile by repeatedly filling a random frontier edge.
// Implementations decide how likely each frontier edge is to be filled next.
pub trait GridBuilder {
    fn compute_edge_probability(&self, grid: &Grid, edge: &GridEdge, initial_tile: &Tile) -> f64;

    // build_grid places tiles until the grid has number_of_tiles tiles or no frontier edge can be filled
    fn build_grid<R: Prng + ?Sized>(
        &self,
        atlas: Arc<Atlas>,
        number_of_tiles: usize,
        rng: &mut R,
    ) -> Result<Grid, GridError>
    where
        Self: Sized,
    {
        let mut grid = Grid::new(Some(atlas.clone()));
        if number_of_tiles == 0 {
            return Ok(grid);
        }
        let initial_tile = grid.add_initial_tile(rng)?;
        let mut sampler: WeightedSampler<EdgeId> = WeightedSampler::new();
        // edges without any placement stay that way since new tiles only add constraints
        let mut dead_edges: HashSet<EdgeId> = HashSet::new();

        while grid.tile_count() < number_of_tiles {
            let initial = grid.tile(initial_tile).ok_or(GridError::UnknownTile(initial_tile))?;
            let weights = grid
                .frontier()
                .iter()
                .filter(|edge_id| !sampler.contains(*edge_id) && !dead_edges.contains(*edge_id))
                .filter_map(|edge_id| grid.edge(*edge_id))
                .map(|edge| (edge.id, self.compute_edge_probability(&grid, edge, initial)))
                .collect::<Vec<(EdgeId, f64)>>();
            for (edge_id, weight) in weights {
                sampler.add(edge_id, weight);
            }

            let edge_id = match sampler.delete_random(rng.next_f64()) {
                Some(edge_id) => edge_id,
                None => break,
            };
            if !grid.is_frontier(edge_id) {
                continue;
            }
            let mut possibilities = grid.compute_possibilities(edge_id);
            if possibilities.is_empty() {
                trace!("no placement fits edge {}", edge_id);
                dead_edges.insert(edge_id);
                continue;
            }
            let placement = select_placement(&atlas, &mut possibilities, rng);
            grid.add_tile(placement.shape, placement.polygon)?;
        }

        debug!(
            "built grid of {} tiles out of {} with atlas {}, {} dead edges",
            grid.tile_count(),
            number_of_tiles,
            atlas.name,
            dead_edges.len()
        );
        Ok(grid)
    }
}

// select_placement picks one of the possibilities weighted by the atlas frequency of its shape
fn select_placement<R: Prng + ?Sized>(atlas: &Atlas, possibilities: &mut Vec<Placement>, rng: &mut R) -> Placement {
    let mut sampler: WeightedSampler<usize> = WeightedSampler::new();
    for (i, placement) in possibilities.iter().enumerate() {
        sampler.add(i, atlas.shape_frequency(&placement.shape));
    }
    let index = sampler.get_random(rng.next_f64()).copied().unwrap_or_default();
    possibilities.swap_remove(index)
}

// CentricGridBuilder prefers edges close to the initial tile so the grid grows into a round patch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CentricGridBuilder {
    pub tile_center_weight: f64,
}

impl CentricGridBuilder {
    pub fn new(tile_center_weight: f64) -> CentricGridBuilder {
        CentricGridBuilder { tile_center_weight }
    }
}

impl Default for CentricGridBuilder {
    fn default() -> CentricGridBuilder {
        CentricGridBuilder::new(DEFAULT_TILE_CENTER_WEIGHT)
    }
}

impl GridBuilder for CentricGridBuilder {
    fn compute_edge_probability(&self, _grid: &Grid, edge: &GridEdge, initial_tile: &Tile) -> f64 {
        let distance = edge.midpoint().distance(&initial_tile.centroid()).max(EPSILON);
        (1. / distance).powf(self.tile_center_weight)
    }
}
