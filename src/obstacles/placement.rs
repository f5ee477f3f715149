//! Scattering frozen and infected tiles over a fresh grid.

use crate::board::{Grid, Position, Tile};
use crate::engine::{EngineError, FROZEN_LAYERS};
use rand::seq::SliceRandom;
use rand::Rng;

/// Freeze `frozen_count` tiles, then infect `infected_count` other tiles.
///
/// Cells are distinct and never carry both obstacles.
pub fn place_obstacles<R: Rng>(
    grid: &mut Grid,
    frozen_count: usize,
    infected_count: usize,
    rng: &mut R,
) -> Result<(), EngineError> {
    for pos in pick_cells(grid, frozen_count, "frozen", rng)? {
        if let Some(tile) = grid.get_mut(pos) {
            tile.frozen_layers = FROZEN_LAYERS;
        }
    }
    for pos in pick_cells(grid, infected_count, "infected", rng)? {
        if let Some(tile) = grid.get_mut(pos) {
            tile.infected = true;
        }
    }
    Ok(())
}

/// Choose `count` random obstacle-free cells.
fn pick_cells<R: Rng>(
    grid: &Grid,
    count: usize,
    kind: &'static str,
    rng: &mut R,
) -> Result<Vec<Position>, EngineError> {
    let mut eligible: Vec<Position> = grid
        .tiles()
        .filter(|tile| is_clear(tile))
        .map(|tile| tile.position)
        .collect();

    if eligible.len() < count {
        return Err(EngineError::TooManyObstacles {
            kind,
            requested: count,
            available: eligible.len(),
        });
    }

    eligible.shuffle(rng);
    eligible.truncate(count);
    Ok(eligible)
}

fn is_clear(tile: &Tile) -> bool {
    !tile.is_shielded() && !tile.infected
}
