//! Starting-grid generation.

use super::factory::{random_color, random_tile};
use super::{Grid, Position, TileColor};
use crate::engine::EngineError;
use crate::obstacles::place_obstacles;
use rand::Rng;
use tracing::{debug, instrument};

/// Build a `size` x `size` grid with no runs of three, then scatter obstacles.
///
/// Each cell is drawn in row-major order and redrawn while it would complete a run
/// with the two cells before it in its row or column. Five colors guarantee a legal
/// draw always exists.
#[instrument(skip(rng))]
pub fn initialize_grid<R: Rng>(
    size: usize,
    frozen_count: usize,
    infected_count: usize,
    rng: &mut R,
) -> Result<Grid, EngineError> {
    let mut grid = Grid::empty(size)?;

    for row in 0..size {
        for col in 0..size {
            let pos = Position::new(row, col);
            let mut tile = random_tile(pos, rng);
            while completes_run(&grid, pos, tile.color) {
                tile.color = random_color(rng);
            }
            grid.place(pos, tile);
        }
    }

    place_obstacles(&mut grid, frozen_count, infected_count, rng)?;
    debug!(
        frozen = grid.frozen_count(),
        infected = grid.infected_count(),
        "grid initialized"
    );
    Ok(grid)
}

/// Whether `color` at `pos` would form a run with the two cells to its left or above.
fn completes_run(grid: &Grid, pos: Position, color: TileColor) -> bool {
    let Position { row, col } = pos;
    let horizontal = col >= 2
        && grid.color_at(Position::new(row, col - 1)) == Some(color)
        && grid.color_at(Position::new(row, col - 2)) == Some(color);
    let vertical = row >= 2
        && grid.color_at(Position::new(row - 1, col)) == Some(color)
        && grid.color_at(Position::new(row - 2, col)) == Some(color);
    horizontal || vertical
}
