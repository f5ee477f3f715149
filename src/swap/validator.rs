//! Swap validation and commit.

use crate::board::{Grid, Position};
use crate::cascade::{resolve_cascade, CascadeObserver, CascadeOutcome};
use crate::engine::EngineConfig;
use crate::matching::find_matches;
use crate::obstacles::spread_infection;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument};

/// Why a swap request left the grid untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapRejection {
    OutOfBounds,
    NotAdjacent,
    /// The swap formed no run and was reverted.
    NoMatch,
    /// A cascade is still resolving.
    Busy,
    /// The level is already won or lost.
    LevelOver,
}

impl SwapRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            SwapRejection::OutOfBounds => "position outside the grid",
            SwapRejection::NotAdjacent => "tiles are not adjacent",
            SwapRejection::NoMatch => "swap does not form a match",
            SwapRejection::Busy => "a cascade is still resolving",
            SwapRejection::LevelOver => "level is over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapOutcome {
    pub committed: bool,
    /// Grid after the cascade and infection, or the untouched grid on rejection.
    pub grid: Grid,
    pub score_delta: u32,
    pub moves_consumed: u32,
    pub rejection: Option<SwapRejection>,
    pub cascade: Option<CascadeOutcome>,
    /// Tiles infected by the post-cascade spread.
    pub newly_infected: usize,
}

impl SwapOutcome {
    pub fn rejected(grid: Grid, reason: SwapRejection) -> Self {
        Self {
            committed: false,
            grid,
            score_delta: 0,
            moves_consumed: 0,
            rejection: Some(reason),
            cascade: None,
            newly_infected: 0,
        }
    }
}

/// Check a swap of `a` and `b`, and commit it if it forms at least one run.
///
/// A committed swap consumes one move, resolves the full cascade and then spreads
/// infection once. Anything else hands the grid back unchanged.
#[instrument(skip(grid, config, rng, observer))]
pub fn validate_and_apply_swap<R: Rng, O: CascadeObserver>(
    grid: Grid,
    a: Position,
    b: Position,
    config: &EngineConfig,
    rng: &mut R,
    observer: &mut O,
) -> SwapOutcome {
    if !grid.contains(a) || !grid.contains(b) {
        return SwapOutcome::rejected(grid, SwapRejection::OutOfBounds);
    }
    if !a.is_adjacent(&b) {
        return SwapOutcome::rejected(grid, SwapRejection::NotAdjacent);
    }

    let snapshot = grid.clone();
    let mut swapped = grid;
    swapped.swap(a, b);
    observer.on_swap(&swapped);
    observer.pause(config.pacing.swap_delay());

    if find_matches(&swapped).is_empty() {
        debug!("swap formed no run, reverting");
        return SwapOutcome::rejected(snapshot, SwapRejection::NoMatch);
    }

    let cascade = resolve_cascade(swapped, config, rng, observer);
    let infected_before = cascade.grid.infected_count();
    let grid = spread_infection(&cascade.grid, config.infection_chance, rng);
    let newly_infected = grid.infected_count() - infected_before;

    debug!(
        score = cascade.total_score,
        depth = cascade.depth(),
        newly_infected,
        "swap committed"
    );
    SwapOutcome {
        committed: true,
        grid,
        score_delta: cascade.total_score,
        moves_consumed: 1,
        rejection: None,
        cascade: Some(cascade),
        newly_infected,
    }
}
