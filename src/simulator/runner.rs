//! Main simulation runner.
//!
//! Each run is a full `GameSession` played by the greedy auto-player. Statistics are
//! collected from the `SwapOutcome`s the session hands back.

use super::config::SimConfig;
use super::player::best_swap;
use super::report::SimReport;
use super::SimError;
use crate::engine::{EngineConfig, EngineError};
use crate::session::{standard_levels, GameSession, LevelConfig, LevelStatus};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

/// Statistics for one played session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub level_id: u32,
    pub won: bool,
    pub final_score: u32,
    pub moves_used: u32,
    /// Committed swaps.
    pub cascades: u32,
    pub total_cascade_depth: u32,
    pub max_cascade_depth: u32,
    pub max_combo: u32,
    pub infected_at_end: u32,
    pub frozen_left: u32,
    /// The grid ran out of matching swaps before the level ended.
    pub stalled: bool,
}

impl RunStats {
    pub fn avg_cascade_depth(&self) -> f64 {
        if self.cascades == 0 {
            return 0.0;
        }
        self.total_cascade_depth as f64 / self.cascades as f64
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, SimError> {
    config.engine.validate()?;
    let levels = standard_levels();
    let mut per_level = Vec::with_capacity(config.levels.len());

    for &index in &config.levels {
        let mut runs = Vec::with_capacity(config.num_runs as usize);
        for run_idx in 0..config.num_runs {
            // Create RNG for this run
            let mut rng = match config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
                None => ChaCha8Rng::from_entropy(),
            };

            let stats = simulate_single_run(
                &levels,
                index,
                config.engine,
                config.max_moves_guard,
                &mut rng,
            )?;

            if config.verbosity >= 2 {
                println!(
                    "Level {} run {}/{} - {} score {}, moves {}, max depth {}, max combo {}",
                    stats.level_id,
                    run_idx + 1,
                    config.num_runs,
                    if stats.won { "won" } else { "lost" },
                    stats.final_score,
                    stats.moves_used,
                    stats.max_cascade_depth,
                    stats.max_combo
                );
            }
            runs.push(stats);
        }

        let level_id = levels.get(index).map_or(0, |l| l.id);
        info!(level_id, runs = runs.len(), "level simulated");
        per_level.push((level_id, runs));
    }

    Ok(SimReport::from_levels(per_level, config.num_runs, config.seed))
}

/// Play `levels[index]` to completion with the greedy player.
///
/// A grid with no matching swap left counts as a loss.
pub fn simulate_single_run<R: Rng>(
    levels: &[LevelConfig],
    index: usize,
    engine: EngineConfig,
    max_moves_guard: u32,
    rng: &mut R,
) -> Result<RunStats, EngineError> {
    let mut session = GameSession::start(levels.to_vec(), index, engine, rng)?;
    let mut stats = RunStats {
        level_id: session.level().id,
        ..Default::default()
    };

    let mut attempts = 0;
    while session.status() == LevelStatus::Playing && attempts < max_moves_guard {
        attempts += 1;
        let Some((a, b)) = best_swap(session.grid()) else {
            debug!(moves_left = session.moves_left(), "no matching swap left");
            stats.stalled = true;
            break;
        };
        let outcome = session.try_swap(a, b, rng, &mut ());
        if let Some(cascade) = &outcome.cascade {
            let depth = cascade.depth() as u32;
            stats.cascades += 1;
            stats.total_cascade_depth += depth;
            stats.max_cascade_depth = stats.max_cascade_depth.max(depth);
            stats.max_combo = stats.max_combo.max(cascade.max_combo());
        }
    }

    stats.won = session.status() == LevelStatus::Won;
    stats.final_score = session.score();
    stats.moves_used = session.level().moves - session.moves_left();
    stats.infected_at_end = session.grid().infected_count() as u32;
    stats.frozen_left = session.grid().frozen_count() as u32;
    Ok(stats)
}
