//! Level balance simulator for Monte Carlo analysis.
//!
//! Plays many seeded sessions of each level with a greedy auto-player to measure:
//! - Win rate and average score against each level's targets
//! - Cascade depth and combo distribution
//! - How far infection spreads and how many frozen tiles survive
//!
//! Every move goes through `GameSession`, so results follow the real rules.

mod config;
mod error;
mod player;
mod report;
mod runner;

pub use config::SimConfig;
pub use error::SimError;
pub use player::best_swap;
pub use report::{LevelSummary, SimReport};
pub use runner::{run_simulation, simulate_single_run, RunStats};
