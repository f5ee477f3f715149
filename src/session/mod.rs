//! Level progression around the engine.

pub mod logic;
pub mod types;

pub use logic::GameSession;
pub use types::{standard_levels, LevelConfig, LevelStatus, SelectOutcome, TurnPhase};
