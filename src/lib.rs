//! Tile Cascade - match-three resolution engine
//!
//! Grid generation, run detection, cascade resolution, obstacles and swap
//! validation, plus level sessions, collaborator services and a balance simulator
//! built on top of them.

pub mod board;
pub mod cascade;
pub mod engine;
pub mod matching;
pub mod obstacles;
pub mod services;
pub mod session;
pub mod simulator;
pub mod swap;

pub use board::{initialize_grid, Grid, GridError, Position, SpecialEffect, Tile, TileColor, TileId};
pub use cascade::{resolve_cascade, CascadeObserver, CascadeOutcome, CascadeStep};
pub use engine::{EngineConfig, EngineError, PacingConfig};
pub use matching::{find_matches, MatchReport};
pub use obstacles::spread_infection;
pub use session::{GameSession, LevelConfig, LevelStatus};
pub use swap::{validate_and_apply_swap, SwapOutcome, SwapRejection};
