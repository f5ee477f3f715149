//! Contract violations raised while building or configuring a game.

use crate::board::GridError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("cannot place {requested} {kind} tiles: only {available} eligible cells")]
    TooManyObstacles {
        kind: &'static str,
        requested: usize,
        available: usize,
    },

    #[error("grid is {actual}x{actual} but the config expects {expected}x{expected}")]
    GridSizeMismatch { actual: usize, expected: usize },

    #[error("unknown level index {index} (have {available} levels)")]
    UnknownLevel { index: usize, available: usize },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}
