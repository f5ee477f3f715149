//! Engine-wide constants, configuration and errors.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{EngineConfig, PacingConfig};
pub use constants::*;
pub use error::EngineError;
