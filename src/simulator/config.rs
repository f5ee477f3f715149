//! Simulation configuration.

use super::error::SimError;
use crate::engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of sessions played per level
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Zero-based indices into the standard levels
    pub levels: Vec<usize>,

    /// Hard cap on swaps per session, on top of the level's move budget
    pub max_moves_guard: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,

    pub engine: EngineConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            levels: vec![0, 1, 2, 3],
            max_moves_guard: 200,
            verbosity: 1,
            engine: EngineConfig::headless(),
        }
    }
}

impl SimConfig {
    /// Small seeded config for smoke tests.
    pub fn quick(num_runs: u32, seed: u64) -> Self {
        Self {
            num_runs,
            seed: Some(seed),
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Balance check of a single level.
    pub fn single_level(index: usize, num_runs: u32) -> Self {
        Self {
            num_runs,
            levels: vec![index],
            ..Default::default()
        }
    }

    /// Load a JSON config; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.engine.validate()?;
        Ok(config)
    }
}
