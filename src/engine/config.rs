//! Engine configuration.

use super::constants::{
    BASE_TILE_POINTS, CASCADE_STEP_DELAY_MS, GRID_SIZE, INFECTION_SPREAD_CHANCE, MIN_GRID_SIZE,
    SWAP_DELAY_MS,
};
use super::error::EngineError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays handed to the observer between presentation steps.
///
/// A headless caller can zero these out; the resolved grid is identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after a swap is shown, before it is validated.
    pub swap_delay_ms: u64,
    /// Pause after each resolve/collapse/refill iteration of a cascade.
    pub step_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            swap_delay_ms: SWAP_DELAY_MS,
            step_delay_ms: CASCADE_STEP_DELAY_MS,
        }
    }
}

impl PacingConfig {
    /// No pauses at all.
    pub fn instant() -> Self {
        Self {
            swap_delay_ms: 0,
            step_delay_ms: 0,
        }
    }

    pub fn swap_delay(&self) -> Duration {
        Duration::from_millis(self.swap_delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

/// Tunables for grid size, scoring and obstacle behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Points per removed tile before the combo multiplier is applied.
    pub base_tile_points: u32,
    /// Probability that an infected tile spreads to each clean neighbor.
    pub infection_chance: f64,
    pub pacing: PacingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            base_tile_points: BASE_TILE_POINTS,
            infection_chance: INFECTION_SPREAD_CHANCE,
            pacing: PacingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reference configuration with all presentation delays removed.
    pub fn headless() -> Self {
        Self {
            pacing: PacingConfig::instant(),
            ..Default::default()
        }
    }

    /// Parse a JSON document; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "grid_size must be at least {}, got {}",
                MIN_GRID_SIZE, self.grid_size
            )));
        }
        if !(0.0..=1.0).contains(&self.infection_chance) {
            return Err(EngineError::InvalidConfig(format!(
                "infection_chance must be within 0.0..=1.0, got {}",
                self.infection_chance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.base_tile_points, 10);
        assert_eq!(config.infection_chance, 0.2);
        assert_eq!(config.pacing.swap_delay(), Duration::from_millis(150));
        assert_eq!(config.pacing.step_delay(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_headless_has_no_delays() {
        let config = EngineConfig::headless();
        assert_eq!(config.pacing, PacingConfig::instant());
        assert_eq!(config.grid_size, GRID_SIZE);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config = EngineConfig::from_json(r#"{ "grid_size": 6 }"#).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.base_tile_points, BASE_TILE_POINTS);
        assert_eq!(config.pacing, PacingConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "grid_size": 2 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "infection_chance": 1.5 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
