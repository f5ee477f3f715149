//! Level definitions and session state enums.

use crate::board::{Position, TileColor};
use crate::swap::{SwapOutcome, SwapRejection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One level's rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number, also used as the leaderboard level id.
    pub id: u32,
    pub moves: u32,
    pub target_score: u32,
    /// Tiles of a color that must be cleared in addition to the score.
    #[serde(default)]
    pub target_tiles: BTreeMap<TileColor, u32>,
    #[serde(default)]
    pub initial_frozen_count: usize,
    #[serde(default)]
    pub initial_infected_count: usize,
}

impl LevelConfig {
    pub fn new(id: u32, moves: u32, target_score: u32) -> Self {
        Self {
            id,
            moves,
            target_score,
            target_tiles: BTreeMap::new(),
            initial_frozen_count: 0,
            initial_infected_count: 0,
        }
    }

    pub fn with_target_tiles(mut self, color: TileColor, count: u32) -> Self {
        self.target_tiles.insert(color, count);
        self
    }

    pub fn with_obstacles(mut self, frozen: usize, infected: usize) -> Self {
        self.initial_frozen_count = frozen;
        self.initial_infected_count = infected;
        self
    }

    /// True when every tile target is covered by `cleared`.
    pub fn tile_targets_met(&self, cleared: &BTreeMap<TileColor, u32>) -> bool {
        self.target_tiles
            .iter()
            .all(|(color, &needed)| cleared.get(color).copied().unwrap_or(0) >= needed)
    }
}

/// The four reference levels.
pub fn standard_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new(1, 25, 1000),
        LevelConfig::new(2, 22, 2500)
            .with_target_tiles(TileColor::Blue, 20)
            .with_obstacles(4, 0),
        LevelConfig::new(3, 25, 5000).with_obstacles(8, 2),
        LevelConfig::new(4, 30, 10000).with_obstacles(12, 4),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Playing,
    Won,
    Lost,
}

/// Whether a swap is currently being resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    Busy,
}

/// Result of clicking a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing was selected; this tile is now.
    Selected(Position),
    /// A non-adjacent tile was clicked; the selection moved there.
    SelectionMoved(Position),
    /// An adjacent tile was clicked and the swap was attempted.
    Swapped(Box<SwapOutcome>),
    /// Input was dropped without touching the selection.
    Ignored(SwapRejection),
}
