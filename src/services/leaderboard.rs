//! Off-chain indexed leaderboard.

use super::error::ServiceError;
use super::types::{LeaderboardEntry, WalletAddress};

pub trait Leaderboard {
    /// Entries sorted by score, best first, ranked from 1. `None` means all levels.
    fn fetch(&self, level_id: Option<u32>) -> Result<Vec<LeaderboardEntry>, ServiceError>;
}

/// In-memory stand-in for an event indexer.
#[derive(Debug, Clone, Default)]
pub struct IndexedLeaderboard {
    entries: Vec<LeaderboardEntry>,
    offline: bool,
}

impl IndexedLeaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries,
            offline: false,
        }
    }

    /// Seeded with the reference indexed data.
    pub fn with_reference_entries() -> Self {
        let seed = [
            ("0x4b2...11a9", 32400, 1),
            ("0xf12...8821", 28200, 1),
            ("0x9d4...a110", 25850, 2),
            ("0xbb1...cc22", 21000, 1),
            ("0x7e3...f412", 18800, 2),
        ];
        Self::new(
            seed.iter()
                .enumerate()
                .map(|(i, &(address, score, level_id))| LeaderboardEntry {
                    rank: i as u32 + 1,
                    address: address.to_string(),
                    score,
                    level_id,
                })
                .collect(),
        )
    }

    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Index a confirmed score. Rank is assigned on fetch.
    pub fn record(&mut self, address: &WalletAddress, level_id: u32, score: u32) {
        self.entries.push(LeaderboardEntry {
            rank: 0,
            address: address.short(),
            score,
            level_id,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Leaderboard for IndexedLeaderboard {
    fn fetch(&self, level_id: Option<u32>) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        if self.offline {
            return Err(ServiceError::LeaderboardUnavailable(
                "indexer unreachable".to_string(),
            ));
        }
        let mut entries: Vec<LeaderboardEntry> = self
            .entries
            .iter()
            .filter(|e| level_id.map_or(true, |id| e.level_id == id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
        Ok(entries)
    }
}
