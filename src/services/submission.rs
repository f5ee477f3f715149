//! Player-initiated score sync and achievement mint.

use super::error::ServiceError;
use super::ledger::ScoreLedger;
use super::types::{TxHash, WalletAddress};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// Progress of the optional on-chain actions for one level attempt.
///
/// Failures clear the in-progress flag and are handed back to the caller; nothing is
/// retried automatically and the game state is never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionState {
    pub wallet: Option<WalletAddress>,
    pub syncing: bool,
    pub minting: bool,
    pub synced: bool,
    pub minted: bool,
    pub last_tx_hash: Option<TxHash>,
    pub last_confirmed_at: Option<DateTime<Utc>>,
}

impl SubmissionState {
    /// Forget per-level progress, keeping the linked wallet.
    pub fn reset(&mut self) {
        *self = Self {
            wallet: self.wallet.take(),
            ..Self::default()
        };
    }

    /// Connect a wallet if none is linked yet.
    pub fn ensure_wallet<L: ScoreLedger>(
        &mut self,
        ledger: &mut L,
    ) -> Result<WalletAddress, ServiceError> {
        if let Some(wallet) = &self.wallet {
            return Ok(wallet.clone());
        }
        let wallet = ledger.connect_wallet().map_err(|e| {
            warn!(error = %e, "wallet connection failed");
            e
        })?;
        info!(wallet = %wallet.short(), "wallet connected");
        self.wallet = Some(wallet.clone());
        Ok(wallet)
    }

    pub fn sync_score<L: ScoreLedger>(
        &mut self,
        ledger: &mut L,
        level_id: u32,
        score: u32,
    ) -> Result<TxHash, ServiceError> {
        self.ensure_wallet(ledger)?;
        self.syncing = true;
        let result = ledger.submit_score(level_id, score);
        self.syncing = false;
        match result {
            Ok(hash) => {
                self.synced = true;
                self.confirm(&hash);
                Ok(hash)
            }
            Err(e) => {
                warn!(error = %e, level_id, score, "score sync failed");
                Err(e)
            }
        }
    }

    /// Mint the level achievement, syncing the score first when needed.
    pub fn mint_achievement<L: ScoreLedger>(
        &mut self,
        ledger: &mut L,
        level_id: u32,
        score: u32,
    ) -> Result<TxHash, ServiceError> {
        if !self.synced {
            self.sync_score(ledger, level_id, score)?;
        }
        self.minting = true;
        let result = ledger.mint_achievement(level_id);
        self.minting = false;
        match result {
            Ok(hash) => {
                self.minted = true;
                self.confirm(&hash);
                Ok(hash)
            }
            Err(e) => {
                warn!(error = %e, level_id, "mint failed");
                Err(e)
            }
        }
    }

    fn confirm(&mut self, hash: &TxHash) {
        self.last_tx_hash = Some(hash.clone());
        self.last_confirmed_at = Some(Utc::now());
    }
}
