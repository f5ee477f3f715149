//! Score submission and achievement minting.

use super::error::ServiceError;
use super::types::{TxHash, WalletAddress};
use rand::Rng;
use tracing::info;

/// On-chain collaborator for wallet linking, score submission and minting.
pub trait ScoreLedger {
    fn connect_wallet(&mut self) -> Result<WalletAddress, ServiceError>;
    fn submit_score(&mut self, level_id: u32, score: u32) -> Result<TxHash, ServiceError>;
    fn mint_achievement(&mut self, level_id: u32) -> Result<TxHash, ServiceError>;
}

/// In-process ledger that confirms instantly with random hashes.
#[derive(Debug, Clone)]
pub struct SimulatedLedger<R: Rng> {
    rng: R,
    fail_connect: bool,
    fail_submit: bool,
    fail_mint: bool,
    /// Confirmed `(level_id, score)` submissions.
    pub submissions: Vec<(u32, u32)>,
    /// Level ids with a confirmed mint.
    pub mints: Vec<u32>,
}

impl<R: Rng> SimulatedLedger<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            fail_connect: false,
            fail_submit: false,
            fail_mint: false,
            submissions: Vec::new(),
            mints: Vec::new(),
        }
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    pub fn failing_mint(mut self) -> Self {
        self.fail_mint = true;
        self
    }

    /// Toggle submission failures after construction.
    pub fn set_submit_failing(&mut self, failing: bool) {
        self.fail_submit = failing;
    }

    fn random_hex(&mut self, bytes: usize) -> String {
        let digits: String = (0..bytes)
            .map(|_| format!("{:02x}", self.rng.gen::<u8>()))
            .collect();
        format!("0x{}", digits)
    }
}

impl<R: Rng> ScoreLedger for SimulatedLedger<R> {
    fn connect_wallet(&mut self) -> Result<WalletAddress, ServiceError> {
        if self.fail_connect {
            return Err(ServiceError::WalletUnavailable(
                "no wallet provider".to_string(),
            ));
        }
        Ok(WalletAddress::new(self.random_hex(20)))
    }

    fn submit_score(&mut self, level_id: u32, score: u32) -> Result<TxHash, ServiceError> {
        if self.fail_submit {
            return Err(ServiceError::SubmissionRejected(format!(
                "submitScore({}, {}) reverted",
                level_id, score
            )));
        }
        info!(level_id, score, "submitting score");
        self.submissions.push((level_id, score));
        Ok(TxHash::new(self.random_hex(32)))
    }

    fn mint_achievement(&mut self, level_id: u32) -> Result<TxHash, ServiceError> {
        if self.fail_mint {
            return Err(ServiceError::SubmissionRejected(format!(
                "mint({}) reverted",
                level_id
            )));
        }
        info!(level_id, "minting achievement");
        self.mints.push(level_id);
        Ok(TxHash::new(self.random_hex(32)))
    }
}
