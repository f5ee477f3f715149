//! External collaborators: wallet, score ledger and leaderboard.

pub mod error;
pub mod leaderboard;
pub mod ledger;
pub mod submission;
pub mod types;

pub use error::ServiceError;
pub use leaderboard::{IndexedLeaderboard, Leaderboard};
pub use ledger::{ScoreLedger, SimulatedLedger};
pub use submission::SubmissionState;
pub use types::{LeaderboardEntry, TxHash, WalletAddress};
