use thiserror::Error;

/// Failures from the ledger, wallet and leaderboard collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("wallet unavailable: {0}")]
    WalletUnavailable(String),

    #[error("transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("leaderboard unavailable: {0}")]
    LeaderboardUnavailable(String),

    #[error("level must be won before submitting (status: {0})")]
    NotEligible(&'static str),
}
