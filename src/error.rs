use thiserror::Error;

/// Errors raised by ledger, registry and mining operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),

    #[error("proof-of-work search was cancelled")]
    MiningCancelled,

    #[error("no valid proof found within {0} iterations")]
    MiningExhausted(u64),

    #[error("chain advanced while mining; proof discarded")]
    StaleProof,
}

/// Why a peer's chain could not be obtained. Never fatal to consensus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("peer unreachable: {0}")]
    Unreachable(String),

    #[error("peer timed out")]
    Timeout,

    #[error("peer answered with status {0}")]
    Status(u16),

    #[error("malformed peer response: {0}")]
    Malformed(String),
}
