use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// A single block in the chain holding a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis(proof: u64) -> Self {
        Self::new(1, Vec::new(), proof, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }
}

/// Current time as fractional seconds since the epoch.
fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
