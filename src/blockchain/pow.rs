use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::DIFFICULTY_PREFIX;
use super::hash::sha256_hex;
use crate::error::LedgerError;

/// How many candidates the bounded search tries between cancellation checks.
const CANCEL_POLL_INTERVAL: u64 = 1024;

/// Cooperative cancellation flag shared between a miner and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Hex SHA-256 of the decimal concatenation `"{last_proof}{proof}"`.
pub fn proof_digest(last_proof: u64, proof: u64) -> String {
    sha256_hex(format!("{last_proof}{proof}").as_bytes())
}

/// Does `proof` solve the puzzle posed by `last_proof`?
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    proof_digest(last_proof, proof).starts_with(DIFFICULTY_PREFIX)
}

/// Smallest non-negative proof satisfying `valid_proof(last_proof, _)`.
/// Unbounded; see [`proof_of_work_bounded`] for a stoppable search.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof = 0;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same ascending search as [`proof_of_work`], but gives up when `cancel` is
/// raised or after `max_iterations` candidates. A returned proof is always the
/// smallest valid one.
pub fn proof_of_work_bounded(
    last_proof: u64,
    cancel: &CancelToken,
    max_iterations: Option<u64>,
) -> Result<u64, LedgerError> {
    let mut proof = 0;
    loop {
        if proof % CANCEL_POLL_INTERVAL == 0 && cancel.is_cancelled() {
            return Err(LedgerError::MiningCancelled);
        }
        if let Some(max) = max_iterations {
            if proof >= max {
                return Err(LedgerError::MiningExhausted(max));
            }
        }
        if valid_proof(last_proof, proof) {
            return Ok(proof);
        }
        proof += 1;
    }
}
