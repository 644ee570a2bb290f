use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::blockchain::{Block, valid_chain};
use crate::error::FetchError;

/// A node's chain as exchanged between peers (`GET /chain`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

impl PeerChain {
    pub fn new(chain: Vec<Block>) -> Self {
        let length = chain.len();
        Self { chain, length }
    }
}

/// Capability to retrieve a peer's current chain.
pub trait ChainFetcher: Send + Sync {
    fn fetch_chain(&self, peer: &str) -> Result<PeerChain, FetchError>;
}

/// Longest-chain rule over the given peers.
///
/// Returns the longest valid chain strictly longer than `local_length`, or
/// `None` when no peer beats the local chain. Unreachable peers and malformed
/// answers are skipped; on equal lengths the earlier peer wins.
pub fn select_longest_chain(
    fetcher: &dyn ChainFetcher,
    peers: &[String],
    local_length: usize,
) -> Option<Vec<Block>> {
    let mut max_length = local_length;
    let mut winner: Option<Vec<Block>> = None;

    for peer in peers {
        let candidate = match fetcher.fetch_chain(peer) {
            Ok(c) => c,
            Err(e) => {
                warn!("CONSENSUS - skipping peer {peer}: {e}");
                continue;
            }
        };

        if candidate.length != candidate.chain.len() {
            warn!(
                "CONSENSUS - skipping peer {peer}: reported length {} but sent {} blocks",
                candidate.length,
                candidate.chain.len()
            );
            continue;
        }

        if candidate.length <= max_length {
            debug!(
                "CONSENSUS - peer {peer} chain not longer ({} <= {max_length})",
                candidate.length
            );
            continue;
        }

        if !valid_chain(&candidate.chain) {
            warn!(
                "CONSENSUS - peer {peer} offered an invalid chain of length {}",
                candidate.length
            );
            continue;
        }

        info!(
            "CONSENSUS - peer {peer} leads with a valid chain of length {}",
            candidate.length
        );
        max_length = candidate.length;
        winner = Some(candidate.chain);
    }

    winner
}
