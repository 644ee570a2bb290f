use std::sync::Mutex;

use log::{info, warn};
use serde_json::Number;

use super::consensus::{ChainFetcher, PeerChain, select_longest_chain};
use super::registry::{NodeRegistry, normalize_address};
use crate::blockchain::{
    Block, CancelToken, Ledger, MINING_REWARD, REWARD_SENDER, hash, proof_of_work_bounded,
};
use crate::error::LedgerError;

/// Mining knobs for a node.
#[derive(Debug, Clone)]
pub struct MiningSettings {
    pub reward: u64,
    pub max_iterations: Option<u64>,
}

impl Default for MiningSettings {
    fn default() -> Self {
        Self {
            reward: MINING_REWARD,
            max_iterations: None,
        }
    }
}

/// Outcome of a consensus round.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// A ledger node: the ledger, its peers, and the operations the request
/// layer calls. All ledger mutations go through one mutex.
pub struct Node {
    identifier: String,
    ledger: Mutex<Ledger>,
    registry: Mutex<NodeRegistry>,
    fetcher: Box<dyn ChainFetcher>,
    mining: MiningSettings,
    shutdown: CancelToken,
}

impl Node {
    pub fn new(
        identifier: impl Into<String>,
        ledger: Ledger,
        fetcher: Box<dyn ChainFetcher>,
        mining: MiningSettings,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            ledger: Mutex::new(ledger),
            registry: Mutex::new(NodeRegistry::new()),
            fetcher,
            mining,
            shutdown: CancelToken::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Search a proof for the current tip, then reward this node and seal a block.
    ///
    /// The search runs without holding the ledger lock. If the tip changed in
    /// the meantime the proof is stale and is discarded.
    pub fn mine(&self) -> Result<Block, LedgerError> {
        let (last_proof, last_hash) = self.tip();
        let proof = proof_of_work_bounded(last_proof, &self.shutdown, self.mining.max_iterations)?;
        self.seal(proof, last_hash)
    }

    /// Proof and hash of the current last block.
    fn tip(&self) -> (u64, String) {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        let last = ledger.last_block();
        (last.proof, hash(last))
    }

    /// Pay the reward and mint a block on `last_hash`, unless the tip has moved.
    fn seal(&self, proof: u64, last_hash: String) -> Result<Block, LedgerError> {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        if hash(ledger.last_block()) != last_hash {
            warn!("MINER - tip moved during proof search; discarding proof {proof}");
            return Err(LedgerError::StaleProof);
        }

        ledger.queue_transaction(
            REWARD_SENDER,
            self.identifier.as_str(),
            Number::from(self.mining.reward),
        );
        let block = ledger.mint_block(proof, Some(last_hash)).clone();
        info!(
            "MINER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        Ok(block)
    }

    /// Queue a transaction; returns the index of the block that will hold it.
    pub fn submit_transaction(&self, sender: &str, recipient: &str, amount: Number) -> u64 {
        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let index = ledger.queue_transaction(sender, recipient, amount);
        info!("TX - queued {sender} -> {recipient} for block #{index}");
        index
    }

    /// Consistent copy of the chain and its length.
    pub fn get_chain(&self) -> PeerChain {
        let ledger = self.ledger.lock().expect("mutex poisoned");
        PeerChain::new(ledger.chain().to_vec())
    }

    /// Register peers. Every address is checked before any is stored.
    pub fn register_peers<S: AsRef<str>>(&self, addresses: &[S]) -> Result<(), LedgerError> {
        let normalized = addresses
            .iter()
            .map(|a| normalize_address(a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = self.registry.lock().expect("mutex poisoned");
        for address in &normalized {
            registry.register(address)?;
        }
        info!("NODES - {} peers known", registry.len());
        Ok(())
    }

    pub fn peers(&self) -> Vec<String> {
        self.registry.lock().expect("mutex poisoned").peers().to_vec()
    }

    /// Run the longest-chain rule against all registered peers.
    ///
    /// Peers are queried without holding any lock. The winner is committed
    /// only if it is still strictly longer than the chain at commit time.
    pub fn resolve(&self) -> Resolution {
        let peers = self.peers();
        let local_length = self.ledger.lock().expect("mutex poisoned").len();

        let winner = select_longest_chain(self.fetcher.as_ref(), &peers, local_length);

        let mut ledger = self.ledger.lock().expect("mutex poisoned");
        let replaced = match winner {
            Some(chain) if chain.len() > ledger.len() => {
                let length = chain.len();
                let replaced = ledger.replace_chain(chain);
                info!("CONSENSUS - local chain replaced (length {local_length} -> {length})");
                replaced
            }
            Some(_) => {
                warn!("CONSENSUS - local chain grew during resolution; keeping it");
                false
            }
            None => false,
        };

        Resolution {
            replaced,
            chain: ledger.chain().to_vec(),
        }
    }

    /// Stop any running or future proof search.
    pub fn cancel_mining(&self) {
        self.shutdown.cancel();
    }
}
