use log::debug;
use serde_json::Number;

use super::{Block, DEFAULT_GENESIS_PROOF, hash};
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
///
/// `Ledger` itself is not synchronized. Shared use must serialize every
/// mutation (`queue_transaction`, `mint_block`, `replace_chain`) behind one
/// lock, and readers that report the chain should copy it under that lock.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new(genesis_proof: u64) -> Self {
        Self {
            chain: vec![Block::genesis(genesis_proof)],
            pending_transactions: Vec::new(),
        }
    }

    /// Add a transaction to the pending pool. Returns the index of the block
    /// that will include it.
    pub fn queue_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Number,
    ) -> u64 {
        self.pending_transactions
            .push(Transaction::new(sender, recipient, amount));
        self.last_block().index + 1
    }

    /// Seal the pending pool into a new block and append it.
    /// `previous_hash` defaults to the hash of the current last block.
    pub fn mint_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| hash(self.last_block()));
        let transactions = std::mem::take(&mut self.pending_transactions);
        let block = Block::new(self.chain.len() as u64 + 1, transactions, proof, previous_hash);

        debug!(
            "LEDGER - minted block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Swap in a chain adopted through consensus. Empty chains are refused so
    /// the genesis invariant holds.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        self.chain = chain;
        true
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    #[cfg(test)]
    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(DEFAULT_GENESIS_PROOF)
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, hash, proof_of_work};

    fn mine_next(ledger: &mut Ledger) {
        let proof = proof_of_work(ledger.last_block().proof);
        ledger.mint_block(proof, None);
    }

    #[test]
    fn fresh_ledger_has_only_genesis() {
        let ledger = Ledger::new(100);
        assert_eq!(ledger.len(), 1);
        let genesis = ledger.last_block();
        assert_eq!(genesis.index, 1);
        assert_eq!(genesis.proof, 100);
        assert_eq!(genesis.previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(ledger.pending_transactions().is_empty());
    }

    #[test]
    fn queue_returns_next_block_index() {
        let mut ledger = Ledger::default();
        assert_eq!(ledger.queue_transaction("a", "b", 5.into()), 2);
        assert_eq!(ledger.queue_transaction("b", "c", 3.into()), 2);
        assert_eq!(ledger.pending_transactions().len(), 2);
    }

    #[test]
    fn mint_absorbs_pending_pool() {
        let mut ledger = Ledger::default();
        let genesis_hash = hash(ledger.last_block());
        ledger.queue_transaction("0", "X", 1.into());

        let proof = proof_of_work(ledger.last_block().proof);
        let block = ledger.mint_block(proof, None).clone();

        assert_eq!(block.index, 2);
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.transactions[0].recipient, "X");
        assert_eq!(block.previous_hash, genesis_hash);
        assert!(ledger.pending_transactions().is_empty());
        assert_eq!(ledger.queue_transaction("a", "b", 1.into()), 3);
    }

    #[test]
    fn explicit_previous_hash_is_kept() {
        let mut ledger = Ledger::default();
        let block = ledger.mint_block(7, Some("custom".into()));
        assert_eq!(block.previous_hash, "custom");
    }

    #[test]
    fn minted_chain_is_linked() {
        let mut ledger = Ledger::default();
        for i in 0..3 {
            ledger.queue_transaction("a", "b", i.into());
            mine_next(&mut ledger);
        }
        let chain = ledger.chain();
        assert_eq!(chain.len(), 4);
        for pair in chain.windows(2) {
            assert_eq!(pair[1].previous_hash, hash(&pair[0]));
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
    }

    #[test]
    fn replace_chain_refuses_empty() {
        let mut ledger = Ledger::default();
        assert!(!ledger.replace_chain(Vec::new()));
        assert_eq!(ledger.len(), 1);

        let other = Ledger::new(5);
        assert!(ledger.replace_chain(other.chain().to_vec()));
        assert_eq!(ledger.last_block().proof, 5);
    }
}
