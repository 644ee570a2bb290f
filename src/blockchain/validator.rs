use log::debug;

use super::{Block, hash, valid_proof};

/// Check hash linkage and proof validity across a whole candidate chain.
///
/// Walks every adjacent pair from genesis forward. The genesis block itself is
/// accepted as-is; a chain without one is invalid. Pure: it only reads `chain`.
pub fn valid_chain(chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }

    for pair in chain.windows(2) {
        let (last, current) = (&pair[0], &pair[1]);

        if current.previous_hash != hash(last) {
            debug!("VALIDATE - block #{} breaks hash linkage", current.index);
            return false;
        }

        if !valid_proof(last.proof, current.proof) {
            debug!("VALIDATE - block #{} carries an invalid proof", current.index);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::valid_chain;
    use crate::blockchain::{Block, Ledger, proof_of_work, valid_proof};

    fn mined_chain(blocks: usize) -> Vec<Block> {
        let mut ledger = Ledger::default();
        while ledger.len() < blocks {
            ledger.queue_transaction("alice", "bob", (ledger.len() as u64).into());
            let proof = proof_of_work(ledger.last_block().proof);
            ledger.mint_block(proof, None);
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn genesis_only_is_valid() {
        assert!(valid_chain(&mined_chain(1)));
    }

    #[test]
    fn empty_is_invalid() {
        assert!(!valid_chain(&[]));
    }

    #[test]
    fn untampered_chain_validates() {
        assert!(valid_chain(&mined_chain(4)));
    }

    #[test]
    fn tampered_previous_hash_fails() {
        let mut chain = mined_chain(3);
        chain[2].previous_hash = "0".repeat(64);
        assert!(!valid_chain(&chain));
    }

    #[test]
    fn tampered_proof_fails() {
        let mut chain = mined_chain(3);
        let last_proof = chain[1].proof;
        chain[2].proof = (chain[2].proof + 1..)
            .find(|&p| !valid_proof(last_proof, p))
            .unwrap();
        assert!(!valid_chain(&chain));
    }

    #[test]
    fn tampered_transactions_fail() {
        let mut chain = mined_chain(3);
        chain[1].transactions[0].amount = 1_000_000.into();
        assert!(!valid_chain(&chain));
    }

    #[test]
    fn tampered_genesis_fails() {
        let mut chain = mined_chain(2);
        chain[0].timestamp += 1.0;
        assert!(!valid_chain(&chain));
    }
}
