pub mod block;
pub mod hash;
pub mod model;
pub mod pow;
pub mod validator;

pub use block::Block;
pub use hash::hash;
pub use model::Ledger;
pub use pow::{CancelToken, proof_of_work, proof_of_work_bounded, valid_proof};
pub use validator::valid_chain;

/// Leading hex zeros a proof digest must carry. Part of the consensus contract.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// `previous_hash` of the genesis block. Not a digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Proof stored in the genesis block when none is configured.
pub const DEFAULT_GENESIS_PROOF: u64 = 100;

/// Sender recorded on mining rewards.
pub const REWARD_SENDER: &str = "0";

/// Amount paid to the miner of each block.
pub const MINING_REWARD: u64 = 1;
