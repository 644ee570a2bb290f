pub mod consensus;
pub mod fetcher;
pub mod registry;
pub mod service;

pub use consensus::{ChainFetcher, PeerChain, select_longest_chain};
pub use fetcher::HttpChainFetcher;
pub use registry::NodeRegistry;
pub use service::{MiningSettings, Node, Resolution};
