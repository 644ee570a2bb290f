use std::env;
use std::str::FromStr;
use std::time::Duration;

use uuid::Uuid;

use crate::blockchain::{DEFAULT_GENESIS_PROOF, MINING_REWARD};

/// Runtime settings for a node, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub node_id: String,
    pub genesis_proof: u64,
    pub mining_reward: u64,
    /// Upper bound on proof candidates tried per `/mine`; `None` searches until found.
    pub pow_max_iterations: Option<u64>,
    pub peer_timeout: Duration,
    pub peer_retries: u32,
    pub peer_retry_backoff: Duration,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparseable values use defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let node_id = lookup("NODE_ID")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 5000),
            node_id,
            genesis_proof: parse_or(&lookup, "GENESIS_PROOF", DEFAULT_GENESIS_PROOF),
            mining_reward: parse_or(&lookup, "MINING_REWARD", MINING_REWARD),
            pow_max_iterations: lookup("POW_MAX_ITERATIONS").and_then(|v| v.trim().parse().ok()),
            peer_timeout: Duration::from_millis(parse_or(&lookup, "PEER_TIMEOUT_MS", 3000)),
            peer_retries: parse_or(&lookup, "PEER_RETRIES", 0),
            peer_retry_backoff: Duration::from_millis(parse_or(
                &lookup,
                "PEER_RETRY_BACKOFF_MS",
                250,
            )),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::NodeConfig;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> NodeConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        NodeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.genesis_proof, 100);
        assert_eq!(cfg.mining_reward, 1);
        assert_eq!(cfg.pow_max_iterations, None);
        assert_eq!(cfg.peer_timeout, Duration::from_millis(3000));
        assert_eq!(cfg.peer_retries, 0);
        // uuid v4, simple form
        assert_eq!(cfg.node_id.len(), 32);
        assert!(!cfg.node_id.contains('-'));
    }

    #[test]
    fn reads_overrides() {
        let cfg = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "5001"),
            ("NODE_ID", "miner-a"),
            ("GENESIS_PROOF", "42"),
            ("POW_MAX_ITERATIONS", "1000000"),
            ("PEER_TIMEOUT_MS", "500"),
            ("PEER_RETRIES", "2"),
        ]);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 5001);
        assert_eq!(cfg.node_id, "miner-a");
        assert_eq!(cfg.genesis_proof, 42);
        assert_eq!(cfg.pow_max_iterations, Some(1_000_000));
        assert_eq!(cfg.peer_timeout, Duration::from_millis(500));
        assert_eq!(cfg.peer_retries, 2);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = config_from(&[("PORT", "eighty"), ("NODE_ID", "   ")]);
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.node_id.len(), 32);
    }
}
