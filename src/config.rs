//! RPC configuration
//!
//! TOML-backed settings for the production ledger client.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;

/// Connection settings for [`crate::ledger::RpcLedgerClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// RPC endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_rpc_timeout")]
    pub timeout_secs: u64,

    /// Commitment level: "processed", "confirmed", or "finalized"
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

fn default_rpc_timeout() -> u64 {
    30
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mainnet-beta.solana.com".to_string(),
            timeout_secs: default_rpc_timeout(),
            commitment: default_commitment(),
        }
    }
}

impl RpcConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RpcConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parsed commitment level; unknown strings fall back to confirmed.
    pub fn commitment(&self) -> CommitmentConfig {
        match self.commitment.as_str() {
            "processed" => CommitmentConfig::processed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        }
    }
}
