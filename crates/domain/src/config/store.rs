use serde::{Deserialize, Serialize};

/// Persistent store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Snapshot file loaded at startup and rewritten after mutations
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Lifetime of answers fetched from an upstream (seconds)
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// Interval of the expired-entry sweep (seconds)
    #[serde(default = "default_ttl_secs")]
    pub sweep_interval_secs: u64,
}

fn default_snapshot_path() -> String {
    "./splitdns-store.json".to_string()
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            default_ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_ttl_secs(),
        }
    }
}
