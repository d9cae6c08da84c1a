use serde::{Deserialize, Serialize};

/// Routing trigger configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Executable invoked as `<trigger_path> <ip>` for every policy-routed address.
    /// When unset, registrations are only logged.
    #[serde(default)]
    pub trigger_path: Option<String>,

    #[serde(default = "default_trigger_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_trigger_timeout_ms() -> u64 {
    5000
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            trigger_path: None,
            timeout_ms: default_trigger_timeout_ms(),
        }
    }
}
