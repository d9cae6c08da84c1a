use serde::{Deserialize, Serialize};

/// Crates whose debug output drowns the proxy's own at `debug` and below.
const QUIET_DEPENDENCIES: &[&str] = &["hyper_util=warn", "reqwest=warn"];

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Level or `tracing` filter directive (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    /// Filter directive for the subscriber: the configured level followed
    /// by per-crate caps for the HTTP client stack.
    pub fn filter_directive(&self) -> String {
        std::iter::once(self.level.trim())
            .chain(QUIET_DEPENDENCIES.iter().copied())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
