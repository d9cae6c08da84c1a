use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

const DNS_PORT: u16 = 53;

/// Upstream resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Default resolver (e.g. "223.5.5.5" or "223.5.5.5:53")
    #[serde(default = "default_trusted")]
    pub trusted: String,

    /// Resolver for policy-routed domains
    #[serde(default = "default_policy")]
    pub policy: String,

    /// Bound on a single upstream exchange (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_trusted() -> String {
    "223.5.5.5".to_string()
}

fn default_policy() -> String {
    "8.8.8.8".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            trusted: default_trusted(),
            policy: default_policy(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Parses `ip` or `ip:port`, defaulting to port 53.
pub fn parse_upstream_addr(addr: &str) -> Option<SocketAddr> {
    let addr = addr.trim();
    if let Ok(socket) = addr.parse::<SocketAddr>() {
        return Some(socket);
    }
    addr.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}
