use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Policy bucket persisted for a domain.
///
/// Tags have no expiration; they change only through management operations
/// or a bulk list update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    /// Answered locally with loopback addresses.
    AdBlock,
    /// Resolved through the policy upstream; answers feed the routing trigger.
    Policy,
    /// Resolved through the trusted upstream. Default for unclassified names.
    Trusted,
    /// Answered from a locally defined host override.
    Host,
}

impl DomainTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdBlock => "adblock",
            Self::Policy => "policy",
            Self::Trusted => "trusted",
            Self::Host => "host",
        }
    }
}

impl FromStr for DomainTag {
    type Err = DomainError;

    /// Accepts the canonical names and the short aliases found in older
    /// classification lists (`adb`, `gfw`, `normal`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adblock" | "adb" => Ok(Self::AdBlock),
            "policy" | "gfw" => Ok(Self::Policy),
            "trusted" | "normal" => Ok(Self::Trusted),
            "host" => Ok(Self::Host),
            other => Err(DomainError::InvalidClassification(other.to_string())),
        }
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a domain, with the host override payload resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    AdBlock,
    Policy,
    Trusted,
    /// `None` when the override record is missing or does not parse.
    Host(Option<IpAddr>),
}

impl Classification {
    /// Rebuilds a classification from its tag and, for hosts, the address.
    pub fn from_parts(tag: DomainTag, address: Option<IpAddr>) -> Self {
        match tag {
            DomainTag::AdBlock => Self::AdBlock,
            DomainTag::Policy => Self::Policy,
            DomainTag::Trusted => Self::Trusted,
            DomainTag::Host => Self::Host(address),
        }
    }

    pub fn address(&self) -> Option<IpAddr> {
        match self {
            Self::Host(address) => *address,
            _ => None,
        }
    }

    pub fn tag(&self) -> DomainTag {
        match self {
            Self::AdBlock => DomainTag::AdBlock,
            Self::Policy => DomainTag::Policy,
            Self::Trusted => DomainTag::Trusted,
            Self::Host(_) => DomainTag::Host,
        }
    }
}

/// Lowercases, trims whitespace and strips the trailing root label.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
