use crate::{Classification, DomainTag};
use std::sync::Arc;
use std::time::Duration;

/// Packed wire-format DNS message, cheap to clone out of the store.
pub type ResponseBytes = Arc<[u8]>;

/// Typed value held by one store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredValue {
    /// Classification of a bare domain, keyed by `DomainKey`.
    Classification(DomainTag),
    /// IP literal of a host override, keyed by `DomainKey::host_override`.
    /// Kept as text: a malformed literal must degrade, not fail the load.
    HostAddress(String),
    /// Packed answer keyed by `QueryFingerprint`.
    Response(ResponseBytes),
    /// Packed local answer for a name classified through `owner`, its
    /// registrable domain. Valid only while `owner` still classifies as
    /// `source`.
    InheritedResponse {
        bytes: ResponseBytes,
        owner: String,
        source: Classification,
    },
}

impl StoredValue {
    pub fn response(bytes: impl Into<ResponseBytes>) -> Self {
        Self::Response(bytes.into())
    }

    pub fn as_classification(&self) -> Option<DomainTag> {
        match self {
            Self::Classification(tag) => Some(*tag),
            _ => None,
        }
    }

    pub fn as_host_address(&self) -> Option<&str> {
        match self {
            Self::HostAddress(ip) => Some(ip),
            _ => None,
        }
    }

    pub fn as_response(&self) -> Option<&[u8]> {
        match self {
            Self::Response(bytes) | Self::InheritedResponse { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// Owner and classification an inherited answer was synthesized from.
    pub fn inherited_from(&self) -> Option<(&str, Classification)> {
        match self {
            Self::InheritedResponse { owner, source, .. } => Some((owner, *source)),
            _ => None,
        }
    }
}

/// Lifetime requested when writing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Kept until explicitly deleted.
    Never,
    /// The store's configured default lifetime.
    Default,
    After(Duration),
}
