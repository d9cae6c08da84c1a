use sha2::{Digest, Sha256};
use std::fmt;
use std::fmt::Write as _;

/// Query class and type names used for the address fingerprints that
/// management operations invalidate.
pub const CLASS_IN: &str = "IN";
pub const TYPE_A: &str = "A";
pub const TYPE_AAAA: &str = "AAAA";

const HOST_OVERRIDE_SUFFIX: &str = ":ip";

fn digest_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, byte| {
        let _ = write!(out, "{:02x}", byte);
        out
    })
}

/// Cache key of one packed response: hash of (name, class, type).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryFingerprint(String);

impl QueryFingerprint {
    /// `domain` must already be normalized (see [`crate::normalize_domain`]).
    pub fn new(domain: &str, class_name: &str, type_name: &str) -> Self {
        Self(digest_hex(&format!("{}{}{}", domain, class_name, type_name)))
    }

    /// Fingerprints of the IN/A and IN/AAAA queries for `domain`.
    pub fn address_queries(domain: &str) -> [Self; 2] {
        [
            Self::new(domain, CLASS_IN, TYPE_A),
            Self::new(domain, CLASS_IN, TYPE_AAAA),
        ]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the classification entry of a bare domain, independent of query type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainKey(String);

impl DomainKey {
    /// `domain` must already be normalized (see [`crate::normalize_domain`]).
    pub fn new(domain: &str) -> Self {
        Self(digest_hex(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the host override record that shares this domain.
    pub fn host_override(&self) -> String {
        format!("{}{}", self.0, HOST_OVERRIDE_SUFFIX)
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
