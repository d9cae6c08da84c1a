use crate::ports::KeyValueStore;
use crate::services::public_suffix::suffix_pattern;
use fancy_regex::Regex;
use splitdns_domain::{Classification, DomainError, DomainKey, DomainTag};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a domain to its policy bucket.
///
/// Resolution order:
///   1. Exact classification entry of the full name
///   2. Classification entry of the registrable suffix (`example.co.uk`)
///   3. `Trusted` fallback
///
/// Exact entries always win, which is what lets a host override on
/// `www.example.com` coexist with a list entry for `example.com`.
pub struct DomainClassifier {
    store: Arc<dyn KeyValueStore>,
    suffix: Regex,
}

impl DomainClassifier {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self, DomainError> {
        Self::with_pattern(store, &suffix_pattern())
    }

    pub fn with_pattern(store: Arc<dyn KeyValueStore>, pattern: &str) -> Result<Self, DomainError> {
        let suffix = Regex::new(pattern).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid suffix pattern: {}", e))
        })?;
        Ok(Self { store, suffix })
    }

    /// `domain` must already be normalized.
    pub fn tag_for(&self, domain: &str) -> DomainTag {
        self.resolve(domain).0
    }

    /// Like [`tag_for`](Self::tag_for), with the host override resolved.
    pub fn classify(&self, domain: &str) -> Classification {
        self.classify_with_owner(domain).0
    }

    /// Also returns the name whose entry decided: `domain` itself, or its
    /// registrable domain when the tag was inherited.
    pub fn classify_with_owner<'a>(&self, domain: &'a str) -> (Classification, &'a str) {
        let (tag, owner) = self.resolve(domain);
        (self.with_host_address(tag, owner), owner)
    }

    /// Classification from the exact entry of `domain` only, no suffix
    /// fallback.
    pub fn classify_exact(&self, domain: &str) -> Option<Classification> {
        self.lookup(domain)
            .map(|tag| self.with_host_address(tag, domain))
    }

    fn with_host_address(&self, tag: DomainTag, owner: &str) -> Classification {
        match tag {
            DomainTag::Host => Classification::Host(self.host_address(owner)),
            other => Classification::from_parts(other, None),
        }
    }

    /// Returns the tag and the name whose entry produced it.
    fn resolve<'a>(&self, domain: &'a str) -> (DomainTag, &'a str) {
        if let Some(tag) = self.lookup(domain) {
            return (tag, domain);
        }

        match self.registrable_domain(domain) {
            Some(registrable) => match self.lookup(registrable) {
                Some(tag) => {
                    debug!(domain = %domain, registrable = %registrable, tag = %tag, "Classified by suffix");
                    (tag, registrable)
                }
                None => (DomainTag::Trusted, domain),
            },
            None => (DomainTag::Trusted, domain),
        }
    }

    /// First `<label>.<suffix>` match in `domain`, if any.
    pub fn registrable_domain<'a>(&self, domain: &'a str) -> Option<&'a str> {
        match self.suffix.find(domain) {
            Ok(found) => found.map(|m| m.as_str()),
            Err(e) => {
                warn!(domain = %domain, error = %e, "Suffix match aborted");
                None
            }
        }
    }

    fn lookup(&self, domain: &str) -> Option<DomainTag> {
        self.store
            .get(DomainKey::new(domain).as_str())
            .and_then(|value| value.as_classification())
    }

    fn host_address(&self, domain: &str) -> Option<IpAddr> {
        let value = self.store.get(&DomainKey::new(domain).host_override())?;
        let raw = value.as_host_address()?;
        match raw.trim().parse::<IpAddr>() {
            Ok(ip) => Some(ip),
            Err(_) => {
                warn!(domain = %domain, ip = %raw, "Host override is not an IP literal");
                None
            }
        }
    }
}
