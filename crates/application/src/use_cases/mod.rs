pub mod classification;
pub mod hosts;
pub mod updates;

pub use classification::{DeleteClassificationUseCase, SetClassificationUseCase};
pub use hosts::AddHostUseCase;
pub use updates::{RunClassificationUpdateUseCase, UpdateSummary};

use crate::ports::KeyValueStore;
use splitdns_domain::{normalize_domain, DomainError, QueryFingerprint};
use tracing::debug;

/// Normalizes a management-supplied name and rejects empty ones.
fn require_domain(raw: &str) -> Result<String, DomainError> {
    let domain = normalize_domain(raw);
    if domain.is_empty() || domain.contains('/') || domain.contains(char::is_whitespace) {
        return Err(DomainError::InvalidDomainName(raw.to_string()));
    }
    Ok(domain)
}

/// Drops the cached IN/A and IN/AAAA answers of `domain`.
fn invalidate_address_answers(store: &dyn KeyValueStore, domain: &str) {
    for fingerprint in QueryFingerprint::address_queries(domain) {
        store.delete(fingerprint.as_str());
    }
}

/// Schedules a snapshot after a management change. A failed save never
/// undoes the in-memory change.
fn persist_or_log(store: &dyn KeyValueStore, operation: &'static str) {
    debug!(operation, "Snapshot requested");
    store.request_persist();
}
