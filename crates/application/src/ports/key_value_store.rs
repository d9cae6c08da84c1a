use splitdns_domain::{DomainError, Expiration, StoredValue};
use tracing::error;

/// Application-layer port for the shared expiring key/value store.
///
/// Every DNS query touches the store at least twice, so the map operations are
/// synchronous and must never block for longer than a single map access.
/// Implementations own their locking; callers never coordinate access.
pub trait KeyValueStore: Send + Sync {
    /// Returns the live value for `key`. Expired entries read as absent even
    /// when they have not been purged yet.
    fn get(&self, key: &str) -> Option<StoredValue>;

    /// Replaces the value for `key` atomically.
    fn set(&self, key: &str, value: StoredValue, expiration: Expiration);

    /// Removes `key`. Returns whether a live entry was present.
    fn delete(&self, key: &str) -> bool;

    /// Physically removes every expired entry and returns how many were dropped.
    fn purge_expired(&self) -> usize;

    /// Writes the full snapshot to the configured location.
    ///
    /// Blocks for the whole serialisation and write; async callers use
    /// [`request_persist`](Self::request_persist) instead.
    fn persist(&self) -> Result<(), DomainError>;

    /// Asks for a snapshot without waiting for it. Stores with a background
    /// writer coalesce requests; the default saves inline and logs failures.
    fn request_persist(&self) {
        if let Err(e) = self.persist() {
            error!(error = %e, "Failed to persist store snapshot");
        }
    }
}
