use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use splitdns_application::ports::KeyValueStore;
use splitdns_domain::{DomainError, Expiration, StoredValue};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use super::snapshot::{SnapshotDocument, SnapshotRecord, SNAPSHOT_VERSION};

#[derive(Debug, Clone)]
struct StoreEntry {
    value: StoredValue,
    /// Unix milliseconds, `None` = never expires.
    expires_at_ms: Option<i64>,
}

impl StoreEntry {
    #[inline]
    fn is_expired(&self, now_ms: i64) -> bool {
        matches!(self.expires_at_ms, Some(deadline) if deadline <= now_ms)
    }
}

#[inline]
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Concurrent expiring key/value store with a JSON snapshot on disk.
///
/// Every operation is a single shard-locked map access. Snapshot saves are
/// serialised by `save_lock` and replace the file atomically (temp + rename).
///
/// `request_persist` only raises a signal; a [`SnapshotWriter`] must run for
/// requested snapshots to reach the disk.
///
/// [`SnapshotWriter`]: super::SnapshotWriter
pub struct PersistentStore {
    entries: DashMap<String, StoreEntry, FxBuildHasher>,
    default_ttl: Duration,
    snapshot_path: PathBuf,
    pub(super) save_lock: Mutex<()>,
    persist_signal: Notify,
}

impl PersistentStore {
    pub fn new(snapshot_path: impl Into<PathBuf>, default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::with_hasher(FxBuildHasher::default()),
            default_ttl,
            snapshot_path: snapshot_path.into(),
            save_lock: Mutex::new(()),
            persist_signal: Notify::new(),
        }
    }

    /// Creates the store and loads the existing snapshot, if any.
    pub fn open(snapshot_path: impl Into<PathBuf>, default_ttl: Duration) -> Result<Self, DomainError> {
        let store = Self::new(snapshot_path, default_ttl);
        let path = store.snapshot_path.clone();
        store.load_snapshot(&path)?;
        Ok(store)
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves once a snapshot has been requested since the last call.
    /// Any number of requests in between resolve it once.
    pub async fn persist_requested(&self) {
        self.persist_signal.notified().await;
    }

    fn deadline(&self, expiration: Expiration) -> Option<i64> {
        let ttl = match expiration {
            Expiration::Never => return None,
            Expiration::Default => self.default_ttl,
            Expiration::After(ttl) => ttl,
        };
        Some(now_ms().saturating_add(ttl.as_millis() as i64))
    }

    /// Loads entries from `path`, skipping expired and corrupt records.
    /// A missing file is an empty snapshot. Returns the number of entries loaded.
    pub fn load_snapshot(&self, path: &Path) -> Result<usize, DomainError> {
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No snapshot found, starting empty");
                return Ok(0);
            }
            Err(e) => {
                return Err(DomainError::SnapshotError(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let document: SnapshotDocument<serde_json::Value> = serde_json::from_slice(&contents)
            .map_err(|e| {
                DomainError::SnapshotError(format!("Failed to parse {}: {}", path.display(), e))
            })?;

        if document.version != SNAPSHOT_VERSION {
            warn!(
                path = %path.display(),
                version = document.version,
                expected = SNAPSHOT_VERSION,
                "Snapshot version mismatch, loading what decodes"
            );
        }

        let now = now_ms();
        let mut loaded = 0usize;
        let mut corrupt = 0usize;
        let mut expired = 0usize;

        for raw in document.entries {
            let record: SnapshotRecord = match serde_json::from_value(raw) {
                Ok(record) => record,
                Err(e) => {
                    debug!(error = %e, "Skipping undecodable snapshot record");
                    corrupt += 1;
                    continue;
                }
            };

            let value = match StoredValue::try_from(record.value) {
                Ok(value) => value,
                Err(e) => {
                    debug!(key = %record.key, error = %e, "Skipping snapshot record with bad payload");
                    corrupt += 1;
                    continue;
                }
            };

            let entry = StoreEntry {
                value,
                expires_at_ms: record.expires_at_ms,
            };
            if entry.is_expired(now) {
                expired += 1;
                continue;
            }

            self.entries.insert(record.key, entry);
            loaded += 1;
        }

        if corrupt > 0 {
            warn!(path = %path.display(), corrupt, "Skipped corrupt snapshot records");
        }
        info!(path = %path.display(), loaded, expired, "Snapshot loaded");

        Ok(loaded)
    }

    /// Writes every live entry to `path` as a full-file replace.
    /// Returns the number of entries written.
    pub fn save_snapshot(&self, path: &Path) -> Result<usize, DomainError> {
        let _guard = self
            .save_lock
            .lock()
            .map_err(|_| DomainError::SnapshotError("Snapshot lock poisoned".to_string()))?;

        let now = now_ms();
        let entries: Vec<SnapshotRecord> = self
            .entries
            .iter()
            .filter(|item| !item.value().is_expired(now))
            .map(|item| SnapshotRecord {
                key: item.key().clone(),
                value: (&item.value().value).into(),
                expires_at_ms: item.value().expires_at_ms,
            })
            .collect();
        let count = entries.len();

        let document = SnapshotDocument {
            version: SNAPSHOT_VERSION,
            entries,
        };
        let bytes = serde_json::to_vec(&document)
            .map_err(|e| DomainError::SnapshotError(format!("Failed to encode snapshot: {}", e)))?;

        let temp_path = temp_path_for(path);
        std::fs::write(&temp_path, &bytes).map_err(|e| {
            DomainError::SnapshotError(format!("Failed to write {}: {}", temp_path.display(), e))
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            DomainError::SnapshotError(format!(
                "Failed to replace {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), entries = count, bytes = bytes.len(), "Snapshot saved");

        Ok(count)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "snapshot".into());
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for PersistentStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(now_ms()) {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: StoredValue, expiration: Expiration) {
        let entry = StoreEntry {
            value,
            expires_at_ms: self.deadline(expiration),
        };
        self.entries.insert(key.to_string(), entry);
    }

    fn delete(&self, key: &str) -> bool {
        match self.entries.remove(key) {
            Some((_, entry)) => !entry.is_expired(now_ms()),
            None => false,
        }
    }

    fn purge_expired(&self) -> usize {
        let now = now_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Purged expired entries");
        }
        removed
    }

    fn persist(&self) -> Result<(), DomainError> {
        self.save_snapshot(&self.snapshot_path).map(|_| ())
    }

    fn request_persist(&self) {
        self.persist_signal.notify_one();
    }
}
