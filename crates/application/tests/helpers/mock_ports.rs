#![allow(dead_code)]

use async_trait::async_trait;
use dashmap::DashMap;
use splitdns_application::ports::{ClassificationListFetcher, KeyValueStore};
use splitdns_domain::{DomainError, DomainKey, DomainTag, Expiration, StoredValue};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

// ============================================================================
// In-memory KeyValueStore
// ============================================================================

pub struct InMemoryStore {
    entries: DashMap<String, (StoredValue, Option<Instant>)>,
    default_ttl: Duration,
    persist_calls: AtomicUsize,
    fail_persist: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl: Duration::from_secs(300),
            persist_calls: AtomicUsize::new(0),
            fail_persist: false,
        }
    }

    pub fn failing_persist() -> Self {
        Self {
            fail_persist: true,
            ..Self::new()
        }
    }

    pub fn tag(&self, domain: &str, tag: DomainTag) {
        self.set(
            DomainKey::new(domain).as_str(),
            StoredValue::Classification(tag),
            Expiration::Never,
        );
    }

    pub fn tag_of(&self, domain: &str) -> Option<DomainTag> {
        self.get(DomainKey::new(domain).as_str())
            .and_then(|v| v.as_classification())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn persist_count(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        let entry = self.entries.get(key)?;
        match entry.1 {
            Some(deadline) if deadline <= Instant::now() => None,
            _ => Some(entry.0.clone()),
        }
    }

    fn set(&self, key: &str, value: StoredValue, expiration: Expiration) {
        let deadline = match expiration {
            Expiration::Never => None,
            Expiration::Default => Some(Instant::now() + self.default_ttl),
            Expiration::After(ttl) => Some(Instant::now() + ttl),
        };
        self.entries.insert(key.to_string(), (value, deadline));
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, (_, deadline)| deadline.map_or(true, |d| d > now));
        before - self.entries.len()
    }

    fn persist(&self) -> Result<(), DomainError> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_persist {
            return Err(DomainError::SnapshotError("disk full".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Mock ClassificationListFetcher
// ============================================================================

pub struct MockListFetcher {
    body: Option<String>,
    calls: AtomicUsize,
}

impl MockListFetcher {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationListFetcher for MockListFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body
            .clone()
            .ok_or_else(|| DomainError::ListFetchFailed(format!("{}: connection refused", url)))
    }
}
