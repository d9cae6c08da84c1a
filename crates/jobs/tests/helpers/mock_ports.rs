#![allow(dead_code)]

use async_trait::async_trait;
use splitdns_application::ports::{ClassificationListFetcher, KeyValueStore};
use splitdns_domain::{DomainError, DomainKey, DomainTag, Expiration, StoredValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock KeyValueStore
// ============================================================================

#[derive(Default)]
pub struct MockStore {
    entries: Mutex<HashMap<String, StoredValue>>,
    purge_calls: AtomicUsize,
    persist_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purge_count(&self) -> usize {
        self.purge_calls.load(Ordering::SeqCst)
    }

    pub fn persist_count(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    pub fn tag_of(&self, domain: &str) -> Option<DomainTag> {
        self.get(DomainKey::new(domain).as_str())
            .and_then(|v| v.as_classification())
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Option<StoredValue> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: StoredValue, _expiration: Expiration) {
        self.entries.lock().unwrap().insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.lock().unwrap().remove(key).is_some()
    }

    fn purge_expired(&self) -> usize {
        self.purge_calls.fetch_add(1, Ordering::SeqCst);
        0
    }

    fn persist(&self) -> Result<(), DomainError> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
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
            .ok_or_else(|| DomainError::ListFetchFailed(format!("HTTP 503 for {}", url)))
    }
}
