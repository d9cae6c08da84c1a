use splitdns_domain::{DomainError, DomainKey};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::KeyValueStore;
use crate::use_cases::{invalidate_address_answers, persist_or_log, require_domain};

pub struct DeleteClassificationUseCase {
    store: Arc<dyn KeyValueStore>,
}

impl DeleteClassificationUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Removes the tag, any host override and the cached address answers of
    /// `domain`, so the next query classifies it from scratch.
    ///
    /// Returns whether a classification entry existed.
    #[instrument(skip(self))]
    pub fn execute(&self, domain: &str) -> Result<bool, DomainError> {
        let domain = require_domain(domain)?;
        let key = DomainKey::new(&domain);

        let existed = self.store.delete(key.as_str());
        self.store.delete(&key.host_override());
        invalidate_address_answers(self.store.as_ref(), &domain);
        persist_or_log(self.store.as_ref(), "delete_classification");

        info!(domain = %domain, existed, "Classification deleted");

        Ok(existed)
    }
}
