use splitdns_domain::{DomainError, DomainKey, DomainTag, Expiration, StoredValue};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::KeyValueStore;
use crate::use_cases::{invalidate_address_answers, persist_or_log, require_domain};

pub struct SetClassificationUseCase {
    store: Arc<dyn KeyValueStore>,
}

impl SetClassificationUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrites the tag of `domain` and invalidates its cached address answers.
    #[instrument(skip(self))]
    pub fn execute(&self, domain: &str, tag: &str) -> Result<DomainTag, DomainError> {
        let domain = require_domain(domain)?;
        let tag: DomainTag = tag.parse()?;

        self.store.set(
            DomainKey::new(&domain).as_str(),
            StoredValue::Classification(tag),
            Expiration::Never,
        );
        invalidate_address_answers(self.store.as_ref(), &domain);
        persist_or_log(self.store.as_ref(), "set_classification");

        info!(domain = %domain, tag = %tag, "Classification set");

        Ok(tag)
    }
}
