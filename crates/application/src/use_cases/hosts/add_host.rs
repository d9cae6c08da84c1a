use splitdns_domain::{DomainError, DomainKey, DomainTag, Expiration, StoredValue};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::KeyValueStore;
use crate::use_cases::{invalidate_address_answers, persist_or_log, require_domain};

pub struct AddHostUseCase {
    store: Arc<dyn KeyValueStore>,
}

impl AddHostUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Pins `host` to `ip`: writes the override record, tags the domain `host`
    /// and drops any cached address answers so the override applies at once.
    #[instrument(skip(self))]
    pub fn execute(&self, host: &str, ip: &str) -> Result<IpAddr, DomainError> {
        let domain = require_domain(host)?;
        let address: IpAddr = ip
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(ip.to_string()))?;

        let key = DomainKey::new(&domain);
        self.store.set(
            &key.host_override(),
            StoredValue::HostAddress(address.to_string()),
            Expiration::Never,
        );
        self.store.set(
            key.as_str(),
            StoredValue::Classification(DomainTag::Host),
            Expiration::Never,
        );
        invalidate_address_answers(self.store.as_ref(), &domain);
        persist_or_log(self.store.as_ref(), "add_host");

        info!(domain = %domain, ip = %address, "Host override added");

        Ok(address)
    }
}
