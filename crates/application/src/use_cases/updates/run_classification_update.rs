use splitdns_domain::{
    normalize_domain, DomainError, DomainKey, DomainTag, Expiration, StoredValue,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::{ClassificationListFetcher, KeyValueStore};
use crate::use_cases::{invalidate_address_answers, persist_or_log};

/// Outcome of one bulk list load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub applied: usize,
    pub skipped: usize,
}

pub struct RunClassificationUpdateUseCase {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn ClassificationListFetcher>,
}

impl RunClassificationUpdateUseCase {
    pub fn new(store: Arc<dyn KeyValueStore>, fetcher: Arc<dyn ClassificationListFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Fetches `url` and loads every `<tag>/<domain>` line into the store.
    ///
    /// The download completes before the first write. Malformed lines are
    /// skipped; the snapshot is persisted once at the end.
    #[instrument(skip(self))]
    pub async fn execute(&self, url: &str) -> Result<UpdateSummary, DomainError> {
        let body = self.fetcher.fetch(url).await?;
        let summary = self.apply(&body);

        persist_or_log(self.store.as_ref(), "classification_update");

        info!(
            url = %url,
            applied = summary.applied,
            skipped = summary.skipped,
            "Classification list loaded"
        );

        Ok(summary)
    }

    /// Loads an already downloaded list body.
    pub fn apply(&self, body: &str) -> UpdateSummary {
        let mut summary = UpdateSummary::default();

        for (index, line) in body.split('\n').enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line) {
                Ok((tag, domain)) => {
                    self.store.set(
                        DomainKey::new(&domain).as_str(),
                        StoredValue::Classification(tag),
                        Expiration::Never,
                    );
                    invalidate_address_answers(self.store.as_ref(), &domain);
                    summary.applied += 1;
                }
                Err(reason) => {
                    warn!(line_number = index + 1, line = %line, reason, "Skipping malformed list line");
                    summary.skipped += 1;
                }
            }
        }

        summary
    }
}

fn parse_line(line: &str) -> Result<(DomainTag, String), &'static str> {
    let mut fields = line.split('/');
    let tag_field = fields.next().unwrap_or_default();
    let domain_field = fields.next().ok_or("missing '/' separator")?;

    let domain = normalize_domain(domain_field);
    if domain.is_empty() {
        return Err("empty domain");
    }

    let tag = tag_field.parse().map_err(|_| "unknown tag")?;
    Ok((tag, domain))
}
