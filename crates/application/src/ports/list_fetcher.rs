use async_trait::async_trait;
use splitdns_domain::DomainError;

/// Downloads a newline-delimited `<tag>/<domain>` classification list.
#[async_trait]
pub trait ClassificationListFetcher: Send + Sync {
    /// Returns the response body. Non-success statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}
