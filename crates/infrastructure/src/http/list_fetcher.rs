use async_trait::async_trait;
use splitdns_application::ports::ClassificationListFetcher;
use splitdns_domain::DomainError;
use std::time::Duration;
use tracing::debug;

pub struct HttpListFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpListFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("splitdns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::ListFetchFailed(format!("HTTP client init: {}", e)))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl ClassificationListFetcher for HttpListFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::ListFetchFailed(format!("fetch error for {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::ListFetchFailed(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::ListFetchFailed(format!("read error for {}: {}", url, e)))?;

        debug!(url = %url, bytes = body.len(), "Classification list downloaded");

        Ok(body)
    }
}
