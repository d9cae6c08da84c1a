use async_trait::async_trait;
use splitdns_domain::{DomainError, UpstreamRole};

/// Exchanges one wire-format DNS query with a configured upstream resolver.
///
/// One request, one matching reply, bounded by a timeout. No retries.
#[async_trait]
pub trait UpstreamExchanger: Send + Sync {
    async fn exchange(&self, query: &[u8], role: UpstreamRole) -> Result<Vec<u8>, DomainError>;
}
