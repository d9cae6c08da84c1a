pub mod udp;

use async_trait::async_trait;
use splitdns_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

/// Reply to one exchange, still in wire format.
#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
    /// Transport name for logs ("UDP").
    pub protocol_used: &'static str,
}

/// One query/reply exchange with a single upstream, bounded by `timeout`.
///
/// Implementations return the first reply carrying the query's transaction
/// ID; they do not validate the message beyond that.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}
