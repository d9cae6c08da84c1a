use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use hickory_proto::op::Message;
use splitdns_application::ports::UpstreamExchanger;
use splitdns_domain::config::parse_upstream_addr;
use splitdns_domain::{Config, DomainError, UpstreamRole};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends queries to the trusted or policy resolver over UDP.
///
/// A reply is only accepted if it parses as a DNS message; no retries.
pub struct UdpUpstreamExchanger {
    trusted: UdpTransport,
    policy: UdpTransport,
    timeout: Duration,
}

impl UdpUpstreamExchanger {
    pub fn new(trusted: SocketAddr, policy: SocketAddr, timeout: Duration) -> Self {
        Self {
            trusted: UdpTransport::new(trusted),
            policy: UdpTransport::new(policy),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let resolve = |role: UpstreamRole, addr: &str| {
            parse_upstream_addr(addr).ok_or_else(|| {
                DomainError::IoError(format!("Invalid {} upstream address '{}'", role, addr))
            })
        };
        Ok(Self::new(
            resolve(UpstreamRole::Trusted, &config.upstream.trusted)?,
            resolve(UpstreamRole::Policy, &config.upstream.policy)?,
            Duration::from_millis(config.upstream.timeout_ms),
        ))
    }

    fn transport(&self, role: UpstreamRole) -> &UdpTransport {
        match role {
            UpstreamRole::Trusted => &self.trusted,
            UpstreamRole::Policy => &self.policy,
        }
    }
}

#[async_trait]
impl UpstreamExchanger for UdpUpstreamExchanger {
    async fn exchange(&self, query: &[u8], role: UpstreamRole) -> Result<Vec<u8>, DomainError> {
        let transport = self.transport(role);

        let response = transport.send(query, self.timeout).await.map_err(|e| {
            warn!(
                role = %role,
                server = %transport.server_addr(),
                error = %e,
                "Upstream exchange failed"
            );
            e
        })?;

        Message::from_vec(&response.bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "Malformed reply from {}: {}",
                transport.server_addr(),
                e
            ))
        })?;

        debug!(
            role = %role,
            server = %transport.server_addr(),
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Upstream exchange complete"
        );

        Ok(response.bytes)
    }
}
