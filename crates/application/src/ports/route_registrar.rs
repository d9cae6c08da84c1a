use async_trait::async_trait;
use splitdns_domain::DomainError;
use std::net::IpAddr;

/// Registers a resolved address into the policy-routed set of the host.
///
/// Failures are reported to the caller, which only logs them: a failed
/// registration never fails the DNS answer.
#[async_trait]
pub trait RouteRegistrar: Send + Sync {
    async fn register(&self, ip: IpAddr) -> Result<(), DomainError>;
}
