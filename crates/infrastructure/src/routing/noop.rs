use async_trait::async_trait;
use splitdns_application::ports::RouteRegistrar;
use splitdns_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

/// Used when no routing trigger is configured.
#[derive(Debug, Default)]
pub struct NoopRouteRegistrar;

#[async_trait]
impl RouteRegistrar for NoopRouteRegistrar {
    async fn register(&self, ip: IpAddr) -> Result<(), DomainError> {
        debug!(ip = %ip, "No routing trigger configured, skipping registration");
        Ok(())
    }
}
