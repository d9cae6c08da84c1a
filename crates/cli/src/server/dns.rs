use splitdns_infrastructure::dns::{DnsServer, QueryDispatcher};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Binds before returning so a busy port fails startup.
pub async fn start_dns_server(
    bind_addr: SocketAddr,
    dispatcher: Arc<QueryDispatcher>,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    info!(bind_address = %bind_addr, "Starting DNS server");

    let server = DnsServer::bind(bind_addr, dispatcher).await?;

    Ok(tokio::spawn(server.run(shutdown, SHUTDOWN_GRACE)))
}
