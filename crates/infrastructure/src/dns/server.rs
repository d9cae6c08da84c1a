use crate::dns::dispatcher::QueryDispatcher;
use splitdns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{error, info, warn};

const MAX_DATAGRAM_SIZE: usize = 4096;

/// UDP listener handing every datagram to the dispatcher on its own task.
pub struct DnsServer {
    socket: Arc<UdpSocket>,
    dispatcher: Arc<QueryDispatcher>,
    tracker: TaskTracker,
}

impl DnsServer {
    /// Binds the listener. Failure here is fatal for the process.
    pub async fn bind(addr: SocketAddr, dispatcher: Arc<QueryDispatcher>) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind DNS socket {}: {}", addr, e)))?;

        Ok(Self {
            socket: Arc::new(socket),
            dispatcher,
            tracker: TaskTracker::new(),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(e.to_string()))
    }

    /// Serves until `shutdown` fires, then waits up to `grace` for in-flight
    /// queries before releasing the socket.
    pub async fn run(self, shutdown: CancellationToken, grace: Duration) {
        let local_addr = self.socket.local_addr().ok();
        info!(bind_address = ?local_addr, "DNS server ready");

        let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("DNS server: shutting down");
                    break;
                }
                received = self.socket.recv_from(&mut recv_buf) => {
                    let (n, from) = match received {
                        Ok(received) => received,
                        Err(e) => {
                            // ICMP errors from earlier replies surface here on some platforms.
                            warn!(error = %e, "UDP recv error");
                            continue;
                        }
                    };

                    let owned_buf: Arc<[u8]> = Arc::from(&recv_buf[..n]);
                    let dispatcher = self.dispatcher.clone();
                    let socket = self.socket.clone();
                    self.tracker.spawn(async move {
                        if let Some(response) = dispatcher.handle(&owned_buf).await {
                            if let Err(e) = socket.send_to(&response, from).await {
                                error!(client = %from, error = %e, "Failed to send DNS response");
                            }
                        }
                    });
                }
            }
        }

        self.tracker.close();
        if tokio::time::timeout(grace, self.tracker.wait()).await.is_err() {
            warn!(
                in_flight = self.tracker.len(),
                "Abandoning in-flight queries after grace period"
            );
        }
        info!("DNS server stopped");
    }
}
