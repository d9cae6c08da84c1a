use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use splitdns_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

const DNS_HEADER_LEN: usize = 12;

#[inline]
fn message_id(bytes: &[u8]) -> Option<u16> {
    (bytes.len() >= DNS_HEADER_LEN).then(|| u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// DNS over UDP transport, one ephemeral socket per exchange.
///
/// Waits for a datagram from the server whose transaction ID matches the
/// query; anything else received before the deadline is discarded.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn map_io_error(&self, e: io::Error) -> DomainError {
        match e.kind() {
            io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
                server: self.server_addr.to_string(),
            },
            _ => DomainError::IoError(format!("UDP exchange with {}: {}", self.server_addr, e)),
        }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, DomainError> {
        let expected_id = message_id(message_bytes).ok_or_else(|| {
            DomainError::InvalidDnsResponse("Query shorter than a DNS header".to_string())
        })?;

        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        // Connected so ICMP port-unreachable surfaces as ConnectionRefused
        // and datagrams from other sources are filtered by the kernel.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.map_io_error(e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| self.map_io_error(e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            id = expected_id,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| self.map_io_error(e))?;

            match message_id(&recv_buf[..bytes_received]) {
                Some(id) if id == expected_id => {
                    recv_buf.truncate(bytes_received);
                    debug!(
                        server = %self.server_addr,
                        bytes_received = bytes_received,
                        "UDP response received"
                    );
                    return Ok(recv_buf);
                }
                other => {
                    warn!(
                        server = %self.server_addr,
                        expected = expected_id,
                        received = ?other,
                        "Discarding UDP response with mismatched ID"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }
}
