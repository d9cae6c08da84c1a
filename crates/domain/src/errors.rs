use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid classification tag: {0}")]
    InvalidClassification(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Snapshot error: {0}")]
    SnapshotError(String),

    #[error("Classification list fetch failed: {0}")]
    ListFetchFailed(String),

    #[error("Route registration failed: {0}")]
    RouteRegistrationFailed(String),
}

impl DomainError {
    /// Upstream-side failures that should surface to DNS clients as SERVFAIL.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::InvalidDnsResponse(_)
                | DomainError::IoError(_)
        )
    }
}
