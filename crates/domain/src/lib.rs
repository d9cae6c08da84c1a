//! SplitDNS Domain Layer
pub mod classification;
pub mod config;
pub mod errors;
pub mod keys;
pub mod store;
pub mod upstream;

pub use classification::{normalize_domain, Classification, DomainTag};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use keys::{DomainKey, QueryFingerprint};
pub use store::{Expiration, ResponseBytes, StoredValue};
pub use upstream::UpstreamRole;
