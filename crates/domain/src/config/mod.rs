//! Configuration module for SplitDNS
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration and CLI overrides
//! - `server`: DNS and management ports and binding
//! - `upstream`: Trusted and policy resolvers
//! - `store`: Snapshot path and cache lifetimes
//! - `updater`: Classification list source and schedule
//! - `routing`: Routing trigger executable
//! - `web`: Management console content root
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod root;
pub mod routing;
pub mod server;
pub mod store;
pub mod updater;
pub mod upstream;
pub mod web;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use routing::RoutingConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;
pub use updater::UpdaterConfig;
pub use upstream::{parse_upstream_addr, UpstreamConfig};
pub use web::WebConfig;
