pub mod dns;
pub mod http;
pub mod routing;
pub mod store;
