pub mod dispatcher;
pub mod server;
pub mod transport;
pub mod upstream;
pub mod wire;

pub use dispatcher::{QueryDispatcher, SYNTHESIZED_TTL};
pub use server::DnsServer;
pub use upstream::UdpUpstreamExchanger;
