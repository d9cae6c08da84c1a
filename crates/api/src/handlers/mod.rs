mod health;
mod management;
mod params;

pub use health::health_check;
pub use management::{add_domain, add_host, delete_domain, update};
pub use params::Params;
