mod command;
mod noop;

pub use command::CommandRouteRegistrar;
pub use noop::NoopRouteRegistrar;
