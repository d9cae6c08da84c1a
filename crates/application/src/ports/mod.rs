mod key_value_store;
mod list_fetcher;
mod route_registrar;
mod upstream_exchanger;

pub use key_value_store::KeyValueStore;
pub use list_fetcher::ClassificationListFetcher;
pub use route_registrar::RouteRegistrar;
pub use upstream_exchanger::UpstreamExchanger;
