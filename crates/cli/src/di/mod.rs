use splitdns_api::AppState;
use splitdns_application::ports::{ClassificationListFetcher, KeyValueStore, RouteRegistrar};
use splitdns_application::services::DomainClassifier;
use splitdns_application::use_cases::{
    AddHostUseCase, DeleteClassificationUseCase, RunClassificationUpdateUseCase,
    SetClassificationUseCase,
};
use splitdns_domain::Config;
use splitdns_infrastructure::dns::{QueryDispatcher, UdpUpstreamExchanger};
use splitdns_infrastructure::http::HttpListFetcher;
use splitdns_infrastructure::routing::{CommandRouteRegistrar, NoopRouteRegistrar};
use splitdns_infrastructure::store::PersistentStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Every long-lived component, built once from the configuration.
pub struct Services {
    pub store: Arc<PersistentStore>,
    pub dispatcher: Arc<QueryDispatcher>,
    pub run_update: Arc<RunClassificationUpdateUseCase>,
    pub app_state: AppState,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(open_store(config));
        let shared_store: Arc<dyn KeyValueStore> = store.clone();

        let classifier = Arc::new(DomainClassifier::new(shared_store.clone())?);
        let upstream = Arc::new(UdpUpstreamExchanger::from_config(config)?);
        let registrar = route_registrar(config);
        let dispatcher = Arc::new(QueryDispatcher::new(
            shared_store.clone(),
            classifier,
            upstream,
            registrar,
        ));

        let fetcher: Arc<dyn ClassificationListFetcher> = Arc::new(HttpListFetcher::new(
            Duration::from_secs(config.updater.fetch_timeout_secs),
        )?);
        let run_update = Arc::new(RunClassificationUpdateUseCase::new(
            shared_store.clone(),
            fetcher,
        ));

        let app_state = AppState {
            add_host: Arc::new(AddHostUseCase::new(shared_store.clone())),
            set_classification: Arc::new(SetClassificationUseCase::new(shared_store.clone())),
            delete_classification: Arc::new(DeleteClassificationUseCase::new(shared_store)),
            run_update: run_update.clone(),
        };

        Ok(Self {
            store,
            dispatcher,
            run_update,
            app_state,
        })
    }
}

/// A snapshot that cannot be read is not fatal: the server starts empty.
fn open_store(config: &Config) -> PersistentStore {
    let default_ttl = Duration::from_secs(config.store.default_ttl_secs);
    match PersistentStore::open(&config.store.snapshot_path, default_ttl) {
        Ok(store) => {
            info!(entries = store.len(), "Store ready");
            store
        }
        Err(e) => {
            warn!(error = %e, "Snapshot unreadable, starting with an empty store");
            PersistentStore::new(&config.store.snapshot_path, default_ttl)
        }
    }
}

fn route_registrar(config: &Config) -> Arc<dyn RouteRegistrar> {
    match &config.routing.trigger_path {
        Some(path) => {
            info!(trigger = %path, "Routing trigger enabled");
            Arc::new(CommandRouteRegistrar::new(
                path,
                Duration::from_millis(config.routing.timeout_ms),
            ))
        }
        None => {
            info!("No routing trigger configured");
            Arc::new(NoopRouteRegistrar)
        }
    }
}
