use splitdns_application::ports::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Physically drops expired store entries on a fixed interval.
pub struct StoreSweepJob {
    store: Arc<dyn KeyValueStore>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl StoreSweepJob {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            interval_secs: 300,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(interval_secs = self.interval_secs, "Starting store sweep job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StoreSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        // Whole-map pass, kept off the runtime workers.
                        let store = Arc::clone(&self.store);
                        match tokio::task::spawn_blocking(move || store.purge_expired()).await {
                            Ok(removed) => debug!(removed, "StoreSweepJob: sweep completed"),
                            Err(e) => warn!(error = %e, "StoreSweepJob: sweep task failed"),
                        }
                    }
                }
            }
        })
    }
}
