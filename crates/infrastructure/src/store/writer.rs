use super::PersistentStore;
use splitdns_application::ports::KeyValueStore;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Writes requested snapshots on the blocking pool, off the query path.
///
/// Requests that arrive while a save is running collapse into a single
/// follow-up save. Pending requests at cancellation are left to the
/// shutdown flush.
pub struct SnapshotWriter {
    store: Arc<PersistentStore>,
    shutdown: CancellationToken,
}

impl SnapshotWriter {
    pub fn new(store: Arc<PersistentStore>) -> Self {
        Self {
            store,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self) -> JoinHandle<()> {
        info!(path = %self.store.snapshot_path().display(), "Starting snapshot writer");

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("SnapshotWriter: shutting down");
                        break;
                    }
                    _ = self.store.persist_requested() => {}
                }

                let store = Arc::clone(&self.store);
                match tokio::task::spawn_blocking(move || store.persist()).await {
                    Ok(Ok(())) => debug!("SnapshotWriter: snapshot written"),
                    Ok(Err(e)) => error!(error = %e, "Failed to persist store snapshot"),
                    Err(e) => error!(error = %e, "Snapshot task panicked"),
                }
            }
        })
    }
}
