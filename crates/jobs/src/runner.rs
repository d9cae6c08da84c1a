use crate::{ClassificationUpdateJob, StoreSweepJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_store_sweep(StoreSweepJob::new(store).with_cancellation(token.clone()))
///     .with_classification_update(ClassificationUpdateJob::new(update, url))
///     .start();
/// ```
pub struct JobRunner {
    classification_update: Option<ClassificationUpdateJob>,
    store_sweep: Option<StoreSweepJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            classification_update: None,
            store_sweep: None,
        }
    }

    pub fn with_classification_update(mut self, job: ClassificationUpdateJob) -> Self {
        self.classification_update = Some(job);
        self
    }

    pub fn with_store_sweep(mut self, job: StoreSweepJob) -> Self {
        self.store_sweep = Some(job);
        self
    }

    /// Start all registered background jobs. Each handle completes once its
    /// job observed cancellation.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();

        if let Some(job) = self.store_sweep {
            handles.push(Arc::new(job).start());
        }

        if let Some(job) = self.classification_update {
            handles.push(Arc::new(job).start());
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
