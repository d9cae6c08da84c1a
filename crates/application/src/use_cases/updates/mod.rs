mod run_classification_update;

pub use run_classification_update::{RunClassificationUpdateUseCase, UpdateSummary};
