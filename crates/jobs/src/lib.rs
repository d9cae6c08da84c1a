pub mod classification_update;
pub mod runner;
pub mod store_sweep;

pub use classification_update::{delay_until_next, ClassificationUpdateJob};
pub use runner::JobRunner;
pub use store_sweep::StoreSweepJob;
