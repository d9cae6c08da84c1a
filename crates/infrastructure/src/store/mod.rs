mod persistent;
mod snapshot;
mod writer;

pub use persistent::PersistentStore;
pub use writer::SnapshotWriter;
