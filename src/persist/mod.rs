// Mon Feb 9 2026 - Alex

pub mod snapshot;

pub use snapshot::{load, save, PersistError, Snapshot, SNAPSHOT_VERSION};
