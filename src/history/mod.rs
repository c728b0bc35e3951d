// Thu Feb 5 2026 - Alex

pub mod store;

pub use store::{HistoryEntry, HistoryStore};
