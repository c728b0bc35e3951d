// Thu Feb 5 2026 - Alex

pub mod coordinator;
pub mod pattern;
pub mod record;
pub mod request;
mod worker;

pub use coordinator::{ScanCoordinator, ScanOutcome};
pub use pattern::parse_account_line;
pub use record::AccountRecord;
pub use request::ScanRequest;
