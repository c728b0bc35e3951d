// Mon Feb 9 2026 - Alex

pub mod command;
pub mod config;
pub mod corpus;
pub mod history;
pub mod ledger;
pub mod logging;
pub mod persist;
pub mod scan;
pub mod service;

pub use command::{CommandRegistry, CommandToken};
pub use config::Config;
pub use corpus::{CorpusIndexer, ExclusionSet};
pub use history::HistoryStore;
pub use ledger::{AccessLedger, GrantStatus, RedeemOutcome, UserId};
pub use scan::{AccountRecord, ScanCoordinator, ScanOutcome};
pub use service::{ExtractionOutcome, ExtractionService};
