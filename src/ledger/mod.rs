// Thu Feb 5 2026 - Alex

pub mod code;
pub mod duration;
pub mod error;
pub mod store;

pub type UserId = i64;

pub use code::generate_code;
pub use duration::{parse_duration, split_remaining, RemainingTime};
pub use error::LedgerError;
pub use store::{AccessLedger, GrantStatus, RedeemOutcome};
