// Thu Feb 5 2026 - Alex

use crate::ledger::UserId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
    #[error("No active key found for user {0}")]
    GrantMissing(UserId),
}
