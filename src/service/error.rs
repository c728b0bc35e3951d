// Mon Feb 9 2026 - Alex

use crate::ledger::LedgerError;
use crate::persist::PersistError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Quota must be greater than zero")]
    InvalidQuota,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
