// Mon Feb 9 2026 - Alex

use crate::history::HistoryStore;
use crate::ledger::{AccessLedger, GrantStatus, UserId};

// Why access was refused. The variants stay distinguishable for the
// caller-facing message; all of them mean "denied" for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    Paused,
    Missing,
    Expired,
}

impl DenialReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenialReason::Paused => "Access key is paused",
            DenialReason::Missing => "No access key found; redeem a key first",
            DenialReason::Expired => "Access key has expired",
        }
    }
}

pub fn check_access(
    ledger: &AccessLedger,
    history: &HistoryStore,
    user: UserId,
) -> Result<(), DenialReason> {
    match ledger.check(user, history) {
        GrantStatus::Operator | GrantStatus::Active(_) => Ok(()),
        GrantStatus::Paused => Err(DenialReason::Paused),
        GrantStatus::Missing => Err(DenialReason::Missing),
        GrantStatus::Expired => Err(DenialReason::Expired),
    }
}

// Guard as plain function composition: the operation only runs once the
// grant check passes.
pub fn guarded<T>(
    ledger: &AccessLedger,
    history: &HistoryStore,
    user: UserId,
    op: impl FnOnce() -> T,
) -> Result<T, DenialReason> {
    check_access(ledger, history, user)?;
    Ok(op())
}
