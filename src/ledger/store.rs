// Thu Feb 5 2026 - Alex

use crate::history::HistoryStore;
use crate::ledger::code::generate_code;
use crate::ledger::duration::{split_remaining, RemainingTime};
use crate::ledger::error::LedgerError;
use crate::ledger::UserId;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    Success(DateTime<Utc>),
    AlreadyRedeemed,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStatus {
    Operator,
    Active(DateTime<Utc>),
    Paused,
    Missing,
    Expired,
}

impl GrantStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, GrantStatus::Operator | GrantStatus::Active(_))
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    codes: HashMap<String, DateTime<Utc>>,
    grants: HashMap<UserId, DateTime<Utc>>,
    bound: HashSet<UserId>,
    used_codes: HashSet<String>,
    paused: HashSet<UserId>,
}

// One mutex guards the whole ledger so a redemption and the lazy expiry
// purge can never observe a half-moved key.
pub struct AccessLedger {
    operator: UserId,
    state: Mutex<LedgerState>,
}

impl AccessLedger {
    pub fn new(operator: UserId) -> Self {
        Self {
            operator,
            state: Mutex::new(LedgerState::default()),
        }
    }

    pub fn operator(&self) -> UserId {
        self.operator
    }

    pub fn issue(&self, duration: Duration) -> Result<(String, DateTime<Utc>), LedgerError> {
        let expiration = Utc::now().checked_add_signed(duration).ok_or_else(|| {
            LedgerError::InvalidDuration("expiration out of range".to_string())
        })?;
        let code = generate_code();
        self.state.lock().codes.insert(code.clone(), expiration);
        Ok((code, expiration))
    }

    pub fn redeem(&self, code: &str, user: UserId) -> RedeemOutcome {
        let mut state = self.state.lock();
        match state.codes.get(code).copied() {
            Some(expiration) if Utc::now() < expiration => {
                state.codes.remove(code);
                state.used_codes.insert(code.to_string());
                state.grants.insert(user, expiration);
                state.bound.insert(user);
                RedeemOutcome::Success(expiration)
            }
            Some(_) => {
                // Expired before redemption: consumed, not silently dropped.
                state.codes.remove(code);
                state.used_codes.insert(code.to_string());
                RedeemOutcome::Invalid
            }
            None if state.used_codes.contains(code) => RedeemOutcome::AlreadyRedeemed,
            None => RedeemOutcome::Invalid,
        }
    }

    pub fn extend(&self, user: UserId, duration: Duration) -> Result<DateTime<Utc>, LedgerError> {
        let mut state = self.state.lock();
        let expiration = state
            .grants
            .get_mut(&user)
            .ok_or(LedgerError::GrantMissing(user))?;
        *expiration = expiration.checked_add_signed(duration).ok_or_else(|| {
            LedgerError::InvalidDuration("expiration out of range".to_string())
        })?;
        Ok(*expiration)
    }

    // May move the expiration into the past; the next validity check
    // catches that and purges.
    pub fn deduct(&self, user: UserId, duration: Duration) -> Result<DateTime<Utc>, LedgerError> {
        let mut state = self.state.lock();
        let expiration = state
            .grants
            .get_mut(&user)
            .ok_or(LedgerError::GrantMissing(user))?;
        *expiration = expiration.checked_sub_signed(duration).ok_or_else(|| {
            LedgerError::InvalidDuration("expiration out of range".to_string())
        })?;
        Ok(*expiration)
    }

    pub fn pause(&self, user: UserId) {
        self.state.lock().paused.insert(user);
    }

    pub fn resume(&self, user: UserId) -> bool {
        self.state.lock().paused.remove(&user)
    }

    pub fn is_paused(&self, user: UserId) -> bool {
        self.state.lock().paused.contains(&user)
    }

    pub fn revoke(&self, user: UserId) -> bool {
        let mut state = self.state.lock();
        let had_grant = state.grants.remove(&user).is_some();
        let was_bound = state.bound.remove(&user);
        state.paused.remove(&user);
        had_grant || was_bound
    }

    // Validity check with the lazy expiry purge. The ledger lock stays held
    // across the history removal, so a concurrent redeem for the same user
    // cannot interleave with the purge. Safe to call repeatedly; the purge
    // is idempotent.
    pub fn check(&self, user: UserId, history: &HistoryStore) -> GrantStatus {
        if user == self.operator {
            return GrantStatus::Operator;
        }
        let mut state = self.state.lock();
        if state.paused.contains(&user) {
            return GrantStatus::Paused;
        }
        if !state.bound.contains(&user) && !state.grants.contains_key(&user) {
            return GrantStatus::Missing;
        }
        match state.grants.get(&user).copied() {
            Some(expiration) if Utc::now() < expiration => GrantStatus::Active(expiration),
            Some(_) => {
                state.grants.remove(&user);
                state.bound.remove(&user);
                history.remove(user);
                GrantStatus::Expired
            }
            None => {
                // Bound without a grant is a stale leftover; clean it up.
                state.bound.remove(&user);
                history.remove(user);
                GrantStatus::Missing
            }
        }
    }

    pub fn is_valid(&self, user: UserId, history: &HistoryStore) -> bool {
        self.check(user, history).is_valid()
    }

    pub fn remaining(&self, user: UserId) -> Option<RemainingTime> {
        let state = self.state.lock();
        let expiration = state.grants.get(&user)?;
        Some(split_remaining(*expiration - Utc::now()))
    }

    pub fn active_users(&self) -> Vec<(UserId, DateTime<Utc>)> {
        let now = Utc::now();
        let state = self.state.lock();
        let mut users: Vec<(UserId, DateTime<Utc>)> = state
            .bound
            .iter()
            .filter_map(|user| {
                state
                    .grants
                    .get(user)
                    .filter(|expiration| now < **expiration)
                    .map(|expiration| (*user, *expiration))
            })
            .collect();
        users.sort_by_key(|(user, _)| *user);
        users
    }

    pub fn export(
        &self,
    ) -> (
        HashMap<String, DateTime<Utc>>,
        HashMap<UserId, DateTime<Utc>>,
        HashSet<UserId>,
    ) {
        let state = self.state.lock();
        (state.codes.clone(), state.grants.clone(), state.bound.clone())
    }

    pub fn restore(
        &self,
        codes: HashMap<String, DateTime<Utc>>,
        grants: HashMap<UserId, DateTime<Utc>>,
        bound: HashSet<UserId>,
    ) {
        let mut state = self.state.lock();
        state.codes = codes;
        state.grants = grants;
        state.bound = bound;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERATOR: UserId = 1;
    const USER: UserId = 42;

    fn ledger() -> (AccessLedger, HistoryStore) {
        (AccessLedger::new(OPERATOR), HistoryStore::new())
    }

    #[test]
    fn test_redeem_unknown_code_is_invalid() {
        let (ledger, _) = ledger();
        assert_eq!(ledger.redeem("111-222-333", USER), RedeemOutcome::Invalid);
    }

    #[test]
    fn test_redeem_binds_grant_and_consumes_code() {
        let (ledger, history) = ledger();
        let (code, expiration) = ledger.issue(Duration::hours(1)).unwrap();

        assert_eq!(ledger.redeem(&code, USER), RedeemOutcome::Success(expiration));
        assert!(ledger.is_valid(USER, &history));

        // The code moved onto the user; a second attempt hits the used set.
        assert_eq!(ledger.redeem(&code, 77), RedeemOutcome::AlreadyRedeemed);
    }

    #[test]
    fn test_redeem_expired_code_is_invalid_then_already_redeemed() {
        let (ledger, history) = ledger();
        let (code, _) = ledger.issue(Duration::seconds(-5)).unwrap();

        assert_eq!(ledger.redeem(&code, USER), RedeemOutcome::Invalid);
        assert!(!ledger.is_valid(USER, &history));
        assert_eq!(ledger.redeem(&code, USER), RedeemOutcome::AlreadyRedeemed);
    }

    #[test]
    fn test_operator_bypasses_checks() {
        let (ledger, history) = ledger();
        ledger.pause(OPERATOR);
        assert_eq!(ledger.check(OPERATOR, &history), GrantStatus::Operator);
    }

    #[test]
    fn test_paused_user_is_denied_until_resumed() {
        let (ledger, history) = ledger();
        let (code, _) = ledger.issue(Duration::hours(1)).unwrap();
        ledger.redeem(&code, USER);

        ledger.pause(USER);
        assert_eq!(ledger.check(USER, &history), GrantStatus::Paused);

        assert!(ledger.resume(USER));
        assert!(ledger.check(USER, &history).is_valid());
        assert!(!ledger.resume(USER));
    }

    #[test]
    fn test_extend_and_deduct_shift_expiration() {
        let (ledger, _) = ledger();
        let (code, expiration) = ledger.issue(Duration::hours(1)).unwrap();
        ledger.redeem(&code, USER);

        let extended = ledger.extend(USER, Duration::hours(2)).unwrap();
        assert_eq!(extended, expiration + Duration::hours(2));

        let deducted = ledger.deduct(USER, Duration::minutes(30)).unwrap();
        assert_eq!(deducted, extended - Duration::minutes(30));
    }

    #[test]
    fn test_extend_without_grant_reports_missing() {
        let (ledger, _) = ledger();
        assert_eq!(
            ledger.extend(USER, Duration::hours(1)),
            Err(LedgerError::GrantMissing(USER))
        );
        assert_eq!(
            ledger.deduct(USER, Duration::hours(1)),
            Err(LedgerError::GrantMissing(USER))
        );
    }

    #[test]
    fn test_expiry_purges_grant_and_history_once() {
        let (ledger, history) = ledger();
        let (code, _) = ledger.issue(Duration::hours(1)).unwrap();
        ledger.redeem(&code, USER);
        history.record(USER, "someone", 10);
        assert!(ledger.is_valid(USER, &history));

        // Push the expiration into the past; validity flips lazily.
        ledger.deduct(USER, Duration::hours(2)).unwrap();
        assert_eq!(ledger.check(USER, &history), GrantStatus::Expired);
        assert!(history.get(USER).is_none());

        // The purge is not re-created by asking again.
        assert_eq!(ledger.check(USER, &history), GrantStatus::Missing);
        assert!(!ledger.is_valid(USER, &history));
    }

    #[test]
    fn test_revoke_clears_grant() {
        let (ledger, history) = ledger();
        let (code, _) = ledger.issue(Duration::hours(1)).unwrap();
        ledger.redeem(&code, USER);
        ledger.pause(USER);

        assert!(ledger.revoke(USER));
        assert_eq!(ledger.check(USER, &history), GrantStatus::Missing);
        assert!(!ledger.revoke(USER));
    }

    #[test]
    fn test_active_users_lists_unexpired_grants() {
        let (ledger, _) = ledger();
        let (code_a, _) = ledger.issue(Duration::hours(1)).unwrap();
        let (code_b, _) = ledger.issue(Duration::hours(1)).unwrap();
        ledger.redeem(&code_a, 7);
        ledger.redeem(&code_b, 8);
        ledger.deduct(8, Duration::hours(2)).unwrap();

        let active: Vec<UserId> = ledger.active_users().iter().map(|(u, _)| *u).collect();
        assert_eq!(active, vec![7]);
    }

    #[test]
    fn test_remaining_reports_breakdown() {
        let (ledger, _) = ledger();
        let (code, _) = ledger.issue(Duration::days(2)).unwrap();
        ledger.redeem(&code, USER);

        let remaining = ledger.remaining(USER).unwrap();
        assert!(remaining.days == 1 || remaining.days == 2);
        assert!(ledger.remaining(999).is_none());
    }
}
