// Thu Feb 5 2026 - Alex

use crate::command::CommandToken;
use crate::corpus::ExclusionSet;
use crate::ledger::UserId;
use std::sync::Arc;

// Immutable once constructed. The keyword is lowercased here so workers
// only lowercase the line side of the comparison.
pub struct ScanRequest {
    keyword: String,
    quota: usize,
    exclusion: Arc<ExclusionSet>,
    token: CommandToken,
    requester: UserId,
}

impl ScanRequest {
    pub fn new(
        keyword: &str,
        quota: usize,
        exclusion: Arc<ExclusionSet>,
        token: CommandToken,
        requester: UserId,
    ) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            quota,
            exclusion,
            token,
            requester,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn exclusion(&self) -> &ExclusionSet {
        &self.exclusion
    }

    pub fn token(&self) -> CommandToken {
        self.token
    }

    pub fn requester(&self) -> UserId {
        self.requester
    }
}
