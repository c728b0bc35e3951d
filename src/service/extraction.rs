// Mon Feb 9 2026 - Alex

use crate::command::CommandRegistry;
use crate::config::Config;
use crate::corpus::{CorpusIndexer, ExclusionSet};
use crate::history::{HistoryEntry, HistoryStore};
use crate::ledger::duration::RemainingTime;
use crate::ledger::{parse_duration, AccessLedger, GrantStatus, RedeemOutcome, UserId};
use crate::persist::{self, Snapshot};
use crate::scan::{AccountRecord, ScanCoordinator, ScanOutcome, ScanRequest};
use crate::service::availability::{count_available, AvailabilityCount};
use crate::service::error::ServiceError;
use crate::service::guard::{check_access, guarded, DenialReason};
use crate::service::report::{validate_record_file, RecordFileReport};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct ExtractionRequest {
    pub requester: UserId,
    pub display_name: String,
    pub keyword: String,
    pub quota: usize,
    pub output_name: String,
}

#[derive(Debug)]
pub enum ExtractionOutcome {
    Completed(ExtractionReport),
    // Superseded is a terminal outcome, not an error, and must never be
    // rendered as "zero results found".
    Superseded,
    Denied(DenialReason),
}

#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub output_name: String,
    pub output_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub total_records: usize,
}

pub struct ExtractionService {
    config: Arc<Config>,
    ledger: Arc<AccessLedger>,
    registry: Arc<CommandRegistry>,
    history: Arc<HistoryStore>,
    indexer: CorpusIndexer,
    coordinator: ScanCoordinator,
}

impl ExtractionService {
    pub fn new(
        config: Arc<Config>,
        ledger: Arc<AccessLedger>,
        registry: Arc<CommandRegistry>,
        history: Arc<HistoryStore>,
    ) -> Self {
        let indexer = CorpusIndexer::new(
            config.raw_corpus_dir.clone(),
            config.delivered_dir.clone(),
        );
        let coordinator = ScanCoordinator::new(config.worker_threads, registry.clone());
        Self {
            config,
            ledger,
            registry,
            history,
            indexer,
            coordinator,
        }
    }

    pub fn run(&self, request: &ExtractionRequest) -> Result<ExtractionOutcome, ServiceError> {
        if let Err(reason) = check_access(&self.ledger, &self.history, request.requester) {
            return Ok(ExtractionOutcome::Denied(reason));
        }
        if request.quota == 0 {
            return Err(ServiceError::InvalidQuota);
        }

        // Minting here supersedes any in-flight extraction for this user.
        let token = self.registry.mint(request.requester);
        let exclusion = Arc::new(ExclusionSet::load(&self.indexer.delivered_files()));
        let files = self.indexer.candidate_files();
        info!(
            "scanning {} files for `{}` (quota {}, {} excluded records)",
            files.len(),
            request.keyword,
            request.quota,
            exclusion.len()
        );

        let scan_request = Arc::new(ScanRequest::new(
            &request.keyword,
            request.quota,
            exclusion,
            token,
            request.requester,
        ));

        match self.coordinator.scan(scan_request, files) {
            ScanOutcome::Superseded => {
                info!("extraction for user {} superseded", request.requester);
                Ok(ExtractionOutcome::Superseded)
            }
            ScanOutcome::Complete(records) => {
                let output_path = match self.write_results(&request.output_name, &records) {
                    Ok(path) => path,
                    Err(e) => {
                        error!("failed to write results for {}: {}", request.output_name, e);
                        return Err(e);
                    }
                };
                if self.config.result_delay_ms > 0 {
                    thread::sleep(Duration::from_millis(self.config.result_delay_ms));
                }
                self.history
                    .record(request.requester, &request.display_name, records.len());
                self.save()?;
                Ok(ExtractionOutcome::Completed(ExtractionReport {
                    output_name: request.output_name.clone(),
                    output_path,
                    timestamp: Utc::now(),
                    total_records: records.len(),
                }))
            }
        }
    }

    // Temp file plus rename so a failure never leaves a partial result in
    // the delivered corpus.
    fn write_results(
        &self,
        output_name: &str,
        records: &[AccountRecord],
    ) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(&self.config.delivered_dir)?;
        let path = self.config.delivered_dir.join(output_name);
        let body = records
            .iter()
            .map(AccountRecord::normalized)
            .collect::<Vec<_>>()
            .join("\n");

        let tmp = path.with_extension("part");
        if let Err(e) = fs::write(&tmp, body) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(path)
    }

    pub fn availability(
        &self,
        user: UserId,
        keyword: &str,
    ) -> Result<AvailabilityCount, DenialReason> {
        guarded(&self.ledger, &self.history, user, || {
            count_available(&self.indexer, keyword)
        })
    }

    pub fn validate_output(
        &self,
        user: UserId,
        output_name: &str,
    ) -> Result<Option<RecordFileReport>, DenialReason> {
        guarded(&self.ledger, &self.history, user, || {
            let path = self.config.delivered_dir.join(output_name);
            if !path.exists() {
                return None;
            }
            validate_record_file(&path).ok()
        })
    }

    pub fn issue_code(&self, spec: &str) -> Result<(String, DateTime<Utc>), ServiceError> {
        let duration = parse_duration(spec)?;
        let issued = self.ledger.issue(duration)?;
        self.save()?;
        Ok(issued)
    }

    pub fn redeem_code(&self, code: &str, user: UserId) -> Result<RedeemOutcome, ServiceError> {
        let outcome = self.ledger.redeem(code, user);
        self.save()?;
        Ok(outcome)
    }

    pub fn extend_grant(&self, user: UserId, spec: &str) -> Result<DateTime<Utc>, ServiceError> {
        let duration = parse_duration(spec)?;
        let expiration = self.ledger.extend(user, duration)?;
        self.save()?;
        Ok(expiration)
    }

    pub fn deduct_grant(&self, user: UserId, spec: &str) -> Result<DateTime<Utc>, ServiceError> {
        let duration = parse_duration(spec)?;
        let expiration = self.ledger.deduct(user, duration)?;
        self.save()?;
        Ok(expiration)
    }

    pub fn pause_user(&self, user: UserId) {
        self.ledger.pause(user);
    }

    pub fn resume_user(&self, user: UserId) -> bool {
        self.ledger.resume(user)
    }

    pub fn revoke_user(&self, user: UserId) -> Result<bool, ServiceError> {
        let had_grant = self.ledger.revoke(user);
        self.history.remove(user);
        self.save()?;
        Ok(had_grant)
    }

    pub fn grant_status(&self, user: UserId) -> Result<GrantStatus, ServiceError> {
        let status = self.ledger.check(user, &self.history);
        // The lazy purge mutated the stores; keep the data file in step.
        if status == GrantStatus::Expired {
            self.save()?;
        }
        Ok(status)
    }

    pub fn remaining_time(&self, user: UserId) -> Option<RemainingTime> {
        self.ledger.remaining(user)
    }

    pub fn history_report(&self) -> IndexMap<UserId, HistoryEntry> {
        self.history.snapshot()
    }

    pub fn active_users(&self) -> Vec<(UserId, DateTime<Utc>)> {
        self.ledger.active_users()
    }

    pub fn load(&self) -> Result<(), ServiceError> {
        if let Some(snapshot) = persist::load(&self.config.data_file)? {
            snapshot.apply(&self.ledger, &self.history);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), ServiceError> {
        let snapshot = Snapshot::capture(&self.ledger, &self.history);
        persist::save(&self.config.data_file, &snapshot)?;
        Ok(())
    }
}
