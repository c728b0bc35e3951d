// Mon Feb 9 2026 - Alex

use crate::history::{HistoryEntry, HistoryStore};
use crate::ledger::{AccessLedger, UserId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

// Versioned replacement for the old opaque blob: the key maps, the
// bound-user set, and the generation history. Paused/used sets are
// deliberately not part of the persisted shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub codes: HashMap<String, DateTime<Utc>>,
    pub grants: HashMap<UserId, DateTime<Utc>>,
    pub bound_users: HashSet<UserId>,
    pub history: IndexMap<UserId, HistoryEntry>,
}

impl Snapshot {
    pub fn capture(ledger: &AccessLedger, history: &HistoryStore) -> Self {
        let (codes, grants, bound_users) = ledger.export();
        Self {
            version: SNAPSHOT_VERSION,
            codes,
            grants,
            bound_users,
            history: history.snapshot(),
        }
    }

    pub fn apply(self, ledger: &AccessLedger, history: &HistoryStore) {
        ledger.restore(self.codes, self.grants, self.bound_users);
        history.replace(self.history);
    }
}

pub fn load(path: &Path) -> Result<Option<Snapshot>, PersistError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("data file {} not found, starting empty", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(Some(snapshot))
}

// Written to a sibling temp file first so a crash mid-write cannot leave a
// torn data file behind.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let tmp = path.with_extension("tmp");
    if let Err(e) = fs::write(&tmp, json) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
