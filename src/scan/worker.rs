// Thu Feb 5 2026 - Alex

use crate::command::CommandRegistry;
use crate::scan::pattern::parse_account_line;
use crate::scan::record::AccountRecord;
use crate::scan::request::ScanRequest;
use ahash::AHashSet;
use log::warn;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(crate) enum FileScan {
    Records(Vec<AccountRecord>),
    Superseded,
}

// One work unit: a single file, scanned line by line. Token currency is
// re-checked on every line to bound the time-to-abort. Lines are decoded
// lossily so undecodable bytes never abort the file.
pub(crate) fn scan_file(
    path: &Path,
    request: &ScanRequest,
    registry: &CommandRegistry,
) -> FileScan {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("skipping unreadable file {}: {}", path.display(), e);
            return FileScan::Records(Vec::new());
        }
    };

    let mut reader = BufReader::new(file);
    let mut local: AHashSet<AccountRecord> = AHashSet::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("read error in {}, rest of file skipped: {}", path.display(), e);
                break;
            }
        }

        if !registry.is_current(request.requester(), request.token()) {
            return FileScan::Superseded;
        }

        let line = String::from_utf8_lossy(&buf);
        if !line.to_lowercase().contains(request.keyword()) {
            continue;
        }
        let Some(record) = parse_account_line(&line) else {
            continue;
        };
        if request.exclusion().contains(&record.normalized()) {
            continue;
        }

        local.insert(record);
        // Local early stop at quota. The merge still truncates globally,
        // so this is an optimization, not the correctness bound.
        if local.len() >= request.quota() {
            break;
        }
    }

    FileScan::Records(local.into_iter().collect())
}
