// Mon Feb 9 2026 - Alex

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub const INVALID_SAMPLE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFileReport {
    pub valid: usize,
    pub invalid: usize,
    pub invalid_samples: Vec<String>,
}

// Checks a delivered file's identifiers (text before the first `:`)
// against the mailbox shape, with a bounded sample of offenders.
pub fn validate_record_file(path: &Path) -> io::Result<RecordFileReport> {
    let raw = fs::read(path)?;
    let text = String::from_utf8_lossy(&raw);

    let mut valid = 0;
    let mut invalid = 0;
    let mut offenders = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let identifier = line.split(':').next().unwrap_or(line).trim();
        if IDENTIFIER_RE.is_match(identifier) {
            valid += 1;
        } else {
            invalid += 1;
            offenders.push(identifier.to_string());
        }
    }

    let invalid_samples = offenders
        .into_iter()
        .unique()
        .take(INVALID_SAMPLE_LIMIT)
        .collect();

    Ok(RecordFileReport {
        valid,
        invalid,
        invalid_samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_counts_valid_and_invalid_identifiers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(
            &path,
            "good@mail.com:pw\n\nbare_username:pw\nalso@ok.net:pw\nbare_username:other\n",
        )
        .unwrap();

        let report = validate_record_file(&path).unwrap();
        assert_eq!(report.valid, 2);
        assert_eq!(report.invalid, 2);
        // Offender samples are deduplicated.
        assert_eq!(report.invalid_samples, vec!["bare_username"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(validate_record_file(&dir.path().join("absent.txt")).is_err());
    }
}
