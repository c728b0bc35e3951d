// Mon Feb 9 2026 - Alex

use crate::corpus::CorpusIndexer;
use log::warn;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityCount {
    pub total: usize,
    pub delivered: usize,
}

impl AvailabilityCount {
    pub fn available(&self) -> usize {
        self.total.saturating_sub(self.delivered)
    }
}

// How many keyword-matching lines remain undelivered: matches in the raw
// corpus minus matches already present in the delivered corpus.
pub fn count_available(indexer: &CorpusIndexer, keyword: &str) -> AvailabilityCount {
    let keyword = keyword.to_lowercase();
    AvailabilityCount {
        total: count_matching_lines(indexer.raw_files(), &keyword),
        delivered: count_matching_lines(indexer.delivered_files(), &keyword),
    }
}

fn count_matching_lines(files: Vec<PathBuf>, keyword: &str) -> usize {
    files
        .par_iter()
        .map(|path| {
            let raw = match fs::read(path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("skipping unreadable file {}: {}", path.display(), e);
                    return 0;
                }
            };
            String::from_utf8_lossy(&raw)
                .lines()
                .filter(|line| line.to_lowercase().contains(keyword))
                .count()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_counts_raw_minus_delivered() {
        let raw = TempDir::new().unwrap();
        let delivered = TempDir::new().unwrap();
        fs::write(
            raw.path().join("a.txt"),
            "foo one\nfoo two\nbar three\nFOO four\n",
        )
        .unwrap();
        fs::write(delivered.path().join("out.txt"), "foo one\n").unwrap();

        let indexer = CorpusIndexer::new(
            raw.path().to_path_buf(),
            delivered.path().to_path_buf(),
        );
        let count = count_available(&indexer, "FOO");
        assert_eq!(count.total, 3);
        assert_eq!(count.delivered, 1);
        assert_eq!(count.available(), 2);
    }

    #[test]
    fn test_more_delivered_than_raw_saturates() {
        let count = AvailabilityCount {
            total: 1,
            delivered: 5,
        };
        assert_eq!(count.available(), 0);
    }
}
