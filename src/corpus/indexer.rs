// Thu Feb 5 2026 - Alex

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

// Two logical roots: an append-only raw corpus and the delivered corpus
// that doubles as the exclusion source.
pub struct CorpusIndexer {
    raw_root: PathBuf,
    delivered_root: PathBuf,
}

impl CorpusIndexer {
    pub fn new(raw_root: PathBuf, delivered_root: PathBuf) -> Self {
        Self {
            raw_root,
            delivered_root,
        }
    }

    pub fn raw_root(&self) -> &Path {
        &self.raw_root
    }

    pub fn delivered_root(&self) -> &Path {
        &self.delivered_root
    }

    // Most recently modified first. Recency is a heuristic to surface fresh
    // records early, not a correctness requirement.
    pub fn candidate_files(&self) -> Vec<PathBuf> {
        let mut files = collect_text_files(&self.delivered_root);
        files.extend(collect_text_files(&self.raw_root));
        sort_by_mtime_descending(files)
    }

    pub fn raw_files(&self) -> Vec<PathBuf> {
        sort_by_mtime_descending(collect_text_files(&self.raw_root))
    }

    pub fn delivered_files(&self) -> Vec<PathBuf> {
        sort_by_mtime_descending(collect_text_files(&self.delivered_root))
    }
}

fn collect_text_files(root: &Path) -> Vec<(PathBuf, SystemTime)> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"))
        })
        .map(|entry| {
            let modified = entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok())
                .unwrap_or(UNIX_EPOCH);
            (entry.into_path(), modified)
        })
        .collect()
}

fn sort_by_mtime_descending(mut files: Vec<(PathBuf, SystemTime)>) -> Vec<PathBuf> {
    files.sort_by(|a, b| b.1.cmp(&a.1));
    files.into_iter().map(|(path, _)| path).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_collects_only_txt_files_recursively() {
        let raw = TempDir::new().unwrap();
        let delivered = TempDir::new().unwrap();
        fs::create_dir_all(raw.path().join("nested")).unwrap();
        fs::write(raw.path().join("a.txt"), "x").unwrap();
        fs::write(raw.path().join("nested/b.TXT"), "x").unwrap();
        fs::write(raw.path().join("c.log"), "x").unwrap();
        fs::write(delivered.path().join("d.txt"), "x").unwrap();

        let indexer = CorpusIndexer::new(
            raw.path().to_path_buf(),
            delivered.path().to_path_buf(),
        );
        assert_eq!(indexer.raw_files().len(), 2);
        assert_eq!(indexer.delivered_files().len(), 1);
        assert_eq!(indexer.candidate_files().len(), 3);
    }

    #[test]
    fn test_candidates_sorted_most_recent_first() {
        let raw = TempDir::new().unwrap();
        let delivered = TempDir::new().unwrap();
        let old = raw.path().join("old.txt");
        let new = raw.path().join("new.txt");
        fs::write(&old, "x").unwrap();
        fs::write(&new, "x").unwrap();

        let base = SystemTime::now();
        File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(base - Duration::from_secs(3_600))
            .unwrap();
        File::options()
            .write(true)
            .open(&new)
            .unwrap()
            .set_modified(base)
            .unwrap();

        let indexer = CorpusIndexer::new(
            raw.path().to_path_buf(),
            delivered.path().to_path_buf(),
        );
        assert_eq!(indexer.candidate_files(), vec![new, old]);
    }

    #[test]
    fn test_missing_root_yields_no_files() {
        let indexer = CorpusIndexer::new(
            PathBuf::from("/nonexistent/raw"),
            PathBuf::from("/nonexistent/delivered"),
        );
        assert!(indexer.candidate_files().is_empty());
    }
}
