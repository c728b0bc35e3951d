// Thu Feb 5 2026 - Alex

use ahash::AHashSet;
use log::warn;
use std::fs;
use std::path::PathBuf;

// Every record ever delivered, loaded fresh per request. No incremental
// index; a full re-read keeps the set consistent with whatever is on disk.
pub struct ExclusionSet {
    entries: AHashSet<String>,
}

impl ExclusionSet {
    pub fn empty() -> Self {
        Self {
            entries: AHashSet::new(),
        }
    }

    pub fn load(files: &[PathBuf]) -> Self {
        let mut entries = AHashSet::new();
        for path in files {
            let raw = match fs::read(path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("skipping unreadable delivered file {}: {}", path.display(), e);
                    continue;
                }
            };
            let text = String::from_utf8_lossy(&raw);
            for line in text.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    entries.insert(line.to_string());
                }
            }
        }
        Self { entries }
    }

    pub fn contains(&self, record: &str) -> bool {
        self.entries.contains(record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_trims_and_dedupes() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "one@x.com:pw\n  two@x.com:pw  \n\n").unwrap();
        fs::write(&b, "one@x.com:pw\nthree@x.com:pw\n").unwrap();

        let set = ExclusionSet::load(&[a, b]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("two@x.com:pw"));
        assert!(!set.contains("missing@x.com:pw"));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.txt");
        fs::write(&present, "kept@x.com:pw\n").unwrap();
        let missing = dir.path().join("missing.txt");

        let set = ExclusionSet::load(&[missing, present]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("kept@x.com:pw"));
    }
}
