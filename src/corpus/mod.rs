// Thu Feb 5 2026 - Alex

pub mod exclusion;
pub mod indexer;

pub use exclusion::ExclusionSet;
pub use indexer::CorpusIndexer;
