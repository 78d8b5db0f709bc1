pub mod context;
pub mod error;
pub mod index;
pub mod normalize;
pub mod pagerank;
pub mod persist;
pub mod rank;
pub mod stopwords;

pub use context::SearchContext;
pub use error::{LineError, LoadError, LoadResult};
pub use index::{DocId, InvertedIndex, Posting, TermEntry};
pub use pagerank::PageRank;
pub use persist::IndexPaths;
pub use rank::{ScoredResult, DEFAULT_WEIGHT};
pub use stopwords::Stopwords;
