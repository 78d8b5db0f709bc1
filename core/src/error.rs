use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single line of an input file was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineError {
    #[error("expected a term followed by an idf")]
    MissingIdf,
    #[error("invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("incomplete posting group: found {found} of 3 fields")]
    IncompletePosting { found: usize },
    #[error("document {0} appears twice in the posting list")]
    DuplicatePosting(DocId),
    #[error("term `{0}` is defined on more than one line")]
    DuplicateTerm(String),
    #[error("idf must be a finite non-negative number, got {0}")]
    InvalidIdf(f64),
    #[error("document norm must be a finite positive number, got {0}")]
    InvalidNorm(f64),
    #[error("expected `<docid>,<score>`")]
    MissingComma,
    #[error("pagerank score must be a finite non-negative number, got {0}")]
    InvalidScore(f64),
    #[error("stopword `{0}` contains whitespace")]
    SpacedStopword(String),
}

/// Failure to load one of the index files. Any error aborts the whole load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: LineError,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Parse a numeric token, naming the field in the error.
pub(crate) fn parse_number<T: std::str::FromStr>(field: &'static str, token: &str) -> Result<T, LineError> {
    token.parse().map_err(|_| LineError::InvalidNumber { field, value: token.to_string() })
}
