use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed row on line {line}: {source}")]
    MalformedRow {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected result document: {0}")]
    UnexpectedShape(String),

    #[error("Invalid search criteria: {0}")]
    InvalidCriteria(String),

    #[error("Invalid direction: {0} (expected forward, backward or bi-directed)")]
    InvalidDirection(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
