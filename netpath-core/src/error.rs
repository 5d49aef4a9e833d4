use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("Malformed hop record: {0}")]
    MalformedHopRecord(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
