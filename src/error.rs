//! Error types for the storeql query engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Table not found: {0}")]
    UnknownTable(String),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// A placeholder label was referenced that the literal vault no longer holds
    #[error("Unresolved literal: {0}")]
    UnresolvedLiteral(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
