//! Error types and result types for record store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible operations.
//! [`StoreError::Connection`] is only produced while establishing the store
//! connection; every other variant belongs to a single request.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached, authenticated against, or pinged at startup.
    #[error("Connection error: {0}")]
    Connection(String),
    /// A store call did not complete within its deadline.
    #[error("Operation timed out: {0}")]
    Timeout(String),
    /// A string could not be parsed as a record identifier.
    #[error("Invalid record id: {0}")]
    InvalidId(String),
    /// A filter could not be evaluated (for example, an invalid regex pattern).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// Serialization/deserialization error when converting between records and BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
