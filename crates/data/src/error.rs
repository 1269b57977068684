//! Data-access error types.

use frostline_shared::AppError;
use thiserror::Error;

/// Errors raised while fetching or validating records.
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file did not contain valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A collection had the wrong shape (e.g. not an array).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One document could not be turned into a record.
    #[error("Invalid document #{index} in {collection}: {reason}")]
    InvalidDocument {
        /// Collection name.
        collection: &'static str,
        /// Position of the document in the collection.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The store could not be reached or refused access.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let message = err.to_string();
        match err {
            DataError::InvalidInput(_) | DataError::InvalidDocument { .. } => {
                Self::Validation(message)
            }
            DataError::Io(_) | DataError::Unavailable(_) => Self::Unavailable(message),
            DataError::Json(_) => Self::Internal(message),
        }
    }
}
