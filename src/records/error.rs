//! Record table error types

use thiserror::Error;

use crate::ErrorKind;
use crate::select::SelectError;

/// Errors that can occur in record table operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Record name blank after trimming
    #[error("{table} name cannot be empty")]
    Empty { table: &'static str },

    /// Another record already has this name
    #[error("{table} '{name}' already exists")]
    Duplicate { table: &'static str, name: String },

    /// No record with this id
    #[error("{table} record {id} not found")]
    NotFound { table: &'static str, id: u64 },

    /// A chip of the record was refused
    #[error("invalid chip: {0}")]
    Chip(#[from] SelectError),
}

impl RecordError {
    /// Category of this failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty { .. } => ErrorKind::Empty,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Chip(err) => err.kind(),
        }
    }
}

/// Result type for record table operations
pub type Result<T> = std::result::Result<T, RecordError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
