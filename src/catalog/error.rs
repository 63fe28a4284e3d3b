//! Catalog-specific error types
//!
//! Every failure of a catalog operation is a recoverable validation error:
//! the store is left exactly as it was before the call. Each variant maps to
//! a stable [`ErrorKind`] through [`CatalogError::kind`].

use thiserror::Error;

use super::types::Level;
use crate::ErrorKind;
use crate::names::NameIssue;

/// Catalog-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Name blank after trimming
    #[error("{0} name cannot be empty")]
    Empty(Level),

    /// Batch contained no names at all
    #[error("select at least one {0}")]
    NothingSelected(Level),

    /// Name longer than allowed
    #[error("{level} name is {len} characters, the limit is {max}")]
    TooLong { level: Level, len: usize, max: usize },

    /// Name already present in its scope
    #[error("{level} '{name}' already exists")]
    Duplicate { level: Level, name: String },

    /// The parent level has no selection
    #[error("no parent selected for {0}")]
    NoParentSelected(Level),

    /// Positional index outside the station list
    #[error("index {index} is out of range for {len} stations")]
    IndexOutOfRange { index: usize, len: usize },

    /// Every name of a batch was already present
    #[error("every selected {0} already exists")]
    AllDuplicate(Level),

    /// Referenced node does not exist
    #[error("{level} '{name}' not found")]
    NotFound { level: Level, name: String },

    /// Injected snapshot breaks an invariant
    #[error("invalid catalog snapshot: {0}")]
    InvalidSnapshot(String),
}

impl CatalogError {
    /// Category of this failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty(_) | Self::NothingSelected(_) => ErrorKind::Empty,
            Self::TooLong { .. } => ErrorKind::TooLong,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::NoParentSelected(_) => ErrorKind::NoParentSelected,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::AllDuplicate(_) => ErrorKind::AllDuplicate,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidSnapshot(_) => ErrorKind::InvalidSnapshot,
        }
    }

    pub(crate) const fn from_issue(level: Level, issue: NameIssue) -> Self {
        match issue {
            NameIssue::Empty => Self::Empty(level),
            NameIssue::TooLong { len, max } => Self::TooLong { level, len, max },
        }
    }

    pub(crate) fn not_found(level: Level, name: &str) -> Self {
        Self::NotFound {
            level,
            name: name.to_string(),
        }
    }
}

/// Type alias for cleaner function signatures
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
