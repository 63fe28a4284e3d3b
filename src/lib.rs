//! Nameplate - cascading catalog editor for knowledge-base settings
//!
//! This library provides the state logic behind the nameplate settings
//! screen: a three-level device catalog (type → device → station) with
//! cascading deletes, reusable searchable multi-select controls that gather
//! names for each level, and the record tables and navigation of the
//! surrounding settings views. Everything is synchronous and in-memory; a
//! host renders from the state returned by each call.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod config;
pub mod editor;
pub mod logging;
pub mod names;
pub mod nav;
pub mod output;
pub mod records;
pub mod select;
pub mod session;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum NameplateError {
    /// Catalog operation failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    /// Selection control operation failed
    #[error("Selection error: {0}")]
    Select(#[from] select::SelectError),
    /// Record table operation failed
    #[error("Record error: {0}")]
    Record(#[from] records::RecordError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Request could not be parsed or response serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type of the host-facing layers
pub type Result<T> = std::result::Result<T, NameplateError>;

impl NameplateError {
    /// Category reported in responses
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(err) => err.kind(),
            Self::Select(err) => err.kind(),
            Self::Record(err) => err.kind(),
            Self::ConfigError(_) | Self::IoError(_) | Self::Json(_) | Self::InvalidInput(_) => {
                ErrorKind::InvalidRequest
            }
        }
    }

    /// Message without the category prefix, suitable for inline display
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Catalog(err) => err.to_string(),
            Self::Select(err) => err.to_string(),
            Self::Record(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

/// Stable, serializable category of a recoverable failure
///
/// Responses carry this verbatim so a host can map failures to inline
/// messages without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Name blank after trimming, or nothing to commit
    Empty,
    /// Name longer than the configured maximum
    TooLong,
    /// Name already present in its scope
    Duplicate,
    /// Parent level has no selection
    NoParentSelected,
    /// Positional index outside the list
    IndexOutOfRange,
    /// Every name of a batch was already present
    AllDuplicate,
    /// Referenced node or record does not exist
    NotFound,
    /// Chip list is full
    LimitReached,
    /// Control is disabled
    Disabled,
    /// Action not offered by the active control
    Unsupported,
    /// Injected snapshot violates the catalog invariants
    InvalidSnapshot,
    /// Request could not be understood
    InvalidRequest,
}

impl ErrorKind {
    /// Name as it appears in responses
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::TooLong => "TooLong",
            Self::Duplicate => "Duplicate",
            Self::NoParentSelected => "NoParentSelected",
            Self::IndexOutOfRange => "IndexOutOfRange",
            Self::AllDuplicate => "AllDuplicate",
            Self::NotFound => "NotFound",
            Self::LimitReached => "LimitReached",
            Self::Disabled => "Disabled",
            Self::Unsupported => "Unsupported",
            Self::InvalidSnapshot => "InvalidSnapshot",
            Self::InvalidRequest => "InvalidRequest",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
