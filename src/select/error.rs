//! Selection control error types

use thiserror::Error;

use crate::ErrorKind;
use crate::names::NameIssue;

/// Errors that can occur in selection control operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Value blank after trimming
    #[error("value cannot be empty")]
    Empty,

    /// Value longer than allowed
    #[error("value is {len} characters, the limit is {max}")]
    TooLong { len: usize, max: usize },

    /// Value already present
    #[error("'{0}' already exists")]
    Duplicate(String),

    /// Chip list is full
    #[error("at most {max} entries can be added")]
    LimitReached { max: usize },

    /// Positional index outside the list
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Control is disabled
    #[error("control is disabled")]
    Disabled,

    /// Action not offered by this kind of control
    #[error("{0} is not supported by this control")]
    Unsupported(&'static str),

    /// No control registered under the given key
    #[error("no control named {0}")]
    UnknownControl(String),
}

impl SelectError {
    /// Category of this failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty => ErrorKind::Empty,
            Self::TooLong { .. } => ErrorKind::TooLong,
            Self::Duplicate(_) => ErrorKind::Duplicate,
            Self::LimitReached { .. } => ErrorKind::LimitReached,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::Disabled => ErrorKind::Disabled,
            Self::Unsupported(_) => ErrorKind::Unsupported,
            Self::UnknownControl(_) => ErrorKind::NotFound,
        }
    }
}

impl From<NameIssue> for SelectError {
    fn from(issue: NameIssue) -> Self {
        match issue {
            NameIssue::Empty => Self::Empty,
            NameIssue::TooLong { len, max } => Self::TooLong { len, max },
        }
    }
}

/// Result type for selection control operations
pub type Result<T> = std::result::Result<T, SelectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(SelectError::Empty.kind(), ErrorKind::Empty);
        assert_eq!(SelectError::Disabled.kind(), ErrorKind::Disabled);
        assert_eq!(
            SelectError::LimitReached { max: 20 }.kind(),
            ErrorKind::LimitReached
        );
        assert_eq!(
            SelectError::UnknownControl("station".into()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SelectError::Duplicate("A1".to_string()).to_string(),
            "'A1' already exists"
        );
        assert_eq!(
            SelectError::Unsupported("search").to_string(),
            "search is not supported by this control"
        );
    }

    #[test]
    fn test_from_name_issue() {
        assert_eq!(SelectError::from(NameIssue::Empty), SelectError::Empty);
        assert_eq!(
            SelectError::from(NameIssue::TooLong { len: 22, max: 20 }),
            SelectError::TooLong { len: 22, max: 20 }
        );
    }
}
