//! Chip list editor
//!
//! Short labels typed one at a time and shown as removable chips, as used by
//! the tag and document-type dialogs. Blank input is ignored rather than
//! reported.

use super::error::{Result, SelectError};
use crate::names::{DEFAULT_MAX_NAME_LEN, NameIssue, validate_name};

/// Default maximum number of chips
pub const DEFAULT_MAX_CHIPS: usize = 20;

/// Ordered list of unique chips with length and count limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInput {
    chips: Vec<String>,
    max_chips: usize,
    max_len: usize,
}

impl Default for ChipInput {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHIPS, DEFAULT_MAX_NAME_LEN)
    }
}

impl ChipInput {
    /// Create an empty chip list
    #[must_use]
    pub const fn new(max_chips: usize, max_len: usize) -> Self {
        Self {
            chips: Vec::new(),
            max_chips,
            max_len,
        }
    }

    /// Start from existing chips (e.g. when editing a record)
    ///
    /// Each chip goes through [`ChipInput::push`]; blank ones are dropped.
    ///
    /// # Errors
    /// The first error `push` reports.
    pub fn with_chips<I, S>(mut self, chips: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for chip in chips {
            self.push(chip.as_ref())?;
        }
        Ok(self)
    }

    /// Add a chip
    ///
    /// Returns `Ok(None)` for blank input, which is ignored.
    ///
    /// # Errors
    /// `TooLong`, `LimitReached` or `Duplicate`, checked in that order.
    pub fn push(&mut self, raw: &str) -> Result<Option<String>> {
        let value = match validate_name(raw, self.max_len) {
            Ok(value) => value,
            Err(NameIssue::Empty) => return Ok(None),
            Err(issue) => return Err(issue.into()),
        };
        if self.chips.len() >= self.max_chips {
            return Err(SelectError::LimitReached {
                max: self.max_chips,
            });
        }
        if self.chips.contains(&value) {
            return Err(SelectError::Duplicate(value));
        }
        self.chips.push(value.clone());
        Ok(Some(value))
    }

    /// Remove the chip at a position
    ///
    /// # Errors
    /// Returns `SelectError::IndexOutOfRange` for a bad index.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        if index >= self.chips.len() {
            return Err(SelectError::IndexOutOfRange {
                index,
                len: self.chips.len(),
            });
        }
        Ok(self.chips.remove(index))
    }

    /// Current chips
    #[must_use]
    pub fn chips(&self) -> &[String] {
        &self.chips
    }

    /// Take the chips out
    #[must_use]
    pub fn into_chips(self) -> Vec<String> {
        self.chips
    }

    /// Number of chips
    #[must_use]
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// Whether there are no chips
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Remove all chips
    pub fn clear(&mut self) {
        self.chips.clear();
    }
}
