//! Name validation shared by the catalog store and the selection controls
//!
//! Every user-entered name (catalog node, pool option, chip) goes through
//! [`validate_name`]: it is trimmed, must not be blank, and must not exceed
//! the configured maximum length. Length is counted in characters, not bytes,
//! so a 20-character limit admits 20 CJK characters.

/// Default maximum name length in characters
pub const DEFAULT_MAX_NAME_LEN: usize = 20;

/// Reason a raw name was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssue {
    /// Blank after trimming
    Empty,
    /// Longer than the allowed maximum
    TooLong {
        /// Actual length in characters
        len: usize,
        /// Allowed maximum
        max: usize,
    },
}

/// Trim and validate a raw name
///
/// # Errors
/// Returns [`NameIssue::Empty`] for blank input and [`NameIssue::TooLong`]
/// when the trimmed name has more than `max` characters.
pub fn validate_name(raw: &str, max: usize) -> Result<String, NameIssue> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameIssue::Empty);
    }
    let len = name.chars().count();
    if len > max {
        return Err(NameIssue::TooLong { len, max });
    }
    Ok(name.to_string())
}

/// Case-insensitive substring match used by search filters
///
/// An empty term matches everything.
#[must_use]
pub fn matches_term(candidate: &str, term: &str) -> bool {
    term.is_empty() || candidate.to_lowercase().contains(&term.to_lowercase())
}
