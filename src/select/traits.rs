//! Core traits for candidate gathering
//!
//! A cascade level gathers the names it will commit into the catalog through
//! a [`CandidateSource`]. Two implementations exist: the searchable
//! [`MultiSelect`](super::MultiSelect) pool and the plain
//! [`TextEntry`](super::TextEntry) field. Which one a deployment uses is a
//! configuration choice ([`GatherMode`]); the host only talks to the trait.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::Result;

/// How a level gathers candidate names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatherMode {
    /// Searchable multi-select over an editable option pool
    #[default]
    MultiSelect,
    /// Single free-text field
    TextEntry,
}

impl GatherMode {
    /// Convert to string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MultiSelect => "multi_select",
            Self::TextEntry => "text_entry",
        }
    }
}

impl fmt::Display for GatherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names gathered by a control, ready to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gathered {
    /// Several checked names, committed as a batch
    Batch(Vec<String>),
    /// One typed name, committed as a single add
    Single(String),
}

/// User interaction forwarded to a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputAction {
    /// Filter the visible options
    SetSearch { term: String },
    /// Check or uncheck one option
    Toggle { value: String, checked: bool },
    /// Check or uncheck every visible option
    SelectAllVisible { checked: bool },
    /// Replace the text of the add/entry field
    SetDraft { text: String },
    /// Append a new option to the pool
    AddOption { value: String },
    /// Append the add field's text to the pool
    CommitDraft,
    /// Drop an option from the pool
    RemoveOption { value: String },
    /// Forget the gathered candidates
    ClearSelection,
}

impl InputAction {
    /// Short name for messages
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetSearch { .. } => "search",
            Self::Toggle { .. } => "toggle",
            Self::SelectAllVisible { .. } => "select all",
            Self::SetDraft { .. } => "set draft",
            Self::AddOption { .. } => "add option",
            Self::CommitDraft => "commit draft",
            Self::RemoveOption { .. } => "remove option",
            Self::ClearSelection => "clear selection",
        }
    }
}

/// One visible option with its checked state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: String,
    pub checked: bool,
}

/// Render-ready state of a control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    /// Kind of control
    pub mode: GatherMode,
    /// Trigger text
    pub label: String,
    pub open: bool,
    pub disabled: bool,
    /// Active search term
    pub search: String,
    /// Options matching the search term (empty for text entry)
    pub options: Vec<OptionView>,
    /// Gathered candidates
    pub selected: Vec<String>,
    /// State of the select-all box
    pub all_visible_checked: bool,
    /// Text of the add/entry field
    pub draft: String,
}

/// Trait for controls that gather candidate names for a cascade level
///
/// Implementations are backend-agnostic state machines; rendering is the
/// host's job.
pub trait CandidateSource: fmt::Debug {
    /// Kind of control
    fn mode(&self) -> GatherMode;

    /// Names to commit, or `None` when nothing has been gathered
    fn gather(&self) -> Option<Gathered>;

    /// Forget gathered names after a successful commit
    fn clear_candidates(&mut self);

    /// Open (focus) the control
    ///
    /// Returns `false` if it was already open.
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    fn open(&mut self) -> Result<bool>;

    /// Close the control, dropping transient input
    fn close(&mut self);

    /// Whether the control is open
    fn is_open(&self) -> bool;

    /// Enable or disable the control; disabling closes it
    fn set_disabled(&mut self, disabled: bool);

    /// Whether the control is disabled
    fn is_disabled(&self) -> bool;

    /// Drop an option from the backing pool, returning whether it existed
    fn remove_option(&mut self, value: &str) -> bool;

    /// Apply a user interaction
    ///
    /// # Errors
    /// Returns the control's validation error, `SelectError::Disabled`, or
    /// `SelectError::Unsupported` for actions this kind of control lacks.
    fn apply(&mut self, action: InputAction) -> Result<()>;

    /// Render-ready state
    fn view(&self) -> InputView;
}
