//! Searchable multi-select over an editable option pool

use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::error::{Result, SelectError};
use super::traits::{CandidateSource, GatherMode, Gathered, InputAction, InputView, OptionView};
use crate::names::{DEFAULT_MAX_NAME_LEN, matches_term, validate_name};

/// Text shown on the closed control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TriggerLabel {
    /// Nothing selected yet
    Placeholder(String),
    /// Number of selected options
    Count(usize),
}

impl fmt::Display for TriggerLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder(text) => f.write_str(text),
            Self::Count(n) => write!(f, "{n} selected"),
        }
    }
}

/// State of one multi-select control
///
/// The option pool belongs to the control, not to the catalog: adding an
/// option here makes it pickable, it does not create a catalog node.
///
/// Invariants:
/// - every selected value is an option
/// - a disabled control is closed
#[derive(Debug, Clone)]
pub struct MultiSelect {
    placeholder: String,
    options: Vec<String>,
    selected: IndexSet<String>,
    search: String,
    add_draft: String,
    open: bool,
    search_focused: bool,
    disabled: bool,
    max_len: usize,
}

impl MultiSelect {
    /// Create a control over the given pool
    ///
    /// Repeated options are collapsed, keeping the first occurrence.
    #[must_use]
    pub fn new<I, S>(placeholder: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut pool: Vec<String> = Vec::new();
        for option in options {
            let option = option.into();
            if !pool.contains(&option) {
                pool.push(option);
            }
        }

        Self {
            placeholder: placeholder.into(),
            options: pool,
            selected: IndexSet::new(),
            search: String::new(),
            add_draft: String::new(),
            open: false,
            search_focused: false,
            disabled: false,
            max_len: DEFAULT_MAX_NAME_LEN,
        }
    }

    /// Set the maximum length of added options
    #[must_use]
    pub const fn with_max_len(mut self, max: usize) -> Self {
        self.max_len = max;
        self
    }

    /// Full option pool in order
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether the search field has focus
    #[must_use]
    pub const fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    /// Current search term
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Current text of the add field
    #[must_use]
    pub fn add_draft(&self) -> &str {
        &self.add_draft
    }

    /// Open or close depending on the current state
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn toggle_open(&mut self) -> Result<bool> {
        if self.open {
            self.close();
            Ok(false)
        } else {
            self.open()?;
            Ok(true)
        }
    }

    /// Filter the visible options by case-insensitive substring
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn set_search(&mut self, term: impl Into<String>) -> Result<()> {
        self.ensure_enabled()?;
        self.search = term.into();
        Ok(())
    }

    /// Options matching the current search term
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|option| matches_term(option, &self.search))
    }

    /// Visible options with their checked state
    #[must_use]
    pub fn visible_view(&self) -> Vec<OptionView> {
        self.visible()
            .map(|value| OptionView {
                value: value.to_string(),
                checked: self.selected.contains(value),
            })
            .collect()
    }

    /// Whether the select-all box should render checked
    #[must_use]
    pub fn all_visible_checked(&self) -> bool {
        let mut visible = self.visible().peekable();
        visible.peek().is_some() && visible.all(|value| self.selected.contains(value))
    }

    /// Check or uncheck a value
    ///
    /// Values not in the pool are ignored. Returns whether the selection
    /// changed.
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn toggle(&mut self, value: &str, checked: bool) -> Result<bool> {
        self.ensure_enabled()?;
        Ok(self.set_checked(value, checked))
    }

    /// Check or uncheck every option matching the search term
    ///
    /// Options hidden by the filter are left alone. Returns how many changed.
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn select_all_visible(&mut self, checked: bool) -> Result<usize> {
        self.ensure_enabled()?;
        let visible: Vec<String> = self.visible().map(str::to_string).collect();
        let changed = visible
            .iter()
            .filter(|value| self.set_checked(value, checked))
            .count();
        Ok(changed)
    }

    /// Replace the text of the add field
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn set_add_draft(&mut self, text: impl Into<String>) -> Result<()> {
        self.ensure_enabled()?;
        self.add_draft = text.into();
        Ok(())
    }

    /// Append a new option to the pool
    ///
    /// The option is not selected. On success the add field is cleared.
    ///
    /// # Errors
    /// `Disabled`, `Empty`, `TooLong`, or `Duplicate` (exact match).
    pub fn add_option(&mut self, value: &str) -> Result<String> {
        self.ensure_enabled()?;
        let value = validate_name(value, self.max_len)?;
        if self.options.contains(&value) {
            return Err(SelectError::Duplicate(value));
        }
        self.options.push(value.clone());
        self.add_draft.clear();
        debug!(option = %value, "added option");
        Ok(value)
    }

    /// Append the add field's text to the pool
    ///
    /// # Errors
    /// As [`MultiSelect::add_option`]; the draft is kept on failure.
    pub fn commit_add_draft(&mut self) -> Result<String> {
        let draft = self.add_draft.clone();
        self.add_option(&draft)
    }

    /// Selected values in the order they were checked
    #[must_use]
    pub fn get_selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Whether a value is checked
    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Number of selected values
    #[must_use]
    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Uncheck everything, keeping the pool
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Trigger text for the closed control
    #[must_use]
    pub fn label(&self) -> TriggerLabel {
        if self.selected.is_empty() {
            TriggerLabel::Placeholder(self.placeholder.clone())
        } else {
            TriggerLabel::Count(self.selected.len())
        }
    }

    fn set_checked(&mut self, value: &str, checked: bool) -> bool {
        if !self.options.iter().any(|option| option == value) {
            return false;
        }
        if checked {
            self.selected.insert(value.to_string())
        } else {
            self.selected.shift_remove(value)
        }
    }

    const fn ensure_enabled(&self) -> Result<()> {
        if self.disabled {
            Err(SelectError::Disabled)
        } else {
            Ok(())
        }
    }
}

impl CandidateSource for MultiSelect {
    fn mode(&self) -> GatherMode {
        GatherMode::MultiSelect
    }

    fn gather(&self) -> Option<Gathered> {
        if self.selected.is_empty() {
            None
        } else {
            Some(Gathered::Batch(self.get_selected()))
        }
    }

    fn clear_candidates(&mut self) {
        self.clear_selection();
    }

    fn open(&mut self) -> Result<bool> {
        self.ensure_enabled()?;
        if self.open {
            return Ok(false);
        }
        self.open = true;
        self.search_focused = true;
        Ok(true)
    }

    fn close(&mut self) {
        self.open = false;
        self.search_focused = false;
        self.search.clear();
        self.add_draft.clear();
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn remove_option(&mut self, value: &str) -> bool {
        let Some(index) = self.options.iter().position(|option| option == value) else {
            return false;
        };
        self.options.remove(index);
        self.selected.shift_remove(value);
        debug!(option = value, "removed option");
        true
    }

    fn apply(&mut self, action: InputAction) -> Result<()> {
        match action {
            InputAction::SetSearch { term } => self.set_search(term),
            InputAction::Toggle { value, checked } => self.toggle(&value, checked).map(|_| ()),
            InputAction::SelectAllVisible { checked } => {
                self.select_all_visible(checked).map(|_| ())
            }
            InputAction::SetDraft { text } => self.set_add_draft(text),
            InputAction::AddOption { value } => self.add_option(&value).map(|_| ()),
            InputAction::CommitDraft => self.commit_add_draft().map(|_| ()),
            InputAction::RemoveOption { value } => {
                self.remove_option(&value);
                Ok(())
            }
            InputAction::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
        }
    }

    fn view(&self) -> InputView {
        InputView {
            mode: GatherMode::MultiSelect,
            label: self.label().to_string(),
            open: self.open,
            disabled: self.disabled,
            search: self.search.clone(),
            options: self.visible_view(),
            selected: self.get_selected(),
            all_visible_checked: self.all_visible_checked(),
            draft: self.add_draft.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn sample() -> MultiSelect {
        MultiSelect::new("Pick", ["A1", "A2", "B1"])
    }

    #[test]
    fn test_selection_survives_filtering() {
        let mut ms = sample();
        ms.toggle("A1", true).unwrap();
        ms.set_search("B").unwrap();
        assert_eq!(ms.visible().collect::<Vec<_>>(), vec!["B1"]);
        ms.set_search("").unwrap();
        assert_eq!(ms.get_selected(), vec!["A1"]);
        assert!(ms.visible_view()[0].checked);
    }

    #[test]
    fn test_select_all_respects_filter() {
        let mut ms = sample();
        ms.set_search("A").unwrap();
        assert_eq!(ms.select_all_visible(true).unwrap(), 2);
        assert_eq!(ms.get_selected(), vec!["A1", "A2"]);
        assert!(!ms.is_selected("B1"));
        assert!(ms.all_visible_checked());

        ms.set_search("").unwrap();
        assert!(!ms.all_visible_checked());
    }

    #[test]
    fn test_unselect_all_visible() {
        let mut ms = sample();
        ms.select_all_visible(true).unwrap();
        ms.set_search("a").unwrap();
        ms.select_all_visible(false).unwrap();
        assert_eq!(ms.get_selected(), vec!["B1"]);
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut ms = sample();
        assert!(!ms.toggle("Z9", true).unwrap());
        assert!(ms.get_selected().is_empty());
    }

    #[test]
    fn test_toggle_reports_change() {
        let mut ms = sample();
        assert!(ms.toggle("A2", true).unwrap());
        assert!(!ms.toggle("A2", true).unwrap());
        assert!(ms.toggle("A2", false).unwrap());
    }

    #[test]
    fn test_add_option_validation() {
        let mut ms = sample();
        assert_eq!(ms.add_option(" ").unwrap_err(), SelectError::Empty);
        assert_eq!(
            ms.add_option(&"x".repeat(21)).unwrap_err().kind(),
            ErrorKind::TooLong
        );
        assert_eq!(
            ms.add_option("A1").unwrap_err(),
            SelectError::Duplicate("A1".to_string())
        );
        // Exact, case-sensitive match
        assert_eq!(ms.add_option("a1").unwrap(), "a1");
        assert_eq!(ms.options(), ["A1", "A2", "B1", "a1"]);
        assert!(!ms.is_selected("a1"));
    }

    #[test]
    fn test_commit_draft_clears_on_success_only() {
        let mut ms = sample();
        ms.set_add_draft("A1").unwrap();
        assert!(ms.commit_add_draft().is_err());
        assert_eq!(ms.add_draft(), "A1");

        ms.set_add_draft(" C1 ").unwrap();
        assert_eq!(ms.commit_add_draft().unwrap(), "C1");
        assert_eq!(ms.add_draft(), "");
    }

    #[test]
    fn test_remove_option_drops_selection() {
        let mut ms = sample();
        ms.toggle("A2", true).unwrap();
        assert!(ms.remove_option("A2"));
        assert!(!ms.remove_option("A2"));
        assert!(ms.get_selected().is_empty());
        assert_eq!(ms.options(), ["A1", "B1"]);
    }

    #[test]
    fn test_close_resets_search_but_keeps_selection() {
        let mut ms = sample();
        assert!(ms.open().unwrap());
        assert!(ms.is_search_focused());
        ms.toggle("B1", true).unwrap();
        ms.set_search("A").unwrap();
        ms.set_add_draft("new").unwrap();

        ms.close();
        assert!(!ms.is_open());
        assert_eq!(ms.search_term(), "");
        assert_eq!(ms.add_draft(), "");
        assert_eq!(ms.visible().count(), 3);
        assert_eq!(ms.get_selected(), vec!["B1"]);
    }

    #[test]
    fn test_disabled_forces_closed_and_blocks_interaction() {
        let mut ms = sample();
        ms.open().unwrap();
        ms.toggle("A1", true).unwrap();
        ms.set_disabled(true);

        assert!(!ms.is_open());
        assert_eq!(ms.open().unwrap_err(), SelectError::Disabled);
        assert_eq!(ms.toggle("A2", true).unwrap_err(), SelectError::Disabled);
        assert_eq!(ms.add_option("C1").unwrap_err(), SelectError::Disabled);
        // Host-side bookkeeping still works
        assert_eq!(ms.get_selected(), vec!["A1"]);
        ms.clear_selection();
        assert!(ms.get_selected().is_empty());

        ms.set_disabled(false);
        assert!(ms.open().unwrap());
    }

    #[test]
    fn test_toggle_open() {
        let mut ms = sample();
        assert!(ms.toggle_open().unwrap());
        assert!(!ms.toggle_open().unwrap());
        assert!(!ms.is_open());
    }

    #[test]
    fn test_label() {
        let mut ms = sample();
        assert_eq!(ms.label(), TriggerLabel::Placeholder("Pick".to_string()));
        ms.toggle("A1", true).unwrap();
        ms.toggle("B1", true).unwrap();
        assert_eq!(ms.label(), TriggerLabel::Count(2));
        assert_eq!(ms.label().to_string(), "2 selected");
    }

    #[test]
    fn test_gather() {
        let mut ms = sample();
        assert_eq!(ms.gather(), None);
        ms.toggle("B1", true).unwrap();
        ms.toggle("A1", true).unwrap();
        assert_eq!(
            ms.gather(),
            Some(Gathered::Batch(vec!["B1".to_string(), "A1".to_string()]))
        );
        ms.clear_candidates();
        assert_eq!(ms.gather(), None);
    }

    #[test]
    fn test_new_collapses_repeats() {
        let ms = MultiSelect::new("Pick", ["A1", "A1", "B1"]);
        assert_eq!(ms.options(), ["A1", "B1"]);
    }

    #[test]
    fn test_apply_actions() {
        let mut ms = sample();
        ms.apply(InputAction::Toggle {
            value: "A1".into(),
            checked: true,
        })
        .unwrap();
        ms.apply(InputAction::SetSearch { term: "b".into() }).unwrap();
        let view = ms.view();
        assert_eq!(view.options.len(), 1);
        assert_eq!(view.selected, vec!["A1"]);
        assert_eq!(view.label, "1 selected");
        assert!(!view.all_visible_checked);
    }
}
