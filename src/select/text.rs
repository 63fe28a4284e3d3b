//! Single free-text entry field
//!
//! The simplest way for a level to gather a name: type it, press add. The
//! typed text is handed to the catalog as-is so the catalog's own validation
//! (blank, length, duplicate) decides.

use super::error::{Result, SelectError};
use super::traits::{CandidateSource, GatherMode, Gathered, InputAction, InputView};

/// State of one text entry field
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    placeholder: String,
    text: String,
    focused: bool,
    disabled: bool,
}

impl TextEntry {
    /// Create an empty field
    #[must_use]
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text
    ///
    /// # Errors
    /// Returns `SelectError::Disabled` while disabled.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        if self.disabled {
            return Err(SelectError::Disabled);
        }
        self.text = text.into();
        Ok(())
    }
}

impl CandidateSource for TextEntry {
    fn mode(&self) -> GatherMode {
        GatherMode::TextEntry
    }

    fn gather(&self) -> Option<Gathered> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(Gathered::Single(self.text.clone()))
        }
    }

    fn clear_candidates(&mut self) {
        self.text.clear();
    }

    fn open(&mut self) -> Result<bool> {
        if self.disabled {
            return Err(SelectError::Disabled);
        }
        let was_focused = self.focused;
        self.focused = true;
        Ok(!was_focused)
    }

    fn close(&mut self) {
        self.focused = false;
    }

    fn is_open(&self) -> bool {
        self.focused
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

    fn remove_option(&mut self, _value: &str) -> bool {
        false
    }

    fn apply(&mut self, action: InputAction) -> Result<()> {
        match action {
            InputAction::SetDraft { text } => self.set_text(text),
            InputAction::ClearSelection => {
                self.clear_candidates();
                Ok(())
            }
            other => Err(SelectError::Unsupported(other.name())),
        }
    }

    fn view(&self) -> InputView {
        InputView {
            mode: GatherMode::TextEntry,
            label: self.placeholder.clone(),
            open: self.focused,
            disabled: self.disabled,
            search: String::new(),
            options: Vec::new(),
            selected: self.gather().map_or_else(Vec::new, |_| vec![self.text.clone()]),
            all_visible_checked: false,
            draft: self.text.clone(),
        }
    }
}
