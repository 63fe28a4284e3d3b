//! Testing utilities for nameplate
//!
//! Fixture constructors shared by the unit tests of several modules.
//!
//! Only available when compiled with `cfg(test)`.

use crate::config::EditorConfig;
use crate::editor::CascadeEditor;
use crate::select::GatherMode;
use crate::session::Session;

/// Editor built from the default configuration (multi-select controls)
///
/// # Panics
/// Panics if the default seed is rejected.
#[must_use]
pub fn editor() -> CascadeEditor {
    CascadeEditor::from_config(&EditorConfig::default()).expect("default editor")
}

/// Editor whose levels gather names through text fields
///
/// # Panics
/// Panics if the default seed is rejected.
#[must_use]
pub fn text_editor() -> CascadeEditor {
    CascadeEditor::from_config(&text_config()).expect("text entry editor")
}

/// Default configuration switched to text entry
#[must_use]
pub fn text_config() -> EditorConfig {
    EditorConfig {
        gather_mode: GatherMode::TextEntry,
        ..EditorConfig::default()
    }
}

/// Session built from the default configuration
///
/// # Panics
/// Panics if the default seed is rejected.
#[must_use]
pub fn session() -> Session {
    Session::new(&EditorConfig::default()).expect("default session")
}
