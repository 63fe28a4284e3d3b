//! Three-column cascade editor
//!
//! Ties the [`catalog`](crate::catalog) to the [`select`](crate::select)
//! controls: each column gathers candidate names through its control and
//! commits them into the catalog at the current scope, and the columns are
//! enabled or disabled as the selection changes.
//!
//! # Example
//!
//! ```
//! use nameplate::catalog::Level;
//! use nameplate::config::EditorConfig;
//! use nameplate::editor::{CascadeEditor, Command};
//! use nameplate::select::InputAction;
//!
//! let mut editor = CascadeEditor::from_config(&EditorConfig::default())?;
//! editor.select_type("焊接机")?;
//! editor.input(Level::Device, InputAction::Toggle { value: "33号焊接机".into(), checked: true })?;
//! editor.commit(Level::Device)?;
//!
//! let response = editor.apply(Command::SelectDevice { name: "33号焊接机".into() });
//! assert!(response.ok);
//! assert!(editor.column_states()[2].enabled);
//! # Ok::<(), nameplate::NameplateError>(())
//! ```

pub mod cascade;
pub mod command;

pub use cascade::{CascadeEditor, ColumnState, ColumnView, EditorView, ItemView, OptionRemoval};
pub use command::{Command, Response};
