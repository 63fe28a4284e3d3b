//! Command/result layer of the cascade editor
//!
//! Each [`Command`] is one user gesture; applying it yields a [`Response`]
//! that serializes as `{"ok": true, "data": ...}` or
//! `{"ok": false, "kind": "...", "message": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::cascade::CascadeEditor;
use crate::catalog::Level;
use crate::select::InputAction;
use crate::{ErrorKind, NameplateError, Result};

/// One editor gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Commit the candidates gathered by a level's control
    Commit { level: Level },
    /// Add one name at the level's current scope
    Add { level: Level, name: String },
    /// Add several names at the level's current scope
    AddMany { level: Level, names: Vec<String> },
    SelectType { name: String },
    SelectDevice { name: String },
    ClearSelection,
    DeleteType { name: String },
    /// Delete a device, of the selected type unless one is named
    DeleteDevice {
        #[serde(default)]
        type_name: Option<String>,
        name: String,
    },
    /// Delete a station by position, of the selected device unless named
    DeleteStation {
        #[serde(default)]
        type_name: Option<String>,
        #[serde(default)]
        device_name: Option<String>,
        index: usize,
    },
    /// Drop an option from a level's pool
    RemoveOption { level: Level, value: String },
    /// Forward an interaction to a level's control
    Input { level: Level, input: InputAction },
    Open { level: Level },
    CloseAll,
    /// Render-ready state
    View,
    /// Raw catalog state
    Snapshot,
}

impl Command {
    /// Operation name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Commit { .. } => "commit",
            Self::Add { .. } => "add",
            Self::AddMany { .. } => "add_many",
            Self::SelectType { .. } => "select_type",
            Self::SelectDevice { .. } => "select_device",
            Self::ClearSelection => "clear_selection",
            Self::DeleteType { .. } => "delete_type",
            Self::DeleteDevice { .. } => "delete_device",
            Self::DeleteStation { .. } => "delete_station",
            Self::RemoveOption { .. } => "remove_option",
            Self::Input { .. } => "input",
            Self::Open { .. } => "open",
            Self::CloseAll => "close_all",
            Self::View => "view",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Outcome of a command or request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Successful response carrying data
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            kind: None,
            message: None,
        }
    }

    /// Failed response describing an error
    #[must_use]
    pub fn failure(err: &NameplateError) -> Self {
        Self {
            ok: false,
            data: None,
            kind: Some(err.kind()),
            message: Some(err.message()),
        }
    }

    /// Wrap the outcome of an operation
    #[must_use]
    pub fn from_result(result: Result<Value>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}

impl CascadeEditor {
    /// Apply a command, turning failures into a failed response
    pub fn apply(&mut self, command: Command) -> Response {
        let op = command.name();
        let result = self.execute(command);
        match &result {
            Ok(_) => debug!(op, "command applied"),
            Err(err) => warn!(op, kind = %err.kind(), error = %err.message(), "command rejected"),
        }
        Response::from_result(result)
    }

    fn execute(&mut self, command: Command) -> Result<Value> {
        let data = match command {
            Command::Commit { level } => serde_json::to_value(self.commit(level)?)?,
            Command::Add { level, name } => json!({ "added": self.add(level, &name)? }),
            Command::AddMany { level, names } => serde_json::to_value(self.add_many(level, &names)?)?,
            Command::SelectType { name } => {
                self.select_type(&name)?;
                self.selection()
            }
            Command::SelectDevice { name } => {
                self.select_device(&name)?;
                self.selection()
            }
            Command::ClearSelection => {
                self.clear_selection();
                self.selection()
            }
            Command::DeleteType { name } => {
                let removed = self.delete_type(&name)?;
                json!({ "deleted": name, "devices": removed.len() })
            }
            Command::DeleteDevice { type_name, name } => {
                let removed = self.delete_device(type_name.as_deref(), &name)?;
                json!({ "deleted": name, "stations": removed.len() })
            }
            Command::DeleteStation {
                type_name,
                device_name,
                index,
            } => {
                let removed =
                    self.delete_station(type_name.as_deref(), device_name.as_deref(), index)?;
                json!({ "deleted": removed })
            }
            Command::RemoveOption { level, value } => {
                serde_json::to_value(self.remove_option(level, &value)?)?
            }
            Command::Input { level, input } => {
                self.input(level, input)?;
                serde_json::to_value(self.control(level).map(|control| control.view()))?
            }
            Command::Open { level } => json!({ "opened": self.open(level)? }),
            Command::CloseAll => {
                self.close_all();
                Value::Null
            }
            Command::View => serde_json::to_value(self.view())?,
            Command::Snapshot => serde_json::to_value(self.store().snapshot())?,
        };
        Ok(data)
    }

    fn selection(&self) -> Value {
        json!({
            "selected_type": self.store().selected_type(),
            "selected_device": self.store().selected_device(),
            "columns": self.column_states(),
        })
    }
}
