//! Cascade editor: catalog store plus one candidate control per level

use serde::Serialize;
use tracing::debug;

use crate::catalog::{BatchReport, CatalogError, CatalogSnapshot, CatalogStore, DeviceMap, Level};
use crate::config::EditorConfig;
use crate::select::{
    CandidateSource, ControlGroup, GatherMode, Gathered, InputAction, InputView, MultiSelect,
    TextEntry,
};
use crate::{NameplateError, Result};

/// Whether a column accepts interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnState {
    pub level: Level,
    pub enabled: bool,
}

/// One entry of a catalog column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub name: String,
    /// Whether this entry is the selected type/device
    pub active: bool,
}

/// Render-ready state of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub level: Level,
    pub enabled: bool,
    pub items: Vec<ItemView>,
    pub control: Option<InputView>,
}

/// Render-ready state of the whole editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub selected_type: Option<String>,
    pub selected_device: Option<String>,
    pub columns: Vec<ColumnView>,
}

/// What a removed pool option took with it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionRemoval {
    /// The option existed in the pool
    pub removed_option: bool,
    /// A catalog node of the same name was deleted at the current scope
    pub removed_node: bool,
}

/// Three-column catalog editor
///
/// Binds a [`CatalogStore`] to a candidate control per level. After every
/// mutation the controls are enabled to match the selection: the type
/// column always, the device column when a type is selected, the station
/// column when a device is selected.
#[derive(Debug)]
pub struct CascadeEditor {
    store: CatalogStore,
    controls: ControlGroup<Level>,
    relay_option_removal: bool,
}

impl CascadeEditor {
    /// Bind an existing store and controls
    #[must_use]
    pub fn new(store: CatalogStore, controls: ControlGroup<Level>) -> Self {
        let mut editor = Self {
            store,
            controls,
            relay_option_removal: true,
        };
        editor.sync_controls();
        editor
    }

    /// Build the editor described by a configuration
    ///
    /// The seed types are loaded without a selection.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidSnapshot` if a seed name is blank,
    /// padded with whitespace, or over the name limit.
    pub fn from_config(config: &EditorConfig) -> Result<Self> {
        let snapshot = CatalogSnapshot::with_types(config.seed.types.iter().cloned());
        Self::from_snapshot(config, snapshot)
    }

    /// Build the editor around injected catalog state
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidSnapshot` if the snapshot is inconsistent.
    pub fn from_snapshot(config: &EditorConfig, snapshot: CatalogSnapshot) -> Result<Self> {
        let store = CatalogStore::new()
            .with_policy(config.new_type_policy)
            .with_max_name_len(config.max_name_len)
            .with_snapshot(snapshot)?;

        let mut controls = ControlGroup::new();
        for level in Level::ALL {
            let placeholder = config.placeholder(level);
            let control: Box<dyn CandidateSource> = match config.gather_mode {
                GatherMode::MultiSelect => Box::new(
                    MultiSelect::new(placeholder, config.pool(level).iter().cloned())
                        .with_max_len(config.max_name_len),
                ),
                GatherMode::TextEntry => Box::new(TextEntry::new(placeholder)),
            };
            controls.insert(level, control);
        }

        let mut editor = Self::new(store, controls);
        editor.relay_option_removal = config.relay_option_removal;
        debug!(mode = %config.gather_mode, types = editor.store.len(), "editor ready");
        Ok(editor)
    }

    /// Read access to the catalog
    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Control of a level
    #[must_use]
    pub fn control(&self, level: Level) -> Option<&dyn CandidateSource> {
        self.controls.get(level)
    }

    /// Commit the candidates gathered by a level's control
    ///
    /// Candidates go into the catalog at the current scope: types at the
    /// root, devices under the selected type, stations under the selected
    /// device. The control's candidates are cleared on success only.
    ///
    /// # Errors
    /// `Empty` when nothing was gathered, otherwise the catalog's add errors.
    pub fn commit(&mut self, level: Level) -> Result<BatchReport> {
        let control = self.controls.get_mut(level)?;
        let gathered = match control.gather() {
            Some(gathered) => gathered,
            None if control.mode() == GatherMode::TextEntry => {
                return Err(CatalogError::Empty(level).into());
            }
            None => return Err(CatalogError::NothingSelected(level).into()),
        };

        let report = match gathered {
            Gathered::Batch(names) => self.add_many(level, &names)?,
            Gathered::Single(name) => BatchReport {
                added: vec![self.add(level, &name)?],
                ..BatchReport::default()
            },
        };

        self.controls.get_mut(level)?.clear_candidates();
        self.sync_controls();
        Ok(report)
    }

    /// Add one name at the current scope of a level
    ///
    /// # Errors
    /// The catalog's single-add errors.
    pub fn add(&mut self, level: Level, name: &str) -> Result<String> {
        let (type_name, device_name) = self.scope();
        let added = match level {
            Level::Type => self.store.add_type(name)?,
            Level::Device => self.store.add_device(type_name.as_deref(), name)?,
            Level::Station => {
                self.store
                    .add_station(type_name.as_deref(), device_name.as_deref(), name)?
            }
        };
        self.sync_controls();
        Ok(added)
    }

    /// Add several names at the current scope of a level
    ///
    /// # Errors
    /// The catalog's batch-add errors.
    pub fn add_many(&mut self, level: Level, names: &[String]) -> Result<BatchReport> {
        let (type_name, device_name) = self.scope();
        let report = match level {
            Level::Type => self.store.add_types(names)?,
            Level::Device => self.store.add_devices(type_name.as_deref(), names)?,
            Level::Station => {
                self.store
                    .add_stations(type_name.as_deref(), device_name.as_deref(), names)?
            }
        };
        self.sync_controls();
        Ok(report)
    }

    /// Select a type
    ///
    /// # Errors
    /// Returns `CatalogError::NotFound` for an unknown type.
    pub fn select_type(&mut self, name: &str) -> Result<()> {
        self.store.select_type(name)?;
        self.sync_controls();
        Ok(())
    }

    /// Select a device of the selected type
    ///
    /// # Errors
    /// `NoParentSelected` or `NotFound`.
    pub fn select_device(&mut self, name: &str) -> Result<()> {
        self.store.select_device(name)?;
        self.sync_controls();
        Ok(())
    }

    /// Delete a type and everything beneath it
    ///
    /// # Errors
    /// Returns `CatalogError::NotFound` for an unknown type.
    pub fn delete_type(&mut self, name: &str) -> Result<DeviceMap> {
        let removed = self.store.delete_type(name)?;
        self.sync_controls();
        Ok(removed)
    }

    /// Delete a device, by default of the selected type
    ///
    /// # Errors
    /// `NoParentSelected` when no type is given or selected, else `NotFound`.
    pub fn delete_device(&mut self, type_name: Option<&str>, name: &str) -> Result<Vec<String>> {
        let type_name = self.parent_or_selected(type_name, Level::Device)?;
        let removed = self.store.delete_device(&type_name, name)?;
        self.sync_controls();
        Ok(removed)
    }

    /// Delete a station by position, by default of the selected device
    ///
    /// # Errors
    /// `NoParentSelected`, `NotFound` or `IndexOutOfRange`.
    pub fn delete_station(
        &mut self,
        type_name: Option<&str>,
        device_name: Option<&str>,
        index: usize,
    ) -> Result<String> {
        let type_name = self.parent_or_selected(type_name, Level::Station)?;
        let device_name = match device_name {
            Some(device) => device.to_string(),
            None => self
                .store
                .selected_device()
                .map(str::to_owned)
                .ok_or(CatalogError::NoParentSelected(Level::Station))?,
        };
        let removed = self.store.delete_station(&type_name, &device_name, index)?;
        self.sync_controls();
        Ok(removed)
    }

    /// Drop an option from a level's pool
    ///
    /// With relaying enabled, a catalog node of the same name at the current
    /// scope is deleted too (with its descendants); a station is matched by
    /// name under the selected device.
    ///
    /// # Errors
    /// Returns `SelectError::UnknownControl` for a level without a control.
    pub fn remove_option(&mut self, level: Level, value: &str) -> Result<OptionRemoval> {
        let removed_option = self.controls.get_mut(level)?.remove_option(value);
        let removed_node = self.relay_option_removal && self.delete_node_named(level, value);
        if removed_node {
            self.sync_controls();
        }
        debug!(level = %level, value, removed_option, removed_node, "option removed");
        Ok(OptionRemoval {
            removed_option,
            removed_node,
        })
    }

    /// Forward a user interaction to a level's control
    ///
    /// Option removal goes through [`remove_option`](Self::remove_option).
    ///
    /// # Errors
    /// The control's own errors.
    pub fn input(&mut self, level: Level, action: InputAction) -> Result<()> {
        if let InputAction::RemoveOption { value } = action {
            self.remove_option(level, &value)?;
            return Ok(());
        }
        self.controls.get_mut(level)?.apply(action)?;
        Ok(())
    }

    /// Open a level's control, closing the others
    ///
    /// # Errors
    /// `Disabled` while the column is disabled.
    pub fn open(&mut self, level: Level) -> Result<bool> {
        Ok(self.controls.open(level)?)
    }

    /// Close every control
    pub fn close_all(&mut self) {
        self.controls.close_all();
    }

    /// Clear both selection pointers
    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
        self.sync_controls();
    }

    /// Enabled state of each column, outermost first
    #[must_use]
    pub fn column_states(&self) -> [ColumnState; 3] {
        Level::ALL.map(|level| ColumnState {
            level,
            enabled: self.column_enabled(level),
        })
    }

    /// Render-ready state
    #[must_use]
    pub fn view(&self) -> EditorView {
        let selected_type = self.store.selected_type();
        let selected_device = self.store.selected_device();

        let columns = Level::ALL
            .iter()
            .map(|&level| {
                let items = match (level, selected_type, selected_device) {
                    (Level::Type, ..) => items(self.store.list_types(), selected_type),
                    (Level::Device, Some(t), _) => items(self.store.list_devices(t), selected_device),
                    (Level::Station, Some(t), Some(d)) => items(self.store.list_stations(t, d), None),
                    _ => Vec::new(),
                };
                ColumnView {
                    level,
                    enabled: self.column_enabled(level),
                    items,
                    control: self.controls.get(level).map(|control| control.view()),
                }
            })
            .collect();

        EditorView {
            selected_type: selected_type.map(str::to_owned),
            selected_device: selected_device.map(str::to_owned),
            columns,
        }
    }

    fn column_enabled(&self, level: Level) -> bool {
        match level {
            Level::Type => true,
            Level::Device => self.store.selected_type().is_some(),
            Level::Station => self.store.selected_device().is_some(),
        }
    }

    fn sync_controls(&mut self) {
        for level in Level::ALL {
            let enabled = self.column_enabled(level);
            if let Ok(control) = self.controls.get_mut(level)
                && control.is_disabled() == enabled
            {
                control.set_disabled(!enabled);
            }
        }
    }

    fn scope(&self) -> (Option<String>, Option<String>) {
        (
            self.store.selected_type().map(str::to_owned),
            self.store.selected_device().map(str::to_owned),
        )
    }

    fn parent_or_selected(&self, type_name: Option<&str>, level: Level) -> Result<String> {
        type_name
            .or_else(|| self.store.selected_type())
            .map(str::to_owned)
            .ok_or_else(|| NameplateError::from(CatalogError::NoParentSelected(level)))
    }

    fn delete_node_named(&mut self, level: Level, name: &str) -> bool {
        let (type_name, device_name) = self.scope();
        match level {
            Level::Type => self.store.delete_type(name).is_ok(),
            Level::Device => {
                type_name.is_some_and(|t| self.store.delete_device(&t, name).is_ok())
            }
            Level::Station => {
                let (Some(t), Some(d)) = (type_name, device_name) else {
                    return false;
                };
                self.store
                    .list_stations(&t, &d)
                    .iter()
                    .position(|station| station == name)
                    .is_some_and(|index| self.store.delete_station(&t, &d, index).is_ok())
            }
        }
    }
}

fn items(names: Vec<String>, active: Option<&str>) -> Vec<ItemView> {
    names
        .into_iter()
        .map(|name| ItemView {
            active: active == Some(name.as_str()),
            name,
        })
        .collect()
}
