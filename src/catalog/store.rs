use tracing::debug;

use super::error::{CatalogError, Result};
use super::types::{BatchReport, CatalogSnapshot, DeviceMap, Level, NewTypePolicy, Rejection, TypeMap};
use crate::names::{DEFAULT_MAX_NAME_LEN, validate_name};

/// Three-level catalog with selection pointers
///
/// Owns the type → device → station mapping and the currently selected type
/// and device. Every mutating method either validates fully and commits, or
/// returns an error and leaves the store untouched.
///
/// After every call:
/// - a selected type exists in the catalog
/// - a selected device exists under the selected type
/// - names are unique within their scope
#[derive(Debug, Clone)]
pub struct CatalogStore {
    types: TypeMap,
    selected_type: Option<String>,
    selected_device: Option<String>,
    policy: NewTypePolicy,
    max_name_len: usize,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Create an empty store with the default policy and name limit
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: TypeMap::new(),
            selected_type: None,
            selected_device: None,
            policy: NewTypePolicy::default(),
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }

    /// Create a store from injected state with the default name limit
    ///
    /// # Errors
    /// As [`CatalogStore::with_snapshot`].
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self> {
        Self::new().with_snapshot(snapshot)
    }

    /// Replace the state with an injected snapshot
    ///
    /// The snapshot is checked against this store's name limit, so set
    /// [`CatalogStore::with_max_name_len`] first.
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidSnapshot` if a name would be refused by
    /// an add, the selection pointers do not reference existing nodes, or a
    /// device holds the same station twice.
    pub fn with_snapshot(mut self, snapshot: CatalogSnapshot) -> Result<Self> {
        self.types = snapshot.types;
        self.selected_type = snapshot.selected_type;
        self.selected_device = snapshot.selected_device;
        self.verify()?;
        Ok(self)
    }

    /// Set what happens to the selection when a type is created
    #[must_use]
    pub const fn with_policy(mut self, policy: NewTypePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the maximum name length in characters
    #[must_use]
    pub const fn with_max_name_len(mut self, max: usize) -> Self {
        self.max_name_len = max;
        self
    }

    /// Copy of the full state
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            types: self.types.clone(),
            selected_type: self.selected_type.clone(),
            selected_device: self.selected_device.clone(),
        }
    }

    /// Check the catalog invariants
    ///
    /// # Errors
    /// Returns `CatalogError::InvalidSnapshot` describing the first violation.
    pub fn verify(&self) -> Result<()> {
        if let Some(device) = &self.selected_device {
            let Some(type_name) = &self.selected_type else {
                return Err(CatalogError::InvalidSnapshot(format!(
                    "device '{device}' selected without a type"
                )));
            };
            let known = self
                .types
                .get(type_name)
                .is_some_and(|devices| devices.contains_key(device));
            if !known {
                return Err(CatalogError::InvalidSnapshot(format!(
                    "selected device '{device}' is not under type '{type_name}'"
                )));
            }
        }

        if let Some(type_name) = &self.selected_type
            && !self.types.contains_key(type_name)
        {
            return Err(CatalogError::InvalidSnapshot(format!(
                "selected type '{type_name}' does not exist"
            )));
        }

        for (type_name, devices) in &self.types {
            self.check_stored_name(Level::Type, type_name)?;
            for (device, stations) in devices {
                self.check_stored_name(Level::Device, device)?;
                for (i, station) in stations.iter().enumerate() {
                    self.check_stored_name(Level::Station, station)?;
                    if stations[..i].contains(station) {
                        return Err(CatalogError::InvalidSnapshot(format!(
                            "station '{station}' repeated under {type_name} / {device}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn check_stored_name(&self, level: Level, name: &str) -> Result<()> {
        match validate_name(name, self.max_name_len) {
            Ok(valid) if valid == name => Ok(()),
            Ok(_) => Err(CatalogError::InvalidSnapshot(format!(
                "{level} name '{name}' has surrounding whitespace"
            ))),
            Err(issue) => Err(CatalogError::InvalidSnapshot(format!(
                "{level} name '{name}': {}",
                CatalogError::from_issue(level, issue)
            ))),
        }
    }

    /// Policy applied when a type is created
    #[must_use]
    pub const fn policy(&self) -> NewTypePolicy {
        self.policy
    }

    /// Maximum name length in characters
    #[must_use]
    pub const fn max_name_len(&self) -> usize {
        self.max_name_len
    }

    /// Currently selected type
    #[must_use]
    pub fn selected_type(&self) -> Option<&str> {
        self.selected_type.as_deref()
    }

    /// Currently selected device
    #[must_use]
    pub fn selected_device(&self) -> Option<&str> {
        self.selected_device.as_deref()
    }

    /// Number of types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the catalog has no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Type names in insertion order
    #[must_use]
    pub fn list_types(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Device names of a type in insertion order (empty for unknown types)
    #[must_use]
    pub fn list_devices(&self, type_name: &str) -> Vec<String> {
        self.types
            .get(type_name)
            .map_or_else(Vec::new, |devices| devices.keys().cloned().collect())
    }

    /// Stations of a device in order (empty for unknown parents)
    #[must_use]
    pub fn list_stations(&self, type_name: &str, device_name: &str) -> Vec<String> {
        self.types
            .get(type_name)
            .and_then(|devices| devices.get(device_name))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a type exists
    #[must_use]
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Whether a device exists under a type
    #[must_use]
    pub fn has_device(&self, type_name: &str, device_name: &str) -> bool {
        self.types
            .get(type_name)
            .is_some_and(|devices| devices.contains_key(device_name))
    }

    // ------------------------------------------------------------------
    // Single adds
    // ------------------------------------------------------------------

    /// Add a type
    ///
    /// Returns the stored (trimmed) name. Under [`NewTypePolicy::AutoSelect`]
    /// the new type becomes the selected type.
    ///
    /// # Errors
    /// `Empty`, `TooLong` or `Duplicate`.
    pub fn add_type(&mut self, name: &str) -> Result<String> {
        let name = validate_name(name, self.max_name_len)
            .map_err(|issue| CatalogError::from_issue(Level::Type, issue))?;
        if self.types.contains_key(&name) {
            return Err(CatalogError::Duplicate {
                level: Level::Type,
                name,
            });
        }

        self.types.insert(name.clone(), DeviceMap::new());
        debug!(type_name = %name, "added type");
        self.after_type_created(&name);
        Ok(name)
    }

    /// Add a device under a type
    ///
    /// # Errors
    /// `NoParentSelected` when `type_name` is `None`, `NotFound` for an
    /// unknown type, then `Empty`, `TooLong` or `Duplicate`.
    pub fn add_device(&mut self, type_name: Option<&str>, name: &str) -> Result<String> {
        let type_name = type_name.ok_or(CatalogError::NoParentSelected(Level::Device))?;
        let max = self.max_name_len;
        let devices = self.devices_mut(type_name)?;
        let name =
            validate_name(name, max).map_err(|issue| CatalogError::from_issue(Level::Device, issue))?;
        if devices.contains_key(&name) {
            return Err(CatalogError::Duplicate {
                level: Level::Device,
                name,
            });
        }

        devices.insert(name.clone(), Vec::new());
        debug!(type_name = type_name, device = %name, "added device");
        Ok(name)
    }

    /// Append a station to a device
    ///
    /// # Errors
    /// `NoParentSelected` unless both parents are given, `NotFound` for
    /// unknown parents, then `Empty`, `TooLong` or `Duplicate`.
    pub fn add_station(
        &mut self,
        type_name: Option<&str>,
        device_name: Option<&str>,
        name: &str,
    ) -> Result<String> {
        let (Some(type_name), Some(device_name)) = (type_name, device_name) else {
            return Err(CatalogError::NoParentSelected(Level::Station));
        };
        let max = self.max_name_len;
        let stations = self.stations_mut(type_name, device_name)?;
        let name = validate_name(name, max)
            .map_err(|issue| CatalogError::from_issue(Level::Station, issue))?;
        if stations.contains(&name) {
            return Err(CatalogError::Duplicate {
                level: Level::Station,
                name,
            });
        }

        stations.push(name.clone());
        debug!(type_name = type_name, device = device_name, station = %name, "added station");
        Ok(name)
    }

    // ------------------------------------------------------------------
    // Batch adds
    // ------------------------------------------------------------------

    /// Add several types at once
    ///
    /// Names already present are skipped. Under [`NewTypePolicy::AutoSelect`]
    /// the last added type ends up selected, as if added one by one.
    ///
    /// # Errors
    /// `Empty` for an empty batch, `AllDuplicate` when every name already
    /// exists, or the first validation error when nothing valid remains.
    pub fn add_types<I, S>(&mut self, names: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = &self.types;
        let report = plan_batch(Level::Type, self.max_name_len, names, |name| {
            types.contains_key(name)
        })?;

        for name in &report.added {
            self.types.insert(name.clone(), DeviceMap::new());
        }
        if let Some(last) = report.added.last() {
            self.after_type_created(last);
        }
        debug!(added = report.added.len(), skipped = report.skipped.len(), "added types");
        Ok(report)
    }

    /// Add several devices under a type at once
    ///
    /// # Errors
    /// `NoParentSelected` / `NotFound` for the parent, then as
    /// [`CatalogStore::add_types`].
    pub fn add_devices<I, S>(&mut self, type_name: Option<&str>, names: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let type_name = type_name.ok_or(CatalogError::NoParentSelected(Level::Device))?;
        let max = self.max_name_len;
        let devices = self.devices_mut(type_name)?;
        let report = plan_batch(Level::Device, max, names, |name| devices.contains_key(name))?;

        for name in &report.added {
            devices.insert(name.clone(), Vec::new());
        }
        debug!(type_name = type_name, added = report.added.len(), skipped = report.skipped.len(), "added devices");
        Ok(report)
    }

    /// Append several stations to a device at once
    ///
    /// # Errors
    /// `NoParentSelected` / `NotFound` for the parents, then as
    /// [`CatalogStore::add_types`].
    pub fn add_stations<I, S>(
        &mut self,
        type_name: Option<&str>,
        device_name: Option<&str>,
        names: I,
    ) -> Result<BatchReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (Some(type_name), Some(device_name)) = (type_name, device_name) else {
            return Err(CatalogError::NoParentSelected(Level::Station));
        };
        let max = self.max_name_len;
        let stations = self.stations_mut(type_name, device_name)?;
        let report = plan_batch(Level::Station, max, names, |name| {
            stations.iter().any(|s| s == name)
        })?;

        stations.extend(report.added.iter().cloned());
        debug!(
            type_name = type_name,
            device = device_name,
            added = report.added.len(),
            skipped = report.skipped.len(),
            "added stations"
        );
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Select a type, clearing the device pointer when it changes
    ///
    /// # Errors
    /// `NotFound` for an unknown type.
    pub fn select_type(&mut self, name: &str) -> Result<()> {
        if self.selected_type.as_deref() == Some(name) {
            return Ok(());
        }
        if !self.types.contains_key(name) {
            return Err(CatalogError::not_found(Level::Type, name));
        }
        self.selected_type = Some(name.to_string());
        self.selected_device = None;
        debug!(type_name = name, "selected type");
        Ok(())
    }

    /// Select a device of the selected type
    ///
    /// # Errors
    /// `NoParentSelected` without a selected type, `NotFound` when the device
    /// is not under it.
    pub fn select_device(&mut self, name: &str) -> Result<()> {
        let type_name = self
            .selected_type
            .as_deref()
            .ok_or(CatalogError::NoParentSelected(Level::Device))?;
        if self.selected_device.as_deref() == Some(name) {
            return Ok(());
        }
        if !self.has_device(type_name, name) {
            return Err(CatalogError::not_found(Level::Device, name));
        }
        self.selected_device = Some(name.to_string());
        debug!(device = name, "selected device");
        Ok(())
    }

    /// Clear both selection pointers
    pub fn clear_selection(&mut self) {
        self.selected_type = None;
        self.selected_device = None;
    }

    // ------------------------------------------------------------------
    // Deletes
    // ------------------------------------------------------------------

    /// Delete a type with all its devices and stations
    ///
    /// Returns the removed devices. Both pointers are cleared if the type was
    /// selected.
    ///
    /// # Errors
    /// `NotFound` for an unknown type.
    pub fn delete_type(&mut self, name: &str) -> Result<DeviceMap> {
        let removed = self
            .types
            .shift_remove(name)
            .ok_or_else(|| CatalogError::not_found(Level::Type, name))?;
        if self.selected_type.as_deref() == Some(name) {
            self.clear_selection();
        }
        debug!(type_name = name, devices = removed.len(), "deleted type");
        Ok(removed)
    }

    /// Delete a device with its stations
    ///
    /// Only the device pointer is cleared, and only when the deleted device is
    /// the selected device of the selected type.
    ///
    /// # Errors
    /// `NotFound` for an unknown type or device.
    pub fn delete_device(&mut self, type_name: &str, name: &str) -> Result<Vec<String>> {
        let removed = self
            .devices_mut(type_name)?
            .shift_remove(name)
            .ok_or_else(|| CatalogError::not_found(Level::Device, name))?;
        if self.selected_type.as_deref() == Some(type_name)
            && self.selected_device.as_deref() == Some(name)
        {
            self.selected_device = None;
        }
        debug!(type_name = type_name, device = name, "deleted device");
        Ok(removed)
    }

    /// Delete a station by position
    ///
    /// # Errors
    /// `NotFound` for unknown parents, `IndexOutOfRange` for a bad index.
    pub fn delete_station(&mut self, type_name: &str, device_name: &str, index: usize) -> Result<String> {
        let stations = self.stations_mut(type_name, device_name)?;
        if index >= stations.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: stations.len(),
            });
        }
        let removed = stations.remove(index);
        debug!(type_name = type_name, device = device_name, station = %removed, "deleted station");
        Ok(removed)
    }

    fn after_type_created(&mut self, name: &str) {
        if self.policy == NewTypePolicy::AutoSelect {
            self.selected_type = Some(name.to_string());
            self.selected_device = None;
        }
    }

    fn devices_mut(&mut self, type_name: &str) -> Result<&mut DeviceMap> {
        self.types
            .get_mut(type_name)
            .ok_or_else(|| CatalogError::not_found(Level::Type, type_name))
    }

    fn stations_mut(&mut self, type_name: &str, device_name: &str) -> Result<&mut Vec<String>> {
        self.devices_mut(type_name)?
            .get_mut(device_name)
            .ok_or_else(|| CatalogError::not_found(Level::Device, device_name))
    }
}

/// Validate a batch against the names already in scope
///
/// Nothing is inserted here; the returned report's `added` list is what the
/// caller should insert.
fn plan_batch<I, S>(
    level: Level,
    max: usize,
    names: I,
    exists: impl Fn(&str) -> bool,
) -> Result<BatchReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = BatchReport::default();
    let mut first_error = None;
    let mut submitted = 0usize;

    for raw in names {
        submitted += 1;
        let raw = raw.as_ref();
        match validate_name(raw, max) {
            Ok(name) => {
                if report.added.contains(&name) || report.skipped.contains(&name) {
                    continue;
                }
                if exists(&name) {
                    report.skipped.push(name);
                } else {
                    report.added.push(name);
                }
            }
            Err(issue) => {
                let error = CatalogError::from_issue(level, issue);
                report.rejected.push(Rejection {
                    name: raw.to_string(),
                    kind: error.kind(),
                });
                first_error.get_or_insert(error);
            }
        }
    }

    if submitted == 0 {
        return Err(CatalogError::NothingSelected(level));
    }
    if report.added.is_empty() {
        return Err(first_error.unwrap_or(CatalogError::AllDuplicate(level)));
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn store_with(types: &[&str]) -> CatalogStore {
        CatalogStore::from_snapshot(CatalogSnapshot::with_types(types.iter().copied())).unwrap()
    }

    #[test]
    fn test_add_type_auto_selects() {
        let mut store = CatalogStore::new();
        store.add_type("焊接机").unwrap();
        assert_eq!(store.selected_type(), Some("焊接机"));
        assert_eq!(store.selected_device(), None);
    }

    #[test]
    fn test_add_type_manual_policy_keeps_selection() {
        let mut store = store_with(&["吸塑机"]).with_policy(NewTypePolicy::Manual);
        store.select_type("吸塑机").unwrap();
        store.add_type("注塑机").unwrap();
        assert_eq!(store.selected_type(), Some("吸塑机"));
    }

    #[test]
    fn test_add_type_validation() {
        let mut store = CatalogStore::new();
        assert_eq!(store.add_type("  ").unwrap_err().kind(), ErrorKind::Empty);
        assert_eq!(
            store.add_type(&"x".repeat(21)).unwrap_err().kind(),
            ErrorKind::TooLong
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_type_leaves_store_unchanged() {
        let mut store = CatalogStore::new();
        store.add_type("X").unwrap();
        let before = store.snapshot();

        let err = store.add_type("X").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_type_stores_trimmed_name() {
        let mut store = CatalogStore::new();
        assert_eq!(store.add_type("  冲压机  ").unwrap(), "冲压机");
        assert!(store.has_type("冲压机"));
        assert_eq!(store.add_type("冲压机 ").unwrap_err().kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_add_device_requires_parent() {
        let mut store = store_with(&["焊接机"]);
        assert_eq!(
            store.add_device(None, "33号焊接机").unwrap_err(),
            CatalogError::NoParentSelected(Level::Device)
        );
        assert_eq!(
            store.add_device(Some("装配线"), "34号装配线").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_device_duplicates_scoped_to_type() {
        let mut store = store_with(&["焊接机", "冲压机"]);
        store.add_device(Some("焊接机"), "通用设备").unwrap();
        store.add_device(Some("冲压机"), "通用设备").unwrap();
        assert_eq!(
            store.add_device(Some("焊接机"), "通用设备").unwrap_err().kind(),
            ErrorKind::Duplicate
        );
    }

    #[test]
    fn test_stations_append_in_order() {
        let mut store = store_with(&["吸塑机"]);
        store.add_device(Some("吸塑机"), "25号吸塑机").unwrap();
        for station in ["成型工位", "剪边工位", "上料工位"] {
            store
                .add_station(Some("吸塑机"), Some("25号吸塑机"), station)
                .unwrap();
        }
        assert_eq!(
            store.list_stations("吸塑机", "25号吸塑机"),
            vec!["成型工位", "剪边工位", "上料工位"]
        );
        assert_eq!(
            store
                .add_station(Some("吸塑机"), None, "加热工位")
                .unwrap_err()
                .kind(),
            ErrorKind::NoParentSelected
        );
    }

    #[test]
    fn test_select_type_resets_device() {
        let mut store = store_with(&["吸塑机", "注塑机"]);
        store.select_type("吸塑机").unwrap();
        store.add_device(Some("吸塑机"), "25号吸塑机").unwrap();
        store.select_device("25号吸塑机").unwrap();

        // Reselecting the same type is a no-op
        store.select_type("吸塑机").unwrap();
        assert_eq!(store.selected_device(), Some("25号吸塑机"));

        store.select_type("注塑机").unwrap();
        assert_eq!(store.selected_type(), Some("注塑机"));
        assert_eq!(store.selected_device(), None);
    }

    #[test]
    fn test_select_device_requires_type() {
        let mut store = store_with(&["吸塑机"]);
        assert_eq!(
            store.select_device("25号吸塑机").unwrap_err().kind(),
            ErrorKind::NoParentSelected
        );
        store.select_type("吸塑机").unwrap();
        assert_eq!(
            store.select_device("25号吸塑机").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_delete_selected_type_clears_both() {
        let mut store = store_with(&["焊接机"]);
        store.select_type("焊接机").unwrap();
        store.add_device(Some("焊接机"), "33号焊接机").unwrap();
        store.select_device("33号焊接机").unwrap();

        let removed = store.delete_type("焊接机").unwrap();
        assert!(removed.contains_key("33号焊接机"));
        assert_eq!(store.selected_type(), None);
        assert_eq!(store.selected_device(), None);
    }

    #[test]
    fn test_delete_unselected_type_keeps_selection() {
        let mut store = store_with(&["焊接机", "装配线"]);
        store.select_type("焊接机").unwrap();
        store.delete_type("装配线").unwrap();
        assert_eq!(store.selected_type(), Some("焊接机"));
        assert_eq!(store.list_types(), vec!["焊接机"]);
    }

    #[test]
    fn test_delete_device_clears_only_device_pointer() {
        let mut store = store_with(&["焊接机"]);
        store.select_type("焊接机").unwrap();
        store.add_device(Some("焊接机"), "33号焊接机").unwrap();
        store.add_device(Some("焊接机"), "35号焊接机").unwrap();
        store.select_device("33号焊接机").unwrap();

        store.delete_device("焊接机", "33号焊接机").unwrap();
        assert_eq!(store.selected_device(), None);
        assert_eq!(store.selected_type(), Some("焊接机"));
        assert_eq!(store.list_devices("焊接机"), vec!["35号焊接机"]);
    }

    #[test]
    fn test_delete_same_named_device_elsewhere_keeps_pointer() {
        let mut store = store_with(&["焊接机", "冲压机"]);
        store.add_device(Some("焊接机"), "通用").unwrap();
        store.add_device(Some("冲压机"), "通用").unwrap();
        store.select_type("焊接机").unwrap();
        store.select_device("通用").unwrap();

        store.delete_device("冲压机", "通用").unwrap();
        assert_eq!(store.selected_device(), Some("通用"));
    }

    #[test]
    fn test_delete_station_by_index() {
        let mut store = store_with(&["吸塑机"]);
        store.add_device(Some("吸塑机"), "26号吸塑机").unwrap();
        store
            .add_stations(Some("吸塑机"), Some("26号吸塑机"), ["成型工位", "剪边工位"])
            .unwrap();

        assert_eq!(
            store.delete_station("吸塑机", "26号吸塑机", 2).unwrap_err(),
            CatalogError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(store.delete_station("吸塑机", "26号吸塑机", 0).unwrap(), "成型工位");
        assert_eq!(store.list_stations("吸塑机", "26号吸塑机"), vec!["剪边工位"]);
    }

    #[test]
    fn test_delete_unknown_nodes() {
        let mut store = store_with(&["吸塑机"]);
        assert_eq!(store.delete_type("注塑机").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            store.delete_device("吸塑机", "25号吸塑机").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_query_results_are_snapshots() {
        let mut store = store_with(&["吸塑机"]);
        let mut types = store.list_types();
        types.push("注塑机".to_string());
        assert_eq!(store.list_types(), vec!["吸塑机"]);

        store.add_type("注塑机").unwrap();
        assert_eq!(types, store.list_types());
    }

    #[test]
    fn test_batch_skips_existing() {
        let mut store = store_with(&["焊接机"]);
        let report = store
            .add_devices(Some("焊接机"), ["33号焊接机", "34号焊接机"])
            .unwrap();
        assert_eq!(report.added_count(), 2);

        let report = store
            .add_devices(Some("焊接机"), ["33号焊接机", "35号焊接机"])
            .unwrap();
        assert_eq!(report.added, vec!["35号焊接机"]);
        assert_eq!(report.skipped, vec!["33号焊接机"]);
    }

    #[test]
    fn test_batch_all_duplicate() {
        let mut store = store_with(&["焊接机", "冲压机"]);
        let before = store.snapshot();
        let err = store.add_types(["焊接机", "冲压机"]).unwrap_err();
        assert_eq!(err, CatalogError::AllDuplicate(Level::Type));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_batch_empty() {
        let mut store = store_with(&["焊接机"]);
        let err = store.add_devices(Some("焊接机"), Vec::<String>::new()).unwrap_err();
        assert_eq!(err, CatalogError::NothingSelected(Level::Device));
    }

    #[test]
    fn test_batch_rejects_invalid_names_individually() {
        let mut store = CatalogStore::new().with_policy(NewTypePolicy::Manual);
        let long = "长".repeat(21);
        let report = store.add_types(["吸塑机", "  ", long.as_str()]).unwrap();
        assert_eq!(report.added, vec!["吸塑机"]);
        assert_eq!(report.rejected.len(), 2);
        assert_eq!(report.rejected[0].kind, ErrorKind::Empty);
        assert_eq!(report.rejected[1].kind, ErrorKind::TooLong);

        let err = store.add_types(["", "吸塑机"]).unwrap_err();
        assert_eq!(err, CatalogError::Empty(Level::Type));
    }

    #[test]
    fn test_batch_types_select_last_added() {
        let mut store = CatalogStore::new();
        store.add_types(["吸塑机", "注塑机"]).unwrap();
        assert_eq!(store.selected_type(), Some("注塑机"));
    }

    #[test]
    fn test_batch_dedupes_within_submission() {
        let mut store = store_with(&["吸塑机"]);
        store.add_device(Some("吸塑机"), "25号吸塑机").unwrap();
        let report = store
            .add_stations(Some("吸塑机"), Some("25号吸塑机"), ["加热工位", " 加热工位"])
            .unwrap();
        assert_eq!(report.added, vec!["加热工位"]);
        assert_eq!(store.list_stations("吸塑机", "25号吸塑机"), vec!["加热工位"]);
    }

    #[test]
    fn test_from_snapshot_rejects_dangling_pointers() {
        let mut snapshot = CatalogSnapshot::with_types(["吸塑机"]);
        snapshot.selected_type = Some("注塑机".to_string());
        assert_eq!(
            CatalogStore::from_snapshot(snapshot).unwrap_err().kind(),
            crate::ErrorKind::InvalidSnapshot
        );

        let mut snapshot = CatalogSnapshot::with_types(["吸塑机"]);
        snapshot.selected_device = Some("25号吸塑机".to_string());
        assert!(CatalogStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_from_snapshot_rejects_repeated_station() {
        let mut snapshot = CatalogSnapshot::with_types(["吸塑机"]);
        snapshot.types["吸塑机"].insert(
            "25号吸塑机".to_string(),
            vec!["成型工位".to_string(), "成型工位".to_string()],
        );
        assert!(CatalogStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_from_snapshot_rejects_names_an_add_would_refuse() {
        let blank: CatalogSnapshot =
            serde_json::from_str(r#"{"types":{"   ":{"":[""]}},"selected_type":"   ","selected_device":""}"#)
                .unwrap();
        assert!(CatalogStore::from_snapshot(blank).is_err());

        let err = CatalogStore::from_snapshot(CatalogSnapshot::with_types([" 焊接机 "])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSnapshot);

        let long = "长".repeat(21);
        assert!(CatalogStore::from_snapshot(CatalogSnapshot::with_types([long.as_str()])).is_err());

        let mut snapshot = CatalogSnapshot::with_types(["焊接机"]);
        snapshot.types["焊接机"].insert("33号焊接机".to_string(), vec![" 伺服电机".to_string()]);
        assert!(CatalogStore::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_with_snapshot_checks_configured_limit() {
        let snapshot = CatalogSnapshot::with_types(["三号冲压机"]);
        let err = CatalogStore::new()
            .with_max_name_len(4)
            .with_snapshot(snapshot.clone())
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSnapshot(_)));

        let store = CatalogStore::new().with_max_name_len(5).with_snapshot(snapshot).unwrap();
        assert_eq!(store.list_types(), vec!["三号冲压机"]);
    }

    #[test]
    fn test_end_to_end_cascade() {
        let mut store = CatalogStore::new();
        store.add_type("焊接机").unwrap();
        store.add_device(Some("焊接机"), "33号焊接机").unwrap();
        store
            .add_station(Some("焊接机"), Some("33号焊接机"), "伺服电机")
            .unwrap();
        store.delete_device("焊接机", "33号焊接机").unwrap();

        assert!(store.list_devices("焊接机").is_empty());
        assert_eq!(store.selected_device(), None);
        assert_eq!(store.selected_type(), Some("焊接机"));
        store.verify().unwrap();
    }
}
