use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ErrorKind;

/// Devices of one type, in insertion order, each with its ordered stations
pub type DeviceMap = IndexMap<String, Vec<String>>;

/// Types of the catalog, in insertion order
pub type TypeMap = IndexMap<String, DeviceMap>;

/// One level of the cascade, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Device type (e.g. 焊接机)
    Type,
    /// Concrete device of a type (e.g. 33号焊接机)
    Device,
    /// Station of a device (e.g. 伺服电机)
    Station,
}

impl Level {
    /// All levels, outermost first
    pub const ALL: [Self; 3] = [Self::Type, Self::Device, Self::Station];

    /// Lowercase name used in messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Device => "device",
            Self::Station => "station",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to the selection when a new type is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewTypePolicy {
    /// Select the new type and clear the device pointer
    #[default]
    AutoSelect,
    /// Leave the selection unchanged
    Manual,
}

/// A name refused inside a batch add
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Raw name as submitted
    pub name: String,
    /// Why it was refused
    pub kind: ErrorKind,
}

/// Outcome of a successful batch add
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// Names inserted, in submission order
    pub added: Vec<String>,
    /// Names already present and silently skipped
    pub skipped: Vec<String>,
    /// Names refused by validation
    pub rejected: Vec<Rejection>,
}

impl BatchReport {
    /// Number of inserted names
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

/// Serializable state of a catalog store
///
/// Used both to inject initial state and to hand a read-only copy to a
/// renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Types → devices → stations
    #[serde(default)]
    pub types: TypeMap,
    /// Currently selected type
    #[serde(default)]
    pub selected_type: Option<String>,
    /// Currently selected device of the selected type
    #[serde(default)]
    pub selected_device: Option<String>,
}

impl CatalogSnapshot {
    /// Snapshot with the given empty types and no selection
    #[must_use]
    pub fn with_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: names
                .into_iter()
                .map(|name| (name.into(), DeviceMap::new()))
                .collect(),
            selected_type: None,
            selected_device: None,
        }
    }
}
