//! Configuration module for nameplate
//!
//! Manages editor configuration: which control gathers names for each
//! cascade level, the new-type selection policy, name and chip limits, the
//! seed catalog and option pools, and record table page sizes.
//! Configuration is stored in the user's config directory
//! (`~/.config/nameplate/config.toml` on Linux) or passed explicitly.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Level, NewTypePolicy};
use crate::names::{DEFAULT_MAX_NAME_LEN, validate_name};
use crate::select::{DEFAULT_MAX_CHIPS, GatherMode};

/// Initial catalog content
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SeedConfig {
    /// Type names present when the editor starts
    pub types: Vec<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            types: strings(&["吸塑机", "注塑机", "冲压机", "焊接机", "装配线"]),
        }
    }
}

/// Initial option pools of the three multi-select controls
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
    pub types: Vec<String>,
    pub devices: Vec<String>,
    pub stations: Vec<String>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            types: strings(&["吸塑机", "注塑机", "冲压机", "焊接机", "装配线"]),
            devices: strings(&[
                "25号吸塑机",
                "26号吸塑机",
                "30号注塑机",
                "31号注塑机",
                "32号冲压机",
                "33号焊接机",
                "34号装配线",
            ]),
            stations: strings(&["成型工位", "剪边工位", "上料工位", "加热工位", "伺服电机"]),
        }
    }
}

/// Trigger texts shown while nothing is gathered
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PlaceholderConfig {
    #[serde(rename = "type")]
    pub type_name: String,
    pub device: String,
    pub station: String,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            type_name: "请选择设备类型".to_string(),
            device: "请选择设备".to_string(),
            station: "请选择工位".to_string(),
        }
    }
}

/// Layout of one record table
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Rows per page
    pub page_size: usize,
    /// Whether the name column can be sorted
    #[serde(default)]
    pub sortable: bool,
}

/// Layouts of the record tables
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TablesConfig {
    pub tags: TableConfig,
    pub doc_types: TableConfig,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            tags: TableConfig {
                page_size: 5,
                sortable: true,
            },
            doc_types: TableConfig {
                page_size: 6,
                sortable: false,
            },
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// How cascade levels gather names (multi-select pool or text field)
    pub gather_mode: GatherMode,

    /// Whether a newly created type becomes the selected type
    pub new_type_policy: NewTypePolicy,

    /// Maximum length of any name, in characters
    pub max_name_len: usize,

    /// Maximum number of chips per record
    pub max_chips: usize,

    /// Removing a pool option also deletes the catalog node of that name at
    /// the current scope
    pub relay_option_removal: bool,

    pub seed: SeedConfig,
    pub pools: PoolConfig,
    pub placeholders: PlaceholderConfig,
    pub tables: TablesConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gather_mode: GatherMode::default(),
            new_type_policy: NewTypePolicy::default(),
            max_name_len: DEFAULT_MAX_NAME_LEN,
            max_chips: DEFAULT_MAX_CHIPS,
            relay_option_removal: true,
            seed: SeedConfig::default(),
            pools: PoolConfig::default(),
            placeholders: PlaceholderConfig::default(),
            tables: TablesConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("nameplate").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed or fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, malformed, or fails
    /// validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be
    /// written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        fs::write(path, self.to_toml()?)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Reject limits that would make every operation fail
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("max_name_len", self.max_name_len),
            ("max_chips", self.max_chips),
            ("tables.tags.page_size", self.tables.tags.page_size),
            ("tables.doc_types.page_size", self.tables.doc_types.page_size),
        ];
        for (key, value) in checks {
            if value == 0 {
                return Err(ConfigError::Message(format!("{key} must be greater than zero")));
            }
        }
        for name in &self.seed.types {
            if validate_name(name, self.max_name_len).as_deref() != Ok(name.as_str()) {
                return Err(ConfigError::Message(format!(
                    "seed.types: '{name}' must be trimmed, non-empty and at most {} characters",
                    self.max_name_len
                )));
            }
        }
        Ok(())
    }

    /// Initial option pool of a level
    #[must_use]
    pub fn pool(&self, level: Level) -> &[String] {
        match level {
            Level::Type => &self.pools.types,
            Level::Device => &self.pools.devices,
            Level::Station => &self.pools.stations,
        }
    }

    /// Placeholder text of a level's control
    #[must_use]
    pub fn placeholder(&self, level: Level) -> &str {
        match level {
            Level::Type => &self.placeholders.type_name,
            Level::Device => &self.placeholders.device,
            Level::Station => &self.placeholders.station,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
