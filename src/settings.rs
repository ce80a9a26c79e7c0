//! Persistence of the class registry as a settings blob.
//!
//! The persisted shape is a single JSON object mapping class id to
//! `{name, color}`, the same blob the original tool kept under one
//! well-known storage key. Absence of the blob on first run triggers
//! seeding with the default classes and an immediate write-back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ClassDefinition, ClassId};
use crate::registry::ClassRegistry;

/// Persisted form of one class: everything but the id, which is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Display name of the class.
    pub name: String,
    /// Hex RGB color.
    pub color: String,
}

/// The full persisted settings blob: class id -> entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsBlob(pub BTreeMap<ClassId, ClassEntry>);

impl SettingsBlob {
    /// Rebuild a registry from the blob. An empty blob seeds the defaults.
    pub fn to_registry(&self) -> ClassRegistry {
        let classes = self
            .0
            .iter()
            .map(|(id, entry)| ClassDefinition::new(id.clone(), &entry.name, &entry.color))
            .collect();
        ClassRegistry::from_classes(classes)
    }
}

impl From<&ClassRegistry> for SettingsBlob {
    fn from(registry: &ClassRegistry) -> Self {
        Self(
            registry
                .classes()
                .iter()
                .map(|c| {
                    (
                        c.id.clone(),
                        ClassEntry {
                            name: c.name.clone(),
                            color: c.color.clone(),
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Errors from reading or writing the settings blob.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error touching the settings file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob failed to parse or serialize.
    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    /// No config directory could be determined for this user.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Boundary trait for settings persistence.
///
/// `load` returns `Ok(None)` when nothing has been persisted yet; the app
/// treats that as first run, seeds defaults, and writes back immediately.
pub trait SettingsStore {
    /// Read the persisted blob, if any.
    fn load(&self) -> Result<Option<SettingsBlob>, SettingsError>;

    /// Persist the blob, replacing any previous contents.
    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError>;
}

/// Settings persisted as a JSON file under the user config directory.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    /// Default filename of the settings blob.
    pub fn default_filename() -> &'static str {
        "annotation-settings.json"
    }

    /// Default settings path: XDG config directory, falling back to the
    /// home directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("bbat").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("bbat")
                    .join(Self::default_filename())
            })
        }
    }

    /// Create a store backed by a specific file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the default path.
    pub fn at_default_path() -> Result<Self, SettingsError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettings {
    fn load(&self) -> Result<Option<SettingsBlob>, SettingsError> {
        if !self.path.exists() {
            log::debug!("No settings file found at {:?}", self.path);
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let blob = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {:?}", self.path);
        Ok(Some(blob))
    }

    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(blob)?;
        std::fs::write(&self.path, json)?;
        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

/// In-memory settings store for tests and hosts without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    blob: Option<SettingsBlob>,
}

impl MemorySettings {
    /// Create an empty store, i.e. a first-run state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn load(&self) -> Result<Option<SettingsBlob>, SettingsError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &SettingsBlob) -> Result<(), SettingsError> {
        self.blob = Some(blob.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip_through_blob() {
        let mut registry = ClassRegistry::new();
        registry.add("Signature", "#123456").unwrap();

        let blob = SettingsBlob::from(&registry);
        let reloaded = blob.to_registry();

        let class = reloaded.get("3").unwrap();
        assert_eq!(class.name, "Signature");
        assert_eq!(class.color, "#123456");
        assert_eq!(reloaded.classes(), registry.classes());
    }

    #[test]
    fn test_empty_blob_seeds_defaults() {
        let registry = SettingsBlob::default().to_registry();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_memory_store_first_run() {
        let mut store = MemorySettings::new();
        assert!(store.load().unwrap().is_none());

        let blob = SettingsBlob::from(&ClassRegistry::new());
        store.save(&blob).unwrap();
        assert_eq!(store.load().unwrap(), Some(blob));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSettings::new(dir.path().join("nested").join("settings.json"));

        assert!(store.load().unwrap().is_none());

        let mut registry = ClassRegistry::new();
        registry.rename("0", "Full Name").unwrap();
        let blob = SettingsBlob::from(&registry);
        store.save(&blob).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, blob);
        assert_eq!(loaded.to_registry().get("0").unwrap().name, "Full Name");
    }

    #[test]
    fn test_corrupt_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSettings::new(&path);
        assert!(matches!(store.load(), Err(SettingsError::Json(_))));
    }

    #[test]
    fn test_blob_json_shape() {
        let registry = ClassRegistry::new();
        let json = serde_json::to_value(SettingsBlob::from(&registry)).unwrap();
        assert_eq!(json["0"]["name"], "Name");
        assert_eq!(json["2"]["color"], "#0000FF");
    }
}
