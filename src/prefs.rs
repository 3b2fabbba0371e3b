//! Cross-session key/value preferences
//!
//! Holds the global font-size delta. Writes go straight to disk.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, TunerError};

pub trait PreferenceStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>>;

    fn set_int(&mut self, key: &str, value: i32) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Preferences stored as a flat JSON object in a single file
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
    /// Set when the file exists but could not be read; writes are refused
    /// so the keys it holds are not clobbered
    unreadable: Option<io::ErrorKind>,
}

impl JsonPreferenceStore {
    pub fn default_path() -> PathBuf {
        crate::config::settings::config_dir().join(crate::constants::config::PREFS_FILENAME)
    }

    /// Open the store at `path`. A missing file is an empty store; a corrupt
    /// one is logged and also treated as empty. A file that exists but cannot
    /// be read reads as empty and is never written.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut unreadable = None;
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt preference file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read preference file, changes will not be saved");
                unreadable = Some(e.kind());
                BTreeMap::new()
            }
        };
        Self { path, values, unreadable }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(kind) = self.unreadable {
            return Err(TunerError::io(
                &self.path,
                io::Error::new(kind, "preference file was unreadable when opened"),
            ));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| TunerError::io(parent, e))?;
        }
        let contents = serde_json::to_string_pretty(&self.values)
            .map_err(|e| TunerError::json(&self.path, e))?;
        fs::write(&self.path, contents).map_err(|e| TunerError::io(&self.path, e))
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| TunerError::Prefs { key: key.to_string() }),
        }
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        self.persist()?;
        info!(key = %key, value, "Stored preference");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
            info!(key = %key, "Removed preference");
        }
        Ok(())
    }
}

/// Preferences kept in memory only
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, i32>,
}

#[cfg(test)]
impl PreferenceStore for MemoryPreferenceStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>> {
        Ok(self.values.get(key).copied())
    }

    fn set_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_store_roundtrip_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub/prefs.json");

        let mut store = JsonPreferenceStore::open(&path);
        assert_eq!(store.get_int("delta").unwrap(), None);
        store.set_int("delta", -3).unwrap();

        let reopened = JsonPreferenceStore::open(&path);
        assert_eq!(reopened.get_int("delta").unwrap(), Some(-3));
    }

    #[test]
    fn test_json_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonPreferenceStore::open(&path);
        store.set_int("delta", 2).unwrap();
        store.set_int("other", 7).unwrap();
        store.remove("delta").unwrap();

        let reopened = JsonPreferenceStore::open(&path);
        assert_eq!(reopened.get_int("delta").unwrap(), None);
        assert_eq!(reopened.get_int("other").unwrap(), Some(7));
    }

    #[test]
    fn test_json_store_remove_absent_key_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonPreferenceStore::open(&path);
        store.remove("delta").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_json_store_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "[1, 2").unwrap();

        let store = JsonPreferenceStore::open(&path);
        assert_eq!(store.get_int("delta").unwrap(), None);
    }

    #[test]
    fn test_json_store_non_integer_value_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"delta": "three"}"#).unwrap();

        let store = JsonPreferenceStore::open(&path);
        assert!(matches!(store.get_int("delta"), Err(TunerError::Prefs { .. })));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPreferenceStore::default();
        store.set_int("delta", 4).unwrap();
        assert_eq!(store.get_int("delta").unwrap(), Some(4));
        store.remove("delta").unwrap();
        assert_eq!(store.get_int("delta").unwrap(), None);
    }

    #[test]
    fn test_json_store_unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file: exists, but cannot be read as one
        let path = dir.path().join("prefs.json");
        fs::create_dir(&path).unwrap();

        let mut store = JsonPreferenceStore::open(&path);
        assert_eq!(store.get_int("delta").unwrap(), None);
        assert!(matches!(store.set_int("delta", 2), Err(TunerError::Io { .. })));
        assert!(path.is_dir());
    }
}
