//! On-disk snapshots of style sizes
//!
//! Two JSON documents live side by side in the snapshot directory:
//! - `defaults.<tag>.json`: factory baseline captured on first run
//! - `current.<tag>.json`: overrides only, diffed against the baseline
//!
//! Both share the shape `{"version": 1, "entries": [{"name": "...", "size": 11}]}`.
//! Reading never fails from the caller's point of view: a missing or broken
//! file reads as an empty mapping. Writing is best-effort.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::snapshot::{CURRENT_STEM, DEFAULTS_STEM, VERSION};
use crate::error::{Result, TunerError};

/// Style name → font size
pub type SizeMap = BTreeMap<String, i32>;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotEntry {
    name: String,
    size: i32,
}

fn default_version() -> u32 {
    VERSION
}

impl From<&SizeMap> for SnapshotFile {
    fn from(sizes: &SizeMap) -> Self {
        Self {
            version: VERSION,
            entries: sizes
                .iter()
                .map(|(name, &size)| SnapshotEntry { name: name.clone(), size })
                .collect(),
        }
    }
}

impl SnapshotFile {
    fn into_sizes(self) -> SizeMap {
        self.entries
            .into_iter()
            .filter(|entry| !entry.name.is_empty())
            .map(|entry| (entry.name, entry.size))
            .collect()
    }
}

/// Read a snapshot, surfacing every failure
pub fn try_load(path: &Path) -> Result<SizeMap> {
    let contents = fs::read_to_string(path).map_err(|e| TunerError::io(path, e))?;
    let file: SnapshotFile =
        serde_json::from_str(&contents).map_err(|e| TunerError::json(path, e))?;
    if file.version != VERSION {
        debug!(path = %path.display(), version = file.version, "Reading snapshot with unexpected version");
    }
    Ok(file.into_sizes())
}

/// Read a snapshot; absent, unreadable or malformed files read as empty
pub fn load(path: &Path) -> SizeMap {
    match try_load(path) {
        Ok(sizes) => sizes,
        Err(TunerError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No snapshot on disk");
            SizeMap::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable snapshot");
            SizeMap::new()
        }
    }
}

/// Write a snapshot, creating parent directories, surfacing every failure
pub fn try_save(sizes: &SizeMap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TunerError::io(parent, e))?;
    }
    let contents = serde_json::to_string_pretty(&SnapshotFile::from(sizes))
        .map_err(|e| TunerError::json(path, e))?;
    fs::write(path, contents).map_err(|e| TunerError::io(path, e))?;
    Ok(())
}

/// Best-effort write. Returns whether the file was written.
pub fn save(sizes: &SizeMap, path: &Path) -> bool {
    match try_save(sizes, path) {
        Ok(()) => {
            info!(path = %path.display(), entries = sizes.len(), "Saved snapshot");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to save snapshot");
            false
        }
    }
}

/// Entries of `current` whose name is missing from `defaults` or whose size differs
pub fn compute_overrides(current: &SizeMap, defaults: &SizeMap) -> SizeMap {
    current
        .iter()
        .filter(|&(name, size)| defaults.get(name) != Some(size))
        .map(|(name, &size)| (name.clone(), size))
        .collect()
}

/// Locations of the two snapshot files for one host
#[derive(Debug, Clone)]
pub struct SnapshotPaths {
    dir: PathBuf,
    tag: String,
}

impl SnapshotPaths {
    pub fn new(dir: impl Into<PathBuf>, tag: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            tag: tag.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn defaults(&self) -> PathBuf {
        self.dir.join(format!("{DEFAULTS_STEM}.{}.json", self.tag))
    }

    pub fn current(&self) -> PathBuf {
        self.dir.join(format!("{CURRENT_STEM}.{}.json", self.tag))
    }
}
