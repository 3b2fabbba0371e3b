//! Error types shared by the snapshot store, preference store and registry

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = TunerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TunerError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference '{key}' holds a non-integer value")]
    Prefs { key: String },
}

impl TunerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}

/// Failure to resolve a single entry of a style source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The slot points at a style that no longer exists
    #[error("style behind '{property}' was disposed")]
    Disposed { property: String },

    /// The property exists but does not hold a style
    #[error("property '{property}' holds {found}, not a style")]
    WrongType { property: String, found: String },
}
