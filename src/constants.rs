//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Font size bounds applied whenever a size is written to a live style
pub mod font {
    /// Smallest size any style may be set to
    pub const MIN_SIZE: i32 = 8;

    /// Largest size any style may be set to
    pub const MAX_SIZE: i32 = 24;

    /// Size assumed for styles reporting a non-positive size
    pub const FALLBACK_SIZE: i32 = 11;
}

/// Global zoom (uniform delta) constants
pub mod zoom {
    /// Lower bound of the global zoom slider
    pub const MIN_DELTA: i32 = -6;

    /// Upper bound of the global zoom slider
    pub const MAX_DELTA: i32 = 10;

    /// Preference key holding the persisted global delta
    pub const PREF_KEY: &str = "font_tuner.global_delta";
}

/// Snapshot file constants
pub mod snapshot {
    /// Document version written to every snapshot file
    pub const VERSION: u32 = 1;

    /// File stem of the baseline snapshot
    pub const DEFAULTS_STEM: &str = "defaults";

    /// File stem of the overrides-only snapshot
    pub const CURRENT_STEM: &str = "current";

    /// Subdirectory of the config directory holding snapshots
    pub const DIR: &str = "snapshots";
}

/// Config file locations
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "font-tuner";

    /// Application config file name
    pub const FILENAME: &str = "config.json";

    /// Preference store file name
    pub const PREFS_FILENAME: &str = "prefs.json";
}

/// Validation bounds for config values
pub mod validation {
    /// Longest allowed debounce before a dirty snapshot is written
    pub const MAX_SAVE_DELAY_MS: u64 = 10_000;

    /// Smallest window dimension accepted from config
    pub const MIN_WINDOW_DIMENSION: u16 = 200;

    /// Largest window dimension accepted from config
    pub const MAX_WINDOW_DIMENSION: u16 = 4096;
}
