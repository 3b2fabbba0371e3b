//! Application settings read from `config.json`
//!
//! Missing keys take their defaults; out-of-range values are clamped with a
//! warning. A config that cannot be parsed is ignored (defaults are used) so a
//! typo never keeps the tool from starting.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::font::{MAX_SIZE, MIN_SIZE};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Debounce between an edit and the snapshot write, in milliseconds
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,

    /// Snapshot directory; defaults to `<config dir>/font-tuner/snapshots`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings_dir: Option<PathBuf>,

    #[serde(default = "default_window_width")]
    pub window_width: u16,
    #[serde(default = "default_window_height")]
    pub window_height: u16,

    /// Extra named styles registered on the skin at startup
    #[serde(default = "default_custom_styles")]
    pub custom_styles: Vec<CustomStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStyle {
    pub name: String,
    pub size: i32,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_save_delay_ms() -> u64 {
    300
}

fn default_window_width() -> u16 {
    480
}

fn default_window_height() -> u16 {
    640
}

fn default_custom_styles() -> Vec<CustomStyle> {
    vec![
        CustomStyle { name: "Caption".to_string(), size: 10 },
        CustomStyle { name: "Tooltip".to_string(), size: 11 },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            save_delay_ms: default_save_delay_ms(),
            settings_dir: None,
            window_width: default_window_width(),
            window_height: default_window_height(),
            custom_styles: default_custom_styles(),
        }
    }
}

impl AppConfig {
    pub fn path() -> PathBuf {
        let mut path = config_dir();
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location, writing a default file on first run
    pub fn load() -> Self {
        let path = Self::path();
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, creating default config");
            let config = Self::default();
            if let Err(e) = config.save_to(&path) {
                warn!(error = ?e, "Failed to write default config");
            }
            return config;
        }
        Self::load_from(&path)
    }

    /// Load from `path`; unreadable or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                Self::default()
            }
        };
        config.validate_and_clamp();
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Validate and clamp config values to safe ranges
    fn validate_and_clamp(&mut self) {
        use crate::constants::validation::*;

        if self.save_delay_ms > MAX_SAVE_DELAY_MS {
            warn!(save_delay_ms = self.save_delay_ms, max = MAX_SAVE_DELAY_MS, "save_delay_ms exceeds maximum, clamping");
            self.save_delay_ms = MAX_SAVE_DELAY_MS;
        }

        let width = self.window_width.clamp(MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION);
        if width != self.window_width {
            warn!(window_width = self.window_width, using = width, "window_width out of range, clamping");
            self.window_width = width;
        }
        let height = self.window_height.clamp(MIN_WINDOW_DIMENSION, MAX_WINDOW_DIMENSION);
        if height != self.window_height {
            warn!(window_height = self.window_height, using = height, "window_height out of range, clamping");
            self.window_height = height;
        }

        self.custom_styles.retain(|style| {
            let keep = !style.name.trim().is_empty();
            if !keep {
                warn!("Dropping custom style with empty name");
            }
            keep
        });
        for style in &mut self.custom_styles {
            let size = style.size.clamp(MIN_SIZE, MAX_SIZE);
            if size != style.size {
                warn!(style = %style.name, size = style.size, using = size, "custom style size out of range, clamping");
                style.size = size;
            }
        }
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    /// Snapshot directory: command line beats config beats the default
    pub fn snapshot_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.settings_dir.clone())
            .unwrap_or_else(default_snapshot_dir)
    }
}

/// `<platform config dir>/font-tuner`
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(crate::constants::config::APP_DIR);
    path
}

pub fn default_snapshot_dir() -> PathBuf {
    config_dir().join(crate::constants::snapshot::DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.save_delay_ms, 300);
        assert_eq!(config.custom_styles, default_custom_styles());
    }

    #[test]
    fn test_malformed_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ log_level: ").unwrap();

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
        // The broken file is left for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ log_level: ");
    }

    #[test]
    fn test_validate_and_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "save_delay_ms": 999999,
                "window_width": 10,
                "window_height": 9000,
                "custom_styles": [
                    {"name": "  ", "size": 12},
                    {"name": "Huge", "size": 80},
                    {"name": "Tiny", "size": 1}
                ]
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.save_delay_ms, crate::constants::validation::MAX_SAVE_DELAY_MS);
        assert_eq!(config.window_width, crate::constants::validation::MIN_WINDOW_DIMENSION);
        assert_eq!(config.window_height, crate::constants::validation::MAX_WINDOW_DIMENSION);
        assert_eq!(
            config.custom_styles,
            vec![
                CustomStyle { name: "Huge".to_string(), size: MAX_SIZE },
                CustomStyle { name: "Tiny".to_string(), size: MIN_SIZE },
            ]
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let config = AppConfig {
            settings_dir: Some(PathBuf::from("/srv/fonts")),
            save_delay_ms: 0,
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), config);
    }

    #[test]
    fn test_snapshot_dir_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(config.snapshot_dir(None), default_snapshot_dir());

        config.settings_dir = Some(PathBuf::from("/from/config"));
        assert_eq!(config.snapshot_dir(None), PathBuf::from("/from/config"));
        assert_eq!(
            config.snapshot_dir(Some(Path::new("/from/cli"))),
            PathBuf::from("/from/cli")
        );
    }
}
