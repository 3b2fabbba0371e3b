//! Configuration management for font-tuner
//!
//! - **settings**: AppConfig loaded from `config.json` (logging, debounce,
//!   snapshot directory, window size, custom styles)
//!
//! Per-style sizes are not configuration; they live in the snapshot files
//! (see `crate::snapshot`) and the global delta in the preference store.

pub mod settings;

// Re-export commonly used types
pub use settings::{AppConfig, CustomStyle};
