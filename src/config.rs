//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! watch-config.toml file: display geometry, device capabilities, and the
//! state-file location.
//!
//! Two flags replace host decisions the original firmware made elsewhere:
//! `supports_color` (a compile-time guard on color hardware) and `use_24h`
//! (a system clock-style query). Both are resolved once at startup and
//! carried as plain booleans.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration loaded from watch-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Display and UI configuration
    pub display: DisplayConfig,
    /// Clock style preference
    pub clock: ClockConfig,
    /// Durable state location
    pub storage: StorageConfig,
}

/// Display and visualization configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: i32,
    /// Display height in pixels
    pub height: i32,
    /// Whether the display supports color row backgrounds
    pub supports_color: bool,
}

/// Clock style preference
#[derive(Debug, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Render clock times as 24-hour (true) or 12-hour (false)
    pub use_24h: bool,
}

/// Durable state configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Path of the JSON state file holding the four timestamp slots
    pub state_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: DisplayConfig {
                width: 144,  // classic watch face
                height: 168, // classic watch face
                supports_color: true,
            },
            clock: ClockConfig { use_24h: true },
            storage: StorageConfig {
                state_path: "baby-tracker-state.json".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from watch-config.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("watch-config.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration");
                Self::default()
            }
        }
    }

    /// Save current configuration to watch-config.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("watch-config.toml", contents)?;
        Ok(())
    }
}
