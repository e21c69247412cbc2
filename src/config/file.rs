//! TOML configuration for a splitting session
//!
//! Supplies the fixed canvas, the initial defaults table and the setting
//! limits. Every field is optional; missing tables fall back to defaults.

use crate::config::settings::{InvalidSettingError, SettingLimits, Settings, SettingsStore};
use crate::domain::core::Canvas;
use crate::domain::grid::Margins;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid default: {0}")]
    InvalidDefault(#[from] InvalidSettingError),
}

/// Top-level session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub defaults: DefaultsConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Initial value of every setting at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub rows: u32,
    pub cols: u32,
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
    pub gutter: u32,
    /// Start with margins linked to `top`
    pub link_margins: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            top: 0,
            left: 0,
            bottom: 0,
            right: 0,
            gutter: 0,
            link_margins: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_divisions: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_divisions: SettingLimits::DEFAULT_MAX_DIVISIONS,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas.width, self.canvas.height)
    }

    pub fn limits(&self) -> SettingLimits {
        SettingLimits {
            max_divisions: self.limits.max_divisions,
        }
    }

    /// Defaults as a settings snapshot
    ///
    /// With `link_margins` set, the other margins take the value of `top`.
    pub fn initial_settings(&self) -> Settings {
        let d = &self.defaults;
        let margins = if d.link_margins {
            Margins::uniform(d.top)
        } else {
            Margins::new(d.top, d.left, d.bottom, d.right)
        };
        Settings {
            rows: d.rows,
            cols: d.cols,
            margins,
            gutter: d.gutter,
        }
    }

    /// Builds a validated settings store from the defaults table
    pub fn settings_store(&self) -> Result<SettingsStore, ConfigError> {
        Ok(SettingsStore::new(self.initial_settings(), self.limits())?)
    }
}
