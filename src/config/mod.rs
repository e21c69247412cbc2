//! Configuration module for screen-splitter
//!
//! Holds the settings store that the change controller mutates, and the
//! TOML file that seeds it at startup.

pub mod file;
pub mod settings;

pub use file::{AppConfig, ConfigError};
pub use settings::{InvalidSettingError, SettingKey, SettingLimits, Settings, SettingsStore};
