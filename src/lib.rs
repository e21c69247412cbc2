//! Screen-Splitter: grid layout engine for compositing canvases
//!
//! Splits a canvas into a rows×cols grid of sub-screens and keeps an
//! external compositing host in sync as settings change.
//!
//! - `domain`: pure geometry (rectangles, grid layout, screen registry)
//! - `config`: settings store and TOML configuration
//! - `app`: change controller state machine
//! - `platform`: render commands and the host seam
//! - `input`: text event stream parsing

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod platform;
pub mod telemetry;

pub use app::{ChangeController, ControllerError, ControllerEvent, ControllerState, Dispatch};
pub use config::{AppConfig, SettingKey};
pub use domain::core::{Canvas, Rect};
pub use domain::grid::{Margins, compute_layout};
pub use platform::{RenderCommand, Renderer};
