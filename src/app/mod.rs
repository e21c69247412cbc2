//! Application orchestration layer
//!
//! This module turns UI events into settings writes, layout passes and
//! render commands.

pub mod controller;
pub mod state;

pub use controller::{ChangeController, ControllerError, Dispatch, MARGIN_KEY, SettingView};
pub use state::{ControllerEvent, ControllerState, LinkMode, StateMachine};
