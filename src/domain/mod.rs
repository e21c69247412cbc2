//! Domain logic and core data structures
//!
//! This module contains pure layout logic that is independent of the
//! compositing host and of how settings reach the application.

pub mod core;
pub mod grid;
pub mod screen;
