//! Inbound UI events
//!
//! Parses the text event stream read by the headless front end.

pub mod events;

pub use events::{EventParseError, parse_line};
