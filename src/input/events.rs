//! Text event stream parsing
//!
//! The headless front end receives one UI event per line:
//!
//! ```text
//! set gutter 12
//! link
//! flip-h
//! pre-delete
//! delete
//! ```
//!
//! Values after `set <key>` are passed through verbatim; numeric coercion
//! belongs to the controller.

use crate::app::state::ControllerEvent;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
    #[error("'set' needs a setting name")]
    MissingKey,
    #[error("'{0}' takes no arguments")]
    UnexpectedArguments(String),
}

/// Parses one input line
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ControllerEvent>, EventParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    if verb == "set" {
        let (key, value) = match rest.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (rest, ""),
        };
        if key.is_empty() {
            return Err(EventParseError::MissingKey);
        }
        return Ok(Some(ControllerEvent::setting(key, value)));
    }

    let event = match verb {
        "link" => ControllerEvent::LinkMargins,
        "unlink" => ControllerEvent::UnlinkMargins,
        "flip-h" => ControllerEvent::FlipHorizontal,
        "flip-v" => ControllerEvent::FlipVertical,
        "pre-delete" => ControllerEvent::PreDeleteAll,
        "delete" => ControllerEvent::DeleteAll,
        "cancel-delete" => ControllerEvent::CancelDeleteAll,
        "refresh" => ControllerEvent::Refresh,
        other => return Err(EventParseError::UnknownEvent(other.to_string())),
    };

    if !rest.is_empty() {
        return Err(EventParseError::UnexpectedArguments(verb.to_string()));
    }
    Ok(Some(event))
}
