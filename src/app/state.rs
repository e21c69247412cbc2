//! Controller state management
//!
//! Defines the change controller's state machine. Transitions are pure:
//! side effects (store writes, layout passes, render commands) live in the
//! controller and are driven by the state returned here.

/// Whether the four margins are edited independently or as one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    #[default]
    Independent,
    Linked,
}

/// Main controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Margins are edited independently
    #[default]
    Idle,
    /// Left, bottom and right mirror top
    Linked,
    /// A delete-all gesture is pressed but not yet released
    ///
    /// Remembers the mode to return to once the gesture ends.
    Deleting { resume: LinkMode },
}

impl ControllerState {
    /// Stable state for a link mode
    pub fn from_mode(mode: LinkMode) -> Self {
        match mode {
            LinkMode::Independent => ControllerState::Idle,
            LinkMode::Linked => ControllerState::Linked,
        }
    }

    /// Link mode in effect, looking through a pending delete
    pub fn link_mode(&self) -> LinkMode {
        match self {
            ControllerState::Idle => LinkMode::Independent,
            ControllerState::Linked => LinkMode::Linked,
            ControllerState::Deleting { resume } => *resume,
        }
    }

    pub fn margins_linked(&self) -> bool {
        self.link_mode() == LinkMode::Linked
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, ControllerState::Deleting { .. })
    }

    /// State left behind if a pending delete is abandoned
    pub fn settled(&self) -> Self {
        Self::from_mode(self.link_mode())
    }
}

/// Events delivered by the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A setting entry was committed with free-form text
    SettingChanged { key: String, value: String },
    LinkMargins,
    UnlinkMargins,
    FlipHorizontal,
    FlipVertical,
    /// Delete-all pressed (preview)
    PreDeleteAll,
    /// Delete-all released (commit)
    DeleteAll,
    /// Delete-all gesture abandoned before release
    CancelDeleteAll,
    /// Re-run layout and re-send every screen
    Refresh,
}

impl ControllerEvent {
    pub fn setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        ControllerEvent::SettingChanged {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// State machine for controller state transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new state
    ///
    /// While deleting, any event other than a release or cancel first
    /// abandons the gesture and is then processed from the settled state.
    pub fn process_event(current_state: ControllerState, event: &ControllerEvent) -> ControllerState {
        match (current_state, event) {
            (ControllerState::Idle, ControllerEvent::LinkMargins) => ControllerState::Linked,
            (ControllerState::Linked, ControllerEvent::UnlinkMargins) => ControllerState::Idle,

            (ControllerState::Idle | ControllerState::Linked, ControllerEvent::PreDeleteAll) => {
                ControllerState::Deleting {
                    resume: current_state.link_mode(),
                }
            }

            (
                ControllerState::Deleting { resume },
                ControllerEvent::DeleteAll | ControllerEvent::CancelDeleteAll,
            ) => ControllerState::from_mode(resume),

            (ControllerState::Deleting { resume }, other) => {
                Self::process_event(ControllerState::from_mode(resume), other)
            }

            // Everything else leaves the state alone
            (state, _) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        let state = ControllerState::default();
        assert!(matches!(state, ControllerState::Idle));
        assert!(!state.margins_linked());
    }

    #[test]
    fn link_and_unlink_toggle_mode() {
        let state = StateMachine::process_event(ControllerState::Idle, &ControllerEvent::LinkMargins);
        assert_eq!(state, ControllerState::Linked);

        let state = StateMachine::process_event(state, &ControllerEvent::UnlinkMargins);
        assert_eq!(state, ControllerState::Idle);
    }

    #[test]
    fn redundant_link_events_are_ignored() {
        let state = StateMachine::process_event(ControllerState::Linked, &ControllerEvent::LinkMargins);
        assert_eq!(state, ControllerState::Linked);

        let state = StateMachine::process_event(ControllerState::Idle, &ControllerEvent::UnlinkMargins);
        assert_eq!(state, ControllerState::Idle);
    }

    #[test]
    fn press_enters_deleting_and_remembers_mode() {
        let state = StateMachine::process_event(ControllerState::Linked, &ControllerEvent::PreDeleteAll);
        assert_eq!(
            state,
            ControllerState::Deleting {
                resume: LinkMode::Linked
            }
        );
        assert!(state.is_transient());
        assert!(state.margins_linked());
    }

    #[test]
    fn release_and_cancel_return_to_resumed_mode() {
        let deleting = ControllerState::Deleting {
            resume: LinkMode::Independent,
        };
        assert_eq!(
            StateMachine::process_event(deleting, &ControllerEvent::DeleteAll),
            ControllerState::Idle
        );
        assert_eq!(
            StateMachine::process_event(deleting, &ControllerEvent::CancelDeleteAll),
            ControllerState::Idle
        );
    }

    #[test]
    fn other_events_abandon_pending_delete() {
        let deleting = ControllerState::Deleting {
            resume: LinkMode::Independent,
        };
        let state = StateMachine::process_event(deleting, &ControllerEvent::LinkMargins);
        assert_eq!(state, ControllerState::Linked);

        let state = StateMachine::process_event(deleting, &ControllerEvent::setting("rows", "2"));
        assert_eq!(state, ControllerState::Idle);
    }

    #[test]
    fn release_without_press_is_ignored() {
        assert_eq!(
            StateMachine::process_event(ControllerState::Linked, &ControllerEvent::DeleteAll),
            ControllerState::Linked
        );
    }

    #[test]
    fn settled_drops_pending_delete() {
        let deleting = ControllerState::Deleting {
            resume: LinkMode::Linked,
        };
        assert_eq!(deleting.settled(), ControllerState::Linked);
        assert_eq!(ControllerState::Idle.settled(), ControllerState::Idle);
    }
}
