//! Change controller and coordination layer
//!
//! The controller owns the settings store and the screen registry. It turns
//! each UI event into store writes, a layout pass, a registry reconcile and
//! the render commands that bring the host in line.

use crate::app::state::{ControllerEvent, ControllerState, StateMachine};
use crate::config::file::{AppConfig, ConfigError};
use crate::config::settings::{InvalidSettingError, SettingKey, SettingsStore, coerce_value};
use crate::domain::core::Canvas;
use crate::domain::grid::Grid;
use crate::domain::screen::{FlipAxis, Reconciliation, ScreenRegistry};
use crate::platform::renderer::{RenderCommand, Renderer, RendererApplyError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key the UI sends for the single linked margin value
pub const MARGIN_KEY: &str = "margin";

/// Application errors that can occur during controller operations
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] InvalidSettingError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A command the host failed to apply
#[derive(Debug)]
pub struct RenderFailure {
    pub command: RenderCommand,
    pub error: RendererApplyError,
}

/// Result of handling one event
#[derive(Debug)]
pub struct Dispatch {
    /// Controller state after the event
    pub state: ControllerState,
    /// Every command sent to the renderer, in order
    pub commands: Vec<RenderCommand>,
    /// Commands the renderer failed to apply
    pub failures: Vec<RenderFailure>,
}

impl Dispatch {
    /// Returns true if the renderer accepted every command
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// How a setting is presented to the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingView {
    pub key: SettingKey,
    pub label: &'static str,
    pub value: u32,
    /// False for entries that cannot be edited in the current mode
    pub enabled: bool,
}

#[derive(Debug, Default)]
struct Outbox {
    commands: Vec<RenderCommand>,
    failures: Vec<RenderFailure>,
}

impl Outbox {
    fn finish(self, state: ControllerState) -> Dispatch {
        Dispatch {
            state,
            commands: self.commands,
            failures: self.failures,
        }
    }
}

/// Main change controller
///
/// Single owner of all session state. Events are handled one at a time and
/// each runs to completion before the next.
pub struct ChangeController<R> {
    state: ControllerState,
    canvas: Canvas,
    settings: SettingsStore,
    registry: ScreenRegistry,
    renderer: R,
}

impl<R: Renderer> ChangeController<R> {
    /// Creates a controller with no screens placed yet
    ///
    /// Call [`ChangeController::refresh`] to run the first layout pass.
    pub fn new(canvas: Canvas, settings: SettingsStore, renderer: R) -> Self {
        Self {
            state: ControllerState::Idle,
            canvas,
            settings,
            registry: ScreenRegistry::new(),
            renderer,
        }
    }

    /// Creates a controller from a loaded configuration
    pub fn from_config(config: &AppConfig, renderer: R) -> Result<Self, ControllerError> {
        let settings = config.settings_store()?;
        let mut controller = Self::new(config.canvas(), settings, renderer);
        if config.defaults.link_margins {
            controller.settings.mirror_top();
            controller.state = ControllerState::Linked;
        }
        Ok(controller)
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Handles one UI event
    pub fn dispatch(&mut self, event: ControllerEvent) -> Result<Dispatch, ControllerError> {
        match event {
            ControllerEvent::SettingChanged { key, value } => self.on_change_setting(&key, &value),
            ControllerEvent::LinkMargins => Ok(self.on_link_margins()),
            ControllerEvent::UnlinkMargins => Ok(self.on_unlink_margins()),
            ControllerEvent::FlipHorizontal => Ok(self.on_flip_h()),
            ControllerEvent::FlipVertical => Ok(self.on_flip_v()),
            ControllerEvent::PreDeleteAll => Ok(self.on_pre_delete_all()),
            ControllerEvent::DeleteAll => Ok(self.on_delete_all()),
            ControllerEvent::CancelDeleteAll => Ok(self.on_cancel_delete_all()),
            ControllerEvent::Refresh => Ok(self.refresh()),
        }
    }

    /// Applies a committed setting entry
    ///
    /// While margins are linked, `top` (or `margin`) writes all four margins
    /// and direct edits to left, bottom or right are ignored. A rejected
    /// value leaves every piece of state untouched and sends nothing.
    pub fn on_change_setting(&mut self, key: &str, value: &str) -> Result<Dispatch, ControllerError> {
        let planned = match self.plan_change(key, value) {
            Ok(planned) => planned,
            Err(error) => {
                warn!(key, value, %error, "rejected setting change");
                return Err(error.into());
            }
        };
        let Some((key, value)) = planned else {
            debug!(key, "ignoring direct edit of a linked margin");
            return Ok(Outbox::default().finish(self.state));
        };

        let mut out = self.abandon_pending_delete();
        if self.state.margins_linked() && key == SettingKey::Top {
            self.settings.set(SettingKey::Top, i64::from(value))?;
            let margins = self.settings.mirror_top();
            debug!(margin = margins.top, "linked margins updated");
        } else {
            let previous = self.settings.set(key, i64::from(value))?;
            debug!(%key, previous, value, "setting updated");
        }

        self.relayout(&mut out);
        Ok(out.finish(self.state))
    }

    /// Links all margins to top and runs one layout pass
    pub fn on_link_margins(&mut self) -> Dispatch {
        let mut out = self.abandon_pending_delete();
        if !self.transition(&ControllerEvent::LinkMargins) {
            return out.finish(self.state);
        }

        let margins = self.settings.mirror_top();
        debug!(margin = margins.top, "margins linked to top");
        self.relayout(&mut out);
        out.finish(self.state)
    }

    /// Returns to independent margin edits; geometry is left as is
    pub fn on_unlink_margins(&mut self) -> Dispatch {
        let out = self.abandon_pending_delete();
        self.transition(&ControllerEvent::UnlinkMargins);
        out.finish(self.state)
    }

    /// Mirrors every screen left to right; rectangles stay where they are
    pub fn on_flip_h(&mut self) -> Dispatch {
        self.on_flip(FlipAxis::Horizontal)
    }

    /// Mirrors every screen top to bottom
    pub fn on_flip_v(&mut self) -> Dispatch {
        self.on_flip(FlipAxis::Vertical)
    }

    fn on_flip(&mut self, axis: FlipAxis) -> Dispatch {
        let mut out = self.abandon_pending_delete();
        let report = self.registry.flip(axis);
        debug!(?axis, screens = report.updated.len(), "flipped screens");
        self.emit(&mut out, report);
        out.finish(self.state)
    }

    /// Previews a delete-all without touching the registry
    pub fn on_pre_delete_all(&mut self) -> Dispatch {
        let mut out = Outbox::default();
        if !self.transition(&ControllerEvent::PreDeleteAll) {
            return out.finish(self.state);
        }

        let previews: Vec<RenderCommand> = self
            .registry
            .screens()
            .iter()
            .map(|screen| RenderCommand::PreviewRemoval {
                index: screen.index,
            })
            .collect();
        for command in previews {
            self.send(&mut out, command);
        }
        out.finish(self.state)
    }

    /// Commits a pending delete-all
    pub fn on_delete_all(&mut self) -> Dispatch {
        let mut out = Outbox::default();
        if !self.state.is_transient() {
            debug!("delete released without a pending press");
            return out.finish(self.state);
        }

        let report = self.registry.clear();
        info!(screens = report.removed.len(), "deleted all screens");
        self.transition(&ControllerEvent::DeleteAll);
        self.emit(&mut out, report);
        out.finish(self.state)
    }

    /// Abandons a pending delete-all and restores the previewed screens
    pub fn on_cancel_delete_all(&mut self) -> Dispatch {
        self.abandon_pending_delete().finish(self.state)
    }

    /// Re-runs layout from the current settings and re-sends every screen
    ///
    /// Used for the startup pass and to retry after a renderer failure.
    pub fn refresh(&mut self) -> Dispatch {
        let mut out = self.abandon_pending_delete();
        self.relayout(&mut out);
        out.finish(self.state)
    }

    /// Labels, values and editability of every setting
    pub fn setting_views(&self) -> Vec<SettingView> {
        let linked = self.state.margins_linked();
        SettingKey::ALL
            .into_iter()
            .map(|key| SettingView {
                key,
                label: match key {
                    SettingKey::Top if linked => "Margin",
                    _ => key.label(),
                },
                value: self.settings.get(key),
                enabled: !(linked && SettingKey::LINKED_FOLLOWERS.contains(&key)),
            })
            .collect()
    }

    /// Resolves and validates a setting change without applying it
    ///
    /// Returns `None` for edits the current mode ignores.
    fn plan_change(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<(SettingKey, u32)>, InvalidSettingError> {
        let linked = self.state.margins_linked();
        let resolved = match key {
            MARGIN_KEY if linked => SettingKey::Top,
            other => other.parse::<SettingKey>()?,
        };
        if linked && SettingKey::LINKED_FOLLOWERS.contains(&resolved) {
            return Ok(None);
        }

        let coerced = coerce_value(key, value)?;
        let validated = self.settings.validate(resolved, coerced)?;
        Ok(Some((resolved, validated)))
    }

    /// Moves to the state the machine gives for `event`; false if unchanged
    fn transition(&mut self, event: &ControllerEvent) -> bool {
        let next = StateMachine::process_event(self.state, event);
        if next == self.state {
            return false;
        }
        info!(from = ?self.state, to = ?next, "controller state changed");
        self.state = next;
        true
    }

    /// Leaves a pending delete, re-applying the screens its preview dimmed
    fn abandon_pending_delete(&mut self) -> Outbox {
        let mut out = Outbox::default();
        if !self.state.is_transient() {
            return out;
        }

        info!("abandoning pending delete");
        self.state = self.state.settled();
        let restores: Vec<RenderCommand> =
            self.registry.screens().iter().map(RenderCommand::apply).collect();
        for command in restores {
            self.send(&mut out, command);
        }
        out
    }

    fn relayout(&mut self, out: &mut Outbox) {
        let settings = self.settings.snapshot();
        let grid = match Grid::new(
            self.canvas,
            settings.rows,
            settings.cols,
            settings.margins,
            settings.gutter,
        ) {
            Ok(grid) => grid,
            Err(error) => {
                warn!(%error, "skipping layout pass");
                return;
            }
        };
        let report = self.registry.reconcile(&grid);
        let (rows, cols) = grid.dimensions();
        let (cell_w, cell_h) = grid.cell_size();
        debug!(
            rows,
            cols,
            cell_w,
            cell_h,
            created = report.created.len(),
            updated = report.updated.len(),
            removed = report.removed.len(),
            "reconciled screens"
        );
        self.emit(out, report);
    }

    /// Sends removals first, then placements for created and updated screens
    fn emit(&mut self, out: &mut Outbox, report: Reconciliation) {
        for index in report.removed {
            self.send(out, RenderCommand::RemoveScreen { index });
        }
        for screen in report.created.iter().chain(&report.updated) {
            self.send(out, RenderCommand::apply(screen));
        }
    }

    fn send(&mut self, out: &mut Outbox, command: RenderCommand) {
        if let Err(error) = self.renderer.submit(&command) {
            warn!(screen = command.index(), %error, "renderer failed to apply command");
            out.failures.push(RenderFailure { command, error });
        }
        out.commands.push(command);
    }
}
