//! Commands sent to the compositing host
//!
//! The host is reached through the [`Renderer`] trait. Each command targets
//! a single screen and is safe to send again: applying the same rectangle
//! twice leaves the host in the same place.

use crate::domain::core::Rect;
use crate::domain::screen::Screen;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A single instruction for the rendering host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderCommand {
    /// Place a screen at `rect` with the given flip state
    ApplyScreen {
        index: usize,
        rect: Rect,
        flipped_h: bool,
        flipped_v: bool,
    },
    /// Remove a screen from the host
    RemoveScreen { index: usize },
    /// Dim a screen to preview its removal
    PreviewRemoval { index: usize },
}

impl RenderCommand {
    pub fn apply(screen: &Screen) -> Self {
        RenderCommand::ApplyScreen {
            index: screen.index,
            rect: screen.rect,
            flipped_h: screen.flipped_h,
            flipped_v: screen.flipped_v,
        }
    }

    /// Index of the screen this command targets
    pub fn index(&self) -> usize {
        match self {
            RenderCommand::ApplyScreen { index, .. }
            | RenderCommand::RemoveScreen { index }
            | RenderCommand::PreviewRemoval { index } => *index,
        }
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCommand::ApplyScreen {
                index,
                rect,
                flipped_h,
                flipped_v,
            } => write!(
                f,
                "apply {} {} {} {} {} {} {}",
                index, rect.x, rect.y, rect.w, rect.h, flipped_h, flipped_v
            ),
            RenderCommand::RemoveScreen { index } => write!(f, "remove {}", index),
            RenderCommand::PreviewRemoval { index } => write!(f, "preview {}", index),
        }
    }
}

/// Failure reported by the rendering host
#[derive(Debug, Error)]
pub enum RendererApplyError {
    #[error("Host rejected command for screen {index}: {reason}")]
    Rejected { index: usize, reason: String },
    #[error("Host unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

/// Receiver of layout commands
///
/// Calls are synchronous. A failure does not invalidate local state; the
/// same command can be sent again later.
pub trait Renderer {
    fn submit(&mut self, command: &RenderCommand) -> Result<(), RendererApplyError>;
}

/// Renderer that keeps every accepted command in memory
///
/// Screens listed in `rejected` make the renderer fail, which lets callers
/// exercise host failures without a real host.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<RenderCommand>,
    rejected: BTreeSet<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every command addressed to one of `indices`
    pub fn rejecting(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            commands: Vec::new(),
            rejected: indices.into_iter().collect(),
        }
    }

    pub fn accept_all(&mut self) {
        self.rejected.clear();
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns and forgets the commands recorded so far
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for RecordingRenderer {
    fn submit(&mut self, command: &RenderCommand) -> Result<(), RendererApplyError> {
        let index = command.index();
        if self.rejected.contains(&index) {
            return Err(RendererApplyError::Rejected {
                index,
                reason: "screen handle refused".to_string(),
            });
        }
        self.commands.push(*command);
        Ok(())
    }
}

/// Renderer that writes one command per line
///
/// Used by the headless binary to hand commands to a host-side script.
#[derive(Debug)]
pub struct LineRenderer<W> {
    out: W,
}

impl<W: std::io::Write> LineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: std::io::Write> Renderer for LineRenderer<W> {
    fn submit(&mut self, command: &RenderCommand) -> Result<(), RendererApplyError> {
        writeln!(self.out, "{}", command)?;
        self.out.flush()?;
        Ok(())
    }
}
