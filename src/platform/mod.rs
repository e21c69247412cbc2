//! Boundary with the compositing host
//!
//! Everything the core sends outward goes through the renderer seam defined
//! here.

pub mod renderer;

pub use renderer::{LineRenderer, RecordingRenderer, RenderCommand, Renderer, RendererApplyError};
