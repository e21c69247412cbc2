//! Core domain types and operations
//!
//! This module defines pure geometric types in canvas pixels. Nothing here
//! knows about settings, screens or the compositing host.

/// Rectangle in canvas pixel coordinates
///
/// All components are unsigned, so a rectangle can never carry a negative
/// size. Degenerate layouts produce zero-area rectangles instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Outer bounds the grid is laid out in
///
/// Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Grid coordinates representing (row, col) position
///
/// Zero-based from the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoords {
    pub row: u32,
    pub col: u32,
}

impl GridCoords {
    /// Creates new grid coordinates
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}
