//! Screen identity and registry reconciliation
//!
//! The registry owns every logical screen placed on the canvas. Each layout
//! pass is reconciled against it: when the screen count is unchanged the
//! screens are moved in place, otherwise the whole set is rebuilt.

use crate::domain::core::{GridCoords, Rect};
use crate::domain::grid::Grid;

/// One logical sub-region of the split canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Row-major position in the current grid
    pub index: usize,
    pub coords: GridCoords,
    pub rect: Rect,
    pub flipped_h: bool,
    pub flipped_v: bool,
}

impl Screen {
    fn fresh(index: usize, coords: GridCoords, rect: Rect) -> Self {
        Self {
            index,
            coords,
            rect,
            flipped_h: false,
            flipped_v: false,
        }
    }
}

/// What a registry operation did to the set of screens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub created: Vec<Screen>,
    pub updated: Vec<Screen>,
    pub removed: Vec<usize>,
}

impl Reconciliation {
    /// Returns true if nothing changed
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Axis a flip applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Owns the identity and transform of every screen on the canvas
#[derive(Debug, Clone, Default)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered screens in row-major order
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }

    pub fn get(&self, index: usize) -> Option<&Screen> {
        self.screens.get(index)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Reconciles the registry with a freshly computed grid
    ///
    /// If the cell count matches the current screen count every screen keeps
    /// its index and flip state and takes the coordinates and rectangle of
    /// the cell at its index. Otherwise all current screens are removed and a
    /// fresh set is created.
    pub fn reconcile(&mut self, grid: &Grid) -> Reconciliation {
        if grid.cell_count() == self.screens.len() {
            for (screen, (coords, rect)) in self.screens.iter_mut().zip(grid.cells()) {
                screen.coords = coords;
                screen.rect = rect;
            }
            return Reconciliation {
                updated: self.screens.clone(),
                ..Reconciliation::default()
            };
        }

        let removed = self.screens.iter().map(|screen| screen.index).collect();
        self.screens = grid
            .cells()
            .enumerate()
            .map(|(index, (coords, rect))| Screen::fresh(index, coords, rect))
            .collect();

        Reconciliation {
            created: self.screens.clone(),
            removed,
            ..Reconciliation::default()
        }
    }

    /// Toggles the flip flag on every registered screen
    pub fn flip(&mut self, axis: FlipAxis) -> Reconciliation {
        for screen in &mut self.screens {
            match axis {
                FlipAxis::Horizontal => screen.flipped_h = !screen.flipped_h,
                FlipAxis::Vertical => screen.flipped_v = !screen.flipped_v,
            }
        }
        Reconciliation {
            updated: self.screens.clone(),
            ..Reconciliation::default()
        }
    }

    /// Removes every screen; the registry stays empty until the next reconcile
    pub fn clear(&mut self) -> Reconciliation {
        let removed = self.screens.drain(..).map(|screen| screen.index).collect();
        Reconciliation {
            removed,
            ..Reconciliation::default()
        }
    }
}
