//! Grid geometry and cell calculations
//!
//! Maps a rows×cols grid, inset by outer margins and separated by a gutter,
//! onto canvas rectangles. Everything here is pure: the same inputs always
//! produce the same rectangles.

use crate::domain::core::{Canvas, GridCoords, Rect};
use thiserror::Error;

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid dimensions are invalid (zero rows or columns)
    #[error("Grid dimensions {rows}x{cols} are invalid")]
    InvalidDimensions { rows: u32, cols: u32 },
}

/// Outer padding between the canvas edge and the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Margins {
    pub fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same padding on all four sides
    pub fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn is_uniform(&self) -> bool {
        self.left == self.top && self.bottom == self.top && self.right == self.top
    }
}

/// A rows×cols grid laid out on a canvas
///
/// Cell sizes are computed once on construction. Cells that cannot fit
/// collapse to zero width or height rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    margins: Margins,
    gutter: u32,
    cell_width: u32,
    cell_height: u32,
}

impl Grid {
    /// Creates a new grid for the given canvas
    ///
    /// # Arguments
    /// * `canvas` - Outer bounds of the layout
    /// * `rows` - Number of grid rows (must be > 0)
    /// * `cols` - Number of grid columns (must be > 0)
    /// * `margins` - Outer padding
    /// * `gutter` - Spacing between adjacent cells
    ///
    /// # Example
    /// ```rust
    /// use screen_splitter::domain::{core::Canvas, grid::{Grid, Margins}};
    ///
    /// let grid = Grid::new(Canvas::new(1920, 1080), 2, 3, Margins::default(), 0).unwrap();
    /// assert_eq!(grid.cell_size(), (640, 540));
    /// ```
    pub fn new(
        canvas: Canvas,
        rows: u32,
        cols: u32,
        margins: Margins,
        gutter: u32,
    ) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let usable_width = canvas
            .width
            .saturating_sub(margins.left)
            .saturating_sub(margins.right);
        let usable_height = canvas
            .height
            .saturating_sub(margins.top)
            .saturating_sub(margins.bottom);

        Ok(Self {
            rows,
            cols,
            margins,
            gutter,
            cell_width: cell_extent(usable_width, cols, gutter),
            cell_height: cell_extent(usable_height, rows, gutter),
        })
    }

    /// Returns the grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Returns the number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Returns the pixel dimensions of each cell as (width, height)
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Iterates all cell coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = GridCoords> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| GridCoords::new(row, col)))
    }

    /// Canvas rectangle of the cell at `coords`
    ///
    /// Coordinates come from [`Grid::coords`]; out-of-range cells are not
    /// checked and land past the usable area.
    fn cell_rect(&self, coords: GridCoords) -> Rect {
        let x = offset(self.margins.left, coords.col, self.cell_width, self.gutter);
        let y = offset(self.margins.top, coords.row, self.cell_height, self.gutter);
        Rect::new(x, y, self.cell_width, self.cell_height)
    }

    /// Every cell paired with its rectangle, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (GridCoords, Rect)> + '_ {
        self.coords().map(move |coords| (coords, self.cell_rect(coords)))
    }

    /// Returns every cell rectangle in row-major order
    pub fn rects(&self) -> Vec<Rect> {
        self.cells().map(|(_, rect)| rect).collect()
    }
}

/// Computes the row-major rectangles of a rows×cols grid
///
/// Always returns exactly `rows * cols` rectangles. Zero rows or columns
/// yield an empty layout.
pub fn compute_layout(
    canvas: Canvas,
    rows: u32,
    cols: u32,
    margins: Margins,
    gutter: u32,
) -> Vec<Rect> {
    match Grid::new(canvas, rows, cols, margins, gutter) {
        Ok(grid) => grid.rects(),
        Err(_) => Vec::new(),
    }
}

/// Size of one cell along an axis after removing the gutters between `count` cells
fn cell_extent(usable: u32, count: u32, gutter: u32) -> u32 {
    let gutters = u64::from(gutter) * u64::from(count - 1);
    let remaining = u64::from(usable).saturating_sub(gutters);
    // Never exceeds `usable`, so the narrowing is lossless.
    (remaining / u64::from(count)) as u32
}

/// Start coordinate of the `step`-th cell along an axis
fn offset(margin: u32, step: u32, extent: u32, gutter: u32) -> u32 {
    let pitch = u64::from(extent) + u64::from(gutter);
    let position = u64::from(margin) + u64::from(step) * pitch;
    u32::try_from(position).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_canvas() -> Canvas {
        Canvas::new(1000, 600)
    }

    #[test]
    fn grid_creation_valid() {
        let grid = Grid::new(create_test_canvas(), 2, 2, Margins::default(), 0).unwrap();

        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.cell_size(), (500, 300));
    }

    #[test]
    fn grid_creation_invalid_dimensions() {
        let canvas = create_test_canvas();

        let result = Grid::new(canvas, 0, 2, Margins::default(), 0);
        assert!(matches!(result, Err(GridError::InvalidDimensions { rows: 0, cols: 2 })));

        let result = Grid::new(canvas, 3, 0, Margins::default(), 0);
        assert!(matches!(result, Err(GridError::InvalidDimensions { rows: 3, cols: 0 })));
    }

    #[test]
    fn two_by_two_without_spacing() {
        let rects = compute_layout(create_test_canvas(), 2, 2, Margins::default(), 0);
        assert_eq!(
            rects,
            vec![
                Rect::new(0, 0, 500, 300),
                Rect::new(500, 0, 500, 300),
                Rect::new(0, 300, 500, 300),
                Rect::new(500, 300, 500, 300),
            ]
        );
    }

    #[test]
    fn margins_and_gutter_shift_cells() {
        let margins = Margins::new(10, 20, 30, 40);
        let rects = compute_layout(create_test_canvas(), 2, 2, margins, 10);

        // usable 940x560, cells (940-10)/2 = 465 by (560-10)/2 = 275
        assert_eq!(rects[0], Rect::new(20, 10, 465, 275));
        assert_eq!(rects[1], Rect::new(495, 10, 465, 275));
        assert_eq!(rects[2], Rect::new(20, 295, 465, 275));
        assert_eq!(rects[3], Rect::new(495, 295, 465, 275));
    }

    #[test]
    fn uneven_division_floors_cell_size() {
        let rects = compute_layout(Canvas::new(1000, 600), 1, 3, Margins::default(), 0);
        assert_eq!(rects.len(), 3);
        assert!(rects.iter().all(|r| r.w == 333 && r.h == 600));
        assert_eq!(rects[2].x, 666);
    }

    #[test]
    fn oversized_margins_collapse_to_zero_area() {
        let rects = compute_layout(create_test_canvas(), 2, 3, Margins::uniform(800), 0);
        assert_eq!(rects.len(), 6);
        assert!(rects.iter().all(|r| r.w == 0 && r.h == 0));
    }

    #[test]
    fn oversized_gutter_collapses_to_zero_area() {
        let rects = compute_layout(create_test_canvas(), 1, 4, Margins::default(), 400);
        assert_eq!(rects.len(), 4);
        assert!(rects.iter().all(|r| r.w == 0 && r.h == 600));
        assert_eq!(rects[3].x, 1200);
    }

    #[test]
    fn zero_dimension_yields_empty_layout() {
        assert!(compute_layout(create_test_canvas(), 0, 4, Margins::default(), 0).is_empty());
    }

    #[test]
    fn coords_walk_row_major() {
        let grid = Grid::new(create_test_canvas(), 3, 2, Margins::default(), 0).unwrap();
        let coords: Vec<GridCoords> = grid.coords().collect();
        assert_eq!(coords.len(), grid.cell_count());
        assert_eq!(coords[1], GridCoords::new(0, 1));
        assert_eq!(coords[2], GridCoords::new(1, 0));
        assert_eq!(coords[5], GridCoords::new(2, 1));
    }

    #[test]
    fn cells_pair_coords_with_their_rects() {
        let grid = Grid::new(create_test_canvas(), 3, 2, Margins::uniform(5), 7).unwrap();
        let (cell_w, cell_h) = grid.cell_size();
        for (coords, rect) in grid.cells() {
            assert_eq!(rect.x, 5 + coords.col * (cell_w + 7));
            assert_eq!(rect.y, 5 + coords.row * (cell_h + 7));
        }
        let rects: Vec<Rect> = grid.cells().map(|(_, rect)| rect).collect();
        assert_eq!(rects, grid.rects());
    }

    #[test]
    fn positions_saturate_instead_of_overflowing() {
        let rects = compute_layout(Canvas::new(10, 10), 1, 3, Margins::default(), u32::MAX);
        assert_eq!(rects[2].x, u32::MAX);
    }

    #[test]
    fn margins_uniformity() {
        assert!(Margins::uniform(12).is_uniform());
        assert!(!Margins::new(1, 1, 1, 2).is_uniform());
    }
}
