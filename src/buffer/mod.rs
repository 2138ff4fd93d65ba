//! Cell grid backing the display surface.
//!
//! [`CellBuffer`] is a 2D grid of [`Cell`]s. The surface keeps two of them:
//! the virtual screen that windows draw into and the physical screen that
//! mirrors what was last flushed to the terminal.
//!
//! # Examples
//!
//! ```
//! use termwin::buffer::{BoxStyle, CellBuffer, Rect};
//! use termwin::TextAttributes;
//!
//! let mut buf = CellBuffer::new(20, 5);
//! let area = Rect::new(0, 0, 20, 5);
//! buf.draw_box(area, BoxStyle::ASCII, TextAttributes::empty());
//! buf.draw_text(1, 1, "Hello!", TextAttributes::BOLD, area);
//! assert_eq!(buf.row_text(1), "|Hello!            |");
//! ```

mod drawing;
mod rect;

pub use drawing::{BorderStyle, BoxStyle};
pub use rect::Rect;

use crate::cell::Cell;
use crate::style::TextAttributes;

/// Cell grid with bounds-checked access.
///
/// # Coordinate System
///
/// Coordinates are (x, y) where (0, 0) is the top-left corner. X increases
/// to the right, Y increases downward. Writes outside the grid are ignored.
#[derive(Clone, Debug)]
pub struct CellBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl CellBuffer {
    /// Create a blank buffer with the given dimensions.
    ///
    /// Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; size],
        }
    }

    /// Get buffer dimensions.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get buffer width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get buffer height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole buffer as a rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row_offset = (y as usize).checked_mul(self.width as usize)?;
        row_offset.checked_add(x as usize)
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cell_index(x, y).map(|idx| &self.cells[idx])
    }

    /// Get mutable cell at position.
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        self.cell_index(x, y).map(|idx| &mut self.cells[idx])
    }

    /// Set cell at position. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        if let Some(dest) = self.get_mut(x, y) {
            *dest = cell;
        }
    }

    /// Fill every cell of `rect` (clipped to the buffer) with `cell`.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in area.y..area.bottom() {
            let start = (y * self.width + area.x) as usize;
            let end = start + area.width as usize;
            self.cells[start..end].fill(cell);
        }
    }

    /// Fill the whole buffer with `cell`.
    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Copy the cells of `rect` out in row-major order.
    ///
    /// Positions outside the buffer read as blank so the result is always
    /// exactly `rect.area()` cells.
    #[must_use]
    pub fn snapshot(&self, rect: Rect) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(rect.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                cells.push(self.get(x, y).copied().unwrap_or(Cell::BLANK));
            }
        }
        cells
    }

    /// Write a row-major snapshot back into `rect`.
    pub fn restore(&mut self, rect: Rect, cells: &[Cell]) {
        let width = rect.width as usize;
        if width == 0 {
            return;
        }
        for (i, &cell) in cells.iter().enumerate().take(rect.area()) {
            let x = rect.x + (i % width) as u32;
            let y = rect.y + (i / width) as u32;
            self.set(x, y, cell);
        }
    }

    /// Draw text, clipped to `clip`. Returns the column after the last cell.
    pub fn draw_text(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        attributes: TextAttributes,
        clip: Rect,
    ) -> u32 {
        drawing::draw_text(self, x, y, text, attributes, clip)
    }

    /// Draw a box border along the edge of `rect`.
    pub fn draw_box(&mut self, rect: Rect, style: BoxStyle, attributes: TextAttributes) {
        drawing::draw_box(self, rect, style, attributes);
    }

    /// Resize buffer, clearing contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        self.width = width;
        self.height = height;
        let size = (width as usize).saturating_mul(height as usize);
        self.cells = vec![Cell::BLANK; size];
    }

    /// Text of one row; continuation cells contribute nothing.
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).and_then(Cell::ch))
            .collect()
    }

    /// Get raw cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
