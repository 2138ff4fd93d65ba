//! Buffered ANSI output writer with state tracking.

use crate::ansi;
use crate::cell::{Cell, CellContent};
use crate::color::{ColorPair, ColorPairRegistry};
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Buffered writer that tracks ANSI state to minimize escape sequences.
///
/// Cells carry a color pair id, not colors; the writer resolves the id
/// through a [`ColorPairRegistry`] at output time. With colors disabled
/// every cell renders in the terminal's default colors.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    colors_enabled: bool,

    // Current state for delta encoding. `None` means unknown.
    current_colors: Option<Option<ColorPair>>,
    current_attrs: TextAttributes,

    cursor_row: u32,
    cursor_col: u32,
}

impl<W: Write> AnsiWriter<W> {
    /// Create a new ANSI writer wrapping the given output.
    pub fn new(writer: W) -> Self {
        Self::with_colors(writer, true)
    }

    /// Create a new ANSI writer, choosing whether color pairs are emitted.
    pub fn with_colors(writer: W, colors_enabled: bool) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(4096),
            colors_enabled,
            current_colors: None,
            current_attrs: TextAttributes::empty(),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    /// Write a raw string to the buffer.
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Move to the home position and start tracking from (0, 0).
    ///
    /// The terminal cursor may be anywhere when a flush starts, so relative
    /// moves are only valid after this.
    pub fn home(&mut self) {
        self.write_str(ansi::CURSOR_HOME);
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Move cursor to position, using relative moves if more efficient.
    pub fn move_cursor(&mut self, row: u32, col: u32) {
        if row == self.cursor_row && col == self.cursor_col {
            return;
        }

        let dy = i64::from(row) - i64::from(self.cursor_row);
        let dx = i64::from(col) - i64::from(self.cursor_col);

        // ESC[r;cH = 4 + digits
        let abs_cost = 4 + digits(u64::from(row) + 1) + digits(u64::from(col) + 1);
        let rel_cost = if dy != 0 { 3 + digits(dy.unsigned_abs()) } else { 0 }
            + if dx != 0 { 3 + digits(dx.unsigned_abs()) } else { 0 };

        let relative = match (i32::try_from(dx), i32::try_from(dy)) {
            (Ok(dx), Ok(dy)) if rel_cost < abs_cost => Some((dx, dy)),
            _ => None,
        };
        let _ = match relative {
            Some((dx, dy)) => ansi::write_cursor_move(&mut self.buffer, dx, dy),
            None => ansi::write_cursor_position(&mut self.buffer, row, col),
        };

        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Set foreground/background from a resolved pair if different from current.
    pub fn set_colors(&mut self, colors: Option<ColorPair>) {
        let colors = if self.colors_enabled { colors } else { None };
        if self.current_colors == Some(colors) {
            return;
        }
        let _ = ansi::write_fg_color(&mut self.buffer, colors.map(|p| p.fg));
        let _ = ansi::write_bg_color(&mut self.buffer, colors.map(|p| p.bg));
        self.current_colors = Some(colors);
    }

    /// Set text attributes, only writing changes.
    pub fn set_attributes(&mut self, attrs: TextAttributes) {
        let attrs = attrs.flags_only();
        if self.current_attrs == attrs {
            return;
        }

        let removed = self.current_attrs - attrs;
        if !removed.is_empty() {
            let mut codes: Vec<&str> = Vec::new();
            if removed.intersects(TextAttributes::BOLD | TextAttributes::DIM) {
                // 22 clears both intensities
                codes.push("22");
                self.current_attrs -= TextAttributes::BOLD | TextAttributes::DIM;
            }
            if removed.contains(TextAttributes::ITALIC) {
                codes.push("23");
            }
            if removed.contains(TextAttributes::UNDERLINE) {
                codes.push("24");
            }
            if removed.contains(TextAttributes::BLINK) {
                codes.push("25");
            }
            if removed.contains(TextAttributes::REVERSE) {
                codes.push("27");
            }
            if removed.contains(TextAttributes::HIDDEN) {
                codes.push("28");
            }
            if removed.contains(TextAttributes::STRIKETHROUGH) {
                codes.push("29");
            }

            self.buffer.extend_from_slice(b"\x1b[");
            self.buffer.extend_from_slice(codes.join(";").as_bytes());
            self.buffer.push(b'm');
            self.current_attrs -= removed;
        }

        let to_add = attrs - self.current_attrs;
        if !to_add.is_empty() {
            let _ = ansi::write_attributes(&mut self.buffer, to_add);
        }

        self.current_attrs = attrs;
    }

    /// Write a cell at the current cursor position.
    pub fn write_cell(&mut self, cell: &Cell, pairs: &ColorPairRegistry) {
        self.set_attributes(cell.attributes);
        self.set_colors(cell.attributes.color_pair().and_then(|id| pairs.get(id)));

        match cell.content {
            CellContent::Char(c) => {
                // Control characters would move the real cursor.
                let c = if c.is_control() { ' ' } else { c };
                let mut buf = [0u8; 4];
                self.buffer
                    .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            CellContent::Continuation => {}
        }

        self.cursor_col += cell.display_width() as u32;
    }

    /// Write a cell at a specific position.
    pub fn write_cell_at(&mut self, row: u32, col: u32, cell: &Cell, pairs: &ColorPairRegistry) {
        self.move_cursor(row, col);
        self.write_cell(cell, pairs);
    }

    /// Reset all ANSI attributes.
    pub fn reset(&mut self) {
        self.write_str(ansi::RESET);
        self.current_colors = Some(None);
        self.current_attrs = TextAttributes::empty();
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()
    }

    /// Get the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

/// Count decimal digits in a number.
fn digits(n: u64) -> usize {
    if n == 0 { 1 } else { (n.ilog10() + 1) as usize }
}
