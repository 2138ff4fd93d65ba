//! Replays captured backend output through a VT100 emulator.
//!
//! Asserting on what a terminal would actually show catches diffing bugs
//! that cell-buffer assertions cannot, like a skipped repaint.

use termwin::{HeadlessBackend, Surface};

/// Emulated terminal fed with everything a surface has written so far.
pub struct Screen {
    parser: vt100::Parser,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            parser: vt100::Parser::new(rows, cols, 0),
        }
    }

    /// Feed the bytes written since the last call.
    pub fn feed(&mut self, surface: &mut Surface<HeadlessBackend>) -> &mut Self {
        let bytes = surface.backend_mut().take_output();
        self.parser.process(&bytes);
        self
    }

    /// Visible text of one row, trailing spaces trimmed.
    pub fn row(&self, row: u16) -> String {
        let (_, cols) = self.parser.screen().size();
        self.parser
            .screen()
            .contents_between(row, 0, row, cols)
            .trim_end()
            .to_string()
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&vt100::Cell> {
        self.parser.screen().cell(row, col)
    }

    /// `(row, col)` of the terminal cursor.
    pub fn cursor(&self) -> (u16, u16) {
        self.parser.screen().cursor_position()
    }

    pub fn cursor_hidden(&self) -> bool {
        self.parser.screen().hide_cursor()
    }

    pub fn alternate_screen(&self) -> bool {
        self.parser.screen().alternate_screen()
    }
}
