//! Terminal cell type representing a single character position.
//!
//! A cell holds one displayed character plus the attribute word it was
//! written with. Wide characters (CJK, most emoji) occupy two cells: the
//! character itself and a [`CellContent::Continuation`] marker in the
//! following cell.
//!
//! # Examples
//!
//! ```
//! use termwin::{Cell, TextAttributes};
//!
//! let cell = Cell::new('A', TextAttributes::BOLD);
//! assert_eq!(cell.ch(), Some('A'));
//! assert_eq!(Cell::BLANK.ch(), Some(' '));
//! ```

use crate::style::TextAttributes;
use unicode_width::UnicodeWidthChar;

/// Content of a terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// A displayed character (space for blank cells).
    Char(char),
    /// Continuation of a wide character from the previous cell.
    Continuation,
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Char(' ')
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub content: CellContent,
    pub attributes: TextAttributes,
}

impl Cell {
    /// Blank cell with no attributes.
    pub const BLANK: Self = Self {
        content: CellContent::Char(' '),
        attributes: TextAttributes::empty(),
    };

    /// Create a character cell.
    #[must_use]
    pub const fn new(ch: char, attributes: TextAttributes) -> Self {
        Self {
            content: CellContent::Char(ch),
            attributes,
        }
    }

    /// Continuation marker carrying the attributes of its wide character.
    #[must_use]
    pub const fn continuation(attributes: TextAttributes) -> Self {
        Self {
            content: CellContent::Continuation,
            attributes,
        }
    }

    /// The displayed character, `None` for continuation cells.
    #[must_use]
    pub const fn ch(&self) -> Option<char> {
        match self.content {
            CellContent::Char(c) => Some(c),
            CellContent::Continuation => None,
        }
    }

    /// Check if this cell continues a wide character.
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// Columns the cell's character occupies (0 for continuations).
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self.content {
            CellContent::Char(c) => c.width().unwrap_or(0).max(1),
            CellContent::Continuation => 0,
        }
    }
}
