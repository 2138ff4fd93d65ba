//! Text and box drawing operations.

use crate::buffer::{CellBuffer, Rect};
use crate::cell::Cell;
use crate::style::TextAttributes;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Box drawing characters for a window border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxStyle {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxStyle {
    /// Single-line box drawing characters.
    pub const SINGLE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Double-line box drawing characters.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    /// Rounded corner box drawing characters.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// Heavy (bold) box drawing characters.
    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };

    /// ASCII box drawing characters (works in all terminals).
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };

    /// All-space border, used to overwrite an existing border.
    pub const BLANK: Self = Self {
        top_left: ' ',
        top_right: ' ',
        bottom_left: ' ',
        bottom_right: ' ',
        horizontal: ' ',
        vertical: ' ',
    };
}

/// Border style selectable through configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Rounded,
    Heavy,
    Ascii,
}

impl BorderStyle {
    /// The box characters for this style.
    #[must_use]
    pub const fn box_style(self) -> BoxStyle {
        match self {
            Self::Single => BoxStyle::SINGLE,
            Self::Double => BoxStyle::DOUBLE,
            Self::Rounded => BoxStyle::ROUNDED,
            Self::Heavy => BoxStyle::HEAVY,
            Self::Ascii => BoxStyle::ASCII,
        }
    }
}

/// Draw text starting at `(x, y)`, clipped to `clip`.
///
/// Each grapheme cluster takes its base character; zero-width clusters are
/// dropped. A wide character that would straddle the clip edge is not drawn.
/// Line breaks are skipped. Returns the column after the last drawn cell.
pub fn draw_text(
    buffer: &mut CellBuffer,
    x: u32,
    y: u32,
    text: &str,
    attributes: TextAttributes,
    clip: Rect,
) -> u32 {
    let mut col = x;
    if !clip.contains(x, y) {
        return col;
    }

    for grapheme in text.graphemes(true) {
        if grapheme == "\n" || grapheme == "\r" || grapheme == "\r\n" {
            continue;
        }
        let Some(ch) = grapheme.chars().next() else {
            continue;
        };
        let width = grapheme.width() as u32;
        if width == 0 {
            continue;
        }
        if col.saturating_add(width) > clip.right() {
            break;
        }

        buffer.set(col, y, Cell::new(ch, attributes));
        for i in 1..width {
            buffer.set(col + i, y, Cell::continuation(attributes));
        }
        col += width;
    }
    col
}

/// Draw a box border along the edge of `rect`.
///
/// Degenerate rectangles still get something sensible: a single row or
/// column is drawn with corner characters at its ends.
pub fn draw_box(buffer: &mut CellBuffer, rect: Rect, style: BoxStyle, attributes: TextAttributes) {
    if rect.is_empty() {
        return;
    }
    let (left, top) = (rect.x, rect.y);
    let right = rect.right() - 1;
    let bottom = rect.bottom() - 1;
    let cell = |ch| Cell::new(ch, attributes);

    for col in left + 1..right {
        buffer.set(col, top, cell(style.horizontal));
        buffer.set(col, bottom, cell(style.horizontal));
    }
    for row in top + 1..bottom {
        buffer.set(left, row, cell(style.vertical));
        buffer.set(right, row, cell(style.vertical));
    }

    buffer.set(left, top, cell(style.top_left));
    buffer.set(right, top, cell(style.top_right));
    buffer.set(left, bottom, cell(style.bottom_left));
    buffer.set(right, bottom, cell(style.bottom_right));
}
