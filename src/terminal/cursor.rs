//! Global cursor visibility.

use crate::ansi::sequences::{self, cursor_style};
use crate::error::Error;

/// Cursor visibility mode, as accepted by `set_cursor_type`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorVisibility {
    /// Cursor hidden (mode 0).
    Hidden,
    /// Normal visible cursor (mode 1).
    #[default]
    Visible,
    /// Highly visible, blinking cursor (mode 2).
    Blinking,
}

impl CursorVisibility {
    /// Escape sequence that applies this mode.
    #[must_use]
    pub fn sequence(self) -> String {
        match self {
            Self::Hidden => sequences::CURSOR_HIDE.to_string(),
            Self::Visible => format!("{}{}", sequences::CURSOR_SHOW, cursor_style::BLOCK_STEADY),
            Self::Blinking => format!("{}{}", sequences::CURSOR_SHOW, cursor_style::BLOCK_BLINK),
        }
    }
}

impl TryFrom<i32> for CursorVisibility {
    type Error = Error;

    fn try_from(mode: i32) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(Self::Hidden),
            1 => Ok(Self::Visible),
            2 => Ok(Self::Blinking),
            other => Err(Error::InvalidArgument(format!(
                "cursor mode {other} (expected 0, 1 or 2)"
            ))),
        }
    }
}
