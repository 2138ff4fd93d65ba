//! Keyboard event types.

use bitflags::bitflags;
use std::borrow::Cow;

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key.
        const ALT = 0b0000_0010;
        /// Control key.
        const CTRL = 0b0000_0100;
    }
}

/// A key code representing a keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up key.
    PageUp,
    /// Page Down key.
    PageDown,
    /// Tab key.
    Tab,
    /// Shift+Tab (backtab).
    BackTab,
    /// Delete key.
    Delete,
    /// Insert key.
    Insert,
    /// Function key (F1-F20).
    F(u8),
    /// A character key (includes space).
    Char(char),
    /// Escape key.
    Esc,
    /// Keypad Begin (numpad 5 without numlock).
    KeypadBegin,
    /// Null (Ctrl+Space or Ctrl+@).
    Null,
}

impl KeyCode {
    /// Check if this is a function key.
    #[must_use]
    pub fn is_function_key(&self) -> bool {
        matches!(self, Self::F(_))
    }

    /// Check if this is a navigation key (arrows, home, end, page up/down).
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Right
                | Self::Up
                | Self::Down
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    /// Get the character if this is a character key.
    #[must_use]
    pub fn char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Symbolic name used by structured key dispatch, if the key has one.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        const F_NAMES: [&str; 12] = [
            "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
        ];
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Backspace => "BACKSPACE",
            Self::Delete => "DELETE",
            Self::Insert => "INSERT",
            Self::Enter => "ENTER",
            Self::BackTab => "BTAB",
            Self::Home => "HOME",
            Self::End => "END",
            Self::PageUp => "PAGE_UP",
            Self::PageDown => "PAGE_DOWN",
            Self::F(n) => return F_NAMES.get(usize::from(*n).wrapping_sub(1)).copied(),
            _ => return None,
        };
        Some(name)
    }
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code.
    pub code: KeyCode,
    /// Modifier keys held.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a new key event.
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key event with no modifiers.
    #[must_use]
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Create a character key event.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    /// Create a Ctrl+key event.
    #[must_use]
    pub fn with_ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL)
    }

    /// Check if this removes the last character of a line.
    #[must_use]
    pub fn is_backspace(&self) -> bool {
        match self.code {
            KeyCode::Backspace => true,
            // Ctrl+H is BS (0x08) on terminals that send it for Backspace.
            KeyCode::Char('h') => self.ctrl(),
            _ => false,
        }
    }

    /// The character this key appends to a line, if it is printable.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.ctrl() && !c.is_control() => Some(c),
            _ => None,
        }
    }

    /// Text delivered to a structured key callback.
    ///
    /// Named keys use their symbolic name; everything else becomes its
    /// literal one-character text (Ctrl+letter as its control byte).
    /// Function keys without a listed name are spelled `F13`, `F14`, ...
    #[must_use]
    pub fn dispatch_text(&self) -> Cow<'static, str> {
        if let Some(name) = self.code.name() {
            return Cow::Borrowed(name);
        }
        let ch = match self.code {
            KeyCode::F(n) => return Cow::Owned(format!("F{n}")),
            KeyCode::Char(c) if self.ctrl() && c.is_ascii_alphabetic() => {
                char::from(c.to_ascii_lowercase() as u8 - b'a' + 1)
            }
            KeyCode::Char(c) => c,
            KeyCode::Tab => '\t',
            KeyCode::Esc => '\x1b',
            KeyCode::Null => '\0',
            KeyCode::KeypadBegin => '5',
            _ => return Cow::Borrowed(""),
        };
        Cow::Owned(ch.to_string())
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::key(code)
    }
}
