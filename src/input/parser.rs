//! Key sequence parser for terminal input.
//!
//! Turns raw bytes from the terminal into [`KeyEvent`]s. Supports:
//! - Control bytes (Enter, Tab, Backspace, Ctrl+letter)
//! - CSI sequences with modifiers (`ESC [ 1 ; 5 A`)
//! - Tilde sequences (`ESC [ 3 ~`)
//! - SS3 sequences sent in application keypad mode (`ESC O A`, `ESC O p`)
//! - UTF-8 characters
//!
//! A lone ESC is reported as [`ParseError::Incomplete`]: the caller decides,
//! after waiting for more bytes, whether it was the Escape key.

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
// Self is used for consistency with other methods even when not needed
#![allow(clippy::unused_self)]

use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Longest escape sequence the parser will wait for.
pub const MAX_SEQUENCE_LEN: usize = 32;

/// Error type for input parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized sequence; `len` bytes should be discarded.
    Unrecognized { len: usize },
    /// Invalid UTF-8 lead byte or sequence; `len` bytes should be discarded.
    InvalidUtf8 { len: usize },
}

impl ParseError {
    /// Bytes to drop to get past this error (0 for `Empty`/`Incomplete`).
    #[must_use]
    pub fn discard_len(self) -> usize {
        match self {
            Self::Empty | Self::Incomplete => 0,
            Self::Unrecognized { len } | Self::InvalidUtf8 { len } => len,
        }
    }
}

/// Result of parsing input.
pub type ParseResult = Result<(KeyEvent, usize), ParseError>;

/// Stateless key sequence parser.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse bytes into a key event.
    ///
    /// Returns the event and number of bytes consumed, or an error.
    /// Call repeatedly with the remaining buffer until `Err(ParseError::Empty)`
    /// or `Err(ParseError::Incomplete)` is returned.
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        let Some(&first) = input.first() else {
            return Err(ParseError::Empty);
        };

        let event = match first {
            0x1b => return self.parse_escape(input),
            0x00 => KeyEvent::key(KeyCode::Null),
            b'\r' | b'\n' => KeyEvent::key(KeyCode::Enter),
            b'\t' => KeyEvent::key(KeyCode::Tab),
            0x08 | 0x7f => KeyEvent::key(KeyCode::Backspace),
            0x01..=0x1a => {
                // Ctrl+A through Ctrl+Z
                let c = char::from(first - 1 + b'a');
                KeyEvent::with_ctrl(KeyCode::Char(c))
            }
            0x80..=0xff => return self.parse_utf8(input),
            // 0x1c..=0x1f and printable ASCII
            _ => KeyEvent::char(char::from(first)),
        };
        Ok((event, 1))
    }

    /// Parse an escape sequence.
    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        match input.get(1) {
            None => Err(ParseError::Incomplete),
            Some(b'[') => self.parse_csi(input),
            Some(b'O') => self.parse_ss3(input),
            // Anything else: the ESC stands alone; the next byte is its own key.
            Some(_) => Ok((KeyEvent::key(KeyCode::Esc), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        // Find the final byte (0x40-0x7e)
        let Some(end) = input
            .iter()
            .skip(2)
            .position(|b| (0x40..=0x7e).contains(b))
            .map(|pos| pos + 2)
        else {
            if input.len() >= MAX_SEQUENCE_LEN {
                return Err(ParseError::Unrecognized { len: input.len() });
            }
            return Err(ParseError::Incomplete);
        };

        let consumed = end + 1;
        let params = &input[2..end];
        let unrecognized = ParseError::Unrecognized { len: consumed };

        let code = match input[end] {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'E' => KeyCode::KeypadBegin,
            // xterm sends F1-F4 as CSI 1;<mod> P..S when modified
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'Z' if params.is_empty() => {
                return Ok((KeyEvent::key(KeyCode::BackTab), consumed));
            }
            b'~' => return self.parse_tilde_key(params, consumed),
            _ => return Err(unrecognized),
        };

        let modifiers = self.parse_modifiers(params).ok_or(unrecognized)?;
        Ok((KeyEvent::new(code, modifiers), consumed))
    }

    /// Parse modifiers from CSI parameter bytes.
    ///
    /// Format: `1;N` where `N = 1 + shift + 2*alt + 4*ctrl`. Returns `None`
    /// when the parameters are not plain ASCII.
    fn parse_modifiers(&self, params: &[u8]) -> Option<KeyModifiers> {
        let s = std::str::from_utf8(params).ok()?;
        let mut mods = KeyModifiers::empty();
        if let Some(n) = s.split(';').nth(1).and_then(|p| p.parse::<u8>().ok()) {
            let n = n.saturating_sub(1);
            if n & 1 != 0 {
                mods |= KeyModifiers::SHIFT;
            }
            if n & 2 != 0 {
                mods |= KeyModifiers::ALT;
            }
            if n & 4 != 0 {
                mods |= KeyModifiers::CTRL;
            }
        }
        Some(mods)
    }

    /// Parse tilde key sequences (Insert, Delete, Page Up/Down, F1-F20).
    fn parse_tilde_key(&self, params: &[u8], consumed: usize) -> ParseResult {
        let unrecognized = ParseError::Unrecognized { len: consumed };
        let s = std::str::from_utf8(params).map_err(|_| unrecognized)?;
        let num: u8 = s
            .split(';')
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or(unrecognized)?;

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11 => KeyCode::F(1),
            12 => KeyCode::F(2),
            13 => KeyCode::F(3),
            14 => KeyCode::F(4),
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            25 => KeyCode::F(13),
            26 => KeyCode::F(14),
            28 => KeyCode::F(15),
            29 => KeyCode::F(16),
            31 => KeyCode::F(17),
            32 => KeyCode::F(18),
            33 => KeyCode::F(19),
            34 => KeyCode::F(20),
            _ => return Err(unrecognized),
        };

        let modifiers = self.parse_modifiers(params).ok_or(unrecognized)?;
        Ok((KeyEvent::new(code, modifiers), consumed))
    }

    /// Parse SS3 sequences (ESC O ...).
    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        let Some(&byte) = input.get(2) else {
            return Err(ParseError::Incomplete);
        };

        if let Some(c) = keypad_char(byte) {
            return Ok((KeyEvent::char(c), 3));
        }

        let code = match byte {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'E' => KeyCode::KeypadBegin,
            b'M' => KeyCode::Enter,
            _ => return Err(ParseError::Unrecognized { len: 3 }),
        };

        Ok((KeyEvent::key(code), 3))
    }

    /// Parse a UTF-8 character sequence.
    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let first = input[0];

        let expected_len = if first & 0b1110_0000 == 0b1100_0000 {
            2
        } else if first & 0b1111_0000 == 0b1110_0000 {
            3
        } else if first & 0b1111_1000 == 0b1111_0000 {
            4
        } else {
            return Err(ParseError::InvalidUtf8 { len: 1 });
        };

        // Stop early at the first byte that cannot continue the sequence.
        if let Some(bad) = input
            .iter()
            .take(expected_len)
            .skip(1)
            .position(|b| b & 0b1100_0000 != 0b1000_0000)
        {
            return Err(ParseError::InvalidUtf8 { len: bad + 1 });
        }

        if input.len() < expected_len {
            return Err(ParseError::Incomplete);
        }

        let c = std::str::from_utf8(&input[..expected_len])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or(ParseError::InvalidUtf8 { len: expected_len })?;

        Ok((KeyEvent::char(c), expected_len))
    }
}

/// Character sent by a numeric keypad key in application keypad mode.
fn keypad_char(byte: u8) -> Option<char> {
    match byte {
        b'p'..=b'y' => Some(char::from(b'0' + (byte - b'p'))),
        b'k' => Some('+'),
        b'm' => Some('-'),
        b'j' => Some('*'),
        b'o' => Some('/'),
        b'n' => Some('.'),
        b'X' => Some('='),
        _ => None,
    }
}
