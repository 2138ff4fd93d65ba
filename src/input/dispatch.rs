//! Blocking key reads and the pieces the dispatch loops are built from.

use crate::error::{BoxError, Error, Result};
use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::input::parser::{InputParser, ParseError};
use crate::terminal::Backend;
use std::io;
use std::time::Duration;
use tracing::{debug, trace};

/// Default wait for the rest of an escape sequence after a lone ESC.
pub const DEFAULT_ESCAPE_DELAY: Duration = Duration::from_millis(25);

/// Default capacity of the raw-mode line buffer, in bytes.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// What a dispatch callback wants the loop to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going { Self::Continue } else { Self::Stop }
    }
}

/// Values a dispatch callback may return.
///
/// Booleans and [`Flow`] map directly. A dynamic host value must be a
/// boolean. An `Err` aborts the loop.
pub trait DispatchResult {
    fn into_flow(self) -> Result<Flow>;
}

impl DispatchResult for Flow {
    fn into_flow(self) -> Result<Flow> {
        Ok(self)
    }
}

impl DispatchResult for bool {
    fn into_flow(self) -> Result<Flow> {
        Ok(self.into())
    }
}

impl DispatchResult for serde_json::Value {
    fn into_flow(self) -> Result<Flow> {
        match self {
            Self::Bool(b) => Ok(b.into()),
            other => Err(Error::callback(format!(
                "expected dispatch callback to return a boolean, got {}",
                value_kind(&other)
            ))),
        }
    }
}

impl<T, E> DispatchResult for std::result::Result<T, E>
where
    T: DispatchResult,
    E: Into<BoxError>,
{
    fn into_flow(self) -> Result<Flow> {
        match self {
            Ok(value) => value.into_flow(),
            Err(err) => Err(Error::callback_failed(err)),
        }
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Bounded line buffer for raw input mode.
///
/// Never grows past its capacity: characters that do not fit are dropped.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    text: String,
    capacity: usize,
}

impl LineBuffer {
    /// Create an empty buffer holding at most `capacity` bytes.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Apply one key: backspace-class keys pop, printable keys append.
    ///
    /// Any other key leaves the buffer unchanged.
    pub fn apply(&mut self, key: &KeyEvent) {
        if key.is_backspace() {
            self.text.pop();
        } else if let Some(c) = key.printable() {
            self.push(c);
        }
    }

    /// Append `c` if it fits. Returns whether it was kept.
    pub fn push(&mut self, c: char) -> bool {
        if self.text.len() + c.len_utf8() > self.capacity {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Current contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maximum length in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_CAPACITY)
    }
}

/// Reads whole key events from a backend one byte at a time.
///
/// Bytes that do not form a recognized key are discarded, never reported.
#[derive(Debug)]
pub struct InputReader {
    parser: InputParser,
    pending: Vec<u8>,
    escape_delay: Duration,
}

impl InputReader {
    /// Create a reader that waits `escape_delay` after a lone ESC.
    #[must_use]
    pub fn new(escape_delay: Duration) -> Self {
        Self {
            parser: InputParser::new(),
            pending: Vec::with_capacity(16),
            escape_delay,
        }
    }

    /// Block until one key event is decoded.
    ///
    /// Read failures and end of input are [`Error::InputStream`].
    pub fn read_key<B: Backend>(&mut self, backend: &mut B) -> Result<KeyEvent> {
        loop {
            match self.parser.parse(&self.pending) {
                Ok((event, len)) => {
                    self.pending.drain(..len);
                    trace!(?event, "key decoded");
                    return Ok(event);
                }
                Err(ParseError::Empty) => {
                    self.pending.push(read_blocking(backend)?);
                }
                // A partial character always gets the rest of its bytes.
                Err(ParseError::Incomplete) if self.pending[0] != 0x1b => {
                    self.pending.push(read_blocking(backend)?);
                }
                Err(ParseError::Incomplete) => {
                    let byte = backend
                        .read_byte(Some(self.escape_delay))
                        .map_err(Error::InputStream)?;
                    if let Some(byte) = byte {
                        self.pending.push(byte);
                        continue;
                    }
                    // Nothing followed in time: the ESC was the Escape key.
                    self.pending.remove(0);
                    return Ok(KeyEvent::key(KeyCode::Esc));
                }
                Err(err) => {
                    let len = err.discard_len().clamp(1, self.pending.len());
                    debug!(bytes = ?&self.pending[..len], ?err, "discarding undecodable input");
                    self.pending.drain(..len);
                }
            }
        }
    }

    /// Bytes read but not yet decoded.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }
}

fn read_blocking<B: Backend>(backend: &mut B) -> Result<u8> {
    backend
        .read_byte(None)
        .map_err(Error::InputStream)?
        .ok_or_else(|| {
            Error::InputStream(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "blocking read returned no data",
            ))
        })
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::HeadlessBackend;
    use serde_json::json;

    fn keys(input: &[u8], count: usize) -> Vec<KeyEvent> {
        let mut backend = HeadlessBackend::new(80, 24);
        backend.push_input(input);
        let mut reader = InputReader::default();
        (0..count)
            .map(|_| reader.read_key(&mut backend).unwrap())
            .collect()
    }

    // ============================================
    // Flow conversion
    // ============================================

    #[test]
    fn test_bool_and_flow() {
        assert_eq!(true.into_flow().unwrap(), Flow::Continue);
        assert_eq!(false.into_flow().unwrap(), Flow::Stop);
        assert_eq!(Flow::Stop.into_flow().unwrap(), Flow::Stop);
    }

    #[test]
    fn test_value_must_be_boolean() {
        assert_eq!(json!(true).into_flow().unwrap(), Flow::Continue);
        let err = json!(1).into_flow().unwrap_err();
        assert!(matches!(err, Error::CallbackContract { .. }));
        assert!(err.to_string().contains("number"));
        assert!(json!(null).into_flow().is_err());
    }

    #[test]
    fn test_err_result_is_callback_failure() {
        let result: std::result::Result<bool, String> = Err("boom".to_string());
        let err = result.into_flow().unwrap_err();
        assert!(matches!(err, Error::CallbackContract { source: Some(_), .. }));

        let ok: std::result::Result<Flow, String> = Ok(Flow::Continue);
        assert_eq!(ok.into_flow().unwrap(), Flow::Continue);
    }

    // ============================================
    // LineBuffer
    // ============================================

    #[test]
    fn test_line_buffer_edit_sequence() {
        let mut line = LineBuffer::default();
        line.apply(&KeyEvent::char('a'));
        assert_eq!(line.as_str(), "a");
        line.apply(&KeyEvent::char('b'));
        assert_eq!(line.as_str(), "ab");
        line.apply(&KeyEvent::key(KeyCode::Backspace));
        assert_eq!(line.as_str(), "a");
        line.apply(&KeyEvent::char('c'));
        assert_eq!(line.as_str(), "ac");
    }

    #[test]
    fn test_line_buffer_backspace_on_empty() {
        let mut line = LineBuffer::default();
        line.apply(&KeyEvent::key(KeyCode::Backspace));
        assert!(line.is_empty());
    }

    #[test]
    fn test_line_buffer_ignores_non_printable() {
        let mut line = LineBuffer::default();
        line.apply(&KeyEvent::char('x'));
        line.apply(&KeyEvent::key(KeyCode::Up));
        line.apply(&KeyEvent::key(KeyCode::Enter));
        line.apply(&KeyEvent::key(KeyCode::Tab));
        assert_eq!(line.as_str(), "x");
    }

    #[test]
    fn test_line_buffer_drops_when_full() {
        let mut line = LineBuffer::new(3);
        for c in "abcd".chars() {
            line.apply(&KeyEvent::char(c));
        }
        assert_eq!(line.as_str(), "abc");
        // Multi-byte char does not fit in the remaining space either.
        let mut line = LineBuffer::new(2);
        line.push('a');
        assert!(!line.push('é'));
        assert_eq!(line.len(), 1);
    }

    #[test]
    fn test_line_buffer_pops_whole_characters() {
        let mut line = LineBuffer::default();
        line.push('a');
        line.push('漢');
        line.apply(&KeyEvent::key(KeyCode::Backspace));
        assert_eq!(line.as_str(), "a");
    }

    // ============================================
    // InputReader
    // ============================================

    #[test]
    fn test_reader_decodes_sequences() {
        let got = keys(b"a\x1b[A\x1bOB\r", 4);
        assert_eq!(
            got,
            vec![
                KeyEvent::char('a'),
                KeyEvent::key(KeyCode::Up),
                KeyEvent::key(KeyCode::Down),
                KeyEvent::key(KeyCode::Enter),
            ]
        );
    }

    #[test]
    fn test_reader_lone_escape_times_out() {
        let got = keys(b"\x1b", 1);
        assert_eq!(got, vec![KeyEvent::key(KeyCode::Esc)]);
    }

    #[test]
    fn test_reader_escape_then_char() {
        let got = keys(b"\x1bq", 2);
        assert_eq!(got, vec![KeyEvent::key(KeyCode::Esc), KeyEvent::char('q')]);
    }

    #[test]
    fn test_reader_discards_unrecognized() {
        let got = keys(b"\x1b[99~\x80z", 1);
        assert_eq!(got, vec![KeyEvent::char('z')]);
    }

    #[test]
    fn test_reader_incomplete_utf8_is_dropped() {
        let mut backend = HeadlessBackend::new(80, 24);
        backend.push_input(&"漢".as_bytes()[..2]);
        backend.push_input(b"k");
        let mut reader = InputReader::default();
        // 'k' cannot continue the character, so the partial bytes are discarded.
        assert_eq!(reader.read_key(&mut backend).unwrap(), KeyEvent::char('k'));
        assert!(reader.pending().is_empty());
    }

    #[test]
    fn test_reader_waits_for_rest_of_character() {
        let mut backend = HeadlessBackend::new(80, 24);
        let bytes = "漢".as_bytes();
        backend.push_input(&bytes[..2]);
        let mut reader = InputReader::new(Duration::from_millis(1));

        // No escape timeout applies: the read blocks and keeps the lead bytes.
        let err = reader.read_key(&mut backend).unwrap_err();
        assert!(matches!(err, Error::InputStream(_)));
        assert_eq!(reader.pending(), &bytes[..2]);

        backend.push_input(&bytes[2..]);
        assert_eq!(reader.read_key(&mut backend).unwrap(), KeyEvent::char('漢'));
        assert!(reader.pending().is_empty());
    }

    #[test]
    fn test_reader_end_of_input() {
        let mut backend = HeadlessBackend::new(80, 24);
        let mut reader = InputReader::default();
        let err = reader.read_key(&mut backend).unwrap_err();
        assert!(matches!(err, Error::InputStream(_)));
    }
}
