//! In-memory backend with a scripted size and input.

use super::Backend;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

/// Backend that never touches a real terminal.
///
/// Output is captured, input comes from a queue filled with
/// [`push_input`](Self::push_input), and the size can be changed at any time
/// to simulate a terminal resize.
///
/// # Examples
///
/// ```
/// use termwin::terminal::{Backend, HeadlessBackend};
///
/// let mut backend = HeadlessBackend::new(80, 24);
/// backend.push_input(b"q");
/// assert_eq!(backend.read_byte(None).unwrap(), Some(b'q'));
/// assert_eq!(backend.size().unwrap(), (80, 24));
/// ```
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    cols: u16,
    rows: u16,
    input: VecDeque<u8>,
    output: Vec<u8>,
    input_mode: bool,
}

impl HeadlessBackend {
    /// Create a headless terminal of the given size.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            ..Self::default()
        }
    }

    /// Change the reported size.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Queue bytes to be returned by [`Backend::read_byte`].
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Number of queued input bytes.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the captured output, leaving the capture empty.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Check if input mode is active.
    #[must_use]
    pub fn is_input_mode(&self) -> bool {
        self.input_mode
    }
}

impl Write for HeadlessBackend {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        if self.cols == 0 || self.rows == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "terminal reported zero dimensions",
            ));
        }
        Ok((self.cols, self.rows))
    }

    fn enter_input_mode(&mut self) -> io::Result<()> {
        self.input_mode = true;
        Ok(())
    }

    fn leave_input_mode(&mut self) -> io::Result<()> {
        self.input_mode = false;
        Ok(())
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        match (self.input.pop_front(), timeout) {
            (Some(byte), _) => Ok(Some(byte)),
            (None, Some(_)) => Ok(None),
            (None, None) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "headless input exhausted",
            )),
        }
    }
}
