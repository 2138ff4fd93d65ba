//! Terminal backends.
//!
//! A [`Backend`] is everything the surface needs from a terminal: its live
//! size, an input mode switch, single-byte reads and an output sink. The
//! real implementation is [`TtyBackend`]; [`HeadlessBackend`] scripts all of
//! it in memory for tests and smoke runs.

mod cursor;
mod headless;
mod raw;

pub use cursor::CursorVisibility;
pub use headless::HeadlessBackend;
pub use raw::{InputModeGuard, is_tty, read_byte, terminal_size};

use std::io::{self, Stdin, Stdout, Write};
use std::os::unix::io::AsRawFd;
use std::time::Duration;

/// Terminal operations the display surface is built on.
pub trait Backend: Write {
    /// Current size as `(cols, rows)`. Queried live on every call.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Disable line buffering and echo, keep signals. Idempotent.
    fn enter_input_mode(&mut self) -> io::Result<()>;

    /// Restore the mode saved by [`Backend::enter_input_mode`].
    fn leave_input_mode(&mut self) -> io::Result<()>;

    /// Read one input byte.
    ///
    /// `None` timeout blocks. With a timeout, `Ok(None)` means nothing
    /// arrived in time. End of input is an `UnexpectedEof` error.
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>>;
}

/// Backend on the process's controlling terminal (stdin/stdout).
pub struct TtyBackend {
    input: Stdin,
    output: Stdout,
    guard: Option<InputModeGuard>,
}

impl TtyBackend {
    /// Create a backend on stdin/stdout. Nothing is changed until
    /// [`Backend::enter_input_mode`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            input: io::stdin(),
            output: io::stdout(),
            guard: None,
        }
    }

    /// Check if input mode is active.
    #[must_use]
    pub fn is_input_mode(&self) -> bool {
        self.guard.is_some()
    }
}

impl Default for TtyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for TtyBackend {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

impl Backend for TtyBackend {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal_size(self.output.as_raw_fd()).or_else(|_| terminal_size(self.input.as_raw_fd()))
    }

    fn enter_input_mode(&mut self) -> io::Result<()> {
        if self.guard.is_none() {
            self.guard = Some(InputModeGuard::new(&self.input)?);
        }
        Ok(())
    }

    fn leave_input_mode(&mut self) -> io::Result<()> {
        match self.guard.take() {
            Some(guard) => guard.restore(),
            None => Ok(()),
        }
    }

    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        read_byte(self.input.as_raw_fd(), timeout)
    }
}
