//! Error types for termwin.

use crate::window::WindowHandle;
use std::fmt;
use std::io;

/// Result type alias for termwin operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by caller-supplied dispatch logic.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for termwin operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal output or mode switching.
    Io(io::Error),
    /// Requested rectangle (or position inside a window) does not fit its parent.
    InvalidGeometry {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds: (u32, u32),
    },
    /// Out-of-range enum value or malformed argument.
    InvalidArgument(String),
    /// Color pair id outside `[1, MAX_PAIRS]`.
    InvalidColorPair { pair: i64, max: u16 },
    /// Operation through a handle whose window was destroyed.
    UseAfterDestroy(WindowHandle),
    /// Unrecoverable failure reading the input stream.
    InputStream(io::Error),
    /// Dispatch logic failed or returned something other than a boolean.
    CallbackContract {
        message: String,
        source: Option<BoxError>,
    },
}

impl Error {
    pub(crate) fn callback(message: impl Into<String>) -> Self {
        Self::CallbackContract {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn callback_failed(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self::CallbackContract {
            message: format!("dispatch callback failed: {source}"),
            source: Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidGeometry {
                x,
                y,
                width,
                height,
                bounds: (bw, bh),
            } => {
                write!(
                    f,
                    "invalid geometry: {width}x{height} at ({x}, {y}) does not fit {bw}x{bh}"
                )
            }
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::InvalidColorPair { pair, max } => {
                write!(f, "invalid color pair {pair}: expected 1..={max}")
            }
            Self::UseAfterDestroy(handle) => {
                write!(f, "window {handle} was used after being destroyed")
            }
            Self::InputStream(e) => write!(f, "error reading input: {e}"),
            Self::CallbackContract { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::InputStream(e) => Some(e),
            Self::CallbackContract {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
