//! Keyboard input decoding and dispatch support.
//!
//! Bytes from the backend go through [`InputParser`] (legacy VT key
//! sequences) and come out as [`KeyEvent`]s; [`InputReader`] adds blocking
//! reads and escape-key disambiguation on top.

mod dispatch;
mod keyboard;
mod parser;

pub use dispatch::{
    DEFAULT_ESCAPE_DELAY, DEFAULT_LINE_CAPACITY, DispatchResult, Flow, InputReader, LineBuffer,
};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, MAX_SEQUENCE_LEN, ParseError, ParseResult};
