//! `termwin` - bordered text windows on a character terminal
//!
//! A small windowing toolkit for scripting hosts: create bordered windows on
//! a shared cell screen, print into them, move and resize them, color them
//! with registered color pairs, and drive them from a blocking keyboard loop.
//!
//! # Examples
//!
//! ```
//! use termwin::{Color, Surface, WindowSpec};
//!
//! # fn main() -> termwin::Result<()> {
//! let mut surface = Surface::headless(40, 10);
//! surface.register_color_pair(1, Color::Yellow, Color::Blue)?;
//!
//! let win = surface.create_window(WindowSpec::new(20, 4).at(1, 1))?;
//! surface.set_color(win, 1)?;
//! surface.print(win, 1, 1, "status: ok")?;
//! surface.move_window(win, 10, 3)?;
//! assert_eq!(surface.char_at(win, 1, 1)?, Some('s'));
//! surface.destroy(win)?;
//! # Ok(())
//! # }
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow Cell::CellContent etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod error;
pub mod event;
pub mod input;
pub mod style;
pub mod surface;
pub mod terminal;
pub mod window;

// Re-export core types at crate root
pub use cell::{Cell, CellContent};
pub use color::{Color, ColorPair, ColorPairRegistry, MAX_PAIRS, PairId};
pub use error::{Error, Result};
pub use event::{SurfaceEvent, clear_event_callback, emit_event, set_event_callback};
pub use style::TextAttributes;

// Re-export input types
pub use input::{
    DispatchResult, Flow, InputParser, InputReader, KeyCode, KeyEvent, KeyModifiers, LineBuffer,
};

// Re-export commonly used types
pub use buffer::{BorderStyle, BoxStyle, CellBuffer, Rect};
pub use surface::{RootWindow, Surface, SurfaceOptions};
pub use terminal::{Backend, CursorVisibility, HeadlessBackend, TtyBackend, is_tty};
pub use window::{Window, WindowHandle, WindowSpec};
