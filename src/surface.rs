//! The display surface: terminal setup, windows, colors and input loops.
//!
//! A [`Surface`] owns a [`Backend`] and two cell grids. The virtual screen is
//! what windows draw into; the physical screen mirrors what was last sent to
//! the terminal. Windows are viewports onto the shared virtual screen, so
//! overlapping windows see each other's cells. Refreshing a window diffs its
//! rectangle against the physical screen and writes only changed cells.
//!
//! # Examples
//!
//! ```
//! use termwin::{Flow, Surface, WindowSpec};
//!
//! # fn main() -> termwin::Result<()> {
//! let mut surface = Surface::headless(80, 24);
//! let win = surface.create_window(WindowSpec::new(20, 5).at(2, 1))?;
//! surface.print(win, 1, 1, "hello")?;
//! assert_eq!(surface.char_at(win, 1, 1)?, Some('h'));
//!
//! surface.backend_mut().push_input(b"q");
//! surface.on_key(|_surface, key| if key == "q" { Flow::Stop } else { Flow::Continue })?;
//! # Ok(())
//! # }
//! ```

use crate::ansi::{self, AnsiWriter};
use crate::buffer::{BorderStyle, BoxStyle, CellBuffer, Rect};
use crate::cell::Cell;
use crate::color::{Color, ColorPairRegistry, PairId};
use crate::error::{Error, Result};
use crate::event::{SurfaceEvent, emit_event};
use crate::input::{
    DEFAULT_ESCAPE_DELAY, DEFAULT_LINE_CAPACITY, DispatchResult, Flow, InputReader, KeyEvent,
    LineBuffer,
};
use crate::style::TextAttributes;
use crate::terminal::{Backend, CursorVisibility, HeadlessBackend, TtyBackend};
use crate::window::{Window, WindowArena, WindowHandle, WindowSpec};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Physical-screen marker that never equals a real cell, forcing a repaint.
const STALE: Cell = Cell::new('\0', TextAttributes::from_bits_retain(u32::MAX));

/// Surface configuration options.
///
/// These options control terminal setup when the surface is initialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Use the alternate screen buffer.
    pub use_alt_screen: bool,
    /// Emit color pair colors. When off every cell uses the terminal default.
    pub colors: bool,
    /// Border drawn around every window.
    pub border: BorderStyle,
    /// How long a lone ESC waits for the rest of a sequence.
    pub escape_delay: Duration,
    /// Byte capacity of the raw-mode line buffer.
    pub line_capacity: usize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            use_alt_screen: true,
            colors: true,
            border: BorderStyle::default(),
            escape_delay: DEFAULT_ESCAPE_DELAY,
            line_capacity: DEFAULT_LINE_CAPACITY,
        }
    }
}

impl SurfaceOptions {
    /// Defaults adjusted by the environment.
    ///
    /// A non-empty `NO_COLOR` disables colors; `ESCDELAY` (milliseconds)
    /// overrides the escape delay.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            options.colors = false;
        }
        if let Some(raw) = lookup("ESCDELAY") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => options.escape_delay = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring unparsable ESCDELAY"),
            }
        }
        options
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Uninit,
    Ready,
}

/// Live view of the full terminal.
///
/// Each accessor queries the backend, so values track terminal resizes.
pub struct RootWindow<'a, B: Backend> {
    backend: &'a B,
}

impl<B: Backend> RootWindow<'_, B> {
    /// Current terminal width in columns.
    pub fn cols(&self) -> Result<u16> {
        Ok(self.backend.size()?.0)
    }

    /// Current terminal height in rows.
    pub fn rows(&self) -> Result<u16> {
        Ok(self.backend.size()?.1)
    }

    /// Current `(cols, rows)`.
    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(self.backend.size()?)
    }
}

/// Character-cell display surface with bordered windows.
///
/// # Terminal Cleanup
///
/// The surface implements [`Drop`] to restore terminal state automatically.
/// For explicit cleanup, call [`restore`](Self::restore).
pub struct Surface<B: Backend = TtyBackend> {
    backend: B,
    options: SurfaceOptions,
    state: State,

    screen: CellBuffer,
    physical: CellBuffer,
    full_repaint: bool,
    windows: WindowArena,
    pairs: ColorPairRegistry,
    cursor: CursorVisibility,

    reader: InputReader,
    scratch: Vec<u8>,
}

impl Surface<TtyBackend> {
    /// Surface on the controlling terminal, configured from the environment.
    ///
    /// Nothing is changed on the terminal until [`init`](Self::init) or the
    /// first window is created.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(TtyBackend::new(), SurfaceOptions::from_env())
    }
}

impl Surface<HeadlessBackend> {
    /// In-memory surface of a fixed size.
    #[must_use]
    pub fn headless(cols: u16, rows: u16) -> Self {
        Self::new(HeadlessBackend::new(cols, rows), SurfaceOptions::default())
    }
}

impl<B: Backend> Surface<B> {
    /// Create an uninitialized surface on `backend`.
    pub fn new(backend: B, options: SurfaceOptions) -> Self {
        Self {
            backend,
            options,
            state: State::Uninit,
            screen: CellBuffer::new(1, 1),
            physical: CellBuffer::new(1, 1),
            full_repaint: false,
            windows: WindowArena::new(),
            pairs: ColorPairRegistry::new(),
            cursor: CursorVisibility::default(),
            reader: InputReader::new(options.escape_delay),
            scratch: Vec::with_capacity(4096),
        }
    }

    // ============================================
    // Lifecycle
    // ============================================

    /// Put the terminal into the surface's mode. Later calls are no-ops.
    ///
    /// After [`restore`](Self::restore) this sets the terminal up again and
    /// the next flush repaints every window.
    pub fn init(&mut self) -> Result<()> {
        if self.state == State::Ready {
            return Ok(());
        }

        let (cols, rows) = self.backend.size()?;
        self.backend.enter_input_mode()?;

        let mut setup = String::new();
        if self.options.use_alt_screen {
            setup.push_str(ansi::ALT_SCREEN_ON);
        }
        setup.push_str(ansi::KEYPAD_ON);
        setup.push_str(ansi::RESET);
        setup.push_str(ansi::CLEAR_SCREEN);
        setup.push_str(ansi::CURSOR_HOME);
        if self.cursor != CursorVisibility::default() {
            setup.push_str(&self.cursor.sequence());
        }
        self.backend.write_all(setup.as_bytes())?;
        self.backend.flush()?;

        self.fit_screen(u32::from(cols), u32::from(rows));
        self.state = State::Ready;

        debug!(cols, rows, colors = self.options.colors, "surface initialized");
        emit_event(&SurfaceEvent::Initialized { cols, rows });
        Ok(())
    }

    /// Check if [`init`](Self::init) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.state == State::Ready
    }

    /// Undo [`init`](Self::init): reset attributes, show the cursor, leave
    /// keypad mode and the alternate screen, and restore the input mode.
    ///
    /// Windows stay valid; the next `init` sets the terminal up again.
    pub fn restore(&mut self) -> Result<()> {
        if self.state == State::Uninit {
            return Ok(());
        }
        self.state = State::Uninit;

        let mut teardown = String::from(ansi::RESET);
        teardown.push_str(ansi::CURSOR_SHOW);
        teardown.push_str(ansi::KEYPAD_OFF);
        if self.options.use_alt_screen {
            teardown.push_str(ansi::ALT_SCREEN_OFF);
        }
        let written = self
            .backend
            .write_all(teardown.as_bytes())
            .and_then(|()| self.backend.flush());
        let left = self.backend.leave_input_mode();
        debug!("surface restored");
        written?;
        Ok(left?)
    }

    // ============================================
    // Accessors
    // ============================================

    /// Live view of the full terminal.
    pub fn root(&self) -> RootWindow<'_, B> {
        RootWindow {
            backend: &self.backend,
        }
    }

    /// Stored fields of a window.
    pub fn window(&self, handle: WindowHandle) -> Result<&Window> {
        self.windows.get(handle)
    }

    /// Number of live windows.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// The virtual screen windows draw into.
    #[must_use]
    pub fn screen(&self) -> &CellBuffer {
        &self.screen
    }

    /// Registered color pairs.
    #[must_use]
    pub fn color_pairs(&self) -> &ColorPairRegistry {
        &self.pairs
    }

    /// Current global cursor visibility.
    #[must_use]
    pub fn cursor_type(&self) -> CursorVisibility {
        self.cursor
    }

    #[must_use]
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ============================================
    // Window management
    // ============================================

    /// Create a bordered window. Initializes the surface if needed.
    ///
    /// The border is drawn into the virtual screen; nothing reaches the
    /// terminal until the window is refreshed.
    pub fn create_window(&mut self, spec: WindowSpec) -> Result<WindowHandle> {
        let bounds = self.sync_size()?;
        let rect = spec.rect();
        check_fits(rect, bounds)?;

        self.screen
            .draw_box(rect, self.border(), TextAttributes::empty());
        let handle = self.windows.insert(Window::new(rect));

        debug!(%handle, x = rect.x, y = rect.y, width = rect.width, height = rect.height, "window created");
        emit_event(&SurfaceEvent::WindowCreated {
            handle,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        });
        Ok(handle)
    }

    /// Flush the window's changed cells and park the terminal cursor at the
    /// window cursor.
    pub fn refresh(&mut self, handle: WindowHandle) -> Result<()> {
        self.sync_size()?;
        let window = self.windows.get(handle)?;
        let rect = window.rect();
        let (cx, cy) = window.cursor();
        self.flush_rect(rect, Some((rect.x + cx, rect.y + cy)))
    }

    /// Erase the window, redraw its border, and repaint it in full.
    pub fn clear(&mut self, handle: WindowHandle) -> Result<()> {
        let rect = self.windows.get(handle)?.rect();
        self.screen.fill_rect(rect, Cell::BLANK);
        self.screen
            .draw_box(rect, self.border(), TextAttributes::empty());
        self.physical.fill_rect(rect, STALE);
        self.refresh(handle)
    }

    /// Write `text` at local `(x, y)` with the window's attributes, then refresh.
    ///
    /// Text is cut at the window's right edge; line breaks are skipped.
    pub fn print(&mut self, handle: WindowHandle, x: u32, y: u32, text: &str) -> Result<()> {
        self.sync_size()?;
        let window = self.windows.get_mut(handle)?;
        let (sx, sy) = local_to_surface(window, x, y)?;
        let rect = window.rect();
        let end = self
            .screen
            .draw_text(sx, sy, text, window.attributes(), rect);
        window.cursor = ((end - rect.x).min(rect.width - 1), y);
        trace!(%handle, x, y, len = text.len(), "print");
        self.refresh(handle)
    }

    /// Move the window cursor to local `(x, y)`, then refresh.
    pub fn set_cursor(&mut self, handle: WindowHandle, x: u32, y: u32) -> Result<()> {
        let window = self.windows.get_mut(handle)?;
        local_to_surface(window, x, y)?;
        window.cursor = (x, y);
        self.refresh(handle)
    }

    /// Displayed character at local `(x, y)`; `None` outside the window or
    /// on the second half of a wide character.
    pub fn char_at(&self, handle: WindowHandle, x: u32, y: u32) -> Result<Option<char>> {
        let window = self.windows.get(handle)?;
        Ok(window
            .to_surface(x, y)
            .and_then(|(sx, sy)| self.screen.get(sx, sy))
            .and_then(Cell::ch))
    }

    /// Move the window, carrying its content along.
    ///
    /// The old area is blanked on the terminal before the content is drawn
    /// at the new position.
    pub fn move_window(&mut self, handle: WindowHandle, x: u32, y: u32) -> Result<()> {
        let bounds = self.sync_size()?;
        let old = self.windows.get(handle)?.rect();
        let target = old.at(x, y);
        check_fits(target, bounds)?;

        let snapshot = self.screen.snapshot(old);
        self.screen.fill_rect(old, Cell::BLANK);
        self.screen
            .draw_box(old, BoxStyle::BLANK, TextAttributes::empty());
        self.flush_rect(old, None)?;

        self.windows.get_mut(handle)?.rect = target;
        self.screen.restore(target, &snapshot);
        self.screen
            .draw_box(target, self.border(), TextAttributes::empty());
        self.refresh(handle)?;

        debug!(%handle, x, y, "window moved");
        emit_event(&SurfaceEvent::WindowMoved { handle, x, y });
        Ok(())
    }

    /// Change the window's size in place. Content is not preserved or redrawn.
    pub fn resize(&mut self, handle: WindowHandle, width: u32, height: u32) -> Result<()> {
        let bounds = self.sync_size()?;
        let window = self.windows.get_mut(handle)?;
        let target = Rect::new(window.x(), window.y(), width, height);
        check_fits(target, bounds)?;

        window.rect = target;
        let (cx, cy) = window.cursor;
        window.cursor = (cx.min(width - 1), cy.min(height - 1));
        self.refresh(handle)?;

        debug!(%handle, width, height, "window resized");
        emit_event(&SurfaceEvent::WindowResized {
            handle,
            width,
            height,
        });
        Ok(())
    }

    /// Erase the window and its border from the terminal and release it.
    ///
    /// The handle, and every copy of it, is invalid afterwards.
    pub fn destroy(&mut self, handle: WindowHandle) -> Result<()> {
        self.sync_size()?;
        let rect = self.windows.get(handle)?.rect();
        self.screen.fill_rect(rect, Cell::BLANK);
        self.screen
            .draw_box(rect, BoxStyle::BLANK, TextAttributes::empty());
        self.flush_rect(rect, None)?;
        self.windows.remove(handle)?;

        debug!(%handle, "window destroyed");
        emit_event(&SurfaceEvent::WindowDestroyed { handle });
        Ok(())
    }

    // ============================================
    // Attributes and colors
    // ============================================

    /// Set the global cursor visibility: 0 hidden, 1 visible, 2 blinking.
    pub fn set_cursor_type(&mut self, mode: i32) -> Result<()> {
        let cursor = CursorVisibility::try_from(mode)?;
        self.backend.write_all(cursor.sequence().as_bytes())?;
        self.backend.flush()?;
        self.cursor = cursor;
        Ok(())
    }

    /// Register (or overwrite) color pair `id`.
    ///
    /// Cells already drawn with the pair are repainted on their next refresh.
    pub fn register_color_pair(&mut self, id: i64, fg: Color, bg: Color) -> Result<PairId> {
        let pair = self.pairs.register(id, fg, bg)?;
        for y in 0..self.screen.height() {
            for x in 0..self.screen.width() {
                let uses_pair = self
                    .screen
                    .get(x, y)
                    .is_some_and(|cell| cell.attributes.color_pair() == Some(pair));
                if uses_pair {
                    self.physical.set(x, y, STALE);
                }
            }
        }
        debug!(pair = pair.get(), ?fg, ?bg, "color pair registered");
        Ok(pair)
    }

    /// Make `pair` the window's active color pair, replacing the previous one.
    pub fn set_color(&mut self, handle: WindowHandle, pair: i64) -> Result<()> {
        let window = self.windows.get_mut(handle)?;
        let pair = PairId::new(pair)?;
        if let Some(previous) = window.color_pair {
            window.attributes.attr_off(TextAttributes::pair(previous));
        }
        window.attributes.attr_on(TextAttributes::pair(pair));
        window.color_pair = Some(pair);
        trace!(%handle, pair = pair.get(), "color set");
        Ok(())
    }

    /// Turn off the window's color pair, if any.
    pub fn clear_color(&mut self, handle: WindowHandle) -> Result<()> {
        let window = self.windows.get_mut(handle)?;
        if let Some(previous) = window.color_pair.take() {
            window.attributes.attr_off(TextAttributes::pair(previous));
        }
        Ok(())
    }

    /// Turn on style flags for subsequent writes. Color pair bits are ignored.
    pub fn attr_on(&mut self, handle: WindowHandle, attrs: TextAttributes) -> Result<()> {
        self.windows
            .get_mut(handle)?
            .attributes
            .attr_on(attrs.flags_only());
        Ok(())
    }

    /// Turn off style flags for subsequent writes. Color pair bits are ignored.
    pub fn attr_off(&mut self, handle: WindowHandle, attrs: TextAttributes) -> Result<()> {
        self.windows
            .get_mut(handle)?
            .attributes
            .attr_off(attrs.flags_only());
        Ok(())
    }

    // ============================================
    // Input loops
    // ============================================

    /// Raw line mode: feed every key into a bounded line buffer and hand the
    /// buffer's text to `callback` after each one.
    ///
    /// Runs until the callback returns `false`/[`Flow::Stop`], returns a
    /// non-boolean, fails, or input ends.
    pub fn on_input<F, R>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&mut Self, &str) -> R,
        R: DispatchResult,
    {
        let mut line = LineBuffer::new(self.options.line_capacity);
        self.run_loop(|surface, key| {
            line.apply(&key);
            callback(surface, line.as_str())
        })
    }

    /// Structured key mode: hand each key's name (`"UP"`, `"F5"`, ...) or
    /// literal text to `callback`.
    pub fn on_key<F, R>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&mut Self, &str) -> R,
        R: DispatchResult,
    {
        self.run_loop(|surface, key| callback(surface, &key.dispatch_text()))
    }

    fn run_loop<F, R>(&mut self, mut dispatch: F) -> Result<()>
    where
        F: FnMut(&mut Self, KeyEvent) -> R,
        R: DispatchResult,
    {
        self.init()?;
        emit_event(&SurfaceEvent::LoopStarted);

        let mut dispatched = 0u64;
        loop {
            let key = match self.reader.read_key(&mut self.backend) {
                Ok(key) => key,
                Err(err) => {
                    warn!(%err, dispatched, "input loop aborted");
                    return Err(err);
                }
            };
            dispatched += 1;
            match dispatch(self, key).into_flow() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(err) => {
                    warn!(%err, dispatched, "input loop aborted");
                    return Err(err);
                }
            }
        }

        debug!(dispatched, "input loop terminated");
        emit_event(&SurfaceEvent::LoopTerminated { dispatched });
        Ok(())
    }

    // ============================================
    // Internals
    // ============================================

    fn border(&self) -> BoxStyle {
        self.options.border.box_style()
    }

    /// Set the terminal up if needed, then re-read its size and follow any
    /// change. Returns the size.
    fn sync_size(&mut self) -> Result<(u32, u32)> {
        self.init()?;
        let (cols, rows) = self.backend.size()?;
        let size = (u32::from(cols), u32::from(rows));
        if size == self.screen.size() {
            return Ok(size);
        }

        debug!(cols, rows, "terminal resized");
        self.fit_screen(size.0, size.1);
        self.backend.write_all(ansi::CLEAR_SCREEN.as_bytes())?;
        Ok(size)
    }

    /// Size the virtual screen to `width` x `height`, keeping the overlap,
    /// after the terminal has been cleared.
    ///
    /// Every window's cells are gone from the terminal, so the next flush
    /// covers the whole screen rather than one window.
    fn fit_screen(&mut self, width: u32, height: u32) {
        if self.screen.size() != (width, height) {
            let mut screen = CellBuffer::new(width, height);
            let keep = Rect::new(
                0,
                0,
                width.min(self.screen.width()),
                height.min(self.screen.height()),
            );
            screen.restore(keep, &self.screen.snapshot(keep));
            self.screen = screen;
        }
        self.physical = CellBuffer::new(width, height);
        self.full_repaint = true;
    }

    /// Send the changed cells of `rect` to the terminal.
    fn flush_rect(&mut self, rect: Rect, cursor: Option<(u32, u32)>) -> Result<()> {
        let rect = if std::mem::take(&mut self.full_repaint) {
            self.screen.bounds()
        } else {
            rect
        };
        self.scratch.clear();
        let mut writer = AnsiWriter::with_colors(&mut self.scratch, self.options.colors);
        writer.home();

        if let Some(area) = rect.intersect(&self.screen.bounds()) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    let Some(&cell) = self.screen.get(x, y) else {
                        continue;
                    };
                    if self.physical.get(x, y) == Some(&cell) {
                        continue;
                    }
                    self.physical.set(x, y, cell);
                    if !cell.is_continuation() {
                        writer.write_cell_at(y, x, &cell, &self.pairs);
                    }
                }
            }
        }

        writer.reset();
        if let Some((cx, cy)) = cursor {
            writer.move_cursor(cy, cx);
        }
        writer.flush()?;

        self.backend.write_all(&self.scratch)?;
        self.backend.flush()?;
        Ok(())
    }
}

impl<B: Backend> Drop for Surface<B> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn check_fits(rect: Rect, (width, height): (u32, u32)) -> Result<()> {
    if rect.fits_within(width, height) {
        Ok(())
    } else {
        Err(Error::InvalidGeometry {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            bounds: (width, height),
        })
    }
}

fn local_to_surface(window: &Window, x: u32, y: u32) -> Result<(u32, u32)> {
    window.to_surface(x, y).ok_or(Error::InvalidGeometry {
        x,
        y,
        width: 1,
        height: 1,
        bounds: (window.width(), window.height()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Surface<HeadlessBackend> {
        Surface::headless(80, 24)
    }

    fn output(surface: &mut Surface<HeadlessBackend>) -> String {
        String::from_utf8_lossy(&surface.backend_mut().take_output()).into_owned()
    }

    // ============================================
    // SurfaceOptions
    // ============================================

    #[test]
    fn test_options_default() {
        let options = SurfaceOptions::default();
        assert!(options.use_alt_screen);
        assert!(options.colors);
        assert_eq!(options.border, BorderStyle::Single);
        assert_eq!(options.escape_delay, Duration::from_millis(25));
        assert_eq!(options.line_capacity, 256);
    }

    #[test]
    fn test_options_from_lookup() {
        let options = SurfaceOptions::from_lookup(|name| match name {
            "NO_COLOR" => Some("1".to_string()),
            "ESCDELAY" => Some("100".to_string()),
            _ => None,
        });
        assert!(!options.colors);
        assert_eq!(options.escape_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_options_ignore_empty_no_color_and_bad_delay() {
        let options = SurfaceOptions::from_lookup(|name| match name {
            "NO_COLOR" => Some(String::new()),
            "ESCDELAY" => Some("soon".to_string()),
            _ => None,
        });
        assert!(options.colors);
        assert_eq!(options.escape_delay, DEFAULT_ESCAPE_DELAY);
    }

    // ============================================
    // Lifecycle
    // ============================================

    #[test]
    fn test_init_is_idempotent() {
        let mut surface = surface();
        assert!(!surface.is_initialized());
        surface.init().unwrap();
        let first = output(&mut surface);
        assert!(first.contains(ansi::KEYPAD_ON));
        assert!(first.contains(ansi::ALT_SCREEN_ON));
        assert!(surface.backend().is_input_mode());

        surface.init().unwrap();
        assert!(output(&mut surface).is_empty());
    }

    #[test]
    fn test_restore_undoes_init() {
        let mut surface = surface();
        surface.init().unwrap();
        surface.backend_mut().take_output();
        surface.restore().unwrap();
        let out = output(&mut surface);
        assert!(out.contains(ansi::KEYPAD_OFF));
        assert!(out.contains(ansi::ALT_SCREEN_OFF));
        assert!(out.contains(ansi::CURSOR_SHOW));
        assert!(!surface.backend().is_input_mode());
        assert!(!surface.is_initialized());
    }

    #[test]
    fn test_reinit_after_restore_keeps_windows() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 3)).unwrap();
        surface.print(win, 1, 1, "hi").unwrap();
        surface.restore().unwrap();

        surface.init().unwrap();
        assert_eq!(surface.char_at(win, 0, 0).unwrap(), Some('┌'));
        assert_eq!(surface.char_at(win, 1, 1).unwrap(), Some('h'));
        assert!(surface.backend().is_input_mode());
    }

    #[test]
    fn test_drawing_after_restore_reinits() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 3)).unwrap();
        surface.set_cursor_type(0).unwrap();
        surface.restore().unwrap();
        surface.backend_mut().take_output();

        surface.print(win, 1, 1, "x").unwrap();
        assert!(surface.is_initialized());
        assert!(surface.backend().is_input_mode());
        let out = output(&mut surface);
        assert!(out.contains(ansi::ALT_SCREEN_ON));
        assert!(out.contains(ansi::CURSOR_HIDE));
    }

    #[test]
    fn test_root_reads_live_size() {
        let mut surface = surface();
        assert_eq!(surface.root().cols().unwrap(), 80);
        surface.backend_mut().resize(100, 30);
        assert_eq!(surface.root().cols().unwrap(), 100);
        assert_eq!(surface.root().rows().unwrap(), 30);
    }

    // ============================================
    // Geometry
    // ============================================

    #[test]
    fn test_create_window_draws_border_without_flushing() {
        let mut surface = surface();
        surface.init().unwrap();
        surface.backend_mut().take_output();

        let win = surface.create_window(WindowSpec::new(4, 3)).unwrap();
        assert!(surface.screen().row_text(0).starts_with("┌──┐ "));
        assert!(output(&mut surface).is_empty());
        assert_eq!(surface.window(win).unwrap().color_pair(), None);
    }

    #[test]
    fn test_create_window_rejects_bad_geometry() {
        let mut surface = surface();
        let err = surface
            .create_window(WindowSpec::new(10, 5).at(75, 0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { x: 75, bounds: (80, 24), .. }));
        assert!(surface.create_window(WindowSpec::new(0, 5)).is_err());
        assert!(surface.create_window(WindowSpec::new(5, 0)).is_err());
        assert_eq!(surface.window_count(), 0);
    }

    #[test]
    fn test_print_truncates_and_moves_cursor() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(6, 3)).unwrap();
        surface.print(win, 1, 1, "abcdefgh").unwrap();
        assert_eq!(surface.char_at(win, 5, 1).unwrap(), Some('e'));
        assert_eq!(surface.screen().get(6, 1).unwrap().ch(), Some(' '));
        assert_eq!(surface.window(win).unwrap().cursor(), (5, 1));
    }

    #[test]
    fn test_print_outside_window_fails() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(6, 3)).unwrap();
        assert!(matches!(
            surface.print(win, 6, 0, "x"),
            Err(Error::InvalidGeometry { .. })
        ));
        assert!(surface.set_cursor(win, 0, 3).is_err());
    }

    #[test]
    fn test_resize_clamps_cursor() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 5)).unwrap();
        surface.set_cursor(win, 8, 4).unwrap();
        surface.resize(win, 4, 2).unwrap();
        let window = surface.window(win).unwrap();
        assert_eq!((window.width(), window.height()), (4, 2));
        assert_eq!(window.cursor(), (3, 1));
    }

    // ============================================
    // Colors
    // ============================================

    #[test]
    fn test_set_color_replaces_previous_pair() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 5)).unwrap();
        surface.set_color(win, 1).unwrap();
        surface.set_color(win, 2).unwrap();
        let window = surface.window(win).unwrap();
        assert_eq!(window.color_pair().map(PairId::get), Some(2));
        assert_eq!(window.attributes().color_pair().map(PairId::get), Some(2));
    }

    #[test]
    fn test_set_color_checks_handle_before_pair() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 5)).unwrap();
        surface.destroy(win).unwrap();
        assert!(matches!(
            surface.set_color(win, 0),
            Err(Error::UseAfterDestroy(_))
        ));
    }

    #[test]
    fn test_attr_on_ignores_pair_bits() {
        let mut surface = surface();
        let win = surface.create_window(WindowSpec::new(10, 5)).unwrap();
        let pair = PairId::new(4).unwrap();
        surface
            .attr_on(win, TextAttributes::BOLD | TextAttributes::pair(pair))
            .unwrap();
        let attrs = surface.window(win).unwrap().attributes();
        assert_eq!(attrs, TextAttributes::BOLD);
        surface.attr_off(win, TextAttributes::BOLD).unwrap();
        assert!(surface.window(win).unwrap().attributes().is_empty());
    }

    #[test]
    fn test_set_cursor_type() {
        let mut surface = surface();
        surface.set_cursor_type(0).unwrap();
        assert_eq!(surface.cursor_type(), CursorVisibility::Hidden);
        assert!(output(&mut surface).contains(ansi::CURSOR_HIDE));
        assert!(matches!(
            surface.set_cursor_type(3),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(surface.cursor_type(), CursorVisibility::Hidden);
    }

    // ============================================
    // Resize tracking
    // ============================================

    #[test]
    fn test_terminal_growth_allows_larger_windows() {
        let mut surface = surface();
        surface.init().unwrap();
        assert!(surface.create_window(WindowSpec::new(100, 5)).is_err());
        surface.backend_mut().resize(120, 40);
        assert!(surface.create_window(WindowSpec::new(100, 5)).is_ok());
        assert_eq!(surface.screen().size(), (120, 40));
    }
}
