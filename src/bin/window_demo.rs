//! `window_demo` - interactive demonstration of bordered terminal windows
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin window_demo
//! cargo run --bin window_demo -- --line
//! cargo run --bin window_demo -- --headless-smoke
//! ```
//!
//! Key mode: arrows move the window, `c` cycles its color, `+`/`-` resize,
//! `q` quits. Line mode: type, and the line is echoed; type `quit` to exit.

use std::ffi::OsString;
use termwin::{
    Backend, BorderStyle, Color, Flow, HeadlessBackend, Surface, SurfaceOptions, TtyBackend,
    WindowHandle, WindowSpec,
};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "window_demo - bordered terminal windows

USAGE:
    window_demo [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --line                  Raw line mode instead of key mode
    --no-alt-screen         Don't enter alternate screen
    --ascii                 Draw borders with ASCII characters

    --headless-smoke        Run scripted session in memory (no TTY required)

EXAMPLES:
    window_demo                         # Move a window with the arrow keys
    window_demo --line                  # Echo a line buffer
    window_demo --headless-smoke        # CI smoke test
";

/// Application configuration parsed from command-line arguments.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub line_mode: bool,
    pub no_alt_screen: bool,
    pub ascii: bool,
    pub headless_smoke: bool,
}

/// Result of CLI parsing.
pub enum ParseResult {
    /// Successfully parsed configuration.
    Config(Config),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        for arg in args {
            match arg.to_string_lossy().as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--line" => config.line_mode = true,
                "--no-alt-screen" => config.no_alt_screen = true,
                "--ascii" => config.ascii = true,
                "--headless-smoke" => config.headless_smoke = true,
                other => return ParseResult::Error(format!("Unknown option: {other}")),
            }
        }

        ParseResult::Config(config)
    }

    fn options(&self) -> SurfaceOptions {
        let mut options = SurfaceOptions::from_env();
        options.use_alt_screen = !self.no_alt_screen;
        if self.ascii {
            options.border = BorderStyle::Ascii;
        }
        options
    }
}

fn main() -> termwin::Result<()> {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if config.headless_smoke {
                run_headless_smoke(&config)
            } else {
                let mut surface = Surface::new(TtyBackend::new(), config.options());
                run(&mut surface, &config)
            }
        }
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Demo
// ============================================================================

const PALETTE: [(Color, Color); 3] = [
    (Color::White, Color::Blue),
    (Color::Black, Color::Yellow),
    (Color::Green, Color::Black),
];

fn run<B: Backend>(surface: &mut Surface<B>, config: &Config) -> termwin::Result<()> {
    for (id, (fg, bg)) in (1..).zip(PALETTE) {
        surface.register_color_pair(id, fg, bg)?;
    }

    let win = surface.create_window(WindowSpec::new(30, 5).at(2, 1))?;
    surface.set_color(win, 1)?;
    surface.clear(win)?;

    if config.line_mode {
        surface.print(win, 1, 1, "type; 'quit' exits")?;
        surface.on_input(|surface, line| -> termwin::Result<bool> {
            surface.clear(win)?;
            surface.print(win, 1, 1, "> ")?;
            surface.print(win, 3, 1, line)?;
            Ok(line != "quit")
        })
    } else {
        surface.print(win, 1, 1, "arrows move, c color, q quit")?;
        let mut pair = 1;
        surface.on_key(|surface, key| -> termwin::Result<Flow> {
            handle_key(surface, win, &mut pair, key)
        })
    }
}

fn handle_key<B: Backend>(
    surface: &mut Surface<B>,
    win: WindowHandle,
    pair: &mut i64,
    key: &str,
) -> termwin::Result<Flow> {
    let window = surface.window(win)?;
    let (x, y) = (window.x(), window.y());
    let (width, height) = (window.width(), window.height());

    // Moves and resizes that would leave the screen are ignored.
    let outcome = match key {
        "q" => return Ok(Flow::Stop),
        "UP" => surface.move_window(win, x, y.saturating_sub(1)),
        "DOWN" => surface.move_window(win, x, y + 1),
        "LEFT" => surface.move_window(win, x.saturating_sub(1), y),
        "RIGHT" => surface.move_window(win, x + 1, y),
        "+" => surface.resize(win, width + 1, height),
        "-" if width > 3 => surface.resize(win, width - 1, height),
        "c" => {
            *pair = *pair % PALETTE.len() as i64 + 1;
            surface.set_color(win, *pair)?;
            surface.clear(win)?;
            surface.print(win, 1, 1, &format!("pair {pair}"))
        }
        other => surface.print(win, 1, 2, &format!("key: {other:<12}")),
    };
    match outcome {
        Err(termwin::Error::InvalidGeometry { .. }) | Ok(()) => Ok(Flow::Continue),
        Err(err) => Err(err),
    }
}

// ============================================================================
// Headless Smoke Test
// ============================================================================

/// Run a scripted session against an in-memory terminal.
fn run_headless_smoke(config: &Config) -> termwin::Result<()> {
    eprintln!("Running headless smoke test (80x24)...");
    let mut surface = Surface::new(HeadlessBackend::new(80, 24), config.options());
    let script: &[u8] = if config.line_mode {
        b"hello\x7f\x7f\x7f\x7f\x7fquit"
    } else {
        b"\x1b[C\x1b[Bcc+-xq"
    };
    surface.backend_mut().push_input(script);

    run(&mut surface, config)?;

    let screen = surface.screen();
    for y in 0..screen.height() {
        println!("{}", screen.row_text(y).trim_end());
    }

    let written = surface.backend().output().len();
    eprintln!(
        "Headless smoke test passed: {} window(s), {written} bytes written",
        surface.window_count()
    );
    Ok(())
}
