//! ANSI escape sequence generation.
//!
//! Colors are palette indices: the 8 base colors use the classic 30-37 /
//! 40-47 codes, the bright half of the 16-color palette uses 90-97 / 100-107,
//! and anything above goes through the 256-color form. "No color" is the
//! terminal default (39 / 49).

pub mod output;
pub mod sequences;

pub use output::AnsiWriter;
pub use sequences::*;

use crate::color::Color;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Write a u8 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits to a writer without formatting overhead.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if n < 10 {
        return w.write_all(&[b'0' + n as u8]);
    }
    if n < 100 {
        return w.write_all(&[b'0' + (n / 10) as u8, b'0' + (n % 10) as u8]);
    }

    // max u32 is 4294967295 (10 digits)
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

/// Write one palette color as SGR. `base` is 30 for foreground, 40 for background.
fn write_palette_color(w: &mut impl Write, color: Option<Color>, base: u8) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    match color.map(Color::index) {
        None => write_u8_decimal(w, base + 9)?,
        Some(idx) if idx < 8 => write_u8_decimal(w, base + idx)?,
        Some(idx) if idx < 16 => write_u8_decimal(w, base + 60 + idx - 8)?,
        Some(idx) => {
            write_u8_decimal(w, base + 8)?;
            w.write_all(b";5;")?;
            write_u8_decimal(w, idx)?;
        }
    }
    w.write_all(b"m")
}

/// Write SGR sequence for a foreground color (`None` = terminal default).
pub fn write_fg_color(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    write_palette_color(w, color, 30)
}

/// Write SGR sequence for a background color (`None` = terminal default).
pub fn write_bg_color(w: &mut impl Write, color: Option<Color>) -> io::Result<()> {
    write_palette_color(w, color, 40)
}

/// Write SGR sequence for text attributes to a writer.
///
/// Only the style flags are written; the color pair bits are ignored.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    const CODES: [(TextAttributes, &str); 8] = [
        (TextAttributes::BOLD, "1"),
        (TextAttributes::DIM, "2"),
        (TextAttributes::ITALIC, "3"),
        (TextAttributes::UNDERLINE, "4"),
        (TextAttributes::BLINK, "5"),
        (TextAttributes::REVERSE, "7"),
        (TextAttributes::HIDDEN, "8"),
        (TextAttributes::STRIKETHROUGH, "9"),
    ];

    let mut first = true;
    for (flag, code) in CODES {
        if !attrs.contains(flag) {
            continue;
        }
        w.write_all(if first { b"\x1b[" } else { b";" })?;
        w.write_all(code.as_bytes())?;
        first = false;
    }
    if first { Ok(()) } else { w.write_all(b"m") }
}

/// Write cursor position sequence (0-indexed input, 1-indexed output).
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row.saturating_add(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, col.saturating_add(1))?;
    w.write_all(b"H")
}

/// Write relative cursor movement to a writer.
pub fn write_cursor_move(w: &mut impl Write, dx: i32, dy: i32) -> io::Result<()> {
    if dy < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"A")?;
    } else if dy > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dy.unsigned_abs())?;
        w.write_all(b"B")?;
    }

    if dx > 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"C")?;
    } else if dx < 0 {
        w.write_all(b"\x1b[")?;
        write_u32_decimal(w, dx.unsigned_abs())?;
        w.write_all(b"D")?;
    }
    Ok(())
}
