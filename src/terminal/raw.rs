//! Low-level Unix terminal handling.
//!
//! Input mode here is curses' `cbreak` + `noecho`: line buffering and echo
//! are off, but signal characters (^C, ^Z) still reach the process and
//! output post-processing is left alone. Reads block until one byte arrives.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios, ioctl and poll.

#![allow(unsafe_code)]
#![allow(clippy::borrow_as_ptr)]

use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

/// Saved terminal state for restoration.
#[derive(Debug)]
pub struct InputModeGuard {
    fd: RawFd,
    original: libc::termios,
}

impl InputModeGuard {
    /// Switch the given file descriptor to input mode.
    ///
    /// Returns a guard that will restore the terminal state when dropped.
    pub fn new<F: AsRawFd>(fd: &F) -> io::Result<Self> {
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut mode = original;

        // Local modes: echo off, canonical off. ISIG stays set.
        mode.c_lflag &= !(libc::ECHO | libc::ICANON);

        // Input modes: keep CR as CR so Enter is distinguishable.
        mode.c_iflag &= !libc::ICRNL;

        // Block until at least one byte, no inter-byte timer.
        mode.c_cc[libc::VMIN] = 1;
        mode.c_cc[libc::VTIME] = 0;

        set_termios(fd, &mode)?;

        Ok(Self { fd, original })
    }

    /// Restore the original terminal state.
    pub fn restore(&self) -> io::Result<()> {
        set_termios(self.fd, &self.original)
    }
}

impl Drop for InputModeGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Check if the given file descriptor is a TTY.
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get the terminal size of `fd` as `(cols, rows)`.
///
/// Zero dimensions are reported as an error.
pub fn terminal_size(fd: RawFd) -> io::Result<(u16, u16)> {
    let mut size: libc::winsize = unsafe { std::mem::zeroed() };

    // SAFETY: ioctl with TIOCGWINSZ is safe when passed a valid winsize struct
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else if size.ws_col == 0 || size.ws_row == 0 {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "terminal reported zero dimensions",
        ))
    } else {
        Ok((size.ws_col, size.ws_row))
    }
}

/// Read one byte from `fd`.
///
/// With a timeout, waits at most that long and returns `Ok(None)` if nothing
/// arrived. Without one, blocks. End of input is `UnexpectedEof`.
pub fn read_byte(fd: RawFd, timeout: Option<Duration>) -> io::Result<Option<u8>> {
    if let Some(timeout) = timeout {
        if !poll_readable(fd, timeout)? {
            return Ok(None);
        }
    }

    let mut byte = 0u8;
    loop {
        // SAFETY: reading one byte into a valid stack location
        let n = unsafe { libc::read(fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => return Ok(Some(byte)),
            0 => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of terminal input",
                ));
            }
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() != io::ErrorKind::Interrupted {
                    return Err(err);
                }
            }
        }
    }
}

fn poll_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
    loop {
        // SAFETY: one valid pollfd
        let n = unsafe { libc::poll(&mut pfd, 1, millis) };
        if n >= 0 {
            return Ok(n > 0);
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Get termios attributes.
fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

/// Set termios attributes.
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSADRAIN, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
