//! Shared helpers for the integration tests.

#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)] // Shared test helper; not every integration test uses every utility

pub mod screen;

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use termwin::{HeadlessBackend, Surface, SurfaceOptions};
use tracing::Level;

/// Install a test-writer subscriber once per test binary.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Headless surface with default options.
pub fn surface(cols: u16, rows: u16) -> Surface<HeadlessBackend> {
    init_logging();
    Surface::headless(cols, rows)
}

/// Headless surface with custom options.
pub fn surface_with(cols: u16, rows: u16, options: SurfaceOptions) -> Surface<HeadlessBackend> {
    init_logging();
    Surface::new(HeadlessBackend::new(cols, rows), options)
}

/// Serializes tests that install the global event callback.
pub fn event_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}
