//! Surface lifecycle event callback.
//!
//! Hosts that embed the toolkit (a script runtime, a test harness) can
//! observe window lifecycle changes without polling. Diagnostics go through
//! `tracing`; this channel is for state changes a host may act on.

use crate::window::WindowHandle;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

/// A state change on a display surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface entered input mode and is ready.
    Initialized { cols: u16, rows: u16 },
    WindowCreated {
        handle: WindowHandle,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    WindowMoved { handle: WindowHandle, x: u32, y: u32 },
    WindowResized {
        handle: WindowHandle,
        width: u32,
        height: u32,
    },
    WindowDestroyed { handle: WindowHandle },
    /// An input dispatch loop started.
    LoopStarted,
    /// An input dispatch loop ended because the callback asked it to stop.
    LoopTerminated { dispatched: u64 },
}

type EventCallback = Arc<dyn Fn(&SurfaceEvent) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

/// Set the global event callback, replacing any previous one.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&SurfaceEvent) + Send + Sync + 'static,
{
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::new(callback));
}

/// Remove the global event callback.
pub fn clear_event_callback() {
    let mut guard = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emit an event to the registered callback.
///
/// The callback runs without the registry lock held, so it may set, clear
/// or emit events itself.
pub fn emit_event(event: &SurfaceEvent) {
    let callback = event_callback()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if let Some(callback) = callback {
        callback(event);
    }
}
