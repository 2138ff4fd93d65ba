//! Window records and the generation-checked arena that owns them.
//!
//! A [`WindowHandle`] is a slot index plus the generation the slot had when
//! the window was created. Destroying a window bumps the slot's generation,
//! so every copy of the old handle fails with
//! [`Error::UseAfterDestroy`](crate::Error::UseAfterDestroy) from then on,
//! even after the slot is reused for a new window.
//!
//! # Examples
//!
//! ```
//! use termwin::window::WindowSpec;
//! use serde_json::json;
//!
//! let spec = WindowSpec::from_value(&json!({"width": 10, "height": 5, "x": 2})).unwrap();
//! assert_eq!((spec.x, spec.y, spec.width, spec.height), (2, 0, 10, 5));
//! ```

use crate::buffer::Rect;
use crate::color::PairId;
use crate::error::{Error, Result};
use crate::style::TextAttributes;
use serde::Deserialize;
use std::fmt;

/// Stable reference to a window owned by a [`Surface`](crate::Surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    index: u32,
    generation: u32,
}

impl WindowHandle {
    /// Slot index inside the arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation this handle was issued for.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

/// Requested window geometry. `x` and `y` default to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct WindowSpec {
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl WindowSpec {
    /// Spec with the given size at the origin.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Same spec at a different position.
    #[must_use]
    pub const fn at(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }

    /// Build a spec from a host map such as `{"width": 10, "height": 5}`.
    ///
    /// Missing or non-numeric `width`/`height` are an
    /// [`Error::InvalidArgument`].
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::InvalidArgument(format!("window spec: {e}")))
    }

    /// The requested rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A bordered viewport onto the surface's virtual screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub(crate) rect: Rect,
    pub(crate) color_pair: Option<PairId>,
    pub(crate) attributes: TextAttributes,
    pub(crate) cursor: (u32, u32),
}

impl Window {
    pub(crate) fn new(rect: Rect) -> Self {
        Self {
            rect,
            color_pair: None,
            attributes: TextAttributes::empty(),
            cursor: (0, 0),
        }
    }

    /// Column of the left edge, relative to the surface.
    #[must_use]
    pub fn x(&self) -> u32 {
        self.rect.x
    }

    /// Row of the top edge, relative to the surface.
    #[must_use]
    pub fn y(&self) -> u32 {
        self.rect.y
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.rect.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.rect.height
    }

    /// Area covered on the surface, border included.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The active color pair, if any.
    #[must_use]
    pub fn color_pair(&self) -> Option<PairId> {
        self.color_pair
    }

    /// Attribute word stamped onto written cells.
    #[must_use]
    pub fn attributes(&self) -> TextAttributes {
        self.attributes
    }

    /// Local cursor position `(x, y)`.
    #[must_use]
    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    /// Surface coordinates of a local position, if it lies inside the window.
    #[must_use]
    pub fn to_surface(&self, x: u32, y: u32) -> Option<(u32, u32)> {
        if x < self.rect.width && y < self.rect.height {
            Some((self.rect.x + x, self.rect.y + y))
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    window: Option<Window>,
}

/// Slot arena with a free list. Slots are reused, generations never repeat
/// for practical purposes.
#[derive(Clone, Debug, Default)]
pub(crate) struct WindowArena {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
}

impl WindowArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, window: Window) -> WindowHandle {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.window = Some(window);
            return WindowHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            window: Some(window),
        });
        WindowHandle {
            index,
            generation: 0,
        }
    }

    fn slot(&self, handle: WindowHandle) -> Option<&Slot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    pub(crate) fn get(&self, handle: WindowHandle) -> Result<&Window> {
        self.slot(handle)
            .and_then(|slot| slot.window.as_ref())
            .ok_or(Error::UseAfterDestroy(handle))
    }

    pub(crate) fn get_mut(&mut self, handle: WindowHandle) -> Result<&mut Window> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.window.as_mut())
            .ok_or(Error::UseAfterDestroy(handle))
    }

    pub(crate) fn remove(&mut self, handle: WindowHandle) -> Result<Window> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .ok_or(Error::UseAfterDestroy(handle))?;
        let window = slot.window.take().ok_or(Error::UseAfterDestroy(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        Ok(window)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.window.is_some()).count()
    }
}
