//! Palette colors and the color pair registry.
//!
//! Windows never carry raw colors. They carry a [`PairId`], and the
//! [`ColorPairRegistry`] resolves that id to a foreground/background
//! combination at output time, so re-registering a pair recolors every cell
//! already drawn with it on the next flush.
//!
//! # Examples
//!
//! ```
//! use termwin::color::{Color, ColorPairRegistry};
//!
//! let mut pairs = ColorPairRegistry::new();
//! pairs.register(1, Color::White, Color::Blue).unwrap();
//! assert!(pairs.register(0, Color::Red, Color::Black).is_err());
//!
//! assert_eq!(Color::from_name("cyan"), Some(Color::Cyan));
//! ```

use crate::error::{Error, Result};
use std::fmt;
use std::num::NonZeroU16;

/// Highest usable color pair id.
pub const MAX_PAIRS: u16 = 256;

/// A terminal palette color: one of the 8 base colors or an extended index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
    /// Extended 256-color palette index.
    Indexed(u8),
}

impl Color {
    /// The 8 named base colors with their script-facing names, in palette order.
    pub const NAMED: [(&'static str, Self); 8] = [
        ("black", Self::Black),
        ("red", Self::Red),
        ("green", Self::Green),
        ("yellow", Self::Yellow),
        ("blue", Self::Blue),
        ("magenta", Self::Magenta),
        ("cyan", Self::Cyan),
        ("white", Self::White),
    ];

    /// Look up a base color by name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, color)| color)
    }

    /// Build a color from a palette index; 0..=7 map to the named colors.
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        Self::NAMED
            .get(usize::from(index))
            .map_or(Self::Indexed(index), |&(_, color)| color)
    }

    /// Convert a script-supplied number into a color.
    pub fn from_host(value: i64) -> Result<Self> {
        u8::try_from(value).map(Self::from_index).map_err(|_| {
            Error::InvalidArgument(format!("color index {value} outside 0..=255"))
        })
    }

    /// Palette index of this color.
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::Indexed(n) => n,
        }
    }
}

/// A validated color pair id in `[1, MAX_PAIRS]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(NonZeroU16);

impl PairId {
    /// Validate a caller-supplied pair id.
    pub fn new(id: i64) -> Result<Self> {
        u16::try_from(id)
            .ok()
            .and_then(Self::from_raw)
            .ok_or(Error::InvalidColorPair {
                pair: id,
                max: MAX_PAIRS,
            })
    }

    /// Build from a raw id, `None` for 0 or anything above [`MAX_PAIRS`].
    #[must_use]
    pub fn from_raw(id: u16) -> Option<Self> {
        if id > MAX_PAIRS {
            return None;
        }
        NonZeroU16::new(id).map(Self)
    }

    /// The numeric id.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered foreground/background combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

/// Table of color pairs, indexed by id.
///
/// Slot 0 exists but is never populated, so lookups index directly.
#[derive(Clone, Debug)]
pub struct ColorPairRegistry {
    pairs: Vec<Option<ColorPair>>,
}

impl Default for ColorPairRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorPairRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pairs: vec![None; usize::from(MAX_PAIRS) + 1],
        }
    }

    /// Register (or overwrite) a pair.
    pub fn register(&mut self, id: i64, fg: Color, bg: Color) -> Result<PairId> {
        let pair = PairId::new(id)?;
        self.pairs[usize::from(pair.get())] = Some(ColorPair { fg, bg });
        Ok(pair)
    }

    /// Resolve a pair; `None` when it was never registered.
    #[must_use]
    pub fn get(&self, pair: PairId) -> Option<ColorPair> {
        self.pairs.get(usize::from(pair.get())).copied().flatten()
    }

    /// Number of registered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_some()).count()
    }

    /// Check whether no pair is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_id_bounds() {
        assert!(PairId::new(0).is_err());
        assert!(PairId::new(-1).is_err());
        assert!(PairId::new(i64::from(MAX_PAIRS) + 1).is_err());
        assert_eq!(PairId::new(1).unwrap().get(), 1);
        assert_eq!(PairId::new(i64::from(MAX_PAIRS)).unwrap().get(), MAX_PAIRS);
    }

    #[test]
    fn test_pair_id_error_kind() {
        let err = PairId::new(999).unwrap_err();
        assert!(matches!(err, Error::InvalidColorPair { pair: 999, max: MAX_PAIRS }));
    }

    #[test]
    fn test_register_overwrites() {
        let mut pairs = ColorPairRegistry::new();
        let id = pairs.register(5, Color::Red, Color::Black).unwrap();
        pairs.register(5, Color::Green, Color::Blue).unwrap();
        assert_eq!(
            pairs.get(id),
            Some(ColorPair {
                fg: Color::Green,
                bg: Color::Blue
            })
        );
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_unregistered_pair_is_none() {
        let pairs = ColorPairRegistry::new();
        assert!(pairs.is_empty());
        assert_eq!(pairs.get(PairId::new(9).unwrap()), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::from_name("RED"), Some(Color::Red));
        assert_eq!(Color::from_name("orange"), None);
        for (i, (_, color)) in Color::NAMED.iter().enumerate() {
            assert_eq!(usize::from(color.index()), i);
        }
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Color::from_index(4), Color::Blue);
        assert_eq!(Color::from_index(200), Color::Indexed(200));
        assert_eq!(Color::from_index(200).index(), 200);
        assert!(Color::from_host(256).is_err());
        assert!(Color::from_host(-3).is_err());
        assert_eq!(Color::from_host(3).unwrap(), Color::Yellow);
    }
}
