//! Packed cell attributes: style flags plus the active color pair.
//!
//! A window carries one attribute word that is stamped onto every cell it
//! writes. The lower 8 bits hold style flags, bits 8-23 hold the color pair
//! id (0 meaning "no color"), mirroring how curses packs `COLOR_PAIR(n)` into
//! an `attr_t`.
//!
//! Because the pair lives in a bit field, turning a second pair "on" with a
//! plain OR would merge the two ids into garbage. [`TextAttributes::attr_off`]
//! must remove the previous pair first; [`crate::Surface::set_color`] does so.
//!
//! # Examples
//!
//! ```
//! use termwin::style::TextAttributes;
//! use termwin::color::PairId;
//!
//! let pair = PairId::new(3).unwrap();
//! let attrs = TextAttributes::BOLD | TextAttributes::pair(pair);
//! assert_eq!(attrs.color_pair(), Some(pair));
//! assert!(attrs.contains(TextAttributes::BOLD));
//! ```

use crate::color::PairId;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes (bold, underline, reverse, ...).
    ///
    /// Not all terminals support all attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u32 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Blinking text (rarely supported).
        const BLINK         = 0x10;
        /// Swapped foreground/background.
        const REVERSE       = 0x20;
        /// Hidden/invisible text.
        const HIDDEN        = 0x40;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x80;
    }
}

impl TextAttributes {
    /// Mask for the lower 8 bits containing style flags.
    pub const FLAGS_MASK: u32 = 0x0000_00FF;
    /// Mask for the bits containing the color pair id.
    pub const PAIR_MASK: u32 = 0x00FF_FF00;
    /// Bit shift for pair id storage.
    pub const PAIR_SHIFT: u32 = 8;

    /// Attribute word carrying only the given color pair.
    #[must_use]
    pub const fn pair(pair: PairId) -> Self {
        Self::from_bits_retain((pair.get() as u32) << Self::PAIR_SHIFT)
    }

    /// Extract the color pair (if any).
    #[must_use]
    pub fn color_pair(self) -> Option<PairId> {
        let raw = (self.bits() & Self::PAIR_MASK) >> Self::PAIR_SHIFT;
        u16::try_from(raw).ok().and_then(PairId::from_raw)
    }

    /// Return only the style flags (pair cleared).
    #[must_use]
    pub const fn flags_only(self) -> Self {
        Self::from_bits_retain(self.bits() & Self::FLAGS_MASK)
    }

    /// OR `other` into this word.
    ///
    /// This is a raw bit operation: applying a pair while another one is on
    /// compounds the two ids. Callers remove the old pair first.
    pub fn attr_on(&mut self, other: Self) {
        *self = Self::from_bits_retain(self.bits() | other.bits());
    }

    /// Clear the bits of `other` from this word.
    pub fn attr_off(&mut self, other: Self) {
        *self = Self::from_bits_retain(self.bits() & !other.bits());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(id: u16) -> PairId {
        PairId::from_raw(id).unwrap()
    }

    #[test]
    fn test_pair_round_trip() {
        let attrs = TextAttributes::pair(pair(200));
        assert_eq!(attrs.color_pair(), Some(pair(200)));
        assert!(attrs.flags_only().is_empty());
    }

    #[test]
    fn test_no_pair_is_none() {
        assert_eq!(TextAttributes::BOLD.color_pair(), None);
        assert_eq!(TextAttributes::empty().color_pair(), None);
    }

    #[test]
    fn test_attr_off_then_on_replaces_pair() {
        let mut attrs = TextAttributes::UNDERLINE;
        attrs.attr_on(TextAttributes::pair(pair(1)));
        attrs.attr_off(TextAttributes::pair(pair(1)));
        attrs.attr_on(TextAttributes::pair(pair(2)));
        assert_eq!(attrs.color_pair(), Some(pair(2)));
        assert!(attrs.contains(TextAttributes::UNDERLINE));
    }

    #[test]
    fn test_attr_on_without_off_compounds() {
        // 1 | 2 == 3: exactly the leak the surface guards against.
        let mut attrs = TextAttributes::pair(pair(1));
        attrs.attr_on(TextAttributes::pair(pair(2)));
        assert_eq!(attrs.color_pair(), Some(pair(3)));
    }

    #[test]
    fn test_flags_only_strips_pair() {
        let attrs = TextAttributes::BOLD | TextAttributes::pair(pair(7));
        assert_eq!(attrs.flags_only(), TextAttributes::BOLD);
    }
}
