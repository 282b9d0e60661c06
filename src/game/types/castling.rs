//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_SHORT: u8 = 1 << 0;
const CASTLE_WHITE_LONG: u8 = 1 << 1;
const CASTLE_BLACK_SHORT: u8 = 1 << 2;
const CASTLE_BLACK_LONG: u8 = 1 << 3;

const ALL_RIGHTS: u8 =
    CASTLE_WHITE_SHORT | CASTLE_WHITE_LONG | CASTLE_BLACK_SHORT | CASTLE_BLACK_LONG;

/// The castling-rights quadruple as a bitmask.
///
/// Rights only ever get cleared; nothing re-grants one after a king or
/// rook leaves its home square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All four rights (both colors, both wings).
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_RIGHTS)
    }

    /// Check a single right. `short` selects the kingside wing.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, short: bool) -> bool {
        self.0 & Self::bit_for(color, short) != 0
    }

    /// Grant a single right (position setup only).
    #[inline]
    pub fn set(&mut self, color: Color, short: bool) {
        self.0 |= Self::bit_for(color, short);
    }

    /// Clear a single right.
    #[inline]
    pub fn clear(&mut self, color: Color, short: bool) {
        self.0 &= !Self::bit_for(color, short);
    }

    /// Clear both of a color's rights (its king moved).
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.0 &= !(Self::bit_for(color, true) | Self::bit_for(color, false));
    }

    /// Returns true when this is a (componentwise) subset of `other`.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    const fn bit_for(color: Color, short: bool) -> u8 {
        match (color, short) {
            (Color::White, true) => CASTLE_WHITE_SHORT,
            (Color::White, false) => CASTLE_WHITE_LONG,
            (Color::Black, true) => CASTLE_BLACK_SHORT,
            (Color::Black, false) => CASTLE_BLACK_LONG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_and_none() {
        let all = CastlingRights::all();
        for color in Color::BOTH {
            assert!(all.has(color, true));
            assert!(all.has(color, false));
            assert!(!CastlingRights::none().has(color, true));
        }
    }

    #[test]
    fn test_clear_single() {
        let mut rights = CastlingRights::all();
        rights.clear(Color::White, true);
        assert!(!rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
    }

    #[test]
    fn test_clear_color() {
        let mut rights = CastlingRights::all();
        rights.clear_color(Color::Black);
        assert!(rights.has(Color::White, true));
        assert!(rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(!rights.has(Color::Black, false));
    }

    #[test]
    fn test_subset() {
        let mut reduced = CastlingRights::all();
        reduced.clear(Color::White, false);
        assert!(reduced.is_subset_of(CastlingRights::all()));
        assert!(!CastlingRights::all().is_subset_of(reduced));
        assert!(CastlingRights::none().is_subset_of(reduced));
    }
}
