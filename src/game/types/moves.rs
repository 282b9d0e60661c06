//! Move representation and its minimal algebraic encoding.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::PieceKind;
use super::square::Square;

/// An executed or proposed move: origin, destination, and the promotion
/// choice when a pawn reaches its last rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Move {
            from,
            to,
            promotion,
        }
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    #[must_use]
    pub const fn promotion(self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns true when this and `other` shuffle the same squares,
    /// ignoring the promotion choice.
    #[inline]
    #[must_use]
    pub(crate) fn same_squares(self, other: Move) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl fmt::Display for Move {
    /// Encodes as `file1 rank1 file2 rank2` plus a `q|r|b|n` suffix for
    /// promotions, e.g. `e2e4` or `a7a8n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}
