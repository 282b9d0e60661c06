//! Square type and board-orientation utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::game::error::SquareParseError;

/// A square on the chess board, stored as a compact 0-63 index.
///
/// Index layout: `row * 8 + col`, where square 0 is the white-rook corner
/// h1 and square 63 is a8. Column 0 is file h and column 7 is file a, so
/// the board reads right-to-left within each row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

fn file_to_col(file: char) -> usize {
    7 - (file as usize - 'a' as usize)
}

fn rank_to_row(rank: char) -> usize {
    (rank as usize) - ('0' as usize) - 1
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Create a new square from row and column (both 0-7).
    /// Does not perform bounds checking - use `try_new` for checked construction.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Square((row * 8 + col) as u8)
    }

    /// Create a new square with bounds checking.
    #[must_use]
    pub const fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square::new(row, col))
        } else {
            None
        }
    }

    /// Create a square from an index (0-63).
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// Get the square's index (0-63, h1=0, g1=1, ..., a8=63).
    #[inline]
    #[must_use]
    pub const fn as_index(self) -> usize {
        self.0 as usize
    }

    /// Get the row (0-7, where 0 = rank 1).
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the column (0-7, where 0 = file h and 7 = file a).
    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        (self.0 % 8) as usize
    }

    /// File letter in algebraic notation (`a`..`h`).
    #[inline]
    #[must_use]
    pub const fn file(self) -> char {
        (b'a' + (7 - self.col() as u8)) as char
    }

    /// Rank number in algebraic notation (1-8).
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.row() + 1
    }

    /// The square reached by stepping `dr` rows and `dc` columns, if on the board.
    #[must_use]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row() as isize + dr;
        let col = self.col() as isize + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::InvalidNotation {
                notation: s.to_string(),
            });
        };

        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(SquareParseError::InvalidNotation {
                notation: s.to_string(),
            });
        }

        Ok(Square::new(rank_to_row(rank), file_to_col(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_corners() {
        assert_eq!(Square::from_index(0).to_string(), "h1");
        assert_eq!(Square::from_index(7).to_string(), "a1");
        assert_eq!(Square::from_index(56).to_string(), "h8");
        assert_eq!(Square::from_index(63).to_string(), "a8");
    }

    #[test]
    fn test_square_row_col() {
        let sq = Square::from_index(28);
        assert_eq!(sq.row(), 3);
        assert_eq!(sq.col(), 4);
        assert_eq!(sq.to_string(), "d4");
    }

    #[test]
    fn test_square_try_new_bounds() {
        assert!(Square::try_new(7, 7).is_some());
        assert!(Square::try_new(8, 0).is_none());
        assert!(Square::try_new(0, 8).is_none());
    }

    #[test]
    fn test_square_parse_round_trip() {
        for idx in 0..Square::COUNT {
            let sq = Square::from_index(idx);
            let parsed: Square = sq.to_string().parse().unwrap();
            assert_eq!(parsed, sq);
        }
    }

    #[test]
    fn test_square_parse_rejects_garbage() {
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
    }

    #[test]
    fn test_square_offset() {
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(e4.offset(1, 0), Some("e5".parse().unwrap()));
        assert_eq!(e4.offset(-1, 0), Some("e3".parse().unwrap()));
        // Column 0 is file h: stepping toward column -1 walks off the board
        let h1 = Square::from_index(0);
        assert_eq!(h1.offset(0, -1), None);
        assert_eq!(h1.offset(-1, 0), None);
    }
}
