//! Error types for game operations.

use std::fmt;

use super::types::{Color, Square};

/// Error type for malformed position strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Position strings are plain ASCII; anything else is rejected outright
    NonAscii,
    /// Fewer than the four consumed fields are present
    TooFewFields { found: usize },
    /// The placement field ended before every square was accounted for
    TruncatedBoard,
    /// Invalid piece character in the placement field
    InvalidPiece { piece: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid castling character (must be K, Q, k, q, or '-')
    InvalidCastling { castling: char },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// A color has no king on the board
    MissingKing { color: Color },
    /// A color has more than one king on the board
    ExtraKing { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NonAscii => {
                write!(f, "position string contains non-ASCII bytes")
            }
            PositionError::TooFewFields { found } => {
                write!(f, "position string must have at least 4 fields, found {found}")
            }
            PositionError::TruncatedBoard => {
                write!(f, "placement field ends before covering all 64 squares")
            }
            PositionError::InvalidPiece { piece } => {
                write!(f, "invalid piece character '{piece}' in placement field")
            }
            PositionError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            PositionError::InvalidCastling { castling } => {
                write!(f, "invalid castling character '{castling}'")
            }
            PositionError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            PositionError::MissingKing { color } => {
                write!(f, "{color} has no king")
            }
            PositionError::ExtraKing { color } => {
                write!(f, "{color} has more than one king")
            }
        }
    }
}

impl std::error::Error for PositionError {}

/// Error type for rejected `execute_move` calls. The game state is left
/// untouched in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The destination is not among the piece's legal moves
    InvalidMove { from: Square, to: Square },
    /// The game already ended in checkmate or a draw
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidMove { from, to } => {
                write!(f, "illegal move {from}{to}")
            }
            MoveError::GameOver => {
                write!(f, "the game is over; no further moves are accepted")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Error type for algebraic square parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareParseError {
    /// Not a file letter a-h followed by a rank digit 1-8
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareParseError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_error_display() {
        let err = PositionError::InvalidPiece { piece: 'z' };
        assert!(err.to_string().contains("'z'"));

        let err = PositionError::InvalidSideToMove {
            found: "x".to_string(),
        };
        assert!(err.to_string().contains("'x'"));

        let err = PositionError::MissingKing {
            color: Color::Black,
        };
        assert!(err.to_string().contains("Black"));
    }

    #[test]
    fn test_move_error_display() {
        let from: Square = "e2".parse().unwrap();
        let to: Square = "e5".parse().unwrap();
        let err = MoveError::InvalidMove { from, to };
        assert!(err.to_string().contains("e2e5"));
    }

    #[test]
    fn test_square_parse_error_display() {
        let err = SquareParseError::InvalidNotation {
            notation: "z9".to_string(),
        };
        assert!(err.to_string().contains("z9"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(MoveError::GameOver, MoveError::GameOver);
        let err = PositionError::NonAscii;
        assert_eq!(err.clone(), err);
    }
}
