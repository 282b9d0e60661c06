//! The piece store: a square-indexed array and an ordered piece list,
//! kept consistent through a handful of mutation primitives.
//!
//! The array answers "what stands on this square" in constant time; the
//! list drives enumeration during move generation and threat scans. No
//! caller touches one representation without the other.

use super::types::{Bitboard, Color, Piece, PieceKind, Square};

#[derive(Clone, Debug)]
pub(crate) struct Board {
    squares: [Option<Piece>; 64],
    pieces: Vec<Piece>,
}

impl Board {
    pub(crate) fn from_pieces(pieces: Vec<Piece>) -> Self {
        let mut squares = [None; 64];
        for piece in &pieces {
            squares[piece.square().as_index()] = Some(*piece);
        }
        Board { squares, pieces }
    }

    /// The piece standing on `sq`, if any.
    #[inline]
    pub(crate) fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.as_index()]
    }

    /// All live pieces in insertion order.
    #[inline]
    pub(crate) fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Relocate the piece on `from` to `to`, returning the captured piece
    /// if `to` was occupied. Both representations are updated.
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.squares[to.as_index()];
        if captured.is_some() {
            self.pieces.retain(|p| p.square() != to);
        }

        if let Some(mut piece) = self.squares[from.as_index()].take() {
            piece.set_square(to);
            self.squares[to.as_index()] = Some(piece);
            if let Some(entry) = self.pieces.iter_mut().find(|p| p.square() == from) {
                entry.set_square(to);
            }
        }

        captured
    }

    /// Remove and return the piece on `sq`.
    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.squares[sq.as_index()].take();
        if removed.is_some() {
            self.pieces.retain(|p| p.square() != sq);
        }
        removed
    }

    /// Put a freshly constructed piece on its (empty) square.
    pub(crate) fn place(&mut self, piece: Piece) {
        self.squares[piece.square().as_index()] = Some(piece);
        self.pieces.push(piece);
    }

    /// The square of `color`'s king, while one exists.
    pub(crate) fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces
            .iter()
            .find(|p| p.kind() == PieceKind::King && p.color() == color)
            .map(|p| p.square())
    }

    /// Bitboard of every occupied square.
    pub(crate) fn occupancy(&self) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for piece in &self.pieces {
            bb |= piece.bit();
        }
        bb
    }

    /// Bitboard of the squares `color`'s pieces occupy.
    pub(crate) fn occupancy_of(&self, color: Color) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        for piece in &self.pieces {
            if piece.color() == color {
                bb |= piece.bit();
            }
        }
        bb
    }

    /// Check the array/list agreement invariant. Test support.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let array_count = self.squares.iter().filter(|s| s.is_some()).count();
        array_count == self.pieces.len()
            && self
                .pieces
                .iter()
                .all(|p| self.squares[p.square().as_index()] == Some(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn sample_board() -> Board {
        Board::from_pieces(vec![
            Piece::new(PieceKind::King, Color::White, sq("e1")),
            Piece::new(PieceKind::Rook, Color::White, sq("h1")),
            Piece::new(PieceKind::King, Color::Black, sq("e8")),
            Piece::new(PieceKind::Pawn, Color::Black, sq("d5")),
        ])
    }

    #[test]
    fn test_piece_at_matches_list() {
        let board = sample_board();
        assert!(board.is_consistent());
        let rook = board.piece_at(sq("h1")).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert!(board.piece_at(sq("a3")).is_none());
    }

    #[test]
    fn test_move_piece_quiet() {
        let mut board = sample_board();
        let captured = board.move_piece(sq("h1"), sq("h4"));
        assert!(captured.is_none());
        assert!(board.piece_at(sq("h1")).is_none());
        assert_eq!(board.piece_at(sq("h4")).unwrap().kind(), PieceKind::Rook);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_move_piece_capture_removes_from_both() {
        let mut board = sample_board();
        board.move_piece(sq("h1"), sq("d1"));
        let captured = board.move_piece(sq("d1"), sq("d5"));
        assert_eq!(captured.unwrap().kind(), PieceKind::Pawn);
        assert_eq!(board.pieces().len(), 3);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_remove_and_place() {
        let mut board = sample_board();
        let pawn = board.remove(sq("d5")).unwrap();
        assert_eq!(pawn.kind(), PieceKind::Pawn);
        assert_eq!(board.pieces().len(), 3);

        board.place(Piece::new(PieceKind::Queen, Color::Black, sq("d5")));
        assert_eq!(board.piece_at(sq("d5")).unwrap().kind(), PieceKind::Queen);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_king_square() {
        let board = sample_board();
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn test_occupancy() {
        let board = sample_board();
        assert_eq!(board.occupancy().popcount(), 4);
        assert_eq!(board.occupancy_of(Color::White).popcount(), 2);
        assert_eq!(board.occupancy_of(Color::Black).popcount(), 2);
    }
}
