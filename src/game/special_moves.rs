//! Castling, en passant, and promotion: the moves that touch more state
//! than a single piece relocation.
//!
//! Castling rights and the en-passant target live here; both are updated
//! after every executed move. Rights are monotone - once cleared, nothing
//! grants them back.

use super::attack_tables;
use super::board::Board;
use super::types::{Bitboard, CastlingRights, Color, Piece, PieceKind, Square};

// Home squares in the h1 = 0 orientation; black mirrors white at +56.
const WHITE_KING_HOME: usize = 3;
const BLACK_KING_HOME: usize = 59;
const WHITE_ROOK_SHORT_HOME: usize = 0;
const WHITE_ROOK_LONG_HOME: usize = 7;
const BLACK_ROOK_SHORT_HOME: usize = 56;
const BLACK_ROOK_LONG_HOME: usize = 63;

const BLACK_SQUARE_OFFSET: usize = 56;

// King destinations per wing, white frame.
const SHORT_CASTLE_TARGET: usize = 1; // g1
const LONG_CASTLE_TARGET: usize = 5; // c1

// Squares that must be empty between king and rook (f1 g1 / d1 c1 b1)
// and squares the king occupies or crosses that must not be attacked
// (e1 f1 g1 / e1 d1 c1), all in the white frame.
const SHORT_CASTLE_CLEAR: u64 = 0b0000110;
const SHORT_CASTLE_SAFE: u64 = 0b0001110;
const LONG_CASTLE_CLEAR: u64 = 0b1110000;
const LONG_CASTLE_SAFE: u64 = 0b0111000;

// The rook lands one square inside the king's destination.
const SHORT_CASTLE_ROOK_OFFSET: isize = 1;
const LONG_CASTLE_ROOK_OFFSET: isize = -1;

const PAWN_DOUBLE_PUSH_DISTANCE: isize = 16;

/// Number of occupied squares between king and a rank-sharing attacker at
/// which an en-passant capture would strip the rank bare (the capturing
/// pawn and the captured pawn vacate together).
const EXPOSING_PIECES_BETWEEN: u32 = 2;

#[derive(Clone, Debug)]
pub(crate) struct SpecialMoves {
    rights: CastlingRights,
    en_passant: Option<Square>,
}

impl SpecialMoves {
    pub(crate) fn new(rights: CastlingRights, en_passant: Option<Square>) -> Self {
        SpecialMoves { rights, en_passant }
    }

    #[inline]
    pub(crate) fn rights(&self) -> CastlingRights {
        self.rights
    }

    #[inline]
    pub(crate) fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    /// The special destinations available to `piece` right now: castling
    /// targets for a king, the en-passant target for a pawn, nothing for
    /// anyone else.
    pub(crate) fn moves_for(
        &self,
        piece: Piece,
        threatened: Bitboard,
        occupancy: Bitboard,
        board: &Board,
        king_sq: Option<Square>,
    ) -> Bitboard {
        match piece.kind() {
            PieceKind::King => self.castling_moves(piece.color(), threatened, occupancy),
            PieceKind::Pawn => self.en_passant_moves(piece, board, occupancy, king_sq),
            _ => Bitboard::EMPTY,
        }
    }

    fn castling_moves(&self, color: Color, threatened: Bitboard, occupancy: Bitboard) -> Bitboard {
        let offset = frame_offset(color);
        let mut moves = Bitboard::EMPTY;

        if self.rights.has(color, true)
            && occupancy.0 & (SHORT_CASTLE_CLEAR << offset) == 0
            && threatened.0 & (SHORT_CASTLE_SAFE << offset) == 0
        {
            moves.insert(Square::from_index(SHORT_CASTLE_TARGET + offset));
        }
        if self.rights.has(color, false)
            && occupancy.0 & (LONG_CASTLE_CLEAR << offset) == 0
            && threatened.0 & (LONG_CASTLE_SAFE << offset) == 0
        {
            moves.insert(Square::from_index(LONG_CASTLE_TARGET + offset));
        }
        moves
    }

    fn en_passant_moves(
        &self,
        pawn: Piece,
        board: &Board,
        occupancy: Bitboard,
        king_sq: Option<Square>,
    ) -> Bitboard {
        let Some(target) = self.en_passant else {
            return Bitboard::EMPTY;
        };
        if let Some(king_sq) = king_sq {
            if exposes_rank_attack(pawn, board, occupancy, king_sq) {
                return Bitboard::EMPTY;
            }
        }
        attack_tables::pawn_captures(pawn.color(), pawn.square()) & Bitboard::from_square(target)
    }

    /// Roll the rights and en-passant state forward after a move.
    pub(crate) fn update_after_move(&mut self, from: Square, to: Square, moved: Piece) {
        if moved.kind() == PieceKind::Rook {
            match from.as_index() {
                WHITE_ROOK_SHORT_HOME => self.rights.clear(Color::White, true),
                WHITE_ROOK_LONG_HOME => self.rights.clear(Color::White, false),
                BLACK_ROOK_SHORT_HOME => self.rights.clear(Color::Black, true),
                BLACK_ROOK_LONG_HOME => self.rights.clear(Color::Black, false),
                _ => {}
            }
        }

        if moved.kind() == PieceKind::King {
            match from.as_index() {
                WHITE_KING_HOME => self.rights.clear_color(Color::White),
                BLACK_KING_HOME => self.rights.clear_color(Color::Black),
                _ => {}
            }
        }

        // Landing on an enemy rook home square kills that wing's right;
        // if the rook had already left, the right was gone anyway.
        let enemy = moved.color().opponent();
        let (short_home, long_home) = rook_homes(enemy);
        if to.as_index() == short_home {
            self.rights.clear(enemy, true);
        }
        if to.as_index() == long_home {
            self.rights.clear(enemy, false);
        }

        // A double pawn push arms en passant on the square passed over;
        // every other move clears it.
        let distance = to.as_index() as isize - from.as_index() as isize;
        self.en_passant = if moved.kind() == PieceKind::Pawn
            && distance.abs() == PAWN_DOUBLE_PUSH_DISTANCE
        {
            from.offset(moved.color().pawn_direction(), 0)
        } else {
            None
        };
    }

    /// Does `(from, to)` need this handler's execute path instead of a
    /// plain relocation?
    pub(crate) fn is_special(&self, piece: Piece, from: Square, to: Square) -> bool {
        match piece.kind() {
            PieceKind::Pawn => {
                Some(to) == self.en_passant || to.row() == piece.color().promotion_row()
            }
            PieceKind::King => {
                let offset = frame_offset(piece.color());
                from.as_index() == WHITE_KING_HOME + offset
                    && (to.as_index() == SHORT_CASTLE_TARGET + offset
                        || to.as_index() == LONG_CASTLE_TARGET + offset)
            }
            _ => false,
        }
    }

    /// Perform a castling, en-passant, or promotion move on the board.
    pub(crate) fn execute(
        &self,
        from: Square,
        to: Square,
        promotion: PieceKind,
        board: &mut Board,
    ) {
        let Some(piece) = board.piece_at(from) else {
            return;
        };
        match piece.kind() {
            PieceKind::King => execute_castling(from, to, piece.color(), board),
            PieceKind::Pawn if Some(to) == self.en_passant => {
                execute_en_passant(from, to, piece.color(), board);
            }
            _ => execute_promotion(from, to, piece.color(), promotion, board),
        }
    }
}

fn frame_offset(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => BLACK_SQUARE_OFFSET,
    }
}

fn rook_homes(color: Color) -> (usize, usize) {
    match color {
        Color::White => (WHITE_ROOK_SHORT_HOME, WHITE_ROOK_LONG_HOME),
        Color::Black => (BLACK_ROOK_SHORT_HOME, BLACK_ROOK_LONG_HOME),
    }
}

fn execute_castling(from: Square, to: Square, color: Color, board: &mut Board) {
    let offset = frame_offset(color);
    // The king slides toward square 0 on the short wing.
    let (rook_home, rook_offset) = if to.as_index() < from.as_index() {
        (WHITE_ROOK_SHORT_HOME + offset, SHORT_CASTLE_ROOK_OFFSET)
    } else {
        (WHITE_ROOK_LONG_HOME + offset, LONG_CASTLE_ROOK_OFFSET)
    };
    let rook_to = Square::from_index((to.as_index() as isize + rook_offset) as usize);

    board.move_piece(from, to);
    board.move_piece(Square::from_index(rook_home), rook_to);
}

fn execute_en_passant(from: Square, to: Square, color: Color, board: &mut Board) {
    board.move_piece(from, to);
    // The captured pawn sits one push behind the target square.
    if let Some(captured_sq) = to.offset(-color.pawn_direction(), 0) {
        board.remove(captured_sq);
    }
}

fn execute_promotion(
    from: Square,
    to: Square,
    color: Color,
    promotion: PieceKind,
    board: &mut Board,
) {
    board.remove(from);
    board.remove(to);
    board.place(Piece::new(promotion, color, to));
}

/// The rare horizontal-pin interaction: capturing en passant removes two
/// pawns from the capturing pawn's rank in a single move, which can
/// uncover a rook or queen against a king on that rank. Exactly two
/// occupied squares between king and attacker means the rank goes bare.
fn exposes_rank_attack(pawn: Piece, board: &Board, occupancy: Bitboard, king_sq: Square) -> bool {
    if king_sq.row() != pawn.square().row() {
        return false;
    }
    let row_mask = Bitboard::row_mask(pawn.square().row());

    for attacker in board.pieces() {
        if attacker.color() == pawn.color()
            || !matches!(attacker.kind(), PieceKind::Rook | PieceKind::Queen)
            || !row_mask.contains(attacker.square())
        {
            continue;
        }
        let between = squares_between_on_row(king_sq, attacker.square());
        if (between & occupancy).popcount() == EXPOSING_PIECES_BETWEEN {
            return true;
        }
    }
    false
}

fn squares_between_on_row(a: Square, b: Square) -> Bitboard {
    let (lo, hi) = if a.as_index() < b.as_index() {
        (a.as_index(), b.as_index())
    } else {
        (b.as_index(), a.as_index())
    };
    let mut between = Bitboard::EMPTY;
    for idx in lo + 1..hi {
        between.insert(Square::from_index(idx));
    }
    between
}
