//! X-ray threat lines from attacking pieces toward a king.
//!
//! A threat line is the set of squares from an attacker toward the enemy
//! king along one of the attacker's rays, inclusive of the attacker's own
//! square and exclusive of the king's. The walk tolerates at most one
//! occupied square between attacker and king: zero means the king is in
//! check along the ray, exactly one means that piece is pinned to it.
//! Non-sliders have degenerate lines - just their own square when they
//! attack the king directly.

use super::attack_tables;
use super::types::{Bitboard, Piece, PieceKind, Square};

const STRAIGHT_DELTAS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DELTAS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Maximum number of pieces allowed between attacker and king for the ray
/// to still matter (one pinned piece).
const MAX_PIECES_ON_LINE: u32 = 1;

/// The threat line from `piece` toward the king on `king_sq`, or empty.
pub(crate) fn threat_line(piece: Piece, king_sq: Square, occupancy: Bitboard) -> Bitboard {
    match piece.kind() {
        PieceKind::Rook => slider_line(piece.square(), king_sq, occupancy, &STRAIGHT_DELTAS),
        PieceKind::Bishop => slider_line(piece.square(), king_sq, occupancy, &DIAGONAL_DELTAS),
        // A queen stands on at most one rook-or-bishop ray to any king, so
        // at most one of the two halves is ever nonzero.
        PieceKind::Queen => {
            slider_line(piece.square(), king_sq, occupancy, &STRAIGHT_DELTAS)
                | slider_line(piece.square(), king_sq, occupancy, &DIAGONAL_DELTAS)
        }
        PieceKind::Knight => {
            direct_line(attack_tables::knight_moves(piece.square()), piece, king_sq)
        }
        PieceKind::Pawn => direct_line(
            attack_tables::pawn_captures(piece.color(), piece.square()),
            piece,
            king_sq,
        ),
        PieceKind::King => Bitboard::EMPTY,
    }
}

/// Scan each ray for the king; abandon a ray once a second interposed
/// piece turns up. Interposed pieces stay in the returned line so the
/// pin filter can match on them.
fn slider_line(
    from: Square,
    king_sq: Square,
    occupancy: Bitboard,
    deltas: &[(isize, isize); 4],
) -> Bitboard {
    for &(dr, dc) in deltas {
        let mut line = Bitboard::from_square(from);
        let mut pieces_on_line = 0u32;
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            cur = next;
            if cur == king_sq {
                return line;
            }
            if occupancy.contains(cur) {
                pieces_on_line += 1;
                if pieces_on_line > MAX_PIECES_ON_LINE {
                    break;
                }
            }
            line.insert(cur);
        }
    }
    Bitboard::EMPTY
}

fn direct_line(attacks: Bitboard, piece: Piece, king_sq: Square) -> Bitboard {
    if attacks.contains(king_sq) {
        piece.bit()
    } else {
        Bitboard::EMPTY
    }
}
