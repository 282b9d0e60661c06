//! Filtering pseudo-legal moves down to legal ones.
//!
//! After every executed move the filter collects the threat lines running
//! from enemy sliders (and directly-attacking leapers) toward the side-to-
//! play king. Those lines drive both check resolution (block or capture on
//! the line) and pin enforcement (a pinned piece stays on its line). King
//! moves are filtered against the enemy's attack set computed with the
//! king lifted off the board, so squares behind him along a checking ray
//! count as attacked.

use super::board::Board;
use super::types::{Bitboard, Color, Piece, PieceKind, Square};

#[derive(Clone, Debug, Default)]
pub(crate) struct LegalMoveFilter {
    threat_lines: Vec<Bitboard>,
}

impl LegalMoveFilter {
    pub(crate) fn new() -> Self {
        LegalMoveFilter {
            threat_lines: Vec::new(),
        }
    }

    /// Rebuild the list of threat lines against `side`'s king. A line is
    /// kept only if, apart from the attacker itself, no enemy-colored
    /// piece stands on it - such a line can neither check nor pin. With
    /// no king on the board there is nothing to threaten.
    pub(crate) fn update_threat_lines(
        &mut self,
        board: &Board,
        occupancy: Bitboard,
        enemy: Bitboard,
        side: Color,
        king_sq: Option<Square>,
    ) {
        self.threat_lines.clear();
        let Some(king_sq) = king_sq else {
            return;
        };
        for piece in board.pieces() {
            if piece.color() == side {
                continue;
            }
            let line = piece.threat_line_to(king_sq, occupancy);
            if !line.is_empty() && !(line & !piece.bit()).intersects(enemy) {
                self.threat_lines.push(line);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn threat_lines(&self) -> &[Bitboard] {
        &self.threat_lines
    }

    /// Strip the moves that would leave the mover's own king attacked.
    ///
    /// `threatened_without_king` must be the enemy attack set computed
    /// with the king removed from the occupancy.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn remove_illegal_moves(
        &self,
        moves: Bitboard,
        piece: Piece,
        own: Bitboard,
        king_bb: Bitboard,
        in_check: bool,
        en_passant: Option<Square>,
        threatened_without_king: Bitboard,
    ) -> Bitboard {
        // The king simply avoids every attacked square.
        if piece.kind() == PieceKind::King {
            return moves & !threatened_without_king;
        }

        let piece_bb = piece.bit();
        let mut moves = moves;

        if in_check {
            let ep_bb = en_passant.map_or(Bitboard::EMPTY, Bitboard::from_square);
            // The en-passant target can block a check only when the
            // checker is the double-pushed pawn itself.
            let may_block_by_en_passant =
                piece.kind() == PieceKind::Pawn && moves.intersects(ep_bb);

            for &line in &self.threat_lines {
                let mut line = line;
                if may_block_by_en_passant
                    && line_is_double_pushed_pawn(line, en_passant, piece.color())
                {
                    line |= ep_bb;
                }

                // An unblocked line must be blocked or its attacker captured.
                if !line.intersects(own & !king_bb) {
                    moves &= line;
                }
                // A piece standing on a line stays on it.
                if line.intersects(piece_bb) {
                    moves &= line;
                }
            }
        } else {
            // Not in check: a piece on a threat line is pinned to it.
            for &line in &self.threat_lines {
                if line.intersects(piece_bb) {
                    return moves & line;
                }
            }
        }

        moves
    }
}

/// True when `line` consists solely of the pawn that just double-pushed,
/// i.e. the square one push behind the en-passant target.
fn line_is_double_pushed_pawn(line: Bitboard, en_passant: Option<Square>, mover: Color) -> bool {
    let Some(target) = en_passant else {
        return false;
    };
    let Some(pawn_sq) = target.offset(-mover.pawn_direction(), 0) else {
        return false;
    };
    (line & !Bitboard::from_square(pawn_sq)).is_empty()
}
