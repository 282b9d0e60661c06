//! Pseudo-legal move generation per piece kind.
//!
//! Everything here ignores checks and pins; the legal-move filter removes
//! self-check moves afterwards. Castling and en passant live with the
//! special-moves handler, not here.

use super::attack_tables;
use super::threat;
use super::types::{Bitboard, Color, Piece, PieceKind, Square};

impl Piece {
    /// Pseudo-legal destinations for this piece. Own-colored squares are
    /// excluded; pawn captures require an opposing piece and pushes
    /// require the path to be empty.
    #[must_use]
    pub(crate) fn moves(self, occupancy: Bitboard, own: Bitboard) -> Bitboard {
        let sq = self.square();
        match self.kind() {
            PieceKind::King => attack_tables::king_moves(sq) & !own,
            PieceKind::Knight => attack_tables::knight_moves(sq) & !own,
            PieceKind::Rook => attack_tables::rook_attacks(sq, occupancy) & !own,
            PieceKind::Bishop => attack_tables::bishop_attacks(sq, occupancy) & !own,
            PieceKind::Queen => {
                (attack_tables::rook_attacks(sq, occupancy)
                    | attack_tables::bishop_attacks(sq, occupancy))
                    & !own
            }
            PieceKind::Pawn => pawn_moves(sq, self.color(), occupancy, occupancy & !own),
        }
    }

    /// Squares this piece attacks, for threatened-square accumulation.
    /// Differs from `moves` only for pawns, whose capture diagonals count
    /// as attacked whether or not an enemy piece stands there.
    #[must_use]
    pub(crate) fn attacks(self, occupancy: Bitboard, own: Bitboard) -> Bitboard {
        if self.kind() == PieceKind::Pawn {
            attack_tables::pawn_captures(self.color(), self.square())
        } else {
            self.moves(occupancy, own)
        }
    }

    /// The ray along which this piece threatens the enemy king, inclusive
    /// of this piece's own square, or empty if there is no such ray. See
    /// the threat module for the x-ray rules.
    #[must_use]
    pub(crate) fn threat_line_to(self, enemy_king: Square, occupancy: Bitboard) -> Bitboard {
        threat::threat_line(self, enemy_king, occupancy)
    }
}

fn pawn_moves(sq: Square, color: Color, occupancy: Bitboard, enemy: Bitboard) -> Bitboard {
    let captures = attack_tables::pawn_captures(color, sq) & enemy;

    // A pawn with a piece directly in front of it cannot push at all,
    // which also rules out the double push.
    let blocked = sq
        .offset(color.pawn_direction(), 0)
        .is_some_and(|front| occupancy.contains(front));
    if blocked {
        return captures;
    }

    captures | (attack_tables::pawn_pushes(color, sq) & !occupancy)
}
