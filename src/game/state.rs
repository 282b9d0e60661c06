//! The game façade: owns all state and orchestrates parsing, move
//! generation, special moves, legality filtering, and status tracking.

use super::board::Board;
use super::error::{MoveError, PositionError};
use super::fen;
use super::legal_moves::LegalMoveFilter;
use super::special_moves::SpecialMoves;
use super::status::{GameStatus, MoveResult, StatusTracker};
use super::types::{Bitboard, CastlingRights, Color, Move, Piece, PieceKind, Square};

/// A single game of chess.
///
/// A game is created from a position string (or the classic start), is
/// mutated only through [`Game::execute_move`], and stops accepting moves
/// once the status handler reports checkmate or a draw. Instances are
/// single-writer; queries like [`Game::legal_moves_for`] never mutate.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    side_to_play: Color,
    all_pieces: Bitboard,
    side_pieces: Bitboard,
    kings: [Option<Square>; 2],
    special: SpecialMoves,
    filter: LegalMoveFilter,
    tracker: StatusTracker,
    status: GameStatus,
}

impl Game {
    /// Start a game from the classic initial position.
    #[must_use]
    pub fn new() -> Self {
        Game::from_position("").expect("the classic starting position is valid")
    }

    /// Start a game from a position string in the four-field classical
    /// notation. An empty string selects the classic start.
    pub fn from_position(position: &str) -> Result<Self, PositionError> {
        let parsed = fen::parse(position)?;
        // Reduced test positions may strip the opponent's king, but the
        // side to play cannot do without one.
        if parsed.board.king_square(parsed.side_to_play).is_none() {
            return Err(PositionError::MissingKing {
                color: parsed.side_to_play,
            });
        }

        let mut game = Game {
            board: parsed.board,
            side_to_play: parsed.side_to_play,
            all_pieces: Bitboard::EMPTY,
            side_pieces: Bitboard::EMPTY,
            kings: [None; 2],
            special: SpecialMoves::new(parsed.rights, parsed.en_passant),
            filter: LegalMoveFilter::new(),
            tracker: StatusTracker::new(),
            status: GameStatus::InProgress,
        };
        game.refresh_caches();

        #[cfg(feature = "logging")]
        log::debug!("new game, {} to play", game.side_to_play);

        Ok(game)
    }

    /// Throw away the current state and start over from `position`
    /// (empty string for the classic start). On a parse error the
    /// existing state is left untouched.
    pub fn reset(&mut self, position: &str) -> Result<(), PositionError> {
        *self = Game::from_position(position)?;
        Ok(())
    }

    /// The color whose turn it is.
    #[inline]
    #[must_use]
    pub fn side_to_play(&self) -> Color {
        self.side_to_play
    }

    /// Where the game stands: in progress, checkmate, or drawn.
    #[inline]
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The square `color`'s king currently stands on. Callers may rely on
    /// this for any position that still has the king; querying the king
    /// of a side that was set up without one is an adapter-layer bug.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()].expect("king on the board")
    }

    /// The piece on `sq`, if any.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// The current castling-rights quadruple.
    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.special.rights()
    }

    /// The en-passant target square, set for exactly one ply after a
    /// double pawn push.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.special.en_passant_target()
    }

    /// Render the live state back into the four-field position notation.
    #[must_use]
    pub fn position_string(&self) -> String {
        fen::render(
            &self.board,
            self.side_to_play,
            self.special.rights(),
            self.special.en_passant_target(),
        )
    }

    /// The legal destination squares for the piece on `at`.
    ///
    /// Returns the empty bitboard when the square is empty, holds an
    /// opponent piece, or the game is over. The result is free of
    /// self-check; castling and en-passant destinations appear only when
    /// every precondition holds.
    #[must_use]
    pub fn legal_moves_for(&self, at: Square) -> Bitboard {
        if self.status != GameStatus::InProgress {
            return Bitboard::EMPTY;
        }
        match self.board.piece_at(at) {
            Some(piece) if piece.color() == self.side_to_play => self.legal_moves_of(piece),
            _ => Bitboard::EMPTY,
        }
    }

    /// Validate and perform a move, then classify the resulting position.
    ///
    /// `promotion` is consulted only when a pawn reaches its last rank;
    /// an absent or non-promotable kind falls back to a queen.
    pub fn execute_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveResult, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        let Some(piece) = self.board.piece_at(from) else {
            return Err(MoveError::InvalidMove { from, to });
        };
        if !self.legal_moves_for(from).contains(to) {
            return Err(MoveError::InvalidMove { from, to });
        }

        let promotion_kind = promotion
            .filter(|kind| kind.is_promotable())
            .unwrap_or(PieceKind::Queen);
        let is_promotion =
            piece.kind() == PieceKind::Pawn && to.row() == piece.color().promotion_row();

        if self.special.is_special(piece, from, to) {
            self.special.execute(from, to, promotion_kind, &mut self.board);
        } else {
            self.board.move_piece(from, to);
        }

        self.side_to_play = self.side_to_play.opponent();
        self.special.update_after_move(from, to, piece);
        self.refresh_caches();

        let played = Move::new(from, to, is_promotion.then_some(promotion_kind));
        let in_check = self.is_in_check();
        let has_move = self.side_has_legal_move();
        let (result, status) =
            self.tracker
                .record_and_classify(played, piece.color(), in_check, has_move);
        self.status = status;

        #[cfg(feature = "logging")]
        log::debug!("executed {played}, result {result:?}");

        Ok(result)
    }

    /// Legal moves of a piece known to belong to the side to play.
    fn legal_moves_of(&self, piece: Piece) -> Bitboard {
        let pseudo = piece.moves(self.all_pieces, self.side_pieces);
        let special = self.special.moves_for(
            piece,
            self.threatened_squares(),
            self.all_pieces,
            &self.board,
            self.side_king(),
        );

        let king_bb = self
            .side_king()
            .map_or(Bitboard::EMPTY, Bitboard::from_square);
        self.filter.remove_illegal_moves(
            pseudo | special,
            piece,
            self.side_pieces,
            king_bb,
            self.is_in_check(),
            self.special.en_passant_target(),
            self.threatened_squares_against_self(),
        )
    }

    /// Every square the opponent attacks. Pawn capture diagonals count
    /// whether or not they could capture right now.
    fn threatened_squares(&self) -> Bitboard {
        let enemy_own = self.all_pieces & !self.side_pieces;
        let mut attacked = Bitboard::EMPTY;
        for piece in self.board.pieces() {
            if piece.color() != self.side_to_play {
                attacked |= piece.attacks(self.all_pieces, enemy_own);
            }
        }
        attacked
    }

    /// Every square the opponent attacks with the friendly king lifted
    /// off the board, so squares behind the king along a sliding ray are
    /// marked too. Enemy pieces defend their own squares here, keeping
    /// the king away from protected material.
    fn threatened_squares_against_self(&self) -> Bitboard {
        let king_bb = self
            .side_king()
            .map_or(Bitboard::EMPTY, Bitboard::from_square);
        let occupancy_without_king = self.all_pieces & !king_bb;
        let mut attacked = Bitboard::EMPTY;
        for piece in self.board.pieces() {
            if piece.color() != self.side_to_play {
                attacked |= piece.attacks(occupancy_without_king, Bitboard::EMPTY);
            }
        }
        attacked
    }

    /// Is the side to play currently in check?
    fn is_in_check(&self) -> bool {
        self.side_king()
            .is_some_and(|king| self.threatened_squares().contains(king))
    }

    /// The side-to-play king, absent only in reduced test positions.
    fn side_king(&self) -> Option<Square> {
        self.kings[self.side_to_play.index()]
    }

    /// Check the board-array/piece-list agreement invariant. Test support.
    #[cfg(test)]
    pub(crate) fn board_is_consistent(&self) -> bool {
        self.board.is_consistent()
    }

    /// Does the side to play have at least one legal move anywhere?
    fn side_has_legal_move(&self) -> bool {
        self.board
            .pieces()
            .iter()
            .filter(|piece| piece.color() == self.side_to_play)
            .any(|piece| !self.legal_moves_of(*piece).is_empty())
    }

    /// Recompute the cached bitboards, king squares, and threat lines.
    /// Runs after construction and after every executed move.
    fn refresh_caches(&mut self) {
        self.all_pieces = self.board.occupancy();
        self.side_pieces = self.board.occupancy_of(self.side_to_play);
        for color in Color::BOTH {
            self.kings[color.index()] = self.board.king_square(color);
        }

        let enemy = self.all_pieces & !self.side_pieces;
        self.filter.update_threat_lines(
            &self.board,
            self.all_pieces,
            enemy,
            self.side_to_play,
            self.side_king(),
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
