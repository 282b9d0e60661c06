//! Post-move game status classification and repetition tracking.

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{Color, Move};

/// Classification of the position reached by an executed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveResult {
    /// Quiet position, game goes on
    Normal,
    /// The side now to play is in check but has moves
    Check,
    /// The side now to play is in check with no moves; the mover wins
    Checkmate,
    /// Stalemate or repetition
    Draw,
}

/// Where the game stands as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Draw,
}

/// Only this many trailing moves are ever consulted: the current move,
/// its echo four plies back, and its echo eight plies back.
const HISTORY_WINDOW: usize = 9;

/// Tracks the recent move history and detects draws by repetition.
///
/// The repetition rule is deliberately weaker than threefold repetition
/// of position: a draw fires as soon as a player has made the same
/// (from, to) move at plies t, t+4, and t+8, whatever the opponent did in
/// between. Promotion choices are ignored in the comparison. External
/// consumers depend on this exact behavior, so it stays; a future version
/// may switch to hash-based threefold with a fifty-move counter.
#[derive(Clone, Debug)]
pub(crate) struct StatusTracker {
    recent_moves: VecDeque<Move>,
}

impl StatusTracker {
    pub(crate) fn new() -> Self {
        StatusTracker {
            recent_moves: VecDeque::with_capacity(HISTORY_WINDOW),
        }
    }

    /// Append `played` to the history and classify the resulting
    /// position. `mover` is the color that just moved; `in_check` and
    /// `has_move` describe the side now to play.
    pub(crate) fn record_and_classify(
        &mut self,
        played: Move,
        mover: Color,
        in_check: bool,
        has_move: bool,
    ) -> (MoveResult, GameStatus) {
        self.push(played);

        if in_check {
            if has_move {
                (MoveResult::Check, GameStatus::InProgress)
            } else {
                (MoveResult::Checkmate, GameStatus::Checkmate { winner: mover })
            }
        } else if !has_move {
            // No moves and no check: stalemate
            (MoveResult::Draw, GameStatus::Draw)
        } else if self.is_repetition(played) {
            (MoveResult::Draw, GameStatus::Draw)
        } else {
            (MoveResult::Normal, GameStatus::InProgress)
        }
    }

    fn push(&mut self, mv: Move) {
        if self.recent_moves.len() == HISTORY_WINDOW {
            self.recent_moves.pop_front();
        }
        self.recent_moves.push_back(mv);
    }

    fn is_repetition(&self, played: Move) -> bool {
        if self.recent_moves.len() < HISTORY_WINDOW {
            return false;
        }

        // With the window full, the current move sits at index 8; its
        // echoes four and eight plies earlier sit at indices 4 and 0.
        let four_plies_back = self.recent_moves[HISTORY_WINDOW - 5];
        let eight_plies_back = self.recent_moves[HISTORY_WINDOW - 9];

        played.same_squares(four_plies_back) && played.same_squares(eight_plies_back)
    }
}
