//! Chess rules engine for an online-chess service.
//!
//! Provides the in-process rules subsystem the game service is built on:
//! - Bitboard-based board representation with precomputed attack tables
//! - Legal move generation including castling, en passant, and promotion
//! - Pin and check resolution via x-ray threat lines
//! - Post-move status classification (check, checkmate, stalemate, repetition)
//!
//! # Quick Start
//!
//! ```
//! use chess_rules::{Game, MoveResult, Square};
//!
//! // Create a game from the classic starting position
//! let mut game = Game::new();
//!
//! // Ask for the legal destinations of the e2 pawn
//! let e2: Square = "e2".parse().unwrap();
//! let moves = game.legal_moves_for(e2);
//! assert_eq!(moves.popcount(), 2); // e3 and e4
//!
//! // Play 1. e2-e4
//! let e4: Square = "e4".parse().unwrap();
//! let result = game.execute_move(e2, e4, None).unwrap();
//! assert_eq!(result, MoveResult::Normal);
//! ```
//!
//! # Building Positions
//!
//! ```
//! use chess_rules::{Color, Game};
//!
//! // From the classical position-string notation (first four fields used)
//! let game = Game::from_position("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3").unwrap();
//! assert_eq!(game.side_to_play(), Color::Black);
//! ```
//!
//! # Features
//!
//! - `serde` - Enable serialization for the public value types
//! - `logging` - Enable optional debug logging via the `log` crate

// Enable pedantic lints with sensible domain-specific exceptions
#![warn(clippy::pedantic)]
// Bitboard hex literals are clearer without separators (bit patterns visible)
#![allow(clippy::unreadable_literal)]
// Index casts are ubiquitous and safe in chess (board indices, square indices)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Module-level documentation is sufficient for this codebase
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod game;

pub use game::{
    Bitboard, CastlingRights, Color, Game, GameStatus, Move, MoveError, MoveResult, Piece,
    PieceKind, PositionError, Square, SquareParseError,
};
