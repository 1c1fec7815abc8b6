#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    reason = "the board api is small and read alongside its tests"
)]

//! Rules engine for two-player chess where capturing the king wins.
//!
//! There is no check detection: moves are pseudo-legal, and a king may step
//! into or stay in attack. Castling, en passant and promotion are supported.
//! Callers drive a [`Board`] through selection and moves and render it through
//! the query methods.

pub mod board;
pub mod castling;
pub mod error;
pub mod phase;
pub mod piece;
pub mod side;
pub mod simple_board;
pub mod square;

pub use crate::{
    board::{Board, PieceId, Rejection, SquareOccupied},
    phase::Phase,
    piece::{Piece, PieceKind, PieceSnapshot},
    side::Side,
    square::Square,
};

pub fn new_game() -> Board {
    Board::new_game()
}
