use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
};

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::{
    castling::CastlingSide,
    phase::Phase,
    piece::{Piece, PieceKind, PieceSnapshot},
    side::Side,
    simple_board::SimpleBoard,
    square::{Square, home_row, pawn_home_row, promotion_row},
};

/// Why an input was turned down. None of these are fatal; the board is left
/// exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    GameOver(Side),
    PromotionPending(Square),
    NoPromotionPending,
    EmptySquare(Square),
    NotYourTurn(Side),
    FriendlyDestination(Square),
}
impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::GameOver(winner) => write!(f, "the game is over, {winner} won")?,
            Rejection::PromotionPending(square) => {
                write!(f, "the pawn on {square} must be promoted first")?;
            }
            Rejection::NoPromotionPending => write!(f, "no pawn is waiting for promotion")?,
            Rejection::EmptySquare(square) => write!(f, "no piece found on {square}")?,
            Rejection::NotYourTurn(side) => write!(f, "it is {side}'s turn")?,
            Rejection::FriendlyDestination(square) => {
                write!(f, "{square} is occupied by a friendly piece")?;
            }
        }
        Ok(())
    }
}
impl Error for Rejection {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareOccupied(pub Square);

impl Display for SquareOccupied {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} already holds a piece", self.0)?;
        Ok(())
    }
}
impl Error for SquareOccupied {}

/// Stable handle into the piece arena. Ids are never reused within a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId(usize);

impl From<PieceId> for usize {
    fn from(value: PieceId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Option<Piece>>,
    grid: SimpleBoard<Option<PieceId>>,
    to_move: Side,
    selection: Option<Square>,
    legal_destinations: FxHashSet<Square>,
    en_passant_target: Option<Square>,
    promotion_pending: Option<PieceId>,
    result: Option<Side>,
}
impl Board {
    pub fn new_game() -> Self {
        let mut board = Board::empty(Side::White);
        for (col, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
            for side in Side::ALL {
                board.spawn(Piece::new(kind, side, Square::new(home_row(side), col)));
                board.spawn(Piece::new(
                    PieceKind::Pawn,
                    side,
                    Square::new(pawn_home_row(side), col),
                ));
            }
        }
        board
    }
    pub fn empty(to_move: Side) -> Self {
        Board {
            pieces: Vec::new(),
            grid: SimpleBoard::default(),
            to_move,
            selection: None,
            legal_destinations: FxHashSet::default(),
            en_passant_target: None,
            promotion_pending: None,
            result: None,
        }
    }
    /// Puts a piece on its own `position`, keeping whatever `has_moved` it carries.
    pub fn place(&mut self, piece: Piece) -> Result<PieceId, SquareOccupied> {
        if self[piece.position].is_some() {
            return Err(SquareOccupied(piece.position));
        }
        Ok(self.spawn(piece))
    }
    fn spawn(&mut self, piece: Piece) -> PieceId {
        debug_assert!(self[piece.position].is_none());
        let id = PieceId(self.pieces.len());
        self.pieces.push(Some(piece));
        self.grid[piece.position] = Some(id);
        id
    }
    pub fn to_move(&self) -> Side {
        self.to_move
    }
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }
    pub fn current_legal_destinations(&self) -> &FxHashSet<Square> {
        &self.legal_destinations
    }
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
    pub fn is_promotion_pending(&self) -> Option<Square> {
        self.promotion_pending
            .and_then(|id| self[id])
            .map(|pawn| pawn.position)
    }
    pub fn winner(&self) -> Option<Side> {
        self.result
    }
    pub fn phase(&self) -> Phase {
        if let Some(winner) = self.result {
            Phase::Terminal(winner)
        } else if let Some(square) = self.is_promotion_pending() {
            Phase::PromotionPending(square)
        } else {
            Phase::Normal
        }
    }
    pub fn piece(&self, square: Square) -> Option<&Piece> {
        self[square].and_then(|id| self[id].as_ref())
    }
    pub fn piece_at(&self, square: Square) -> Option<PieceSnapshot> {
        self.piece(square).map(|piece| piece.snapshot())
    }
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().flatten()
    }
    /// The base filter under every piece's move generation: `from` holds a
    /// piece and `to` does not hold one of the same side.
    pub fn is_destination_occupiable(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.piece(from) else {
            return false;
        };
        self.piece(to).is_none_or(|target| target.side != piece.side)
    }
    fn accepts_input(&self) -> Result<(), Rejection> {
        match self.phase() {
            Phase::Normal => Ok(()),
            Phase::PromotionPending(square) => Err(Rejection::PromotionPending(square)),
            Phase::Terminal(winner) => Err(Rejection::GameOver(winner)),
        }
    }
    fn movable_piece(&self, square: Square) -> Result<(PieceId, Piece), Rejection> {
        let (id, piece) = self[square]
            .and_then(|id| self[id].map(|piece| (id, piece)))
            .ok_or(Rejection::EmptySquare(square))?;
        if piece.side != self.to_move {
            return Err(Rejection::NotYourTurn(self.to_move));
        }
        Ok((id, piece))
    }
    pub fn select(&mut self, square: Square) -> bool {
        self.try_select(square)
            .inspect_err(|rejection| debug!("selection of {square} rejected: {rejection}"))
            .is_ok()
    }
    pub fn try_select(&mut self, square: Square) -> Result<&FxHashSet<Square>, Rejection> {
        self.accepts_input()?;
        let (_, piece) = self.movable_piece(square)?;
        self.legal_destinations = piece.generate_moves(self);
        self.selection = Some(square);
        Ok(&self.legal_destinations)
    }
    pub fn deselect(&mut self) {
        self.selection = None;
        self.legal_destinations.clear();
    }
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        self.try_make_move(from, to)
            .inspect_err(|rejection| debug!("move {from} -> {to} rejected: {rejection}"))
            .is_ok()
    }
    /// Applies a move whose destination the caller took from
    /// [`Piece::generate_moves`] (usually via [`Board::current_legal_destinations`]).
    /// Only occupancy is re-checked here.
    pub fn try_make_move(&mut self, from: Square, to: Square) -> Result<Phase, Rejection> {
        self.accepts_input()?;
        let (id, piece) = self.movable_piece(from)?;
        if !self.is_destination_occupiable(from, to) {
            return Err(Rejection::FriendlyDestination(to));
        }
        self.deselect();
        let captured = self.remove(to);
        if let Some(captured) = captured {
            debug!("{piece} captures {captured}");
        }
        if captured.is_some_and(|captured| captured.kind == PieceKind::King) {
            self.relocate(id, to);
            self.result = Some(piece.side);
            info!("{} captured the {} king on {to}, game over", piece.side, !piece.side);
            return Ok(self.phase());
        }
        if piece.kind == PieceKind::Pawn
            && Some(to) == self.en_passant_target
            && to.col() != from.col()
        {
            let passed = from.with_col(to.col());
            if let Some(captured) = self.remove(passed) {
                debug!("{piece} captures {captured} en passant");
            }
        }
        self.relocate(id, to);

        let travelled = to - from;
        self.en_passant_target = (piece.kind == PieceKind::Pawn && travelled.row.abs() == 2)
            .then(|| Square::new((from.row() + to.row()) / 2, from.col()));

        if piece.kind == PieceKind::King
            && travelled.col.abs() == 2
            && let Some(castling) = CastlingSide::from_king_destination(to.col())
        {
            self.castle_rook(from.row(), castling);
        }
        if piece.kind == PieceKind::Pawn && to.row() == promotion_row(piece.side) {
            self.promotion_pending = Some(id);
            debug!("{} pawn on {to} awaits promotion", piece.side);
            return Ok(self.phase());
        }
        self.to_move = !self.to_move;
        Ok(self.phase())
    }
    fn castle_rook(&mut self, row: u8, castling: CastlingSide) {
        let origin = Square::new(row, castling.rook_origin());
        let destination = Square::new(row, castling.rook_destination());
        match (self[origin], self[destination]) {
            (Some(rook), None) => {
                self.relocate(rook, destination);
                debug!("{castling} castling moved the rook {origin} -> {destination}");
            }
            _ => warn!("{castling} castling on row {row} found no rook to move"),
        }
    }
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> bool {
        self.try_resolve_promotion(kind)
            .inspect_err(|rejection| debug!("promotion to {kind} rejected: {rejection}"))
            .is_ok()
    }
    /// Any kind is accepted, including king and pawn; front ends offer
    /// [`PieceKind::PROMOTION_CHOICES`].
    pub fn try_resolve_promotion(&mut self, kind: PieceKind) -> Result<(), Rejection> {
        let id = self
            .promotion_pending
            .take()
            .ok_or(Rejection::NoPromotionPending)?;
        if let Some(pawn) = self[id].as_mut() {
            pawn.kind = kind;
            info!("{} pawn on {} promoted to {kind}", pawn.side, pawn.position);
        }
        self.to_move = !self.to_move;
        self.deselect();
        Ok(())
    }
    /// Moves the piece so that its record and the grid agree, and marks it moved.
    fn relocate(&mut self, id: PieceId, to: Square) {
        debug_assert!(self[to].is_none(), "{to} should be vacated first");
        let Some(piece) = self[id].as_mut() else {
            return;
        };
        let from = piece.position;
        piece.position = to;
        piece.has_moved = true;
        self.grid[from] = None;
        self.grid[to] = Some(id);
    }
    fn remove(&mut self, square: Square) -> Option<Piece> {
        let id = self.grid[square].take()?;
        self[id].take()
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::new_game()
    }
}
impl Index<Square> for Board {
    type Output = Option<PieceId>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.grid[index]
    }
}
impl Index<PieceId> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: PieceId) -> &Self::Output {
        let index: usize = index.into();
        &self.pieces[index]
    }
}
impl IndexMut<PieceId> for Board {
    fn index_mut(&mut self, index: PieceId) -> &mut Self::Output {
        let index: usize = index.into();
        &mut self.pieces[index]
    }
}
