use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use log::trace;
use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    castling::CastlingSide,
    error::ParsePieceKindError,
    side::Side,
    square::{Square, Vector, pawn_home_row},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "p" | "P" | "pawn" => PieceKind::Pawn,
            "n" | "N" | "knight" => PieceKind::Knight,
            "b" | "B" | "bishop" => PieceKind::Bishop,
            "r" | "R" | "rook" => PieceKind::Rook,
            "q" | "Q" | "queen" => PieceKind::Queen,
            "k" | "K" | "king" => PieceKind::King,
            s => return Err(ParsePieceKindError(s.to_owned())),
        };
        Ok(kind)
    }
}

/// What a renderer needs to know about an occupied square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub side: Side,
}
impl PieceSnapshot {
    pub fn symbol(self) -> char {
        match self.side {
            Side::White => self.kind.uppercase(),
            Side::Black => self.kind.lowercase(),
        }
    }
    pub fn figurine(self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::King) => '♔',
            (Side::Black, PieceKind::Pawn) => '♟',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for PieceSnapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub position: Square,
    /// Set on the first move and never reset. Gates castling only; pawn double
    /// steps look at the starting row instead.
    pub has_moved: bool,
}
impl Piece {
    pub fn new(kind: PieceKind, side: Side, position: Square) -> Self {
        Piece {
            kind,
            side,
            position,
            has_moved: false,
        }
    }
    pub fn snapshot(self) -> PieceSnapshot {
        PieceSnapshot {
            kind: self.kind,
            side: self.side,
        }
    }
    fn is_enemy_of(self, other: Piece) -> bool {
        self.side != other.side
    }
    /// Pseudo-legal destinations: piece geometry and occupancy only, the safety
    /// of the mover's own king is never considered.
    pub fn generate_moves(self, board: &Board) -> FxHashSet<Square> {
        let moves: FxHashSet<_> = match self.kind {
            PieceKind::Pawn => self.pawn_moves(board).collect(),
            PieceKind::Knight => self.step_moves(board, &Vector::KNIGHT_MOVES).collect(),
            PieceKind::Bishop => self
                .all_directional_moves(board, &Vector::BISHOP_DIRECTIONS)
                .collect(),
            PieceKind::Rook => self
                .all_directional_moves(board, &Vector::ROOK_DIRECTIONS)
                .collect(),
            PieceKind::Queen => self
                .all_directional_moves(board, &Vector::QUEEN_DIRECTIONS)
                .collect(),
            PieceKind::King => self
                .step_moves(board, &Vector::KING_MOVES)
                .chain(self.castling_moves(board))
                .collect(),
        };
        trace!("{self} can reach {} squares", moves.len());
        moves
    }
    fn step_moves(self, board: &Board, offsets: &[Vector]) -> impl Iterator<Item = Square> {
        offsets
            .iter()
            .copied()
            .filter_map(move |offset| self.position.move_by(offset))
            .filter(move |destination| {
                board.is_destination_occupiable(self.position, *destination)
            })
    }
    fn directional_moves(self, board: &Board, direction: Vector) -> impl Iterator<Item = Square> {
        let mut resume = true;
        self.position
            .line_exclusive(direction)
            .map_while(move |destination| {
                if !resume {
                    return None;
                }
                match board.piece(destination) {
                    Some(target) => {
                        resume = false;
                        Some(self.is_enemy_of(*target).then_some(destination))
                    }
                    None => Some(Some(destination)),
                }
            })
            .flatten()
    }
    fn all_directional_moves(
        self,
        board: &Board,
        directions: &[Vector],
    ) -> impl Iterator<Item = Square> {
        directions
            .iter()
            .copied()
            .flat_map(move |direction| self.directional_moves(board, direction))
    }
    fn pawn_moves(self, board: &Board) -> impl Iterator<Item = Square> {
        let forward_steps = if self.position.row() == pawn_home_row(self.side) {
            2
        } else {
            1
        };
        let advances = self
            .position
            .line_exclusive(Vector::pawn_single_move(self.side))
            .take(forward_steps)
            .take_while(move |destination| board.piece(*destination).is_none());
        let captures = Vector::pawn_attacks(self.side)
            .into_iter()
            .filter_map(move |offset| self.position.move_by(offset))
            .filter(move |destination| {
                board
                    .piece(*destination)
                    .is_some_and(|target| self.is_enemy_of(*target))
            });
        let en_passant = board.en_passant_target().filter(|target| {
            Vector::pawn_attacks(self.side)
                .into_iter()
                .any(|offset| self.position.move_by(offset) == Some(*target))
        });
        advances.chain(captures).chain(en_passant)
    }
    fn castling_moves(self, board: &Board) -> impl Iterator<Item = Square> {
        let row = self.position.row();
        CastlingSide::ALL
            .into_iter()
            .filter(move |_| !self.has_moved)
            .filter(move |castling| {
                let rook = board.piece(Square::new(row, castling.rook_origin()));
                rook.is_some_and(|rook| rook.kind == PieceKind::Rook && !rook.has_moved)
                    && castling
                        .between()
                        .all(|col| board.piece(Square::new(row, col)).is_none())
            })
            .map(move |castling| Square::new(row, castling.king_destination()))
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.snapshot(), self.position)?;
        Ok(())
    }
}
