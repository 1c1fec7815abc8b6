use std::{
    fmt::{self, Display, Formatter},
    num::NonZero,
    ops::{Mul, Sub},
    str::FromStr,
};

use crate::{error::ParseSquareError, side::Side};

// Bit structure: 10RRRCCC
// first two bits is always `10` for `NonZero` size optimizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(NonZero<u8>);

impl Square {
    /// Row 0 is Black's home rank, row 7 is White's. Column 0 is the `a` file.
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 8, "{row} should be < 8");
        debug_assert!(col < 8, "{col} should be < 8");
        let byte = 0b1000_0000 | (row << 3) | col;
        Square(NonZero::new(byte).unwrap())
    }
    pub fn new_checked(row: u8, col: u8) -> Option<Self> {
        if row >= 8 || col >= 8 {
            None
        } else {
            Some(Self::new(row, col))
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1'),
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square::new(row, col))
    }
    pub fn row(self) -> u8 {
        (self.0.get() >> 3) & 0b_111
    }
    pub fn col(self) -> u8 {
        self.0.get() & 0b_111
    }
    pub fn with_col(self, col: u8) -> Self {
        Square::new(self.row(), col)
    }
    /// Returns `None` when the offset leaves the board.
    pub fn move_by(self, offset: Vector) -> Option<Self> {
        Self::new_checked(
            self.row().checked_add_signed(offset.row)?,
            self.col().checked_add_signed(offset.col)?,
        )
    }
    /// Squares along `direction`, excluding `self`, up to the board edge.
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        (1..).map_while(move |distance| self.move_by(direction * distance))
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }
    pub fn is_light(self) -> bool {
        (self.row() + self.col()) % 2 == 0
    }
}
pub fn home_row(side: Side) -> u8 {
    match side {
        Side::White => 7,
        Side::Black => 0,
    }
}
pub fn pawn_home_row(side: Side) -> u8 {
    match side {
        Side::White => 6,
        Side::Black => 1,
    }
}
pub fn promotion_row(side: Side) -> u8 {
    match side {
        Side::White => 0,
        Side::Black => 7,
    }
}
pub fn pawn_direction(side: Side) -> i8 {
    match side {
        Side::White => -1,
        Side::Black => 1,
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.col() + b'a') as char;
        let rank = 8 - self.row();
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}
impl Sub<Self> for Square {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            row: self.row().cast_signed() - rhs.row().cast_signed(),
            col: self.col().cast_signed() - rhs.col().cast_signed(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub col: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, col: 0 };

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector { row: -2, col: -1 },
        Vector { row: -2, col: 1 },
        Vector { row: -1, col: -2 },
        Vector { row: -1, col: 2 },
        Vector { row: 1, col: -2 },
        Vector { row: 1, col: 2 },
        Vector { row: 2, col: -1 },
        Vector { row: 2, col: 1 },
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 0 },
        Vector { row: -1, col: 1 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 0 },
        Vector { row: 1, col: 1 },
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, col: 0 },
        Vector { row: 1, col: 0 },
        Vector { row: 0, col: -1 },
        Vector { row: 0, col: 1 },
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector { row: -1, col: -1 },
        Vector { row: -1, col: 1 },
        Vector { row: 1, col: -1 },
        Vector { row: 1, col: 1 },
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub fn pawn_single_move(side: Side) -> Self {
        Vector {
            row: pawn_direction(side),
            col: 0,
        }
    }
    pub fn pawn_double_move(side: Side) -> Self {
        Vector::pawn_single_move(side) * 2
    }
    pub fn pawn_attacks(side: Side) -> [Self; 2] {
        [-1, 1].map(|col| Vector {
            row: pawn_direction(side),
            col,
        })
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
