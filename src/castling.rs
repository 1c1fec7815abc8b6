use std::{
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
};

/// Columns involved in castling; the row is always the king's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn king_destination(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }
    pub fn rook_origin(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }
    pub fn rook_destination(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }
    /// Columns that must be empty for the castling to be offered.
    pub fn between(self) -> RangeInclusive<u8> {
        match self {
            CastlingSide::Kingside => 5..=6,
            CastlingSide::Queenside => 1..=3,
        }
    }
    pub fn from_king_destination(col: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|side| side.king_destination() == col)
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::Kingside => write!(f, "kingside")?,
            CastlingSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}
