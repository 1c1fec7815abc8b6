use std::{
    fmt::{self, Display, Formatter},
    ops::Not,
    str::FromStr,
};

use crate::error::ParseSideError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}
impl Side {
    pub const ALL: [Self; 2] = [Side::White, Side::Black];

    pub fn lowercase(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}
impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white")?,
            Side::Black => write!(f, "black")?,
        }
        Ok(())
    }
}
impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let side = match s {
            "w" | "W" | "white" => Side::White,
            "b" | "B" | "black" => Side::Black,
            _ => return Err(ParseSideError),
        };
        Ok(side)
    }
}
impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::side::Side;

    #[test]
    fn not_is_an_involution() {
        for side in Side::ALL {
            assert_ne!(!side, side);
            assert_eq!(!!side, side);
        }
    }
    #[test]
    fn parses_what_it_displays() {
        for side in Side::ALL {
            assert_eq!(side.to_string().parse(), Ok(side));
            assert_eq!(side.lowercase().to_string().parse(), Ok(side));
        }
        assert!("red".parse::<Side>().is_err());
    }
}
