use std::fmt::{self, Display, Formatter};

use crate::{side::Side, square::Square};

/// Where a game stands with respect to accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Normal,
    /// The pawn on this square waits for its new kind.
    PromotionPending(Square),
    /// The side that captured the opposing king. Absorbing.
    Terminal(Side),
}
impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Normal => write!(f, "in play")?,
            Phase::PromotionPending(square) => write!(f, "promotion pending on {square}")?,
            Phase::Terminal(winner) => write!(f, "{winner} wins")?,
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{phase::Phase, side::Side, square::Square};

    #[test]
    fn describes_each_phase() {
        assert_eq!(Phase::Normal.to_string(), "in play");
        assert_eq!(
            Phase::PromotionPending(Square::new(0, 7)).to_string(),
            "promotion pending on h8"
        );
        assert_eq!(Phase::Terminal(Side::Black).to_string(), "black wins");
    }
}
