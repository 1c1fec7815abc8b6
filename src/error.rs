use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseSideError;

impl Display for ParseSideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "provided string was not `w`, `b`, `W`, `B`, `white`, or `black`"
        )?;
        Ok(())
    }
}
impl Error for ParseSideError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsePieceKindError(pub String);

impl Display for ParsePieceKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected a piece name such as `queen` or one of `p`, `n`, `b`, `r`, `q`, `k`",
            self.0
        )?;
        Ok(())
    }
}
impl Error for ParsePieceKindError {}
