use std::fmt::{self, Display, Formatter};

use kingfall::{Board, Side, Square};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const SELECTED: &str = "\x1b[30;102m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Renders the board with the current selection and its destinations
/// highlighted, and `info` lines printed to the right.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Side,
    pub show_coordinates: bool,
    pub info: &'b str,
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let row = match self.view {
                Side::White => row,
                Side::Black => 7 - row,
            };
            for col in 0..8 {
                let col = match self.view {
                    Side::White => col,
                    Side::Black => 7 - col,
                };
                let square = Square::new(row, col);
                let color = if self.board.selection() == Some(square) {
                    SELECTED
                } else if self.board.current_legal_destinations().contains(&square) {
                    HIGHLIGHTED
                } else if square.is_light() {
                    LIGHT
                } else {
                    DARK
                };
                let figurine = self
                    .board
                    .piece_at(square)
                    .map_or(' ', |piece| piece.figurine());
                write!(f, "{color}{figurine} {RESET}")?;
            }
            if self.show_coordinates {
                write!(f, "{}", 8 - row)?;
            }
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        if self.show_coordinates {
            match self.view {
                Side::White => write!(f, "a b c d e f g h")?,
                Side::Black => write!(f, "h g f e d c b a")?,
            }
            if let Some(line) = lines.next() {
                write!(f, "   {line}")?;
            }
            writeln!(f)?;
        }
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
