use std::{
    error::Error,
    fmt::{self, Display, Formatter, Write as _},
    io::{self, BufRead, Write},
    str::FromStr,
};

use kingfall::{
    Board, Phase, PieceKind, Rejection, Side, Square,
    error::{ParsePieceKindError, ParseSquareError},
};
use log::info;

use crate::{board_display::BoardDisplay, misc::strip_prefix_token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Deselect,
    Square(Square),
    Promote(PieceKind),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Deselect => write!(f, "deselect")?,
            Input::Square(square) => write!(f, "{square}")?,
            Input::Promote(kind) => write!(f, "promote {kind}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "deselect" => Ok(Input::Deselect),
            s => {
                if let Some(s) = strip_prefix_token(s, "promote") {
                    Ok(Input::Promote(s.parse()?))
                } else {
                    Ok(Input::Square(s.parse()?))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseInputError {
    Square(ParseSquareError),
    PieceKind(ParsePieceKindError),
}
impl From<ParseSquareError> for ParseInputError {
    fn from(value: ParseSquareError) -> Self {
        ParseInputError::Square(value)
    }
}
impl From<ParsePieceKindError> for ParseInputError {
    fn from(value: ParsePieceKindError) -> Self {
        ParseInputError::PieceKind(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Square(err) => write!(f, "{err}")?,
            ParseInputError::PieceKind(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Square(err) => Some(err),
            ParseInputError::PieceKind(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionError {
    Rejected(Rejection),
    NotAPromotionChoice(PieceKind),
}
impl From<Rejection> for SessionError {
    fn from(value: Rejection) -> Self {
        SessionError::Rejected(value)
    }
}
impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Rejected(rejection) => write!(f, "{rejection}")?,
            SessionError::NotAPromotionChoice(kind) => {
                write!(f, "a pawn cannot be promoted to a {kind}")?;
            }
        }
        Ok(())
    }
}
impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::Rejected(rejection) => Some(rejection),
            SessionError::NotAPromotionChoice(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Redraw,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Settings {
    pub view: Side,
    pub show_coordinates: bool,
}

/// One game as seen by the player at the terminal.
#[derive(Debug, Clone)]
pub struct Session {
    pub board: Board,
    pub view: Side,
}
impl Session {
    pub fn new(view: Side) -> Self {
        Session {
            board: Board::new_game(),
            view,
        }
    }
    pub fn handle(&mut self, input: Input) -> Result<Flow, SessionError> {
        match input {
            Input::Help => return Ok(Flow::Help),
            Input::Quit => return Ok(Flow::Quit),
            Input::Flip => self.view = !self.view,
            Input::Restart => {
                self.board = Board::new_game();
                info!("game restarted");
            }
            Input::Deselect => self.board.deselect(),
            Input::Square(square) => self.click(square)?,
            Input::Promote(kind) => {
                if !PieceKind::PROMOTION_CHOICES.contains(&kind) {
                    return Err(SessionError::NotAPromotionChoice(kind));
                }
                self.board.try_resolve_promotion(kind)?;
            }
        }
        Ok(Flow::Redraw)
    }
    /// Same rules as clicking a square: move to a highlighted destination,
    /// otherwise select, otherwise drop the current selection.
    fn click(&mut self, square: Square) -> Result<(), Rejection> {
        if let Some(selection) = self.board.selection()
            && self.board.current_legal_destinations().contains(&square)
        {
            self.board.try_make_move(selection, square)?;
            return Ok(());
        }
        let had_selection = self.board.selection().is_some();
        match self.board.try_select(square).map(|_| ()) {
            Ok(()) => Ok(()),
            Err(_) if had_selection => {
                self.board.deselect();
                Ok(())
            }
            Err(rejection) => Err(rejection),
        }
    }
    pub fn info(&self) -> String {
        let mut info = String::new();
        match self.board.phase() {
            Phase::Terminal(winner) => {
                writeln!(&mut info, "{winner} wins!").unwrap();
                writeln!(&mut info, "type `restart` to play again").unwrap();
            }
            Phase::PromotionPending(square) => {
                writeln!(&mut info, "promotion on {square}: select a piece").unwrap();
                let choices: Vec<_> = PieceKind::PROMOTION_CHOICES
                    .iter()
                    .map(|kind| format!("promote {}", kind.lowercase()))
                    .collect();
                writeln!(&mut info, "{}", choices.join(" | ")).unwrap();
            }
            Phase::Normal => {
                writeln!(&mut info, "current turn: {}", self.board.to_move()).unwrap();
                if let Some(piece) = self
                    .board
                    .selection()
                    .and_then(|square| self.board.piece(square))
                {
                    writeln!(&mut info, "selected: {piece}").unwrap();
                }
            }
        }
        info
    }
}

pub fn repl(
    input: impl BufRead,
    mut output: impl Write,
    mut error: impl Write,
    settings: Settings,
) -> io::Result<()> {
    let mut lines = input.lines();
    let mut session = Session::new(settings.view);
    let mut first_time = true;
    loop {
        let mut info = session.info();
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        write!(
            output,
            "{}",
            BoardDisplay {
                board: &session.board,
                view: session.view,
                show_coordinates: settings.show_coordinates,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input: Input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available commands, enter `help`")?;
                    continue;
                }
            };
            match session.handle(input) {
                Ok(Flow::Redraw) => {}
                Ok(Flow::Help) => {
                    writeln!(output, "e2           - select, or move the selected piece")?;
                    writeln!(output, "deselect     - drop the current selection")?;
                    writeln!(output, "promote <q>  - promote to q, r, b, or n")?;
                    writeln!(output, "flip         - flip the board")?;
                    writeln!(output, "restart      - start a new game")?;
                    writeln!(output, "quit         - quit the game")?;
                }
                Ok(Flow::Quit) => return Ok(()),
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    continue;
                }
            }
            break;
        }
    }
}
#[cfg(test)]
mod test {
    use kingfall::{PieceKind, Rejection, Side, Square};

    use crate::repl::{Flow, Input, Session, SessionError, Settings, repl};

    fn click(session: &mut Session, name: &str) -> Result<Flow, SessionError> {
        session.handle(Input::Square(name.parse().unwrap()))
    }
    fn play(session: &mut Session, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            click(session, from).unwrap();
            click(session, to).unwrap();
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!("e2".parse(), Ok(Input::Square(Square::new(6, 4))));
        assert_eq!("promote q".parse(), Ok(Input::Promote(PieceKind::Queen)));
        assert_eq!("promote knight".parse(), Ok(Input::Promote(PieceKind::Knight)));
        assert_eq!("restart".parse(), Ok(Input::Restart));
        assert!("promote".parse::<Input>().is_err());
        assert!("z9".parse::<Input>().is_err());
    }
    #[test]
    fn clicks_select_then_move() {
        let mut session = Session::new(Side::White);
        click(&mut session, "e2").unwrap();
        assert_eq!(session.board.selection(), Some(Square::new(6, 4)));
        assert!(session.info().contains("selected: white pawn on e2"));
        click(&mut session, "e4").unwrap();
        assert_eq!(session.board.selection(), None);
        assert_eq!(session.board.to_move(), Side::Black);
        assert!(session.info().starts_with("current turn: black"));
    }
    #[test]
    fn clicking_another_own_piece_switches_selection() {
        let mut session = Session::new(Side::White);
        click(&mut session, "e2").unwrap();
        click(&mut session, "g1").unwrap();
        assert_eq!(session.board.selection(), Some(Square::new(7, 6)));
    }
    #[test]
    fn clicking_elsewhere_drops_the_selection() {
        let mut session = Session::new(Side::White);
        click(&mut session, "e2").unwrap();
        click(&mut session, "e5").unwrap();
        assert_eq!(session.board.selection(), None);
        assert_eq!(session.board.to_move(), Side::White);
    }
    #[test]
    fn clicking_enemy_piece_without_selection_reports_it() {
        let mut session = Session::new(Side::White);
        assert_eq!(
            click(&mut session, "e7"),
            Err(SessionError::Rejected(Rejection::NotYourTurn(Side::White)))
        );
    }
    #[test]
    fn promotion_only_offers_four_choices() {
        let mut session = Session::new(Side::White);
        play(
            &mut session,
            &[
                ("h2", "h4"),
                ("g7", "g5"),
                ("h4", "g5"),
                ("g8", "f6"),
                ("g5", "g6"),
                ("f6", "e4"),
                ("g6", "g7"),
                ("e4", "d6"),
                ("g7", "h8"),
            ],
        );
        assert_eq!(session.board.is_promotion_pending(), Some(Square::new(0, 7)));
        assert!(session.info().contains("promote q | promote r | promote b | promote n"));
        assert_eq!(
            session.handle(Input::Promote(PieceKind::King)),
            Err(SessionError::NotAPromotionChoice(PieceKind::King))
        );
        assert!(matches!(
            click(&mut session, "a2"),
            Err(SessionError::Rejected(Rejection::PromotionPending(_)))
        ));
        session.handle(Input::Promote(PieceKind::Rook)).unwrap();
        assert_eq!(
            session
                .board
                .piece_at(Square::new(0, 7))
                .map(|piece| piece.kind),
            Some(PieceKind::Rook)
        );
        assert_eq!(session.board.to_move(), Side::Black);
    }
    #[test]
    fn restart_replaces_a_finished_game() {
        let mut session = Session::new(Side::White);
        play(
            &mut session,
            &[("e2", "e4"), ("f7", "f6"), ("d1", "h5"), ("a7", "a6"), ("h5", "e8")],
        );
        assert_eq!(session.board.winner(), Some(Side::White));
        assert!(session.info().starts_with("white wins!"));
        assert!(matches!(
            click(&mut session, "a2"),
            Err(SessionError::Rejected(Rejection::GameOver(Side::White)))
        ));
        assert_eq!(session.handle(Input::Restart), Ok(Flow::Redraw));
        assert_eq!(session.board.winner(), None);
        assert_eq!(session.board.pieces().count(), 32);
    }
    #[test]
    fn scripted_session_runs_to_quit() {
        let script = b"help\ne2\ne4\nbogus\nflip\nquit\n";
        let mut output = Vec::new();
        let mut error = Vec::new();
        repl(
            &script[..],
            &mut output,
            &mut error,
            Settings {
                view: Side::White,
                show_coordinates: true,
            },
        )
        .unwrap();
        let output = String::from_utf8(output).unwrap();
        let error = String::from_utf8(error).unwrap();
        assert!(output.contains("type `help` for instructions"));
        assert!(output.contains("restart      - start a new game"));
        assert!(output.contains("current turn: black"));
        assert!(output.contains("h g f e d c b a"));
        assert!(error.contains("for available commands, enter `help`"));
    }
    #[test]
    fn end_of_input_ends_the_session() {
        let mut output = Vec::new();
        repl(
            &b"e2\n"[..],
            &mut output,
            Vec::new(),
            Settings {
                view: Side::Black,
                show_coordinates: false,
            },
        )
        .unwrap();
        assert!(String::from_utf8(output).unwrap().contains("selected: white pawn on e2"));
    }
}
