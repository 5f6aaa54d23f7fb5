//! A text front end: draws the board and reads commands typed in the terminal

use core::str::FromStr;
use std::io::{self, BufRead, Write};

use board::{Board, Position, PositionFromStrErr, Side, Square, SIZE};

#[derive(Debug, thiserror::Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("couldn't read square: {0}")]
    Square(#[from] PositionFromStrErr),
    #[error("unrecognized command `{0}`")]
    Unrecognized(String),
}

/// A request to move whatever is on one square to another
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

/// Accepts `e2e4`, or the two squares separated by whitespace
impl FromStr for MoveRequest {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let (from, to) = match (words.next(), words.next(), words.next()) {
            (Some(joined), None, None) if joined.len() == 4 && joined.is_ascii() => {
                joined.split_at(2)
            }
            (Some(from), Some(to), None) => (from, to),
            (None, _, _) => return Err(CommandParseError::Empty),
            _ => return Err(CommandParseError::Unrecognized(s.trim().to_owned())),
        };
        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

/// Something typed at the prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// List where the piece on this square could go
    Candidates(Position),
    Move(MoveRequest),
    /// Pass the turn to the other side
    Turn,
    /// Draw the board again
    Board,
    Quit,
}
impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.to_ascii_lowercase().as_str() {
            "" => return Err(CommandParseError::Empty),
            "turn" => Self::Turn,
            "board" => Self::Board,
            "quit" | "exit" => Self::Quit,
            _ if !s.contains(char::is_whitespace) && s.len() <= 3 => {
                Self::Candidates(s.parse()?)
            }
            _ => Self::Move(s.parse()?),
        })
    }
}

/// The text drawn for one square
///
/// White pieces are upper case, black pieces lower case.
fn square_text(square: Square) -> String {
    match square.side() {
        None => ".".to_owned(),
        Some(Side::White) => square.symbol().as_str().to_owned(),
        Some(Side::Black) => square.symbol().as_str().to_ascii_lowercase(),
    }
}

/// The name of a candidate square, or its raw coordinates if it's off the board
fn candidate_text(position: Position) -> String {
    if position.is_valid() {
        position.to_string()
    } else {
        format!("x:{} y:{} (off the board)", position.x, position.y)
    }
}

/// Draw the board with file letters along the top and rank numbers down the left
///
/// ```
/// let text = terminal_ui::render(&board::Board::EMPTY);
/// assert_eq!(text.lines().next().unwrap(), "   A  B  C  D  E  F  G  H");
/// ```
pub fn render(board: &Board) -> String {
    let mut out = String::from("  ");
    for position in Position::all_positions().take(SIZE as usize) {
        out.push_str(&format!(" {:<2}", position.file_letter().unwrap_or('?')));
    }
    let mut rank = 0;
    for (position, square) in board.squares() {
        if position.y != rank {
            rank = position.y;
            out.truncate(out.trim_end().len());
            out.push_str(&format!("\n{rank} "));
        }
        out.push_str(&format!(" {:<2}", square_text(square)));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// Reads commands from one stream and writes the board and messages to another
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
}

impl TerminalUi<io::StdinLock<'static>, io::Stdout> {
    /// A front end on the process's standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        write!(self.output, "{}", render(board))
    }

    pub fn show_candidates(&mut self, from: Position, candidates: &[Position]) -> io::Result<()> {
        if candidates.is_empty() {
            return writeln!(self.output, "{from} has nowhere to go");
        }
        let names: Vec<_> = candidates.iter().copied().map(candidate_text).collect();
        writeln!(self.output, "{from} can go to {}", names.join(", "))
    }

    pub fn report(&mut self, message: impl core::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Prompt until a command is read, or return `None` once input runs out
    pub fn next_command(&mut self, side_to_move: Side) -> io::Result<Option<Command>> {
        loop {
            write!(self.output, "{side_to_move} to move> ")?;
            self.output.flush()?;
            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Ok(None);
            }
            match buffer.parse() {
                Ok(command) => return Ok(Some(command)),
                Err(CommandParseError::Empty) => {}
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::{Piece, PieceId, PieceKind};

    fn pos(name: &str) -> Position {
        name.parse().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("e2".parse::<Command>().unwrap(), Command::Candidates(pos("e2")));
        assert_eq!("E-2".parse::<Command>().unwrap(), Command::Candidates(pos("e2")));
        let mv = Command::Move(MoveRequest {
            from: pos("e2"),
            to: pos("e4"),
        });
        assert_eq!("e2e4".parse::<Command>().unwrap(), mv);
        assert_eq!(" e2  e4 ".parse::<Command>().unwrap(), mv);
        assert_eq!("E-2 E-4".parse::<Command>().unwrap(), mv);
        assert_eq!("TURN".parse::<Command>().unwrap(), Command::Turn);
        assert_eq!("board".parse::<Command>().unwrap(), Command::Board);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_reject_bad_commands() {
        assert!(matches!("".parse::<Command>(), Err(CommandParseError::Empty)));
        assert!(matches!(
            "z9".parse::<Command>(),
            Err(CommandParseError::Square(_))
        ));
        assert!(matches!(
            "e2 e4 e5".parse::<Command>(),
            Err(CommandParseError::Unrecognized(_))
        ));
        assert!(matches!(
            "castle".parse::<Command>(),
            Err(CommandParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_render_marks_sides() {
        let mut board = Board::EMPTY;
        let rook = Piece::new(PieceKind::Rook, pos("a1"), Side::White);
        let king = Piece::new(PieceKind::King, pos("e8"), Side::Black);
        board
            .resync([
                (PieceId::new(Side::White, 8), &rook),
                (PieceId::new(Side::Black, 15), &king),
            ])
            .unwrap();
        let text = render(&board);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "8  .  .  .  .  ki .  .  .");
        assert_eq!(lines[8], "1  R  .  .  .  .  .  .  .");
    }

    #[test]
    fn test_prompt_skips_blank_and_bad_lines() {
        let input = b"\nnonsense here now\ne2\n" as &[u8];
        let mut ui = TerminalUi::new(input, Vec::new());
        assert_eq!(
            ui.next_command(Side::White).unwrap(),
            Some(Command::Candidates(pos("e2")))
        );
        assert_eq!(ui.next_command(Side::White).unwrap(), None);
        let output = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(output.matches("white to move> ").count(), 4);
        assert!(output.contains("unrecognized command `nonsense here now`"));
    }

    #[test]
    fn test_show_candidates() {
        let mut ui = TerminalUi::new(&b""[..], Vec::new());
        ui.show_candidates(pos("e2"), &[pos("e3")]).unwrap();
        ui.show_candidates(pos("g1"), &[]).unwrap();
        let output = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(output, "E2 can go to E3\nG1 has nowhere to go\n");
    }

    #[test]
    fn test_show_off_board_candidate() {
        let mut ui = TerminalUi::new(&b""[..], Vec::new());
        let pawn = Piece::new(PieceKind::Pawn, pos("c8"), Side::White);
        ui.show_candidates(pawn.position, &pawn.available_positions())
            .unwrap();
        let output = String::from_utf8(ui.into_output()).unwrap();
        assert_eq!(output, "C8 can go to x:3 y:9 (off the board)\n");
        assert!(!output.contains("XX"));
    }
}
