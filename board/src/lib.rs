use core::{fmt, str::FromStr};
use std::error;

mod grid;

pub use crate::grid::{Board, Square};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The number of files and ranks on the board
pub const SIZE: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("wrong position x:{x} y:{y}")]
    InvalidPosition { x: i8, y: i8 },
    #[error("more than one piece placed on {0}")]
    SquareConflict(Position),
    #[error("no piece held in slot {0}")]
    PieceNotFound(PieceId),
}

/// Map a rank as seen by one side onto the absolute rank, or back again
///
/// White's ranks are stored unchanged, black's are mirrored, so applying this twice for the same
/// side gets the original rank back. Ranks far off the board wrap around rather than overflow, so
/// they stay off the board and [`validate`] still reports them.
///
/// ```
/// use board::invert_rank;
/// assert_eq!(invert_rank(true, 2), 2);
/// assert_eq!(invert_rank(false, 2), 7);
/// assert_eq!(invert_rank(false, invert_rank(false, 3)), 3);
/// ```
pub const fn invert_rank(for_white: bool, rank: i8) -> i8 {
    if for_white {
        rank
    } else {
        (SIZE + 1).wrapping_sub(rank)
    }
}

/// Fail with [`Error::InvalidPosition`] unless the position is on the board
///
/// ```
/// use board::{validate, Position};
/// assert!(validate(Position::new(1, 8)).is_ok());
/// assert!(validate(Position::new(0, 4)).is_err());
/// ```
pub fn validate(position: Position) -> Result<()> {
    if position.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidPosition {
            x: position.x,
            y: position.y,
        })
    }
}

/// The sides of the game
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}
impl Side {
    pub const SIDES: [Side; 2] = [Self::White, Self::Black];

    pub const fn other(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn is_white(self) -> bool {
        match self {
            Side::White => true,
            Side::Black => false,
        }
    }
}
impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::White => "white",
            Side::Black => "black",
        })
    }
}

/// The symbol shown for a square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Empty,
    Pawn,
    Queen,
    Rook,
    Bishop,
    Knight,
    King,
}
impl Symbol {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "E",
            Self::Pawn => "P",
            Self::Queen => "Q",
            Self::Rook => "R",
            Self::Bishop => "B",
            Self::Knight => "KN",
            Self::King => "KI",
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The types of pieces there are
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 6] = [
        Self::Pawn,
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
    ];

    /// The symbol a square holding this kind of piece shows
    pub const fn symbol(self) -> Symbol {
        match self {
            Self::Pawn => Symbol::Pawn,
            Self::King => Symbol::King,
            Self::Queen => Symbol::Queen,
            Self::Rook => Symbol::Rook,
            Self::Bishop => Symbol::Bishop,
            Self::Knight => Symbol::Knight,
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Position,
    pub side: Side,
}
impl Piece {
    pub const fn new(kind: PieceKind, position: Position, side: Side) -> Self {
        Self {
            kind,
            position,
            side,
        }
    }

    pub const fn id(&self) -> Symbol {
        self.kind.symbol()
    }

    pub const fn belongs_to_white(&self) -> bool {
        self.side.is_white()
    }

    /// The squares this piece could move to
    ///
    /// Only pawns move so far, a single rank towards the opponent. The destination isn't checked
    /// for occupancy and may lie off the board for a pawn on its last rank.
    pub fn available_positions(&self) -> Vec<Position> {
        match self.kind {
            PieceKind::Pawn => {
                let white = self.belongs_to_white();
                let relative = invert_rank(white, self.position.y);
                let forward = invert_rank(white, relative.wrapping_add(1));
                vec![Position::new(self.position.x, forward)]
            }
            PieceKind::King
            | PieceKind::Queen
            | PieceKind::Rook
            | PieceKind::Bishop
            | PieceKind::Knight => Vec::new(),
        }
    }
}

/// Handle to one slot of a player's roster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PieceId {
    side: Side,
    slot: u8,
}
impl PieceId {
    pub const fn new(side: Side, slot: u8) -> Self {
        Self { side, slot }
    }

    /// The side owning the piece
    pub const fn side(self) -> Side {
        self.side
    }

    pub const fn slot(self) -> usize {
        self.slot as usize
    }
}
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.side, self.slot)
    }
}

/// An absolute position on the board
///
/// Both coordinates count from 1: `x` is the file (`A` is 1) and `y` is the rank. Positions off
/// the board can be built, so they can be reported by [`validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}
impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn is_valid(self) -> bool {
        0 < self.x && self.x <= SIZE && 0 < self.y && self.y <= SIZE
    }

    /// The letter of this position's file, if on the board
    ///
    /// ```
    /// use board::Position;
    /// assert_eq!(Position::new(5, 2).file_letter(), Some('E'));
    /// assert_eq!(Position::new(9, 2).file_letter(), None);
    /// ```
    pub const fn file_letter(self) -> Option<char> {
        if 0 < self.x && self.x <= SIZE {
            Some((b'A' + (self.x - 1) as u8) as char)
        } else {
            None
        }
    }

    /// An iterator over every position on the board, in the order it's drawn
    ///
    /// That is rank 8 down to rank 1, and file `A` to `H` within a rank.
    ///
    /// ```
    /// assert_eq!(board::Position::all_positions().count(), 64);
    /// ```
    pub fn all_positions() -> impl Iterator<Item = Self> {
        (0..SIZE * SIZE).map(|idx| Self::new(idx % SIZE + 1, SIZE - idx / SIZE))
    }
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file_letter(), self.is_valid()) {
            (Some(file), true) => write!(f, "{}{}", file, self.y),
            _ => f.write_str("XX"),
        }
    }
}

#[derive(Debug)]
pub struct PositionFromStrErr;
impl fmt::Display for PositionFromStrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("board position string was invalid")
    }
}
impl error::Error for PositionFromStrErr {}

/// Accepts `e2`, `E2` and `E-2`
impl FromStr for Position {
    type Err = PositionFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.as_bytes();
        let (file, rank) = match s {
            [file, rank] | [file, b'-', rank] => (*file, *rank),
            _ => return Err(PositionFromStrErr),
        };
        let x = match file.to_ascii_lowercase() {
            c @ b'a'..=b'h' => (c - b'a') as i8 + 1,
            _ => return Err(PositionFromStrErr),
        };
        let y = match rank {
            c @ b'1'..=b'8' => (c - b'0') as i8,
            _ => return Err(PositionFromStrErr),
        };
        Ok(Self::new(x, y))
    }
}
