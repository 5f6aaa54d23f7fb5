//! The grid of squares, and how it's rebuilt from where the pieces are

use tracing::{debug, warn};

use crate::{validate, Error, Piece, PieceId, Position, Result, Side, Symbol, SIZE};

/// What one square on the board holds
///
/// The symbol is [`Symbol::Empty`] exactly when no piece is referenced, and otherwise matches the
/// referenced piece's id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    symbol: Symbol,
    piece: Option<PieceId>,
}
impl Square {
    pub const EMPTY: Self = Self {
        symbol: Symbol::Empty,
        piece: None,
    };

    /// A square holding the given piece
    pub const fn occupied(id: PieceId, piece: &Piece) -> Self {
        Self {
            symbol: piece.id(),
            piece: Some(id),
        }
    }

    pub const fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub const fn piece(&self) -> Option<PieceId> {
        self.piece
    }

    pub const fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Whether a white piece is on this square
    pub const fn belongs_to_white(&self) -> bool {
        match self.piece {
            Some(id) => id.side().is_white(),
            None => false,
        }
    }

    /// The side of the piece on this square, if any
    pub fn side(&self) -> Option<Side> {
        self.piece.map(PieceId::side)
    }
}
impl Default for Square {
    fn default() -> Self {
        Self::EMPTY
    }
}

const GRID_SIZE: usize = SIZE as usize;

/// The 8x8 grid
///
/// The grid only mirrors where the players' pieces are, so it has to be [resynced](Self::resync)
/// after any piece moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: [[Square; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// A board with every square empty
    pub const EMPTY: Self = Self {
        grid: [[Square::EMPTY; GRID_SIZE]; GRID_SIZE],
    };

    /// The row and column in the grid for a position, which must be valid
    const fn index(position: Position) -> (usize, usize) {
        ((SIZE - position.y) as usize, (position.x - 1) as usize)
    }

    pub fn get_position(&self, position: Position) -> Result<Square> {
        validate(position)?;
        let (row, col) = Self::index(position);
        Ok(self.grid[row][col])
    }

    pub fn set_position(&mut self, position: Position, square: Square) -> Result<()> {
        validate(position)?;
        let (row, col) = Self::index(position);
        self.grid[row][col] = square;
        Ok(())
    }

    /// Every square with its position, rank 8 first and file `A` first within a rank
    pub fn squares(&self) -> impl Iterator<Item = (Position, Square)> + '_ {
        Position::all_positions().map(|position| {
            let (row, col) = Self::index(position);
            (position, self.grid[row][col])
        })
    }

    /// Clear the board, then place each given piece on its current position
    ///
    /// The grid is always rebuilt in full. If a piece is off the board it is skipped, and if two
    /// pieces share a square the later one is shown. Either way the first such problem is
    /// returned once every piece has been placed.
    pub fn resync<'a>(
        &mut self,
        pieces: impl IntoIterator<Item = (PieceId, &'a Piece)>,
    ) -> Result<()> {
        self.grid = Self::EMPTY.grid;
        let mut problem = None;
        let mut placed = 0usize;
        for (id, piece) in pieces {
            let occupant = match self.get_position(piece.position) {
                Ok(occupant) => occupant,
                Err(err) => {
                    warn!(%id, %err, "piece is off the board");
                    problem.get_or_insert(err);
                    continue;
                }
            };
            if !occupant.is_empty() {
                warn!(%id, position = %piece.position, "pieces share a square");
                problem.get_or_insert(Error::SquareConflict(piece.position));
            }
            self.set_position(piece.position, Square::occupied(id, piece))?;
            placed += 1;
        }
        debug!(placed, "board resynced");
        problem.map_or(Ok(()), Err)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}
