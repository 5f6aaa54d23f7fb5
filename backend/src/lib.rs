use board::{Board, Piece, PieceId, Position, Result, Side, Square};
use players::Player;
use tracing::{debug, instrument};

/// One game: both players, the board showing where their pieces are, and whose turn it is
///
/// The players' rosters are the source of truth. The board is rebuilt from them after every
/// change made through this type.
#[derive(Clone, Debug)]
pub struct Game {
    /// The white player
    white_player: Player,
    /// The black player
    black_player: Player,
    /// Where the pieces currently are
    board: Board,
    side_to_move: Side,
}

impl Game {
    /// Create a new game with both sides set up and white to move
    pub fn new() -> Self {
        let mut game = Self {
            white_player: Player::new(Side::White),
            black_player: Player::new(Side::Black),
            board: Board::EMPTY,
            side_to_move: Side::White,
        };
        let synced = game.resync_board();
        debug_assert!(synced.is_ok(), "starting layouts overlap: {synced:?}");
        game
    }

    pub const fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub const fn player(&self, side: Side) -> &Player {
        match side {
            Side::White => &self.white_player,
            Side::Black => &self.black_player,
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::White => &mut self.white_player,
            Side::Black => &mut self.black_player,
        }
    }

    /// The player whose turn it is
    pub const fn current_player(&self) -> &Player {
        self.player(self.side_to_move)
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub fn get_square(&self, position: Position) -> Result<Square> {
        self.board.get_position(position)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.player(id.side()).piece(id)
    }

    /// The piece shown on the given square, if any
    pub fn piece_at(&self, position: Position) -> Result<Option<(PieceId, &Piece)>> {
        Ok(self
            .get_square(position)?
            .piece()
            .and_then(|id| Some((id, self.piece(id)?))))
    }

    /// Move a piece, then rebuild the board
    ///
    /// The piece is moved by the player owning it. Nothing beyond the bounds of the board is
    /// checked, and the turn doesn't change; call [`Self::switch_turn`] once the move counts.
    ///
    /// [`Error::SquareConflict`](board::Error::SquareConflict) is returned after the move has been
    /// made, when the destination was already taken. Any other error leaves the game unchanged.
    #[instrument(skip(self))]
    pub fn execute_move(&mut self, id: PieceId, position: Position) -> Result<()> {
        self.player_mut(id.side()).move_piece(id, position)?;
        self.resync_board()
    }

    /// Rebuild the board from where both players' pieces are
    pub fn resync_board(&mut self) -> Result<()> {
        self.board
            .resync(self.white_player.pieces().chain(self.black_player.pieces()))
    }

    /// Hand the turn to the other side
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.other();
        debug!(side_to_move = %self.side_to_move, "turn switched");
    }

    /// Take a piece out of the game, then rebuild the board
    #[instrument(skip(self))]
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece> {
        let piece = self.player_mut(id.side()).remove_piece(id)?;
        self.resync_board()?;
        Ok(piece)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
