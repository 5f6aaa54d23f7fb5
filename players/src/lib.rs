//! The pieces each side owns

use board::{invert_rank, validate, Error, Piece, PieceId, PieceKind, Position, Result, Side, SIZE};
use tracing::{debug, instrument};

/// The back rank, from file `A` to file `H`
const BACK_RANK: [PieceKind; SIZE as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Files for the back-rank pieces, in the order they're given slots
const BACK_RANK_SLOT_FILES: [i8; SIZE as usize] = [1, 8, 2, 7, 3, 6, 4, 5];

/// The number of pieces each player starts with
pub const ROSTER_SIZE: usize = 2 * SIZE as usize;

/// One side of the game and the pieces it owns
///
/// Every piece keeps its slot for the whole game, so a [`PieceId`] handed out once keeps referring
/// to the same piece. A slot only becomes empty through [`Player::remove_piece`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    side: Side,
    pieces: Vec<Option<Piece>>,
}

impl Player {
    /// Create a player with its pieces where they start a game
    ///
    /// Slots 0 to 7 hold the pawns from file `A` to `H`, followed by the rooks, knights, bishops,
    /// queen and king.
    pub fn new(side: Side) -> Self {
        let white = side.is_white();
        let pawns = (1..=SIZE).map(|x| {
            Piece::new(
                PieceKind::Pawn,
                Position::new(x, invert_rank(white, 2)),
                side,
            )
        });
        let back_rank = BACK_RANK_SLOT_FILES.into_iter().map(|x| {
            Piece::new(
                BACK_RANK[(x - 1) as usize],
                Position::new(x, invert_rank(white, 1)),
                side,
            )
        });
        Self {
            side,
            pieces: pawns.chain(back_rank).map(Some).collect(),
        }
    }

    pub const fn side(&self) -> Side {
        self.side
    }

    /// The number of pieces still in play
    pub fn len(&self) -> usize {
        self.pieces.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_mut(&mut self, id: PieceId) -> Result<&mut Option<Piece>> {
        if id.side() != self.side {
            return Err(Error::PieceNotFound(id));
        }
        self.pieces
            .get_mut(id.slot())
            .ok_or(Error::PieceNotFound(id))
    }

    /// Look up one of this player's pieces
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        if id.side() != self.side {
            return None;
        }
        self.pieces.get(id.slot())?.as_ref()
    }

    /// All pieces still in play, in slot order
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces.iter().enumerate().filter_map(move |(slot, piece)| {
            piece
                .as_ref()
                .map(|piece| (PieceId::new(self.side, slot as u8), piece))
        })
    }

    /// Put the given piece on a new position
    ///
    /// Only the bounds of the board are checked. Whether the piece could actually move there is
    /// left to the caller.
    #[instrument(skip(self))]
    pub fn move_piece(&mut self, id: PieceId, position: Position) -> Result<()> {
        validate(position)?;
        let piece = self
            .slot_mut(id)?
            .as_mut()
            .ok_or(Error::PieceNotFound(id))?;
        debug!(from = %piece.position, to = %position, "moving piece");
        piece.position = position;
        Ok(())
    }

    /// Take a piece out of play, leaving its slot empty
    #[instrument(skip(self))]
    pub fn remove_piece(&mut self, id: PieceId) -> Result<Piece> {
        let piece = self.slot_mut(id)?.take().ok_or(Error::PieceNotFound(id))?;
        debug!(kind = ?piece.kind, at = %piece.position, "removed piece");
        Ok(piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::Symbol;
    use quickcheck::quickcheck;

    fn kind_at(player: &Player, x: i8, y: i8) -> Option<PieceKind> {
        player
            .pieces()
            .find(|(_, piece)| piece.position == Position::new(x, y))
            .map(|(_, piece)| piece.kind)
    }

    quickcheck! {
        fn test_move_only_checks_bounds(x: i8, y: i8) -> bool {
            let target = Position::new(x % 12, y % 12);
            let mut player = Player::new(Side::Black);
            let id = PieceId::new(Side::Black, 9);
            let before = *player.piece(id).unwrap();
            match player.move_piece(id, target) {
                Ok(()) => target.is_valid() && player.piece(id).unwrap().position == target,
                Err(Error::InvalidPosition { .. }) => {
                    !target.is_valid() && *player.piece(id).unwrap() == before
                }
                Err(_) => false,
            }
        }
    }

    #[test]
    fn test_white_starting_layout() {
        let player = Player::new(Side::White);
        assert_eq!(player.len(), ROSTER_SIZE);
        for (x, kind) in (1..=SIZE).zip(BACK_RANK) {
            assert_eq!(kind_at(&player, x, 1), Some(kind));
            assert_eq!(kind_at(&player, x, 2), Some(PieceKind::Pawn));
        }
        assert!(player
            .pieces()
            .all(|(id, piece)| piece.side == Side::White && id.side() == Side::White));
        assert!(player.pieces().all(|(_, piece)| piece.position.y <= 2));
    }

    #[test]
    fn test_black_mirrors_white() {
        let white = Player::new(Side::White);
        let black = Player::new(Side::Black);
        assert_eq!(black.len(), ROSTER_SIZE);
        for ((_, w), (_, b)) in white.pieces().zip(black.pieces()) {
            assert_eq!(w.kind, b.kind);
            assert_eq!(w.position.x, b.position.x);
            assert_eq!(invert_rank(false, w.position.y), b.position.y);
        }
        assert_eq!(kind_at(&black, 4, 8), Some(PieceKind::Queen));
        assert_eq!(kind_at(&black, 5, 8), Some(PieceKind::King));
    }

    #[test]
    fn test_starting_positions_never_collide() {
        let white = Player::new(Side::White);
        let black = Player::new(Side::Black);
        let mut positions: Vec<_> = white
            .pieces()
            .chain(black.pieces())
            .map(|(_, piece)| piece.position)
            .collect();
        positions.sort_by_key(|p| (p.x, p.y));
        positions.dedup();
        assert_eq!(positions.len(), 2 * ROSTER_SIZE);
    }

    #[test]
    fn test_roster_counts() {
        let player = Player::new(Side::White);
        let count = |kind| player.pieces().filter(|(_, p)| p.kind == kind).count();
        assert_eq!(count(PieceKind::Pawn), 8);
        assert_eq!(count(PieceKind::Rook), 2);
        assert_eq!(count(PieceKind::Knight), 2);
        assert_eq!(count(PieceKind::Bishop), 2);
        assert_eq!(count(PieceKind::Queen), 1);
        assert_eq!(count(PieceKind::King), 1);
    }

    #[test]
    fn test_move_keeps_ownership() {
        let mut player = Player::new(Side::White);
        let id = PieceId::new(Side::White, 4);
        player.move_piece(id, Position::new(5, 4)).unwrap();
        let piece = player.piece(id).unwrap();
        assert_eq!(piece.position, Position::new(5, 4));
        assert_eq!(piece.side, Side::White);
        assert_eq!(piece.id(), Symbol::Pawn);
    }

    #[test]
    fn test_foreign_handles_are_rejected() {
        let mut player = Player::new(Side::White);
        let foreign = PieceId::new(Side::Black, 0);
        assert!(player.piece(foreign).is_none());
        assert_eq!(
            player.move_piece(foreign, Position::new(1, 3)),
            Err(Error::PieceNotFound(foreign))
        );
        let unknown = PieceId::new(Side::White, ROSTER_SIZE as u8);
        assert_eq!(
            player.remove_piece(unknown),
            Err(Error::PieceNotFound(unknown))
        );
    }

    #[test]
    fn test_removed_slot_stays_empty() {
        let mut player = Player::new(Side::Black);
        let id = PieceId::new(Side::Black, 0);
        let removed = player.remove_piece(id).unwrap();
        assert_eq!(removed.position, Position::new(1, 7));
        assert_eq!(player.len(), ROSTER_SIZE - 1);
        assert!(player.piece(id).is_none());
        assert_eq!(player.remove_piece(id), Err(Error::PieceNotFound(id)));
        assert_eq!(
            player.move_piece(id, Position::new(1, 6)),
            Err(Error::PieceNotFound(id))
        );
        // Other handles are unaffected
        let next = PieceId::new(Side::Black, 1);
        assert_eq!(player.piece(next).unwrap().position, Position::new(2, 7));
    }
}
