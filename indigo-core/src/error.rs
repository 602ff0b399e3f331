//! Error types

use crate::board::Coordinate;

/// Why a tile may not go where the player asked. Recoverable: choose again or rotate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("{0} is not on the board")]
    OffBoard(Coordinate),

    #[error("{0} is reserved for the center piece")]
    CenterReserved(Coordinate),

    #[error("{0} is already occupied")]
    Occupied(Coordinate),

    #[error("tile at {coord} would route straight out of gate {gate}, rotate the tile first")]
    BlocksExit { coord: Coordinate, gate: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("illegal placement: {0}")]
    Placement(#[from] PlacementError),

    #[error("a game needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("token color {0} is used by more than one player")]
    DuplicateColor(String),

    #[error("shared gates need 3 or 4 players, got {0}")]
    SharedGatesUnsupported(usize),

    #[error("the game is already over")]
    GameOver,

    #[error("player {0} has no tile in hand")]
    NoHandTile(usize),

    #[error("no tile at {0}")]
    NoTileAt(Coordinate),

    #[error("rotation {0} is out of range (0-5)")]
    InvalidRotation(u8),

    #[error("integrity violation: {0}")]
    Integrity(String),
}
