use thiserror::Error;

use crate::player::PlayerId;

/// Every way a room operation can be refused. A refused operation never
/// mutates the room.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Room is full ({max} seats)")]
    RoomFull { max: usize },
    #[error("Player {0} is already seated")]
    DuplicatePlayer(PlayerId),
    #[error("Need at least {needed} players to start, have {seated}")]
    NotEnoughPlayers { needed: usize, seated: usize },
    #[error("Unknown player {0}")]
    PlayerNotFound(PlayerId),
    #[error("Only the room owner can end the game")]
    NotOwner,
    #[error("The game has ended")]
    GameEnded,
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("A hand is already in progress")]
    HandInProgress,
    #[error("It's not player {actual}'s turn (expected player {expected})")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },
    #[error("Cannot check while {to_call} chips are owed")]
    CannotCheck { to_call: u32 },
    #[error("Raise increment {increment} is below the minimum {minimum}")]
    RaiseTooSmall { increment: i64, minimum: u32 },
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Turn timeout must be at least one second")]
    InvalidTimeout,
}
