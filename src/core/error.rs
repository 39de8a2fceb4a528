//! Error types.
//!
//! `GameError` covers caller-input errors on the action surface. All of them
//! are recoverable: the rejected call leaves the game untouched.
//! `CatalogError` covers malformed catalog documents and bad session setup.

use thiserror::Error;

use super::entity::EntityId;
use super::player::PlayerId;

/// Rejected action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotPlayersTurn { expected: PlayerId, actual: PlayerId },

    #[error("no player at index {0}")]
    InvalidPlayer(usize),

    #[error("{card} is not in the relevant pile of {player}")]
    InvalidCardReference { player: PlayerId, card: EntityId },

    #[error("the obstacle round has already been resolved")]
    ActionAfterResolution,

    #[error("card removal is only possible between loops")]
    NotAwaitingRemoval,

    #[error("{0} has already chosen a card to remove")]
    RemovalAlreadyChosen(PlayerId),

    #[error("{} player(s) still need to choose a card to remove", missing.len())]
    IncompleteRemovalSelection { missing: Vec<PlayerId> },

    #[error("the game is over; only starting a new game is allowed")]
    ActionInTerminalState,
}

/// Catalog parsing or session setup failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("obstacle {id} has unknown type {tag:?}")]
    UnknownObstacleType { id: String, tag: String },

    #[error("unknown character type {0:?}")]
    UnknownCharacter(String),

    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("{0} players requested; at most 255 are supported")]
    TooManyPlayers(usize),
}
