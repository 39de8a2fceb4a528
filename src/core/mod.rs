//! Core engine types: entities, players, RNG, configuration, errors.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{EntityAllocator, EntityId};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, HAND_SIZE};
pub use error::{CatalogError, GameError};
