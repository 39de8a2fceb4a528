//! Game configuration.
//!
//! Only the obstacle-deck builder consumes this. The document shape matches
//! the game's configuration file:
//!
//! ```json
//! { "obstacles": { "deck_size": 12, "shuffle": true } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::CatalogError;

/// Hand size players refill to after each action and at loop start.
pub const HAND_SIZE: usize = 3;

/// Obstacle-deck settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Total obstacles per loop, finale included.
    pub obstacle_deck_size: usize,

    /// Randomize the order of the non-finale obstacles at game start.
    pub shuffle_obstacle_deck: bool,
}

impl GameConfig {
    pub const DEFAULT_DECK_SIZE: usize = 12;

    #[must_use]
    pub fn new(obstacle_deck_size: usize, shuffle_obstacle_deck: bool) -> Self {
        Self {
            obstacle_deck_size,
            shuffle_obstacle_deck,
        }
    }

    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: ConfigDocument = serde_json::from_str(json)?;
        Ok(Self {
            obstacle_deck_size: doc.obstacles.deck_size,
            shuffle_obstacle_deck: doc.obstacles.shuffle,
        })
    }

    /// Parse a configuration document, falling back to the defaults.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            warn!(error = %err, "using default game configuration");
            Self::default()
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DECK_SIZE, true)
    }
}

#[derive(Deserialize)]
struct ConfigDocument {
    obstacles: ObstacleSection,
}

#[derive(Deserialize)]
struct ObstacleSection {
    deck_size: usize,
    shuffle: bool,
}
