//! # timeloop-ccg
//!
//! Rules engine for a cooperative obstacle card game with a time-loop
//! meta-progression.
//!
//! Players face a fixed sequence of obstacles, each contributing one card (or
//! skipping) per obstacle. Failing an obstacle deals collective damage. When
//! anyone drops to zero health the loop restarts from the first obstacle:
//! everyone heals, permanently loses one chosen card, and must get further
//! than the best earlier loop or the game is lost.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every shuffle, sample and reward pick goes through
//!    one seeded `GameRng`.
//!
//! 2. **Validate, then mutate**: a rejected action returns a `GameError` and
//!    leaves the session exactly as it was.
//!
//! 3. **Instance identity**: each card copy carries its own `EntityId`, so two
//!    copies of the same catalog card are never confused.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, RNG, configuration, errors
//! - `cards`: Card, obstacle and character records and their catalogs
//! - `zones`: Player decks and the obstacle deck
//! - `rules`: Obstacle-deck assembly, scoring, damage, round resolution
//! - `timeloop`: The loop state machine and the public game view

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod timeloop;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, EntityId, GameConfig, GameError, GameRng, GameRngState, Player, PlayerId, PlayerMap,
    HAND_SIZE,
};

pub use crate::cards::{
    Card, CardCatalog, CardId, CardInstance, Character, CharacterCatalog, CharacterType, ObstacleCard,
    ObstacleCatalog, ObstacleType, SkillTag, Stat,
};

pub use crate::zones::{Deck, ObstacleDeck};

pub use crate::rules::{ObstacleDeckBuilder, ResolutionEngine, RoundReport};

pub use crate::timeloop::{GameView, LoopGame, LoopGameBuilder, LoopPhase, LossReason, PlayerSetup};
