//! Card system: definitions, obstacles, characters, instances and catalogs.
//!
//! ## Key Types
//!
//! - `Card`: static playable card (stat + compatible obstacle types)
//! - `ObstacleCard`: static obstacle (difficulty, required skills, type)
//! - `Character`: stat block and maximum health
//! - `CardInstance`: one copy of a `Card` in a player's pool
//! - `CardCatalog` / `ObstacleCatalog` / `CharacterCatalog`: read-only lookup

pub mod character;
pub mod definition;
pub mod instance;
pub mod obstacle;
pub mod registry;

pub use character::{Character, CharacterType, StatBlock};
pub use definition::{Card, CardId, CompatibleTypes, ObstacleType, SkillTag, Stat};
pub use instance::CardInstance;
pub use obstacle::{FinaleRequirements, ObstacleCard, ObstacleId};
pub use registry::{CardCatalog, CharacterCatalog, ObstacleCatalog};
