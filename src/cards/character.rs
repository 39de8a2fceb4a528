//! Characters - the stat blocks players pick.

use serde::{Deserialize, Serialize};

use super::definition::Stat;

/// Character type tag (e.g. `"engineer"`), also the starter-deck key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterType(pub String);

impl CharacterType {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CharacterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: u32,
    pub speed: u32,
    pub tech: u32,
}

impl StatBlock {
    #[must_use]
    pub const fn new(strength: u32, speed: u32, tech: u32) -> Self {
        Self {
            strength,
            speed,
            tech,
        }
    }

    #[must_use]
    pub const fn value(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Speed => self.speed,
            Stat::Tech => self.tech,
        }
    }
}

/// Immutable character record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub character_type: CharacterType,
    pub name: String,
    pub stats: StatBlock,
    pub max_health: u32,
    pub description: String,
}

impl Character {
    #[must_use]
    pub fn new(
        character_type: impl Into<String>,
        name: impl Into<String>,
        stats: StatBlock,
        max_health: u32,
    ) -> Self {
        Self {
            character_type: CharacterType::new(character_type),
            name: name.into(),
            stats,
            max_health,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn stat(&self, stat: Stat) -> u32 {
        self.stats.value(stat)
    }
}
