//! Card definitions - static playable card data.
//!
//! A `Card` is an immutable catalog entry. Copies of it held in a player's
//! deck are `CardInstance`s, which add per-copy identity.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Identifier of a catalog card (e.g. `"crowbar"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Character attribute a card draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Strength,
    Speed,
    Tech,
}

impl Stat {
    pub const ALL: [Stat; 3] = [Stat::Strength, Stat::Speed, Stat::Tech];

    /// Parse a stat name case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strength" => Some(Stat::Strength),
            "speed" => Some(Stat::Speed),
            "tech" => Some(Stat::Tech),
            _ => None,
        }
    }

    /// Parse a card's stat name; unrecognized names score as strength.
    #[must_use]
    pub fn parse_or_strength(name: &str) -> Self {
        Self::parse(name).unwrap_or(Stat::Strength)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stat::Strength => "strength",
            Stat::Speed => "speed",
            Stat::Tech => "tech",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stat name as written in a catalog, trimmed and lowercased.
///
/// Required skills are matched on the tag, so a name outside `Stat` still
/// matches the same name on a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillTag(String);

impl SkillTag {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stat this tag names, if it is a known one.
    #[must_use]
    pub fn stat(&self) -> Option<Stat> {
        Stat::parse(&self.0)
    }
}

impl From<Stat> for SkillTag {
    fn from(stat: Stat) -> Self {
        Self(stat.name().to_owned())
    }
}

impl std::fmt::Display for SkillTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Obstacle type tag.
///
/// Cards list the regular types they may be played against; `Finale` only
/// ever appears on the terminal obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleType {
    Barrier,
    Hazard,
    Environment,
    Personnel,
    Finale,
}

impl ObstacleType {
    /// The four regular types, which is also the default compatibility set.
    pub const REGULAR: [ObstacleType; 4] = [
        ObstacleType::Barrier,
        ObstacleType::Hazard,
        ObstacleType::Environment,
        ObstacleType::Personnel,
    ];

    /// Parse a type tag case-insensitively.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "barrier" => Some(ObstacleType::Barrier),
            "hazard" => Some(ObstacleType::Hazard),
            "environment" => Some(ObstacleType::Environment),
            "personnel" => Some(ObstacleType::Personnel),
            "finale" => Some(ObstacleType::Finale),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ObstacleType::Barrier => "barrier",
            ObstacleType::Hazard => "hazard",
            ObstacleType::Environment => "environment",
            ObstacleType::Personnel => "personnel",
            ObstacleType::Finale => "finale",
        }
    }
}

impl std::fmt::Display for ObstacleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Obstacle tags a card may be played against.
pub type CompatibleTypes = SmallVec<[ObstacleType; 4]>;

/// Static playable card.
///
/// ## Example
///
/// ```
/// use timeloop_ccg::cards::{Card, ObstacleType, Stat};
///
/// let crowbar = Card::new("crowbar", "Crowbar", Stat::Strength)
///     .with_compatible(&[ObstacleType::Barrier]);
///
/// assert!(crowbar.is_compatible_with(ObstacleType::Barrier));
/// assert!(!crowbar.is_compatible_with(ObstacleType::Hazard));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub description: String,
    /// Stat whose value the card scores when matched.
    pub stat: Stat,
    /// Tag compared against an obstacle's required skills.
    pub skill: SkillTag,
    pub compatible_types: CompatibleTypes,
}

impl Card {
    /// Create a card compatible with every regular obstacle type.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, stat: Stat) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            description: String::new(),
            stat,
            skill: stat.into(),
            compatible_types: ObstacleType::REGULAR.iter().copied().collect(),
        }
    }

    /// Replace the compatibility set (builder pattern).
    #[must_use]
    pub fn with_compatible(mut self, types: &[ObstacleType]) -> Self {
        self.compatible_types = types.iter().copied().collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stat from a catalog name.
    ///
    /// An unrecognized name keeps its own tag for matching but scores
    /// strength when matched.
    #[must_use]
    pub fn with_stat_name(mut self, raw: &str) -> Self {
        self.skill = SkillTag::new(raw);
        self.stat = Stat::parse_or_strength(raw);
        self
    }

    #[must_use]
    pub fn is_compatible_with(&self, obstacle_type: ObstacleType) -> bool {
        self.compatible_types.contains(&obstacle_type)
    }
}
