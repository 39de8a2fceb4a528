//! Obstacle cards - what the players must overcome.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{ObstacleType, SkillTag, Stat};

/// Identifier of a catalog obstacle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub String);

impl ObstacleId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Obstacle({})", self.0)
    }
}

/// Per-category totals the finale must reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinaleRequirements {
    pub environment: u32,
    pub hazard: u32,
    pub barrier: u32,
}

impl FinaleRequirements {
    pub const DEFAULT_REQUIREMENT: u32 = 5;

    /// Requirement for one of the three resource categories.
    ///
    /// Returns `None` for tags that are not finale resources.
    #[must_use]
    pub fn get(&self, category: ObstacleType) -> Option<u32> {
        match category {
            ObstacleType::Environment => Some(self.environment),
            ObstacleType::Hazard => Some(self.hazard),
            ObstacleType::Barrier => Some(self.barrier),
            ObstacleType::Personnel | ObstacleType::Finale => None,
        }
    }
}

impl Default for FinaleRequirements {
    fn default() -> Self {
        Self {
            environment: Self::DEFAULT_REQUIREMENT,
            hazard: Self::DEFAULT_REQUIREMENT,
            barrier: Self::DEFAULT_REQUIREMENT,
        }
    }
}

/// Immutable obstacle descriptor.
///
/// ```
/// use timeloop_ccg::cards::{ObstacleCard, ObstacleType, Stat};
///
/// let door = ObstacleCard::new("door", "Locked Door", 8, ObstacleType::Barrier)
///     .with_required(&[Stat::Strength]);
/// assert!(!door.is_finale());
///
/// let core = ObstacleCard::finale("core", "Reactor Core");
/// assert!(core.is_finale());
/// assert_eq!(core.finale_requirements.hazard, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleCard {
    pub id: ObstacleId,
    pub name: String,
    pub description: String,
    pub difficulty: u32,
    /// Skill tags that score at full character value.
    pub required_skills: SmallVec<[SkillTag; 3]>,
    pub obstacle_type: ObstacleType,
    /// Only consulted when `obstacle_type` is `Finale`.
    pub finale_requirements: FinaleRequirements,
}

impl ObstacleCard {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        difficulty: u32,
        obstacle_type: ObstacleType,
    ) -> Self {
        Self {
            id: ObstacleId::new(id),
            name: name.into(),
            description: String::new(),
            difficulty,
            required_skills: SmallVec::new(),
            obstacle_type,
            finale_requirements: FinaleRequirements::default(),
        }
    }

    /// Create a finale obstacle with the default requirements.
    #[must_use]
    pub fn finale(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, 0, ObstacleType::Finale)
    }

    #[must_use]
    pub fn with_required(mut self, skills: &[Stat]) -> Self {
        self.required_skills = skills.iter().map(|&stat| SkillTag::from(stat)).collect();
        self
    }

    /// Set required skills from catalog names, known stats or not.
    #[must_use]
    pub fn with_required_names<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.required_skills = names.into_iter().map(|name| SkillTag::new(name.as_ref())).collect();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_finale_requirements(mut self, requirements: FinaleRequirements) -> Self {
        self.finale_requirements = requirements;
        self
    }

    #[must_use]
    pub fn is_finale(&self) -> bool {
        self.obstacle_type == ObstacleType::Finale
    }

    #[must_use]
    pub fn requires(&self, skill: &SkillTag) -> bool {
        self.required_skills.contains(skill)
    }
}

impl std::fmt::Display for ObstacleCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
