//! Obstacle scoring.
//!
//! Regular obstacles sum one contribution per player and compare it with the
//! difficulty. The finale instead tracks three resource totals
//! (environment, hazard, barrier); a card adds its full stat value to every
//! one of those categories it is compatible with.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, Character, ObstacleCard, ObstacleType, Stat};
use crate::core::player::PlayerId;

/// Finale resource categories, in reporting order.
pub const FINALE_CATEGORIES: [ObstacleType; 3] = [
    ObstacleType::Environment,
    ObstacleType::Hazard,
    ObstacleType::Barrier,
];

/// Damage dealt per unmet finale category.
pub const FINALE_DAMAGE_PER_CATEGORY: u32 = 2;

/// Flat value of a compatible card whose stat is not required.
pub const BASE_VALUE: u32 = 1;

/// One player's action as seen by the scorer.
#[derive(Clone, Copy, Debug)]
pub struct Play<'a> {
    pub player: PlayerId,
    pub card: Option<&'a Card>,
    pub character: &'a Character,
}

/// How one player's action counted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contribution {
    Skipped,
    /// The card cannot be played against this obstacle type.
    Incompatible,
    /// The card's stat is required: full character value.
    Matched { stat: Stat, value: u32 },
    /// Compatible, but the stat is not required.
    Base,
    /// Finale play: `value` was added to each listed category.
    Finale {
        stat: Stat,
        value: u32,
        categories: SmallVec<[ObstacleType; 3]>,
    },
}

impl Contribution {
    /// Points this action added toward the difficulty.
    ///
    /// For finale plays this is the per-category amount.
    #[must_use]
    pub fn value(&self) -> u32 {
        match self {
            Contribution::Skipped | Contribution::Incompatible => 0,
            Contribution::Matched { value, .. } | Contribution::Finale { value, .. } => *value,
            Contribution::Base => BASE_VALUE,
        }
    }
}

/// Running totals for the finale resource check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinaleTotals {
    pub environment: u32,
    pub hazard: u32,
    pub barrier: u32,
}

impl FinaleTotals {
    #[must_use]
    pub fn get(&self, category: ObstacleType) -> u32 {
        match category {
            ObstacleType::Environment => self.environment,
            ObstacleType::Hazard => self.hazard,
            ObstacleType::Barrier => self.barrier,
            ObstacleType::Personnel | ObstacleType::Finale => 0,
        }
    }

    fn add(&mut self, category: ObstacleType, amount: u32) {
        match category {
            ObstacleType::Environment => self.environment += amount,
            ObstacleType::Hazard => self.hazard += amount,
            ObstacleType::Barrier => self.barrier += amount,
            ObstacleType::Personnel | ObstacleType::Finale => {}
        }
    }
}

/// Outcome of scoring one obstacle round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<(PlayerId, Contribution)>,
    /// Sum of contribution values.
    pub total: u32,
    /// Present only for finale obstacles.
    pub finale_totals: Option<FinaleTotals>,
    pub succeeded: bool,
    /// Total damage to distribute; zero on success.
    pub damage: u32,
}

/// Score a round, dispatching on whether the obstacle is the finale.
#[must_use]
pub fn score(obstacle: &ObstacleCard, plays: &[Play<'_>]) -> ScoreBreakdown {
    if obstacle.is_finale() {
        score_finale(obstacle, plays)
    } else {
        score_regular(obstacle, plays)
    }
}

/// Difficulty check: success iff the summed contributions reach the difficulty.
#[must_use]
pub fn score_regular(obstacle: &ObstacleCard, plays: &[Play<'_>]) -> ScoreBreakdown {
    let contributions: Vec<_> = plays
        .iter()
        .map(|play| (play.player, regular_contribution(obstacle, play)))
        .collect();

    let total = contributions.iter().map(|(_, c)| c.value()).sum();
    let succeeded = total >= obstacle.difficulty;

    ScoreBreakdown {
        contributions,
        total,
        finale_totals: None,
        succeeded,
        damage: obstacle.difficulty.saturating_sub(total),
    }
}

fn regular_contribution(obstacle: &ObstacleCard, play: &Play<'_>) -> Contribution {
    let Some(card) = play.card else {
        return Contribution::Skipped;
    };

    if !card.is_compatible_with(obstacle.obstacle_type) {
        return Contribution::Incompatible;
    }

    if obstacle.requires(&card.skill) {
        Contribution::Matched {
            stat: card.stat,
            value: play.character.stat(card.stat),
        }
    } else {
        Contribution::Base
    }
}

/// Resource check: success iff every category total meets its requirement.
#[must_use]
pub fn score_finale(obstacle: &ObstacleCard, plays: &[Play<'_>]) -> ScoreBreakdown {
    let mut totals = FinaleTotals::default();
    let mut contributions = Vec::with_capacity(plays.len());

    for play in plays {
        let contribution = match play.card {
            None => Contribution::Skipped,
            Some(card) => {
                let value = play.character.stat(card.stat);
                let categories: SmallVec<[ObstacleType; 3]> = FINALE_CATEGORIES
                    .iter()
                    .copied()
                    .filter(|&c| card.is_compatible_with(c))
                    .collect();
                for &category in &categories {
                    totals.add(category, value);
                }
                Contribution::Finale {
                    stat: card.stat,
                    value,
                    categories,
                }
            }
        };
        contributions.push((play.player, contribution));
    }

    let unmet = FINALE_CATEGORIES
        .iter()
        .filter(|&&c| {
            let required = obstacle.finale_requirements.get(c).unwrap_or(0);
            totals.get(c) < required
        })
        .count() as u32;

    ScoreBreakdown {
        total: contributions.iter().map(|(_, c)| c.value()).sum(),
        contributions,
        finale_totals: Some(totals),
        succeeded: unmet == 0,
        damage: FINALE_DAMAGE_PER_CATEGORY * unmet,
    }
}
