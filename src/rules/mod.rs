//! Obstacle rules: deck assembly, scoring, damage and round resolution.
//!
//! ## Key Types
//!
//! - `ObstacleDeckBuilder`: samples and orders the obstacle sequence
//! - `ResolutionEngine`: collects one action per player and resolves the round
//! - `ScoreBreakdown` / `RoundReport`: what happened and why

pub mod builder;
pub mod damage;
pub mod engine;
pub mod scoring;

pub use builder::ObstacleDeckBuilder;
pub use damage::{apply_damage, distribute_damage};
pub use engine::{PlayerAction, ResolutionEngine, RoundContext, RoundProgress, RoundReport};
pub use scoring::{
    score, score_finale, score_regular, Contribution, FinaleTotals, Play, ScoreBreakdown,
    BASE_VALUE, FINALE_CATEGORIES, FINALE_DAMAGE_PER_CATEGORY,
};
