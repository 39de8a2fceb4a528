//! Obstacle-deck assembly.
//!
//! The finale is pulled out of the pool, `deck_size - 1` regular obstacles
//! are sampled (all of them if there are not enough), optionally shuffled,
//! and the finale is appended as the last draw regardless of the shuffle
//! flag. The result is the order every loop of one game replays.

use std::sync::Arc;

use tracing::info;

use crate::cards::{ObstacleCard, ObstacleCatalog};
use crate::core::config::GameConfig;
use crate::core::rng::GameRng;
use crate::zones::ObstacleDeck;

/// Builds `ObstacleDeck`s from a catalog and configuration.
///
/// ```
/// use timeloop_ccg::cards::{ObstacleCard, ObstacleCatalog, ObstacleType};
/// use timeloop_ccg::core::{GameConfig, GameRng};
/// use timeloop_ccg::rules::ObstacleDeckBuilder;
///
/// let mut catalog = ObstacleCatalog::new();
/// catalog.register(ObstacleCard::finale("core", "Core"));
/// for i in 0..6 {
///     catalog.register(ObstacleCard::new(format!("o{i}"), "Obstacle", 5, ObstacleType::Hazard));
/// }
///
/// let builder = ObstacleDeckBuilder::new(&catalog, GameConfig::new(4, true));
/// let deck = builder.build(&mut GameRng::new(7));
///
/// assert_eq!(deck.all_cards().len(), 4);
/// assert!(deck.all_cards().last().unwrap().is_finale());
/// ```
pub struct ObstacleDeckBuilder<'a> {
    catalog: &'a ObstacleCatalog,
    config: GameConfig,
}

impl<'a> ObstacleDeckBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a ObstacleCatalog, config: GameConfig) -> Self {
        Self { catalog, config }
    }

    /// Assemble a deck from the whole catalog.
    #[must_use]
    pub fn build(&self, rng: &mut GameRng) -> ObstacleDeck {
        let regular: Vec<_> = self.catalog.regular().cloned().collect();
        self.assemble(regular, rng)
    }

    /// Assemble a deck from the regular obstacles no harder than `max_difficulty`.
    #[must_use]
    pub fn build_with_max_difficulty(&self, max_difficulty: u32, rng: &mut GameRng) -> ObstacleDeck {
        let regular: Vec<_> = self
            .catalog
            .regular()
            .filter(|o| o.difficulty <= max_difficulty)
            .cloned()
            .collect();
        self.assemble(regular, rng)
    }

    fn assemble(&self, mut regular: Vec<Arc<ObstacleCard>>, rng: &mut GameRng) -> ObstacleDeck {
        let slots = self.config.obstacle_deck_size.saturating_sub(1);

        if slots < regular.len() {
            let indices: Vec<usize> = (0..regular.len()).collect();
            let mut picked = rng.sample(&indices, slots);
            picked.sort_unstable();
            regular = picked.into_iter().map(|i| Arc::clone(&regular[i])).collect();
        }

        if self.config.shuffle_obstacle_deck {
            rng.shuffle(&mut regular);
        }

        let mut deck = ObstacleDeck::new();
        deck.add_cards(regular);

        let finale = self.catalog.finale();
        if let Some(finale) = finale {
            deck.add_card(Arc::clone(finale));
        }

        info!(
            size = deck.all_cards().len(),
            finale = ?finale.map(|f| f.name.as_str()),
            "assembled obstacle deck"
        );
        deck
    }
}
