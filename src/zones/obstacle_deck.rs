//! The obstacle sequence: draw, active and defeated piles.
//!
//! `all_cards` is fixed once the deck is assembled and records the
//! original order, which every loop of a game replays.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{ObstacleCard, ObstacleId};
use crate::core::rng::GameRng;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleDeck {
    all_cards: Vector<Arc<ObstacleCard>>,
    draw_pile: Vector<Arc<ObstacleCard>>,
    active_obstacles: Vector<Arc<ObstacleCard>>,
    defeated_obstacles: Vector<Arc<ObstacleCard>>,
}

impl ObstacleDeck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an obstacle to both the master list and the draw pile.
    pub fn add_card(&mut self, card: Arc<ObstacleCard>) {
        self.all_cards.push_back(Arc::clone(&card));
        self.draw_pile.push_back(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Arc<ObstacleCard>>) {
        for card in cards {
            self.add_card(card);
        }
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle_vector(&mut self.draw_pile);
    }

    /// Reveal the next obstacle, making it active.
    ///
    /// `None` means the sequence is exhausted.
    pub fn draw_obstacle(&mut self) -> Option<Arc<ObstacleCard>> {
        let card = self.draw_pile.pop_front()?;
        self.active_obstacles.push_back(Arc::clone(&card));
        Some(card)
    }

    /// Move an active obstacle to the defeated pile.
    pub fn defeat_obstacle(&mut self, id: &ObstacleId) -> bool {
        match self.active_obstacles.iter().position(|c| &c.id == id) {
            Some(index) => {
                let card = self.active_obstacles.remove(index);
                self.defeated_obstacles.push_back(card);
                true
            }
            None => false,
        }
    }

    /// Put every obstacle back in the draw pile and reshuffle.
    pub fn reset_deck(&mut self, rng: &mut GameRng) {
        self.draw_pile = self.all_cards.clone();
        self.clear_obstacles();
        self.shuffle(rng);
    }

    /// Empty the active and defeated piles, leaving the draw pile alone.
    pub fn clear_obstacles(&mut self) {
        self.active_obstacles.clear();
        self.defeated_obstacles.clear();
    }

    /// Refill the draw pile from the master list in its original order.
    pub fn restore_original_order(&mut self) {
        self.draw_pile = self.all_cards.clone();
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.draw_pile.is_empty()
    }

    #[must_use]
    pub fn all_cards(&self) -> &Vector<Arc<ObstacleCard>> {
        &self.all_cards
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Arc<ObstacleCard>> {
        &self.draw_pile
    }

    #[must_use]
    pub fn active_obstacles(&self) -> &Vector<Arc<ObstacleCard>> {
        &self.active_obstacles
    }

    #[must_use]
    pub fn defeated_obstacles(&self) -> &Vector<Arc<ObstacleCard>> {
        &self.defeated_obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ObstacleType;

    fn deck_of(n: u32) -> ObstacleDeck {
        let mut deck = ObstacleDeck::new();
        deck.add_cards((0..n).map(|i| {
            Arc::new(ObstacleCard::new(format!("o{i}"), format!("Obstacle {i}"), i, ObstacleType::Hazard))
        }));
        deck
    }

    fn names(pile: &Vector<Arc<ObstacleCard>>) -> Vec<String> {
        pile.iter().map(|c| c.id.as_str().to_string()).collect()
    }

    #[test]
    fn test_draw_until_exhausted() {
        let mut deck = deck_of(2);

        assert_eq!(deck.draw_obstacle().unwrap().id.as_str(), "o0");
        assert_eq!(deck.draw_obstacle().unwrap().id.as_str(), "o1");
        assert!(deck.is_exhausted());
        assert!(deck.draw_obstacle().is_none());
        assert_eq!(deck.active_obstacles().len(), 2);
    }

    #[test]
    fn test_defeat_moves_active_to_defeated() {
        let mut deck = deck_of(2);
        let first = deck.draw_obstacle().unwrap();

        assert!(deck.defeat_obstacle(&first.id));
        assert!(!deck.defeat_obstacle(&first.id));
        assert!(deck.active_obstacles().is_empty());
        assert_eq!(names(deck.defeated_obstacles()), vec!["o0"]);
    }

    #[test]
    fn test_clear_and_restore_keeps_original_order() {
        let mut deck = deck_of(5);
        deck.draw_obstacle();
        deck.draw_obstacle();

        deck.clear_obstacles();
        assert_eq!(deck.draw_pile().len(), 3);

        deck.restore_original_order();
        assert_eq!(names(deck.draw_pile()), names(deck.all_cards()));
        assert!(deck.active_obstacles().is_empty());
    }

    #[test]
    fn test_reset_deck_restores_all() {
        let mut rng = GameRng::new(1);
        let mut deck = deck_of(8);
        let first = deck.draw_obstacle().unwrap();
        deck.defeat_obstacle(&first.id);

        deck.reset_deck(&mut rng);

        assert_eq!(deck.draw_pile().len(), 8);
        assert!(deck.defeated_obstacles().is_empty());
        let mut drawn = names(deck.draw_pile());
        drawn.sort();
        let mut all = names(deck.all_cards());
        all.sort();
        assert_eq!(drawn, all);
    }
}
