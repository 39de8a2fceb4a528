//! Per-player card pool with draw, hand and discard piles.
//!
//! `cards` is the master list of every copy the player owns. Each copy sits
//! in at most one of the three active piles. Drawing never recycles the
//! discard pile: once the draw pile is empty, draws yield nothing until the
//! next loop reset.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardInstance;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// A player's deck.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use timeloop_ccg::cards::{Card, CardInstance, Stat};
/// use timeloop_ccg::core::EntityId;
/// use timeloop_ccg::zones::Deck;
///
/// let pipe = Arc::new(Card::new("pipe", "Pipe", Stat::Strength));
/// let mut deck = Deck::new();
/// deck.add_cards((0..4).map(|i| CardInstance::new(EntityId(i), Arc::clone(&pipe))));
///
/// assert_eq!(deck.draw_cards(3), 3);
/// assert!(deck.play_card(EntityId(0)));
/// assert_eq!(deck.hand().len(), 2);
/// assert_eq!(deck.discard_pile().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardInstance>,
    draw_pile: Vector<CardInstance>,
    hand: Vector<CardInstance>,
    discard_pile: Vector<CardInstance>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a copy to the pool and the bottom of the draw pile.
    pub fn add_card(&mut self, card: CardInstance) {
        self.cards.push_back(card.clone());
        self.draw_pile.push_back(card);
    }

    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        for card in cards {
            self.add_card(card);
        }
    }

    /// Randomize the draw pile only.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle_vector(&mut self.draw_pile);
    }

    /// Move the head of the draw pile into the hand.
    ///
    /// Returns `None` when the draw pile is empty.
    pub fn draw_card(&mut self) -> Option<CardInstance> {
        let card = self.draw_pile.pop_front()?;
        self.hand.push_back(card.clone());
        Some(card)
    }

    /// Draw up to `count` cards, stopping early on exhaustion.
    ///
    /// Returns how many were drawn.
    pub fn draw_cards(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw_card().is_some()).count()
    }

    /// Draw until the hand holds `size` cards or the draw pile runs out.
    pub fn refill_hand(&mut self, size: usize) -> usize {
        let missing = size.saturating_sub(self.hand.len());
        self.draw_cards(missing)
    }

    /// Move a card from hand to discard. No-op if it is not in hand.
    pub fn play_card(&mut self, card: EntityId) -> bool {
        match take(&mut self.hand, card) {
            Some(played) => {
                self.discard_pile.push_back(played);
                true
            }
            None => false,
        }
    }

    pub fn discard_hand(&mut self) {
        self.discard_pile.append(std::mem::take(&mut self.hand));
    }

    /// Add a new copy straight to the discard pile, bypassing the draw pile.
    pub fn add_card_to_discard(&mut self, card: CardInstance) {
        self.cards.push_back(card.clone());
        self.discard_pile.push_back(card);
    }

    /// Permanently delete a copy from the pool and whichever pile holds it.
    pub fn remove_card(&mut self, card: EntityId) -> bool {
        let from_pool = take(&mut self.cards, card).is_some();
        let from_pile = take(&mut self.draw_pile, card).is_some()
            || take(&mut self.hand, card).is_some()
            || take(&mut self.discard_pile, card).is_some();
        from_pool || from_pile
    }

    /// Rebuild the draw pile from the current pool and reshuffle it.
    ///
    /// Hand and discard end up empty. Permanent removals must already have
    /// been applied to the pool.
    pub fn reset_for_time_loop(&mut self, rng: &mut GameRng) {
        self.hand.clear();
        self.discard_pile.clear();
        self.draw_pile = self.cards.clone();
        self.shuffle(rng);
        debug!(
            total = self.cards.len(),
            draw = self.draw_pile.len(),
            "deck reset for new loop"
        );
    }

    /// The full pool.
    #[must_use]
    pub fn cards(&self) -> &Vector<CardInstance> {
        &self.cards
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<CardInstance> {
        &self.draw_pile
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<CardInstance> {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<CardInstance> {
        &self.discard_pile
    }

    #[must_use]
    pub fn hand_card(&self, card: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.entity_id == card)
    }

    /// Whether the copy is anywhere in the pool.
    #[must_use]
    pub fn owns(&self, card: EntityId) -> bool {
        self.cards.iter().any(|c| c.entity_id == card)
    }
}

fn take(pile: &mut Vector<CardInstance>, card: EntityId) -> Option<CardInstance> {
    let index = pile.iter().position(|c| c.entity_id == card)?;
    Some(pile.remove(index))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{Card, Stat};

    fn deck_of(n: u32) -> Deck {
        let card = Arc::new(Card::new("bolt", "Bolt Cutter", Stat::Strength));
        let mut deck = Deck::new();
        deck.add_cards((0..n).map(|i| CardInstance::new(EntityId(i), Arc::clone(&card))));
        deck
    }

    fn ids(pile: &Vector<CardInstance>) -> Vec<u32> {
        pile.iter().map(|c| c.entity_id.raw()).collect()
    }

    #[test]
    fn test_draw_takes_from_head() {
        let mut deck = deck_of(3);

        assert_eq!(deck.draw_card().map(|c| c.entity_id), Some(EntityId(0)));
        assert_eq!(ids(deck.draw_pile()), vec![1, 2]);
        assert_eq!(ids(deck.hand()), vec![0]);
    }

    #[test]
    fn test_draw_does_not_recycle_discard() {
        let mut deck = deck_of(2);
        deck.draw_cards(2);
        deck.discard_hand();

        assert!(deck.draw_card().is_none());
        assert_eq!(deck.draw_cards(5), 0);
        assert_eq!(deck.discard_pile().len(), 2);
    }

    #[test]
    fn test_draw_cards_stops_early() {
        let mut deck = deck_of(2);
        assert_eq!(deck.draw_cards(5), 2);
        assert_eq!(deck.hand().len(), 2);
    }

    #[test]
    fn test_refill_hand() {
        let mut deck = deck_of(5);
        assert_eq!(deck.refill_hand(3), 3);
        deck.play_card(EntityId(1));
        assert_eq!(deck.refill_hand(3), 1);
        assert_eq!(deck.hand().len(), 3);
        assert_eq!(deck.refill_hand(3), 0);
    }

    #[test]
    fn test_play_card_not_in_hand_is_noop() {
        let mut deck = deck_of(3);
        deck.draw_card();

        assert!(!deck.play_card(EntityId(2)));
        assert_eq!(deck.hand().len(), 1);
        assert!(deck.discard_pile().is_empty());
    }

    #[test]
    fn test_reward_goes_to_discard() {
        let mut deck = deck_of(1);
        let reward = CardInstance::new(EntityId(9), Arc::new(Card::new("med", "Medkit", Stat::Tech)));

        deck.add_card_to_discard(reward);

        assert_eq!(deck.cards().len(), 2);
        assert_eq!(ids(deck.discard_pile()), vec![9]);
        assert_eq!(ids(deck.draw_pile()), vec![0]);
    }

    #[test]
    fn test_remove_card_from_any_pile() {
        let mut deck = deck_of(4);
        deck.draw_cards(2);
        deck.play_card(EntityId(0));

        assert!(deck.remove_card(EntityId(0))); // discard
        assert!(deck.remove_card(EntityId(1))); // hand
        assert!(deck.remove_card(EntityId(3))); // draw
        assert!(!deck.remove_card(EntityId(3)));

        assert_eq!(ids(deck.cards()), vec![2]);
        assert!(deck.owns(EntityId(2)));
        assert!(!deck.owns(EntityId(0)));
    }

    #[test]
    fn test_remove_one_duplicate_keeps_the_other() {
        let mut deck = deck_of(2);
        assert!(deck.remove_card(EntityId(1)));
        assert_eq!(ids(deck.cards()), vec![0]);
        assert_eq!(ids(deck.draw_pile()), vec![0]);
    }

    #[test]
    fn test_reset_for_time_loop() {
        let mut rng = GameRng::new(42);
        let mut deck = deck_of(6);
        deck.draw_cards(3);
        deck.play_card(EntityId(0));
        deck.remove_card(EntityId(4));

        deck.reset_for_time_loop(&mut rng);

        assert!(deck.hand().is_empty());
        assert!(deck.discard_pile().is_empty());
        let mut drawn = ids(deck.draw_pile());
        drawn.sort();
        assert_eq!(drawn, vec![0, 1, 2, 3, 5]);
    }
}
