//! Property tests for pile bookkeeping and damage distribution.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use timeloop_ccg::cards::{Card, CardInstance, Stat};
use timeloop_ccg::core::{EntityAllocator, EntityId, GameRng};
use timeloop_ccg::rules::distribute_damage;
use timeloop_ccg::zones::Deck;

#[derive(Clone, Debug)]
enum DeckOp {
    Draw,
    DrawMany(usize),
    PlayFromHand(usize),
    DiscardHand,
    Reward,
    Remove(usize),
    Reset,
}

fn deck_op() -> impl Strategy<Value = DeckOp> {
    prop_oneof![
        3 => Just(DeckOp::Draw),
        1 => (0usize..5).prop_map(DeckOp::DrawMany),
        3 => (0usize..4).prop_map(DeckOp::PlayFromHand),
        1 => Just(DeckOp::DiscardHand),
        1 => Just(DeckOp::Reward),
        1 => (0usize..20).prop_map(DeckOp::Remove),
        1 => Just(DeckOp::Reset),
    ]
}

fn ids(pile: &im::Vector<CardInstance>) -> Vec<EntityId> {
    pile.iter().map(|c| c.entity_id).collect()
}

fn starter(size: u32, alloc: &mut EntityAllocator) -> Deck {
    let card = Arc::new(Card::new("pipe", "Pipe", Stat::Strength));
    let mut deck = Deck::new();
    deck.add_cards((0..size).map(|_| CardInstance::new(alloc.alloc(), Arc::clone(&card))));
    deck
}

fn assert_piles_consistent(deck: &Deck) {
    let pool: HashSet<EntityId> = ids(deck.cards()).into_iter().collect();
    assert_eq!(pool.len(), deck.cards().len(), "pool holds duplicates");

    let mut seen = HashSet::new();
    for pile in [deck.draw_pile(), deck.hand(), deck.discard_pile()] {
        for id in ids(pile) {
            assert!(pool.contains(&id), "{id} is in a pile but not the pool");
            assert!(seen.insert(id), "{id} is in two piles");
        }
    }
}

proptest! {
    #[test]
    fn prop_piles_stay_disjoint_subsets_of_pool(
        size in 0u32..15,
        seed in any::<u64>(),
        ops in prop::collection::vec(deck_op(), 0..60),
    ) {
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(seed);
        let mut deck = starter(size, &mut alloc);
        let reward = Arc::new(Card::new("medkit", "Medkit", Stat::Tech));

        for op in ops {
            match op {
                DeckOp::Draw => {
                    deck.draw_card();
                }
                DeckOp::DrawMany(n) => {
                    deck.draw_cards(n);
                }
                DeckOp::PlayFromHand(i) => {
                    if let Some(card) = deck.hand().get(i).map(|c| c.entity_id) {
                        prop_assert!(deck.play_card(card));
                    }
                }
                DeckOp::DiscardHand => deck.discard_hand(),
                DeckOp::Reward => deck.add_card_to_discard(CardInstance::new(alloc.alloc(), Arc::clone(&reward))),
                DeckOp::Remove(i) => {
                    if let Some(card) = deck.cards().get(i).map(|c| c.entity_id) {
                        prop_assert!(deck.remove_card(card));
                    }
                }
                DeckOp::Reset => deck.reset_for_time_loop(&mut rng),
            }
            assert_piles_consistent(&deck);
        }
    }

    #[test]
    fn prop_reset_puts_whole_pool_in_draw_pile(
        size in 1u32..20,
        draws in 0usize..20,
        removals in 0usize..5,
        seed in any::<u64>(),
    ) {
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(seed);
        let mut deck = starter(size, &mut alloc);

        deck.draw_cards(draws);
        if let Some(card) = deck.hand().front().map(|c| c.entity_id) {
            deck.play_card(card);
        }
        for _ in 0..removals {
            if let Some(card) = deck.cards().back().map(|c| c.entity_id) {
                deck.remove_card(card);
            }
        }

        deck.reset_for_time_loop(&mut rng);

        prop_assert!(deck.hand().is_empty());
        prop_assert!(deck.discard_pile().is_empty());
        prop_assert_eq!(deck.draw_pile().len(), deck.cards().len());
    }

    #[test]
    fn prop_full_cycle_recovers_every_card(size in 0u32..25, seed in any::<u64>()) {
        let mut alloc = EntityAllocator::new();
        let mut rng = GameRng::new(seed);
        let mut deck = starter(size, &mut alloc);
        deck.shuffle(&mut rng);

        deck.draw_cards(3);
        let played: Vec<EntityId> = ids(deck.hand()).into_iter().take(2).collect();
        for card in played {
            deck.play_card(card);
        }
        deck.discard_hand();
        deck.reset_for_time_loop(&mut rng);
        let drawn = deck.draw_cards(usize::MAX);

        prop_assert_eq!(drawn, size as usize);
        let mut hand = ids(deck.hand());
        let mut pool = ids(deck.cards());
        hand.sort();
        pool.sort();
        prop_assert_eq!(hand, pool);
        prop_assert!(deck.draw_card().is_none());
    }

    #[test]
    fn prop_damage_distribution_is_exact(damage in 0u32..10_000, players in 1usize..12) {
        let shares = distribute_damage(damage, players);

        prop_assert_eq!(shares.len(), players);
        prop_assert_eq!(shares.iter().sum::<u32>(), damage);

        let max = *shares.iter().max().unwrap();
        let min = *shares.iter().min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn test_removing_one_duplicate_keeps_the_other() {
    let mut alloc = EntityAllocator::new();
    let mut deck = starter(2, &mut alloc);
    let copies = ids(deck.cards());

    assert!(deck.remove_card(copies[0]));

    assert_eq!(ids(deck.cards()), vec![copies[1]]);
    assert_eq!(ids(deck.draw_pile()), vec![copies[1]]);
    assert!(!deck.remove_card(copies[0]));
}
