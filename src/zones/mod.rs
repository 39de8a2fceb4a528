//! Pile managers.
//!
//! ## Key Types
//!
//! - `Deck`: a player's pool with draw, hand and discard piles
//! - `ObstacleDeck`: the obstacle sequence with draw, active and defeated piles
//!
//! Both exclusively own their piles and hand out read-only snapshots.

pub mod deck;
pub mod obstacle_deck;

pub use deck::Deck;
pub use obstacle_deck::ObstacleDeck;
