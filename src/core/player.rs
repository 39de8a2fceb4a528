//! Players and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe, 0-based player index. Players always act in index order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.
//!
//! ## Player
//!
//! Identity, selected character, current health and exclusive ownership of
//! one `Deck`.

use std::ops::{Index, IndexMut};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Character;
use crate::zones::Deck;

/// Player identifier supporting 1-255 players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use timeloop_ccg::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

/// Seats are shown 1-based, matching `Player::name`.
impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", u16::from(self.0) + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use timeloop_ccg::core::{PlayerId, PlayerMap};
///
/// let mut chosen: PlayerMap<Option<u32>> = PlayerMap::with_default(2);
/// chosen[PlayerId::new(1)] = Some(7);
/// assert_eq!(chosen[PlayerId::new(0)], None);
/// assert_eq!(chosen[PlayerId::new(1)], Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, mut factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Look up a raw index, returning `None` when out of range.
    #[must_use]
    pub fn id_for(&self, index: usize) -> Option<PlayerId> {
        (index < self.data.len()).then(|| PlayerId(index as u8))
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A seated player.
#[derive(Clone, Debug)]
pub struct Player {
    player_number: u32,
    name: String,
    character: Arc<Character>,
    current_health: u32,
    deck: Deck,
}

impl Player {
    /// Seat a player at full health.
    #[must_use]
    pub fn new(player_number: u32, character: Arc<Character>, deck: Deck) -> Self {
        Self {
            player_number,
            name: format!("Player {}", player_number),
            current_health: character.max_health,
            character,
            deck,
        }
    }

    #[must_use]
    pub fn player_number(&self) -> u32 {
        self.player_number
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Swap the selected character; health is refilled to the new maximum.
    pub fn set_character(&mut self, character: Arc<Character>) {
        self.current_health = character.max_health;
        self.character = character;
    }

    #[must_use]
    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    #[must_use]
    pub fn max_health(&self) -> u32 {
        self.character.max_health
    }

    /// Apply damage, saturating at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current_health = self.current_health.saturating_sub(amount);
        self.current_health
    }

    pub fn heal_to_full(&mut self) {
        self.current_health = self.character.max_health;
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn replace_deck(&mut self, deck: Deck) {
        self.deck = deck;
    }
}
