//! Read-only catalogs: playable cards, obstacles and characters.
//!
//! Each catalog keeps its entries in registration order alongside an
//! `FxHashMap` index, so enumeration (reward picks, obstacle sampling) is
//! deterministic for a given seed. Catalogs parsed from JSON register their
//! entries in id order.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::warn;

use super::character::{Character, CharacterType, StatBlock};
use super::definition::{Card, CardId, ObstacleType, Stat};
use super::instance::CardInstance;
use super::obstacle::{FinaleRequirements, ObstacleCard, ObstacleId};
use crate::core::entity::EntityAllocator;
use crate::core::error::CatalogError;
use crate::core::rng::GameRng;
use crate::zones::Deck;

/// Playable cards plus the starter-deck list for each character type.
///
/// ## Example
///
/// ```
/// use timeloop_ccg::cards::{Card, CardCatalog, CardId, CharacterType, Stat};
/// use timeloop_ccg::core::{EntityAllocator, GameRng};
///
/// let mut catalog = CardCatalog::new();
/// catalog.register(Card::new("pipe", "Pipe", Stat::Strength));
/// catalog.set_starter_deck(CharacterType::new("soldier"), vec![CardId::new("pipe"); 3]);
///
/// let mut alloc = EntityAllocator::new();
/// let mut rng = GameRng::new(1);
/// let deck = catalog.create_starter_deck(&CharacterType::new("soldier"), &mut alloc, &mut rng);
/// assert_eq!(deck.cards().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Arc<Card>>,
    index: FxHashMap<CardId, usize>,
    starter_decks: FxHashMap<CharacterType, Vec<CardId>>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) {
        if self.index.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(Arc::new(card));
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Arc<Card>> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Every card, in registration order.
    #[must_use]
    pub fn all(&self) -> &[Arc<Card>] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn set_starter_deck(&mut self, character_type: CharacterType, cards: Vec<CardId>) {
        self.starter_decks.insert(character_type, cards);
    }

    #[must_use]
    pub fn starter_deck(&self, character_type: &CharacterType) -> Option<&[CardId]> {
        self.starter_decks.get(character_type).map(Vec::as_slice)
    }

    /// Mint fresh copies of a character's starter cards into a shuffled deck.
    ///
    /// Unknown card ids are skipped; an unknown character type yields an
    /// empty deck.
    pub fn create_starter_deck(
        &self,
        character_type: &CharacterType,
        alloc: &mut EntityAllocator,
        rng: &mut GameRng,
    ) -> Deck {
        let mut deck = Deck::new();

        let Some(ids) = self.starter_decks.get(character_type) else {
            warn!(%character_type, "no starter deck for character type");
            return deck;
        };

        for id in ids {
            match self.get(id) {
                Some(card) => deck.add_card(CardInstance::new(alloc.alloc(), Arc::clone(card))),
                None => warn!(card = %id, %character_type, "starter deck lists unknown card"),
            }
        }

        deck.shuffle(rng);
        deck
    }

    /// Mint a copy of a uniformly chosen catalog card.
    pub fn random_reward(&self, alloc: &mut EntityAllocator, rng: &mut GameRng) -> Option<CardInstance> {
        let card = rng.choose(&self.cards)?;
        Some(CardInstance::new(alloc.alloc(), Arc::clone(card)))
    }

    /// Parse the card document and the starter-deck document.
    pub fn from_json(cards_json: &str, starter_decks_json: &str) -> Result<Self, CatalogError> {
        let records: BTreeMap<String, CardRecord> = serde_json::from_str(cards_json)?;
        let decks: BTreeMap<String, StarterDeckRecord> = serde_json::from_str(starter_decks_json)?;

        let mut catalog = Self::new();
        for (id, record) in records {
            catalog.register(record.into_card(id));
        }
        for (character_type, record) in decks {
            catalog.set_starter_deck(
                CharacterType(character_type),
                record.cards.into_iter().map(CardId).collect(),
            );
        }
        Ok(catalog)
    }
}

/// Every obstacle the builder can draw from.
#[derive(Clone, Debug, Default)]
pub struct ObstacleCatalog {
    obstacles: Vec<Arc<ObstacleCard>>,
    index: FxHashMap<ObstacleId, usize>,
}

impl ObstacleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle.
    ///
    /// Panics if an obstacle with the same ID already exists.
    pub fn register(&mut self, obstacle: ObstacleCard) {
        if self.index.contains_key(&obstacle.id) {
            panic!("Obstacle with ID {:?} already registered", obstacle.id);
        }
        self.index.insert(obstacle.id.clone(), self.obstacles.len());
        self.obstacles.push(Arc::new(obstacle));
    }

    #[must_use]
    pub fn get(&self, id: &ObstacleId) -> Option<&Arc<ObstacleCard>> {
        self.index.get(id).map(|&i| &self.obstacles[i])
    }

    #[must_use]
    pub fn all(&self) -> &[Arc<ObstacleCard>] {
        &self.obstacles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// The first finale obstacle, if the catalog has one.
    #[must_use]
    pub fn finale(&self) -> Option<&Arc<ObstacleCard>> {
        self.obstacles.iter().find(|o| o.is_finale())
    }

    /// Non-finale obstacles, in registration order.
    pub fn regular(&self) -> impl Iterator<Item = &Arc<ObstacleCard>> {
        self.obstacles.iter().filter(|o| !o.is_finale())
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: BTreeMap<String, ObstacleRecord> = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for (id, record) in records {
            catalog.register(record.into_obstacle(id)?);
        }
        Ok(catalog)
    }
}

/// Character records by type, in registration order.
#[derive(Clone, Debug, Default)]
pub struct CharacterCatalog {
    characters: Vec<Arc<Character>>,
    index: FxHashMap<CharacterType, usize>,
}

impl CharacterCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character.
    ///
    /// Panics if the type is already registered.
    pub fn register(&mut self, character: Character) {
        if self.index.contains_key(&character.character_type) {
            panic!("Character type {:?} already registered", character.character_type);
        }
        self.index.insert(character.character_type.clone(), self.characters.len());
        self.characters.push(Arc::new(character));
    }

    #[must_use]
    pub fn get(&self, character_type: &CharacterType) -> Option<&Arc<Character>> {
        self.index.get(character_type).map(|&i| &self.characters[i])
    }

    pub fn types(&self) -> impl Iterator<Item = &CharacterType> {
        self.characters.iter().map(|c| &c.character_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The type after `current`, wrapping around. `None` if `current` is unknown.
    #[must_use]
    pub fn next_type(&self, current: &CharacterType) -> Option<&CharacterType> {
        let i = *self.index.get(current)?;
        Some(&self.characters[(i + 1) % self.characters.len()].character_type)
    }

    /// The type before `current`, wrapping around. `None` if `current` is unknown.
    #[must_use]
    pub fn previous_type(&self, current: &CharacterType) -> Option<&CharacterType> {
        let i = *self.index.get(current)?;
        let len = self.characters.len();
        Some(&self.characters[(i + len - 1) % len].character_type)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: BTreeMap<String, CharacterRecord> = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for (character_type, record) in records {
            catalog.register(Character {
                character_type: CharacterType(character_type),
                name: record.name,
                stats: StatBlock::new(record.strength, record.speed, record.tech),
                max_health: record.health,
                description: record.description,
            });
        }
        Ok(catalog)
    }
}

// === JSON records ===

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    name: String,
    #[serde(default)]
    description: String,
    stat: String,
    compatible_types: Option<Vec<String>>,
}

impl CardRecord {
    fn into_card(self, id: String) -> Card {
        let mut card = Card::new(id, self.name, Stat::Strength)
            .with_stat_name(&self.stat)
            .with_description(self.description);

        if let Some(tags) = self.compatible_types {
            let types: Vec<ObstacleType> = tags
                .iter()
                .filter_map(|tag| {
                    let parsed = ObstacleType::parse(tag);
                    if parsed.is_none() {
                        warn!(card = %card.id, %tag, "ignoring unknown compatible type");
                    }
                    parsed
                })
                .collect();
            card = card.with_compatible(&types);
        }
        card
    }
}

#[derive(Deserialize)]
struct StarterDeckRecord {
    cards: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObstacleRecord {
    name: String,
    #[serde(default)]
    description: String,
    difficulty: u32,
    #[serde(default)]
    required_skills: Vec<String>,
    #[serde(rename = "type")]
    obstacle_type: String,
    environment_required: Option<u32>,
    hazard_required: Option<u32>,
    barrier_required: Option<u32>,
}

impl ObstacleRecord {
    fn into_obstacle(self, id: String) -> Result<ObstacleCard, CatalogError> {
        let obstacle_type = ObstacleType::parse(&self.obstacle_type).ok_or_else(|| {
            CatalogError::UnknownObstacleType {
                id: id.clone(),
                tag: self.obstacle_type.clone(),
            }
        })?;

        let defaults = FinaleRequirements::default();
        let requirements = FinaleRequirements {
            environment: self.environment_required.unwrap_or(defaults.environment),
            hazard: self.hazard_required.unwrap_or(defaults.hazard),
            barrier: self.barrier_required.unwrap_or(defaults.barrier),
        };

        Ok(ObstacleCard::new(id, self.name, self.difficulty, obstacle_type)
            .with_description(self.description)
            .with_required_names(&self.required_skills)
            .with_finale_requirements(requirements))
    }
}

#[derive(Deserialize)]
struct CharacterRecord {
    name: String,
    strength: u32,
    speed: u32,
    tech: u32,
    health: u32,
    #[serde(default)]
    description: String,
}
