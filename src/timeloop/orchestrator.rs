//! The time-loop orchestrator.
//!
//! `LoopGame` owns every piece of mutable state in a session and is the only
//! thing a presentation layer talks to. Each action either applies fully and
//! returns a fresh `GameView`, or is rejected with a `GameError` and changes
//! nothing.
//!
//! After every resolved obstacle the outcome is appended to the loop history
//! and the next state is decided:
//!
//! 1. Someone is defeated: the loop ends. A later loop that got no further
//!    than the best earlier loop loses the game, as does a first loop with no
//!    obstacle overcome. Otherwise players choose removals for the next loop.
//! 2. The obstacle sequence is exhausted: the first loop, or any loop that got
//!    further than the best earlier one, wins. Anything else loses.
//! 3. Otherwise the next obstacle is revealed.

use std::sync::Arc;

use im::Vector;
use tracing::{debug, info};

use super::phase::{HistoryEntry, LoopPhase, LossReason};
use super::view::GameView;
use crate::cards::{CardCatalog, CharacterCatalog, CharacterType, ObstacleCard, ObstacleCatalog};
use crate::core::config::{GameConfig, HAND_SIZE};
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::{CatalogError, GameError};
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::{GameRng, GameRngState};
use crate::rules::{ObstacleDeckBuilder, ResolutionEngine, RoundContext, RoundProgress, RoundReport};
use crate::zones::{Deck, ObstacleDeck};

/// Seat configuration for one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetup {
    /// Display name; defaults to "Player n".
    pub name: Option<String>,
    pub character_type: CharacterType,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(character_type: impl Into<String>) -> Self {
        Self {
            name: None,
            character_type: CharacterType::new(character_type),
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Builder for creating a `LoopGame`.
pub struct LoopGameBuilder {
    cards: CardCatalog,
    obstacles: ObstacleCatalog,
    characters: CharacterCatalog,
    config: GameConfig,
    players: Vec<PlayerSetup>,
    max_difficulty: Option<u32>,
}

impl LoopGameBuilder {
    #[must_use]
    pub fn new(cards: CardCatalog, obstacles: ObstacleCatalog, characters: CharacterCatalog) -> Self {
        Self {
            cards,
            obstacles,
            characters,
            config: GameConfig::default(),
            players: Vec::new(),
            max_difficulty: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn player(mut self, setup: PlayerSetup) -> Self {
        self.players.push(setup);
        self
    }

    #[must_use]
    pub fn players(mut self, setups: impl IntoIterator<Item = PlayerSetup>) -> Self {
        self.players.extend(setups);
        self
    }

    /// Leave regular obstacles harder than `max` out of the sequence.
    #[must_use]
    pub fn max_difficulty(mut self, max: u32) -> Self {
        self.max_difficulty = Some(max);
        self
    }

    /// Seat the players and deal the first loop.
    pub fn build(self, seed: u64) -> Result<LoopGame, CatalogError> {
        if self.players.is_empty() {
            return Err(CatalogError::NoPlayers);
        }

        if self.players.len() > usize::from(u8::MAX) {
            return Err(CatalogError::TooManyPlayers(self.players.len()));
        }

        let seats = self
            .players
            .into_iter()
            .map(|setup| match self.characters.get(&setup.character_type) {
                Some(character) => Ok((setup, Arc::clone(character))),
                None => Err(CatalogError::UnknownCharacter(setup.character_type.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let players = PlayerMap::new(seats.len(), |id| {
            let (setup, character) = &seats[id.index()];
            let mut player = Player::new(id.index() as u32 + 1, Arc::clone(character), Deck::new());
            if let Some(name) = &setup.name {
                player.set_name(name.clone());
            }
            player
        });
        let removals = PlayerMap::with_default(players.player_count());

        let mut game = LoopGame {
            cards: self.cards,
            obstacles: self.obstacles,
            config: self.config,
            max_difficulty: self.max_difficulty,
            players,
            obstacle_deck: ObstacleDeck::new(),
            rng: GameRng::new(seed),
            alloc: EntityAllocator::new(),
            engine: ResolutionEngine::new(),
            phase: LoopPhase::InLoop { loop_number: 1 },
            current_loop: 1,
            max_obstacles_passed: 0,
            history: Vector::new(),
            removals,
            last_report: None,
        };
        game.deal_new_game();
        Ok(game)
    }
}

/// One game session.
pub struct LoopGame {
    cards: CardCatalog,
    obstacles: ObstacleCatalog,
    config: GameConfig,
    max_difficulty: Option<u32>,
    players: PlayerMap<Player>,
    obstacle_deck: ObstacleDeck,
    rng: GameRng,
    alloc: EntityAllocator,
    engine: ResolutionEngine,
    phase: LoopPhase,
    current_loop: u32,
    /// Best obstacle count reached by any finished loop.
    max_obstacles_passed: usize,
    history: Vector<HistoryEntry>,
    removals: PlayerMap<Option<EntityId>>,
    last_report: Option<RoundReport>,
}

impl LoopGame {
    // === Action surface ===

    /// Play a card from the acting player's hand.
    pub fn play_card(&mut self, player_index: usize, card: EntityId) -> Result<GameView, GameError> {
        self.submit(|engine, ctx| engine.play_card(ctx, player_index, card))
    }

    /// Pass on the current obstacle.
    pub fn skip_turn(&mut self, player_index: usize) -> Result<GameView, GameError> {
        self.submit(|engine, ctx| engine.skip_turn(ctx, player_index))
    }

    /// Pick the card a player loses permanently before the next loop.
    ///
    /// Any card in the player's pool qualifies. The choice is final.
    pub fn choose_card_for_removal(&mut self, player_index: usize, card: EntityId) -> Result<GameView, GameError> {
        self.ensure_not_terminal()?;
        if !matches!(self.phase, LoopPhase::AwaitingCardRemoval { .. }) {
            return Err(GameError::NotAwaitingRemoval);
        }

        let player = self
            .players
            .id_for(player_index)
            .ok_or(GameError::InvalidPlayer(player_index))?;
        if self.removals[player].is_some() {
            return Err(GameError::RemovalAlreadyChosen(player));
        }
        if !self.players[player].deck().owns(card) {
            return Err(GameError::InvalidCardReference { player, card });
        }

        debug!(%player, %card, "card chosen for removal");
        self.removals[player] = Some(card);
        Ok(self.view())
    }

    /// Apply every removal and start the next loop.
    ///
    /// Players with an empty pool have nothing to give up and are not waited on.
    pub fn confirm_all_removals_and_continue(&mut self) -> Result<GameView, GameError> {
        self.ensure_not_terminal()?;
        let LoopPhase::AwaitingCardRemoval { loop_number } = self.phase else {
            return Err(GameError::NotAwaitingRemoval);
        };

        let missing: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(id, player)| self.removals[*id].is_none() && !player.deck().cards().is_empty())
            .map(|(id, _)| id)
            .collect();
        if !missing.is_empty() {
            return Err(GameError::IncompleteRemovalSelection { missing });
        }

        for (id, player) in self.players.iter_mut() {
            if let Some(card) = self.removals[id].take() {
                player.deck_mut().remove_card(card);
            }
            player.heal_to_full();
            let deck = player.deck_mut();
            deck.reset_for_time_loop(&mut self.rng);
            deck.refill_hand(HAND_SIZE);
        }

        self.obstacle_deck.clear_obstacles();
        self.obstacle_deck.restore_original_order();
        self.history.clear();
        self.phase = LoopPhase::InLoop { loop_number };

        info!(loop_number, best = self.max_obstacles_passed, "loop started");
        self.present_next_obstacle();
        Ok(self.view())
    }

    /// Throw the current game away and deal a fresh one.
    ///
    /// Accepted in every phase. The obstacle sequence is re-sampled and every
    /// player gets a full starter deck of new card copies.
    pub fn start_new_game(&mut self) -> Result<GameView, GameError> {
        self.deal_new_game();
        Ok(self.view())
    }

    // === Queries ===

    #[must_use]
    pub fn view(&self) -> GameView {
        GameView::capture(self)
    }

    #[must_use]
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    #[must_use]
    pub fn current_loop(&self) -> u32 {
        self.current_loop
    }

    #[must_use]
    pub fn max_obstacles_passed(&self) -> usize {
        self.max_obstacles_passed
    }

    /// Resolved obstacles of the current loop, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn obstacle_deck(&self) -> &ObstacleDeck {
        &self.obstacle_deck
    }

    #[must_use]
    pub fn current_obstacle(&self) -> Option<&Arc<ObstacleCard>> {
        self.engine.obstacle()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.engine.current_player()
    }

    #[must_use]
    pub fn pending_removal(&self, player: PlayerId) -> Option<EntityId> {
        self.removals[player]
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&RoundReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn card_catalog(&self) -> &CardCatalog {
        &self.cards
    }

    /// RNG position, for reproducing a session from this point.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Internals ===

    fn ensure_not_terminal(&self) -> Result<(), GameError> {
        if self.phase.is_terminal() {
            Err(GameError::ActionInTerminalState)
        } else {
            Ok(())
        }
    }

    fn submit(
        &mut self,
        action: impl FnOnce(&mut ResolutionEngine, RoundContext<'_>) -> Result<RoundProgress, GameError>,
    ) -> Result<GameView, GameError> {
        self.ensure_not_terminal()?;

        let ctx = RoundContext {
            players: &mut self.players,
            obstacles: &mut self.obstacle_deck,
            catalog: &self.cards,
            alloc: &mut self.alloc,
            rng: &mut self.rng,
        };
        if let RoundProgress::Resolved(report) = action(&mut self.engine, ctx)? {
            self.record(report);
        }
        Ok(self.view())
    }

    fn record(&mut self, report: RoundReport) {
        self.history.push_back(HistoryEntry {
            obstacle: Arc::clone(&report.obstacle),
            succeeded: report.succeeded,
        });
        self.last_report = Some(report);

        let encountered = self.history.len();

        if self.players.values().any(Player::is_defeated) {
            if self.current_loop > 1 && encountered <= self.max_obstacles_passed {
                self.lose(LossReason::ProgressNotExceeded);
                return;
            }

            self.max_obstacles_passed = self.max_obstacles_passed.max(encountered);
            self.current_loop += 1;

            let successes = self.history.iter().filter(|h| h.succeeded).count();
            if self.current_loop == 2 && successes == 0 {
                self.lose(LossReason::NoObjectivesOnFirstLoop);
                return;
            }

            self.removals = PlayerMap::with_default(self.players.player_count());
            self.phase = LoopPhase::AwaitingCardRemoval { loop_number: self.current_loop };
            info!(
                encountered,
                best = self.max_obstacles_passed,
                next_loop = self.current_loop,
                "loop ended in defeat"
            );
        } else {
            self.present_next_obstacle();
        }
    }

    fn lose(&mut self, reason: LossReason) {
        self.engine.close();
        self.phase = LoopPhase::GameLost(reason);
        info!(loop_number = self.current_loop, %reason, "game lost");
    }

    /// Reveal the next obstacle, or settle the loop if there is none.
    fn present_next_obstacle(&mut self) {
        match self.obstacle_deck.draw_obstacle() {
            Some(obstacle) => self.engine.begin(obstacle),
            None => self.settle_completed_loop(),
        }
    }

    /// The sequence ran out with nobody defeated.
    fn settle_completed_loop(&mut self) {
        self.engine.close();
        let encountered = self.history.len();
        if self.current_loop == 1 || encountered > self.max_obstacles_passed {
            self.phase = LoopPhase::GameWon;
            info!(loop_number = self.current_loop, encountered, "game won");
        } else {
            self.lose(LossReason::ProgressNotExceeded);
        }
    }

    fn deal_new_game(&mut self) {
        for (_, player) in self.players.iter_mut() {
            let character_type = player.character().character_type.clone();
            let mut deck = self.cards.create_starter_deck(&character_type, &mut self.alloc, &mut self.rng);
            deck.refill_hand(HAND_SIZE);
            player.replace_deck(deck);
            player.heal_to_full();
        }

        let builder = ObstacleDeckBuilder::new(&self.obstacles, self.config);
        self.obstacle_deck = match self.max_difficulty {
            Some(max) => builder.build_with_max_difficulty(max, &mut self.rng),
            None => builder.build(&mut self.rng),
        };

        self.current_loop = 1;
        self.max_obstacles_passed = 0;
        self.history.clear();
        self.removals = PlayerMap::with_default(self.players.player_count());
        self.last_report = None;
        self.phase = LoopPhase::InLoop { loop_number: 1 };

        info!(
            players = self.players.player_count(),
            obstacles = self.obstacle_deck.all_cards().len(),
            seed = self.rng.seed(),
            "new game dealt"
        );
        self.present_next_obstacle();
    }
}
