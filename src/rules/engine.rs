//! The per-obstacle turn scheduler.
//!
//! One round per obstacle: every player, in index order, either plays a card
//! from hand or skips, then refills their hand to `HAND_SIZE`. When the last
//! player has acted the round resolves: scoring, then reward on success or
//! damage on failure.
//!
//! Every submission is validated before anything is mutated, so a rejected
//! action leaves the round, the decks and the RNG untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::damage::apply_damage;
use super::scoring::{self, Contribution, FinaleTotals, Play};
use crate::cards::{CardCatalog, CardInstance, ObstacleCard};
use crate::core::config::HAND_SIZE;
use crate::core::entity::{EntityAllocator, EntityId};
use crate::core::error::GameError;
use crate::core::player::{Player, PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::zones::ObstacleDeck;

/// What a player did this round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Play(CardInstance),
    Skip,
}

impl PlayerAction {
    #[must_use]
    pub fn card(&self) -> Option<&CardInstance> {
        match self {
            PlayerAction::Play(card) => Some(card),
            PlayerAction::Skip => None,
        }
    }
}

/// Full account of one resolved obstacle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub obstacle: Arc<ObstacleCard>,
    pub actions: Vec<PlayerAction>,
    pub contributions: Vec<(PlayerId, Contribution)>,
    pub total: u32,
    pub finale_totals: Option<FinaleTotals>,
    pub succeeded: bool,
    /// Total damage before distribution.
    pub damage: u32,
    /// Damage each player took, by index. Empty on success.
    pub damage_taken: Vec<u32>,
    pub rewards: Vec<(PlayerId, CardInstance)>,
}

/// Result of a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundProgress {
    /// Waiting on this player.
    Waiting(PlayerId),
    /// Everyone acted and the round resolved.
    Resolved(RoundReport),
}

/// Mutable collaborators a round touches while resolving.
pub struct RoundContext<'a> {
    pub players: &'a mut PlayerMap<Player>,
    pub obstacles: &'a mut ObstacleDeck,
    pub catalog: &'a CardCatalog,
    pub alloc: &'a mut EntityAllocator,
    pub rng: &'a mut GameRng,
}

/// Collects actions for the current obstacle and resolves it.
#[derive(Clone, Debug, Default)]
pub struct ResolutionEngine {
    obstacle: Option<Arc<ObstacleCard>>,
    actions: Vec<PlayerAction>,
}

impl ResolutionEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a round for `obstacle`; player 0 acts first.
    pub fn begin(&mut self, obstacle: Arc<ObstacleCard>) {
        debug!(obstacle = %obstacle.name, "round opened");
        self.obstacle = Some(obstacle);
        self.actions.clear();
    }

    /// Drop any open round.
    pub fn close(&mut self) {
        self.obstacle = None;
        self.actions.clear();
    }

    #[must_use]
    pub fn obstacle(&self) -> Option<&Arc<ObstacleCard>> {
        self.obstacle.as_ref()
    }

    /// The player expected to act, if a round is open.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.obstacle.as_ref().map(|_| PlayerId::new(self.actions.len() as u8))
    }

    /// Actions recorded so far this round.
    #[must_use]
    pub fn actions(&self) -> &[PlayerAction] {
        &self.actions
    }

    /// Play `card` from `player_index`'s hand.
    pub fn play_card(
        &mut self,
        ctx: RoundContext<'_>,
        player_index: usize,
        card: EntityId,
    ) -> Result<RoundProgress, GameError> {
        let player = self.check_turn(ctx.players, player_index)?;

        let deck = ctx.players[player].deck_mut();
        let Some(played) = deck.hand_card(card).cloned() else {
            return Err(GameError::InvalidCardReference { player, card });
        };
        deck.play_card(card);
        deck.refill_hand(HAND_SIZE);
        debug!(%player, card = %played.name(), "card played");

        self.actions.push(PlayerAction::Play(played));
        Ok(self.advance(ctx))
    }

    /// Pass without contributing.
    pub fn skip_turn(&mut self, ctx: RoundContext<'_>, player_index: usize) -> Result<RoundProgress, GameError> {
        let player = self.check_turn(ctx.players, player_index)?;

        ctx.players[player].deck_mut().refill_hand(HAND_SIZE);
        debug!(%player, "turn skipped");

        self.actions.push(PlayerAction::Skip);
        Ok(self.advance(ctx))
    }

    fn check_turn(&self, players: &PlayerMap<Player>, player_index: usize) -> Result<PlayerId, GameError> {
        let expected = self.current_player().ok_or(GameError::ActionAfterResolution)?;
        let player = players
            .id_for(player_index)
            .ok_or(GameError::InvalidPlayer(player_index))?;

        if player != expected {
            return Err(GameError::NotPlayersTurn { expected, actual: player });
        }
        Ok(player)
    }

    fn advance(&mut self, ctx: RoundContext<'_>) -> RoundProgress {
        if self.actions.len() < ctx.players.player_count() {
            return RoundProgress::Waiting(PlayerId::new(self.actions.len() as u8));
        }
        RoundProgress::Resolved(self.resolve(ctx))
    }

    fn resolve(&mut self, ctx: RoundContext<'_>) -> RoundReport {
        let Some(obstacle) = self.obstacle.take() else {
            unreachable!("advance only resolves an open round");
        };
        let actions = std::mem::take(&mut self.actions);

        let score = {
            let plays: Vec<Play<'_>> = ctx
                .players
                .iter()
                .zip(&actions)
                .map(|((player, seat), action)| Play {
                    player,
                    card: action.card().map(|c| c.card.as_ref()),
                    character: seat.character(),
                })
                .collect();
            scoring::score(&obstacle, &plays)
        };

        let mut rewards = Vec::new();
        let mut damage_taken = Vec::new();

        if score.succeeded {
            ctx.obstacles.defeat_obstacle(&obstacle.id);

            let recipients: Vec<PlayerId> = if obstacle.is_finale() {
                ctx.players.player_ids().collect()
            } else {
                let index = ctx.rng.gen_range_usize(0..ctx.players.player_count());
                vec![PlayerId::new(index as u8)]
            };

            for player in recipients {
                if let Some(reward) = ctx.catalog.random_reward(ctx.alloc, ctx.rng) {
                    debug!(%player, card = %reward.name(), "reward granted");
                    ctx.players[player].deck_mut().add_card_to_discard(reward.clone());
                    rewards.push((player, reward));
                }
            }
        } else {
            damage_taken = apply_damage(ctx.players, score.damage);
        }

        info!(
            obstacle = %obstacle.name,
            total = score.total,
            succeeded = score.succeeded,
            damage = score.damage,
            "obstacle resolved"
        );

        RoundReport {
            obstacle,
            actions,
            contributions: score.contributions,
            total: score.total,
            finale_totals: score.finale_totals,
            succeeded: score.succeeded,
            damage: score.damage,
            damage_taken,
            rewards,
        }
    }
}
