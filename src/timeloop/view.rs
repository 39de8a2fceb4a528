//! Read-only snapshot of a game for a presentation layer.
//!
//! Piles and history are `im::Vector`s, so capturing a view after every
//! action is cheap.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::orchestrator::LoopGame;
use super::phase::{HistoryEntry, LoopPhase};
use crate::cards::{CardInstance, ObstacleCard};
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;
use crate::rules::RoundReport;

/// Public state of one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub character: String,
    pub current_health: u32,
    pub max_health: u32,
    pub hand: Vector<CardInstance>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub pool_size: usize,
    /// Card picked for permanent removal, while awaiting removals.
    pub pending_removal: Option<EntityId>,
}

/// Public state of a whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub phase: LoopPhase,
    pub loop_number: u32,
    pub max_obstacles_passed: usize,
    pub current_obstacle: Option<Arc<ObstacleCard>>,
    pub current_player: Option<PlayerId>,
    pub obstacles_remaining: usize,
    pub players: Vec<PlayerView>,
    pub history: Vector<HistoryEntry>,
    pub last_report: Option<RoundReport>,
}

impl GameView {
    #[must_use]
    pub fn capture(game: &LoopGame) -> Self {
        let players = game
            .players()
            .iter()
            .map(|(id, player)| {
                let deck = player.deck();
                PlayerView {
                    id,
                    name: player.name().to_string(),
                    character: player.character().name.clone(),
                    current_health: player.current_health(),
                    max_health: player.max_health(),
                    hand: deck.hand().clone(),
                    draw_pile_count: deck.draw_pile().len(),
                    discard_pile_count: deck.discard_pile().len(),
                    pool_size: deck.cards().len(),
                    pending_removal: game.pending_removal(id),
                }
            })
            .collect();

        Self {
            phase: game.phase(),
            loop_number: game.current_loop(),
            max_obstacles_passed: game.max_obstacles_passed(),
            current_obstacle: game.current_obstacle().cloned(),
            current_player: game.current_player(),
            obstacles_remaining: game.obstacle_deck().draw_pile().len(),
            players,
            history: game.history().clone(),
            last_report: game.last_report().cloned(),
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerView> {
        self.players.get(id.index())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// JSON rendering for a front end.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
