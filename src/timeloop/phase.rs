//! Loop state machine states and per-loop history.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::ObstacleCard;

/// Where a game currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopPhase {
    /// Players are working through the obstacle sequence.
    InLoop { loop_number: u32 },
    /// A loop ended in defeat; each player picks one card to lose for good.
    AwaitingCardRemoval { loop_number: u32 },
    GameWon,
    GameLost(LossReason),
}

impl LoopPhase {
    /// Won or lost. Only a new game leaves a terminal phase.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopPhase::GameWon | LoopPhase::GameLost(_))
    }

    #[must_use]
    pub fn loop_number(&self) -> Option<u32> {
        match self {
            LoopPhase::InLoop { loop_number } | LoopPhase::AwaitingCardRemoval { loop_number } => {
                Some(*loop_number)
            }
            LoopPhase::GameWon | LoopPhase::GameLost(_) => None,
        }
    }
}

impl std::fmt::Display for LoopPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopPhase::InLoop { loop_number } => write!(f, "loop {loop_number}"),
            LoopPhase::AwaitingCardRemoval { loop_number } => {
                write!(f, "choosing removals before loop {loop_number}")
            }
            LoopPhase::GameWon => f.write_str("won"),
            LoopPhase::GameLost(reason) => write!(f, "lost: {reason}"),
        }
    }
}

/// Why a game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// A later loop did not get further than the best earlier loop.
    ProgressNotExceeded,
    /// The first loop ended without a single obstacle overcome.
    NoObjectivesOnFirstLoop,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossReason::ProgressNotExceeded => f.write_str("failed to exceed previous loop's progress"),
            LossReason::NoObjectivesOnFirstLoop => f.write_str("failed all objectives on loop 1"),
        }
    }
}

/// One resolved obstacle in the current loop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub obstacle: Arc<ObstacleCard>,
    pub succeeded: bool,
}
