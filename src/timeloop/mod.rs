//! Time-loop progression: the session orchestrator and its public view.
//!
//! ## Key Types
//!
//! - `LoopGame`: owns a session and exposes the action surface
//! - `LoopGameBuilder`: seats players from the catalogs and deals loop 1
//! - `LoopPhase`: in a loop, awaiting removals, won or lost
//! - `GameView`: serializable snapshot returned by every action

pub mod orchestrator;
pub mod phase;
pub mod view;

pub use orchestrator::{LoopGame, LoopGameBuilder, PlayerSetup};
pub use phase::{HistoryEntry, LoopPhase, LossReason};
pub use view::{GameView, PlayerView};
