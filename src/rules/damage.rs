//! Collective damage distribution.
//!
//! Damage is split evenly; the remainder goes one point each to the lowest
//! player indices.

use tracing::debug;

use crate::core::player::{Player, PlayerMap};

/// Per-player share of `damage`, in player index order.
///
/// ```
/// use timeloop_ccg::rules::distribute_damage;
///
/// assert_eq!(distribute_damage(5, 2), vec![3, 2]);
/// assert_eq!(distribute_damage(7, 3), vec![3, 2, 2]);
/// assert_eq!(distribute_damage(0, 4), vec![0, 0, 0, 0]);
/// ```
#[must_use]
pub fn distribute_damage(damage: u32, player_count: usize) -> Vec<u32> {
    if player_count == 0 {
        return Vec::new();
    }
    let count = player_count as u32;
    let share = damage / count;
    let remainder = (damage % count) as usize;

    (0..player_count)
        .map(|i| share + u32::from(i < remainder))
        .collect()
}

/// Distribute and apply damage. Returns what each player took.
pub fn apply_damage(players: &mut PlayerMap<Player>, damage: u32) -> Vec<u32> {
    let shares = distribute_damage(damage, players.player_count());

    for ((id, player), &amount) in players.iter_mut().zip(&shares) {
        let remaining = player.take_damage(amount);
        debug!(player = %id, amount, remaining, "damage taken");
    }
    shares
}
