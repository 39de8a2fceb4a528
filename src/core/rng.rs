//! Deterministic random number generation.
//!
//! Every random decision in a game (starter-deck shuffles, obstacle sampling,
//! loop-reset reshuffles, reward picks) goes through one `GameRng`, so a
//! scenario is fully reproducible from its seed.
//!
//! ```
//! use timeloop_ccg::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.gen_range_usize(0..100), b.gen_range_usize(0..100));
//! ```

use im::Vector;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Shuffle a persistent vector in place.
    pub fn shuffle_vector<T: Clone>(&mut self, vector: &mut Vector<T>) {
        let mut items: Vec<T> = vector.iter().cloned().collect();
        self.shuffle(&mut items);
        *vector = items.into_iter().collect();
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Pick `amount` distinct elements uniformly, without replacement.
    ///
    /// Returns every element when `amount >= slice.len()`. The order of the
    /// result is not itself uniformly random; shuffle it if order matters.
    #[must_use]
    pub fn sample<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        slice
            .choose_multiple(&mut self.inner, amount)
            .cloned()
            .collect()
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture and restore are O(1)
/// regardless of how many numbers were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
