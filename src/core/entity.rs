//! Entity identification for card copies.
//!
//! Catalog cards are templates: the same `CardId` may appear several times in
//! one player's pool (starter duplicates, rewards). Every copy placed in a
//! deck gets its own `EntityId` so piles can be compared by copy, never by
//! catalog id.
//!
//! ```
//! use timeloop_ccg::core::EntityAllocator;
//!
//! let mut alloc = EntityAllocator::new();
//! let a = alloc.alloc();
//! let b = alloc.alloc();
//! assert_ne!(a, b);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for one card copy within a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for `EntityId`s.
///
/// Never reuses an id, even across loop resets and new games, so a stale
/// reference held by a front end can never alias a fresh copy.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next unused id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
