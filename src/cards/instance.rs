//! Card instances - one physical copy of a catalog card.
//!
//! Two copies of the same catalog card are distinct instances: removing one
//! from a pool never touches the other.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};
use crate::core::entity::EntityId;

/// A card copy held in a player's deck.
///
/// The definition is shared (`Arc`), so cloning an instance for a pile
/// snapshot is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id of this copy.
    pub entity_id: EntityId,

    /// The catalog card this is a copy of.
    pub card: Arc<Card>,
}

impl CardInstance {
    #[must_use]
    pub fn new(entity_id: EntityId, card: Arc<Card>) -> Self {
        Self { entity_id, card }
    }

    #[must_use]
    pub fn card_id(&self) -> &CardId {
        &self.card.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.card.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Stat;

    #[test]
    fn test_copies_are_distinct() {
        let card = Arc::new(Card::new("pipe", "Pipe", Stat::Strength));
        let a = CardInstance::new(EntityId(1), Arc::clone(&card));
        let b = CardInstance::new(EntityId(2), card);

        assert_eq!(a.card_id(), b.card_id());
        assert_ne!(a, b);
        assert_eq!(a.name(), "Pipe");
    }
}
