//! Combatant identity.
//!
//! Every combatant in a duel carries an [`EntityId`]. Ids order the tick loop
//! and tag the timers a combatant owns, so teardown can cancel them in one
//! call.
//!
//! # Example
//!
//! ```
//! use riposte_core::entity::EntityId;
//!
//! let p1 = EntityId::new(1);
//! let p2 = EntityId::new(2);
//!
//! assert!(p1 < p2);
//! assert_eq!(p2.as_u64(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a combatant.
///
/// `EntityId` is a newtype wrapper around `u64`. Ids are ordered by their
/// numeric value, which fixes the iteration order of every per-combatant
/// loop in a duel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}
