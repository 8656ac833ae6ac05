//! Hit reaction selection.
//!
//! A hit launches its victim when it is both strong and pushes across the
//! victim's facing axis. Everything else keeps the victim grounded.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::CombatConfig;

/// Reaction category requested from the state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionKind {
    /// Stagger in place.
    Grounded,
    /// Launched into the air.
    GroundToAir,
}

impl ReactionKind {
    /// Configured state name for this reaction.
    #[must_use]
    pub fn state_name(self, config: &CombatConfig) -> &str {
        match self {
            Self::Grounded => &config.grounded_reaction_state,
            Self::GroundToAir => &config.ground_to_air_reaction_state,
        }
    }
}

/// `|forward · normalize(knockback)|`; zero for zero knockback.
#[must_use]
pub fn facing_alignment(forward: Vec3, knockback: Vec3) -> f32 {
    forward.dot(knockback.normalize_or_zero()).abs()
}

/// Chooses the reaction for a hit.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use riposte_core::reaction::{decide, ReactionKind};
/// use riposte_core::CombatConfig;
///
/// let config = CombatConfig::default();
/// let upward = Vec3::new(0.0, 0.0, 600.0);
/// assert_eq!(decide(Vec3::X, upward, &config), ReactionKind::GroundToAir);
/// assert_eq!(decide(Vec3::X, Vec3::X * 600.0, &config), ReactionKind::Grounded);
/// ```
#[must_use]
pub fn decide(forward: Vec3, knockback: Vec3, config: &CombatConfig) -> ReactionKind {
    let alignment = facing_alignment(forward, knockback);
    let magnitude = knockback.length();
    if alignment < config.launch_alignment_threshold
        && magnitude >= config.launch_knockback_threshold
    {
        ReactionKind::GroundToAir
    } else {
        ReactionKind::Grounded
    }
}
