//! Hit descriptors exchanged between attacker and victim.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// One landed hit, produced by the attacker's hit box.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use riposte_core::{EntityId, HitDescriptor};
///
/// let hit = HitDescriptor::new(EntityId::new(1))
///     .with_damage(8.0)
///     .with_knockback(Vec3::new(600.0, 0.0, 200.0))
///     .with_hit_stop(0.2, true);
///
/// assert!(hit.has_hit_stop());
/// assert!(!hit.force_opponent_facing);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitDescriptor {
    /// Attacker that landed the hit.
    pub owner: EntityId,
    /// Damage percent added to the victim. Negative values add nothing.
    pub damage_percent: f32,
    /// Knockback impulse in world space.
    pub knockback: Vec3,
    /// Hit-stop length in seconds; zero disables hit-stop.
    pub hit_stop_duration: f32,
    /// Turn the victim toward the attacker instantly.
    pub force_opponent_facing: bool,
    /// Skip the victim's damage-based knockback scaling.
    pub ignore_knockback_multiplier: bool,
    /// Shake the victim's mesh during hit-stop.
    pub shake: bool,
}

impl HitDescriptor {
    /// A hit with no damage, knockback or hit-stop.
    #[must_use]
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            damage_percent: 0.0,
            knockback: Vec3::ZERO,
            hit_stop_duration: 0.0,
            force_opponent_facing: false,
            ignore_knockback_multiplier: false,
            shake: false,
        }
    }

    /// Sets the damage percent.
    #[must_use]
    pub fn with_damage(mut self, damage_percent: f32) -> Self {
        self.damage_percent = damage_percent;
        self
    }

    /// Sets the knockback impulse.
    #[must_use]
    pub fn with_knockback(mut self, knockback: Vec3) -> Self {
        self.knockback = knockback;
        self
    }

    /// Sets hit-stop length and victim shake.
    #[must_use]
    pub fn with_hit_stop(mut self, duration: f32, shake: bool) -> Self {
        self.hit_stop_duration = duration;
        self.shake = shake;
        self
    }

    /// Forces the victim to face the attacker.
    #[must_use]
    pub fn facing_opponent(mut self) -> Self {
        self.force_opponent_facing = true;
        self
    }

    /// Bypasses the damage-based knockback multiplier.
    #[must_use]
    pub fn ignoring_multiplier(mut self) -> Self {
        self.ignore_knockback_multiplier = true;
        self
    }

    /// Returns `true` if this hit triggers a hit-stop.
    #[must_use]
    pub fn has_hit_stop(&self) -> bool {
        self.hit_stop_duration > 0.0
    }
}
