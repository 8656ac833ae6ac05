//! Capability traits for the collaborators the core drives.
//!
//! The core never names a concrete entity type. Anything that can report its
//! facing implements [`FacingEntity`]; anything that can be airborne
//! implements [`GroundSensitive`]; a fighter's simulated body implements the
//! full [`PhysicalBody`].

use glam::Vec3;

/// An entity with a horizontal facing and a world position.
pub trait FacingEntity {
    /// Returns `true` when facing toward +X.
    fn is_facing_right(&self) -> bool;

    /// World position.
    fn location(&self) -> Vec3;
}

/// An entity that can leave the ground.
pub trait GroundSensitive {
    /// Returns `true` while off the ground.
    fn is_airborne(&self) -> bool;

    /// Returns `true` while on the ground.
    fn is_grounded(&self) -> bool {
        !self.is_airborne()
    }
}

/// The physics-simulated body of a fighter.
pub trait PhysicalBody: FacingEntity + GroundSensitive {
    /// Unit forward vector in world space.
    fn forward(&self) -> Vec3;

    /// Vertical velocity; negative while falling.
    fn vertical_velocity(&self) -> f32;

    /// Requests a facing. `instant` snaps rotation instead of turning.
    fn set_facing(&mut self, right: bool, instant: bool);

    /// Applies a knockback impulse.
    fn apply_knockback(&mut self, knockback: Vec3, magnitude: f32, ignore_multiplier: bool);

    /// Knockback scaling for a given damage percent.
    fn knockback_multiplier(&self, damage_percent: f32) -> f32;

    /// Current local time scale.
    fn time_dilation(&self) -> f32;

    /// Sets the local time scale.
    fn set_time_dilation(&mut self, value: f32);

    /// Visual mesh offset relative to the body.
    fn mesh_offset(&self) -> Vec3;

    /// Moves the visual mesh relative to the body.
    fn set_mesh_offset(&mut self, offset: Vec3);

    /// Sets the gravity multiplier.
    fn set_gravity_scale(&mut self, scale: f32);

    /// Sets the maximum walking speed.
    fn set_max_walk_speed(&mut self, speed: f32);
}

/// The animation or move state machine.
pub trait StateMachine {
    /// Requests a transition to the named state.
    fn request_state(&mut self, name: &str);
}

/// Returns `true` if `other` stands to the right of `own`.
#[must_use]
pub fn is_other_on_the_right(own: Vec3, other: Vec3) -> bool {
    other.x > own.x
}
