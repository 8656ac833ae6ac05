//! # Riposte Core
//!
//! Hit reaction, hit-stop and duel orchestration for Riposte.
//!
//! This crate turns landed hits into reactions and drives the per-frame
//! update of a two-player duel on top of [`riposte_input`].
//!
//! ## Architecture
//!
//! - **Duel**: owns the combatants and the world-time timer manager; one
//!   `step(dt)` per frame
//! - **Combatant**: input buffer, time dilation stack, hit-stop and mesh
//!   shake of one fighter
//! - **Collaborators**: body, state machine and sequence resolver, reached
//!   only through capability traits
//!
//! ## Usage
//!
//! ```rust
//! use glam::Vec3;
//! use riposte_core::{CombatantParts, Duel, EntityId, HitDescriptor, RiposteConfig};
//!
//! let p1 = EntityId::new(1);
//! let p2 = EntityId::new(2);
//!
//! let mut duel = Duel::new(RiposteConfig::default()).unwrap();
//! duel.spawn(p1, CombatantParts::new()).unwrap();
//! duel.spawn(p2, CombatantParts::new()).unwrap();
//!
//! let hit = HitDescriptor::new(p1)
//!     .with_damage(10.0)
//!     .with_knockback(Vec3::new(300.0, 0.0, 0.0))
//!     .with_hit_stop(0.2, true);
//! assert!(duel.deliver_hit(p2, &hit).unwrap());
//!
//! for _ in 0..4 {
//!     duel.step(1.0 / 60.0);
//! }
//! assert_eq!(duel.combatant(p2).unwrap().dilation().depth(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export the input crate for downstream users
pub use riposte_input;

pub mod body;
pub mod combatant;
pub mod config;
pub mod dilation;
pub mod duel;
pub mod entity;
pub mod error;
pub mod hash;
pub mod hit;
pub mod hitstop;
pub mod reaction;
pub mod shake;
pub mod timer;

pub use body::{FacingEntity, GroundSensitive, PhysicalBody, StateMachine};
pub use combatant::{Combatant, CombatantEvent, CombatantFlags, CombatantParts};
pub use config::{CombatConfig, LocomotionConfig, RiposteConfig};
pub use dilation::TimeDilationStack;
pub use duel::Duel;
pub use entity::EntityId;
pub use error::{CoreError, Result};
pub use hit::HitDescriptor;
pub use hitstop::{HitStop, HitStopPhase};
pub use reaction::ReactionKind;
pub use timer::{TimerEntry, TimerHandle, TimerManager, TimerTag};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests;
