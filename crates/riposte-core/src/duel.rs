//! Duel: top-level API for a two-player fight.
//!
//! The duel owns both combatants and the timer manager, and is the single
//! per-frame entry point:
//!
//! 1. Timers due within the frame fire in `(deadline, handle)` order, each
//!    routed to its owner. Timers of despawned owners cannot fire; they are
//!    cancelled at teardown.
//! 2. Each combatant ticks in id order, facing the other.

use glam::Vec3;
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::combatant::{Combatant, CombatantParts};
use crate::config::RiposteConfig;
use crate::entity::EntityId;
use crate::error::{CoreError, Result};
use crate::hit::HitDescriptor;
use crate::timer::TimerManager;

/// Maximum number of combatants in a duel.
pub const MAX_COMBATANTS: usize = 2;

/// Two combatants and the world clock.
#[derive(Debug)]
pub struct Duel {
    config: RiposteConfig,
    combatants: BTreeMap<EntityId, Combatant>,
    timers: TimerManager,
    tick: u64,
}

impl Duel {
    /// Creates an empty duel.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` fails validation.
    pub fn new(config: RiposteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            combatants: BTreeMap::new(),
            timers: TimerManager::new(),
            tick: 0,
        })
    }

    /// Configuration shared by every combatant.
    #[must_use]
    pub fn config(&self) -> &RiposteConfig {
        &self.config
    }

    /// Frames stepped so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// World time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.timers.now()
    }

    /// Timer manager.
    #[must_use]
    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    /// Compute a deterministic hash of the current state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        crate::hash::hash_duel(self)
    }

    // ========================================================================
    // Roster
    // ========================================================================

    /// Adds a combatant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateCombatant`] for a reused id and
    /// [`CoreError::DuelFull`] once both slots are taken.
    pub fn spawn(&mut self, id: EntityId, parts: CombatantParts) -> Result<()> {
        if self.combatants.contains_key(&id) {
            return Err(CoreError::DuplicateCombatant(id));
        }
        if self.combatants.len() >= MAX_COMBATANTS {
            return Err(CoreError::DuelFull(MAX_COMBATANTS));
        }
        let combatant = Combatant::new(id, &self.config, parts)?;
        self.combatants.insert(id, combatant);
        debug!(combatant = %id, "spawned");
        Ok(())
    }

    /// Tears a combatant down and removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCombatant`] if `id` is not spawned.
    pub fn despawn(&mut self, id: EntityId) -> Result<Combatant> {
        let mut combatant = self
            .combatants
            .remove(&id)
            .ok_or(CoreError::UnknownCombatant(id))?;
        combatant.teardown(&mut self.timers);
        Ok(combatant)
    }

    /// Combatant by id.
    #[must_use]
    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    /// Mutable combatant by id.
    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.get_mut(&id)
    }

    /// Combatants in id order.
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    /// Spawned ids in order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.combatants.keys().copied().collect()
    }

    fn opponent_of(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.values().find(|c| c.id() != id)
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Advances the duel by `dt` seconds of world time.
    pub fn step(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let target = self.timers.now() + f64::from(dt);

        while let Some(fired) = self.timers.pop_due(target) {
            match self.combatants.get_mut(&fired.owner) {
                Some(combatant) => combatant.on_timer(&fired, &mut self.timers),
                None => trace!(owner = %fired.owner, handle = %fired.handle, "timer without owner"),
            }
        }
        self.timers.settle(target);

        let opponents: Vec<(EntityId, Option<Vec3>)> = self
            .combatants
            .keys()
            .map(|&id| (id, self.opponent_of(id).and_then(Combatant::location)))
            .collect();

        let now = self.timers.now();
        for (id, opponent) in opponents {
            if let Some(combatant) = self.combatants.get_mut(&id) {
                combatant.tick(dt, now, opponent);
            }
        }
        self.tick += 1;
    }

    /// Delivers `hit` from its owner to `target`.
    ///
    /// Returns `true` if the target processed the hit; the attacker is then
    /// told it landed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCombatant`] if either side is missing.
    pub fn deliver_hit(&mut self, target: EntityId, hit: &HitDescriptor) -> Result<bool> {
        let attacker_location = self
            .combatants
            .get(&hit.owner)
            .ok_or(CoreError::UnknownCombatant(hit.owner))?
            .location();

        let victim = self
            .combatants
            .get_mut(&target)
            .ok_or(CoreError::UnknownCombatant(target))?;
        if !victim.on_hit_received(hit, attacker_location, &mut self.timers) {
            return Ok(false);
        }

        if let Some(attacker) = self.combatants.get_mut(&hit.owner) {
            attacker.on_hit_landed(target, hit, &mut self.timers);
        }
        Ok(true)
    }
}
