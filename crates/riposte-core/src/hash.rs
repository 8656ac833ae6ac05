//! State hashing for determinism verification.
//!
//! Two duels fed identical frame deltas, inputs and hits must produce
//! identical hashes.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::combatant::Combatant;
use crate::duel::Duel;
use crate::timer::TimerManager;

/// Compute a deterministic hash of duel state.
///
/// This hash includes:
/// - Current tick and world time
/// - Every combatant in id order: flags, damage, dilation stack, hit-stop
///   phase and both input buffers
/// - Every pending timer
#[must_use]
pub fn hash_duel(duel: &Duel) -> u64 {
    let mut hasher = DefaultHasher::new();

    duel.tick().hash(&mut hasher);
    // Floats hash as bits
    duel.time().to_bits().hash(&mut hasher);

    for combatant in duel.combatants() {
        hash_combatant(combatant, &mut hasher);
    }

    hash_timers(duel.timers(), &mut hasher);

    hasher.finish()
}

fn hash_combatant<H: Hasher>(combatant: &Combatant, hasher: &mut H) {
    combatant.id().hash(hasher);
    combatant.flags().bits().hash(hasher);
    combatant.damage_percent().to_bits().hash(hasher);

    for value in combatant.dilation().values() {
        value.to_bits().hash(hasher);
    }
    combatant.hit_stop_phase().hash(hasher);
    combatant.is_shaking().hash(hasher);

    let input = combatant.input();
    for entry in input.raw_buffer().entries() {
        entry.hash(hasher);
    }
    for entry in input.sequence_buffer().entries() {
        entry.hash(hasher);
    }
    input.last_direction().hash(hasher);
}

fn hash_timers<H: Hasher>(timers: &TimerManager, hasher: &mut H) {
    timers.len().hash(hasher);
    for timer in timers.iter() {
        timer.handle.hash(hasher);
        timer.owner.hash(hasher);
        timer.tag.hash(hasher);
        timer.deadline.to_bits().hash(hasher);
    }
}
