//! World-time timer manager.
//!
//! Timers are single-shot and owner-tagged. Time only moves through
//! [`TimerManager::pop_due`] and [`TimerManager::settle`]:
//!
//! ```text
//! loop {
//!     let Some(fired) = timers.pop_due(target) else { break };
//!     // `timers.now()` equals `fired.deadline` here, so anything the
//!     // callback schedules is measured from the deadline, not the frame.
//!     dispatch(fired, &mut timers);
//! }
//! timers.settle(target);
//! ```
//!
//! Due timers fire in `(deadline, handle)` order. Handles are never reused,
//! so a handle held after its timer fired or was cleared is simply inactive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::entity::EntityId;

/// Opaque timer handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw handle value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a timer is for; the owner dispatches on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerTag {
    /// Hit-stop initial delay elapsed.
    HitStopBegin,
    /// Hit-stop duration elapsed.
    HitStopEnd,
    /// Attacker's hit-landed window elapsed.
    HitLandedWindow,
}

/// A scheduled or fired timer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerEntry {
    /// Handle returned by [`TimerManager::set`].
    pub handle: TimerHandle,
    /// Combatant that owns the timer.
    pub owner: EntityId,
    /// Purpose.
    pub tag: TimerTag,
    /// World time at which the timer fires.
    pub deadline: f64,
}

/// Single-shot, cancelable timers in world time.
#[derive(Debug, Clone, Default)]
pub struct TimerManager {
    now: f64,
    next_handle: u64,
    timers: BTreeMap<TimerHandle, TimerEntry>,
}

impl TimerManager {
    /// Creates an empty manager at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current world time.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedules a timer `delay` seconds from now.
    ///
    /// Negative or non-finite delays fire on the next dispatch.
    pub fn set(&mut self, owner: EntityId, tag: TimerTag, delay: f64) -> TimerHandle {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.insert(
            handle,
            TimerEntry {
                handle,
                owner,
                tag,
                deadline: self.now + delay,
            },
        );
        handle
    }

    /// Cancels a timer. Returns `false` if it was not active.
    pub fn clear(&mut self, handle: TimerHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }

    /// Cancels the timer in `slot`, if any, and empties the slot.
    pub fn clear_slot(&mut self, slot: &mut Option<TimerHandle>) {
        if let Some(handle) = slot.take() {
            self.clear(handle);
        }
    }

    /// Returns `true` while `handle` has not fired or been cleared.
    #[must_use]
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.contains_key(&handle)
    }

    /// Seconds until `handle` fires, or `None` if inactive.
    #[must_use]
    pub fn remaining(&self, handle: TimerHandle) -> Option<f64> {
        self.timers.get(&handle).map(|t| (t.deadline - self.now).max(0.0))
    }

    /// Cancels every timer owned by `owner`, returning how many.
    pub fn clear_owner(&mut self, owner: EntityId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, t| t.owner != owner);
        before - self.timers.len()
    }

    /// Removes and returns the earliest timer due at or before `target`,
    /// moving the clock to its deadline.
    pub fn pop_due(&mut self, target: f64) -> Option<TimerEntry> {
        let next = self
            .timers
            .values()
            .filter(|t| t.deadline <= target)
            .min_by(|a, b| {
                a.deadline
                    .total_cmp(&b.deadline)
                    .then_with(|| a.handle.cmp(&b.handle))
            })
            .copied()?;
        self.timers.remove(&next.handle);
        self.now = self.now.max(next.deadline);
        Some(next)
    }

    /// Moves the clock to `target` once nothing more is due.
    pub fn settle(&mut self, target: f64) {
        self.now = self.now.max(target);
    }

    /// Number of active timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` if no timer is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Active timers in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &TimerEntry> {
        self.timers.values()
    }
}
