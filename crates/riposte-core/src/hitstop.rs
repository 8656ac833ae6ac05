//! Two-phase hit-stop sequencing.
//!
//! A hit-stop waits a short initial delay so the reaction pose reads, then
//! freezes the combatant for the requested duration:
//!
//! ```text
//! Idle --enable--> PendingBegin --delay--> Active --duration--> Idle
//! ```
//!
//! [`HitStop`] owns the two timers and the phase. The combatant applies the
//! side effects it reports: push or pop a time dilation, start or stop the
//! mesh shake. A hit-stop holds at most one pushed dilation, so every episode
//! pushes once and pops once however often it is re-enabled.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::EntityId;
use crate::timer::{TimerHandle, TimerManager, TimerTag};

/// Where a hit-stop is in its cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitStopPhase {
    /// Nothing scheduled.
    Idle,
    /// Waiting out the initial delay.
    PendingBegin,
    /// Frozen; the stop timer is running.
    Active,
}

/// What the owner must do when the initial delay elapses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BeginEffects {
    /// Push the minimum time dilation.
    pub push_dilation: bool,
    /// Shake the mesh; `false` means stop any running shake.
    pub shake: bool,
}

/// Hit-stop state for one combatant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitStop {
    duration: f64,
    shake: bool,
    begin_timer: Option<TimerHandle>,
    stop_timer: Option<TimerHandle>,
    holds_dilation: bool,
}

impl HitStop {
    /// Creates an idle hit-stop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    ///
    /// A hit-stop re-enabled while frozen stays `Active` until the new
    /// request's delay elapses.
    #[must_use]
    pub fn phase(&self) -> HitStopPhase {
        if self.holds_dilation {
            HitStopPhase::Active
        } else if self.begin_timer.is_some() {
            HitStopPhase::PendingBegin
        } else {
            HitStopPhase::Idle
        }
    }

    /// Returns `true` while a dilation pushed by this hit-stop is held.
    #[must_use]
    pub fn holds_dilation(&self) -> bool {
        self.holds_dilation
    }

    /// Cached duration of the latest request.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Cached shake flag of the latest request.
    #[must_use]
    pub fn shake(&self) -> bool {
        self.shake
    }

    /// Requests a hit-stop, replacing any pending request.
    pub fn enable(
        &mut self,
        owner: EntityId,
        duration: f64,
        shake: bool,
        initial_delay: f64,
        timers: &mut TimerManager,
    ) {
        timers.clear_slot(&mut self.begin_timer);
        self.duration = duration;
        self.shake = shake;
        self.begin_timer = Some(timers.set(owner, TimerTag::HitStopBegin, initial_delay));
        trace!(combatant = %owner, duration, shake, "hit-stop pending");
    }

    /// Returns `true` if `handle` is this hit-stop's pending begin timer.
    #[must_use]
    pub fn is_begin_timer(&self, handle: TimerHandle) -> bool {
        self.begin_timer == Some(handle)
    }

    /// Returns `true` if `handle` is this hit-stop's running stop timer.
    #[must_use]
    pub fn is_stop_timer(&self, handle: TimerHandle) -> bool {
        self.stop_timer == Some(handle)
    }

    /// Handles the initial delay elapsing.
    pub fn begin(&mut self, owner: EntityId, timers: &mut TimerManager) -> BeginEffects {
        self.begin_timer = None;
        timers.clear_slot(&mut self.stop_timer);

        let push_dilation = !self.holds_dilation;
        self.holds_dilation = true;
        self.stop_timer = Some(timers.set(owner, TimerTag::HitStopEnd, self.duration));

        BeginEffects {
            push_dilation,
            shake: self.shake,
        }
    }

    /// Handles the duration elapsing. Returns `true` if a dilation must be
    /// popped.
    pub fn end(&mut self) -> bool {
        self.stop_timer = None;
        std::mem::take(&mut self.holds_dilation)
    }

    /// Cancels both timers and returns to idle. Returns `true` if a dilation
    /// must be popped.
    pub fn cancel(&mut self, timers: &mut TimerManager) -> bool {
        timers.clear_slot(&mut self.begin_timer);
        timers.clear_slot(&mut self.stop_timer);
        std::mem::take(&mut self.holds_dilation)
    }
}
