//! A fighter: input buffering, hit reactions and hit-stop wired together.
//!
//! A [`Combatant`] owns its [`InputBufferController`], its time dilation
//! stack, its hit-stop and its mesh shake. The body, state machine and
//! sequence resolver are collaborators handed in through
//! [`CombatantParts`]; any of them may be missing, in which case the
//! operations that need them do nothing.
//!
//! Combatants never own timers directly. Every operation that schedules or
//! cancels one takes the duel's [`TimerManager`], and the duel routes fired
//! timers back through [`Combatant::on_timer`].

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, error, trace, warn};

use riposte_input::{InputBufferController, SequenceResolver};

use crate::body::{is_other_on_the_right, PhysicalBody, StateMachine};
use crate::config::{CombatConfig, LocomotionConfig, RiposteConfig};
use crate::dilation::TimeDilationStack;
use crate::entity::EntityId;
use crate::error::Result;
use crate::hit::HitDescriptor;
use crate::hitstop::{HitStop, HitStopPhase};
use crate::reaction::{decide, ReactionKind};
use crate::shake::MeshShake;
use crate::timer::{TimerEntry, TimerHandle, TimerManager, TimerTag};

bitflags! {
    /// Combatant status bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CombatantFlags: u8 {
        /// Incoming hits are processed.
        const HITTABLE = 1 << 0;
        /// A hit landed within the hit-landed window.
        const JUST_LANDED_HIT = 1 << 1;
        /// An air knockback is in progress.
        const AIR_KNOCKBACK = 1 << 2;
        /// Turn toward movement while airborne.
        const FACE_WHEN_AIRBORNE = 1 << 3;
    }
}

impl Default for CombatantFlags {
    fn default() -> Self {
        Self::HITTABLE
    }
}

/// Notifications raised by a combatant, drained by the game layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatantEvent {
    /// Touched the ground.
    Landed,
    /// Left the ground.
    BecameAirborne,
    /// Took a hit.
    HitTaken {
        /// Who landed it.
        attacker: EntityId,
        /// Damage percent after the hit.
        damage_percent: f32,
    },
    /// Landed a hit.
    HitLanded {
        /// Who took it.
        target: EntityId,
    },
    /// A reaction state was requested.
    ReactionRequested(ReactionKind),
    /// The hit-stop freeze started.
    HitStopBegan,
    /// The hit-stop freeze ended.
    HitStopEnded,
    /// The hit-landed window closed.
    HitLandedWindowClosed,
}

/// External collaborators of a combatant.
#[derive(Default)]
pub struct CombatantParts {
    /// Simulated body.
    pub body: Option<Box<dyn PhysicalBody>>,
    /// Move state machine.
    pub state_machine: Option<Box<dyn StateMachine>>,
    /// Sequence resolver for the input buffer.
    pub resolver: Option<Box<dyn SequenceResolver>>,
}

impl CombatantParts {
    /// No collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl PhysicalBody + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    /// Sets the state machine.
    #[must_use]
    pub fn with_state_machine(mut self, fsm: impl StateMachine + 'static) -> Self {
        self.state_machine = Some(Box::new(fsm));
        self
    }

    /// Sets the sequence resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl SequenceResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }
}

/// Events kept per combatant between drains.
pub const MAX_PENDING_EVENTS: usize = 64;

/// One fighter in a duel.
pub struct Combatant {
    id: EntityId,
    combat: CombatConfig,
    locomotion: LocomotionConfig,
    flags: CombatantFlags,
    damage_percent: f32,
    body: Option<Box<dyn PhysicalBody>>,
    state_machine: Option<Box<dyn StateMachine>>,
    input: InputBufferController,
    dilation: TimeDilationStack,
    hit_stop: HitStop,
    shake: MeshShake,
    hit_landed_timer: Option<TimerHandle>,
    grounded_announced: bool,
    airborne_announced: bool,
    moving_backward: bool,
    events: VecDeque<CombatantEvent>,
}

impl fmt::Debug for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combatant")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("damage_percent", &self.damage_percent)
            .field("dilation", &self.dilation)
            .field("hit_stop", &self.hit_stop)
            .field("has_body", &self.body.is_some())
            .field("has_state_machine", &self.state_machine.is_some())
            .finish_non_exhaustive()
    }
}

impl Combatant {
    /// Builds a combatant.
    ///
    /// The dilation baseline is read from the body, or `1.0` without one.
    ///
    /// # Errors
    ///
    /// Returns a config error if `config` fails validation.
    pub fn new(id: EntityId, config: &RiposteConfig, parts: CombatantParts) -> Result<Self> {
        config.validate()?;
        let CombatantParts {
            body,
            state_machine,
            resolver,
        } = parts;

        if body.is_none() {
            warn!(combatant = %id, "no physical body; knockback, facing and shake are disabled");
        }
        if state_machine.is_none() {
            warn!(combatant = %id, "no state machine; reaction requests are dropped");
        }

        let mut input = InputBufferController::new(config.input.clone(), resolver)?;
        if let Some(b) = body.as_ref() {
            input.set_facing_right(b.is_facing_right());
        }
        let baseline = body.as_ref().map_or(1.0, |b| b.time_dilation());
        let mut flags = CombatantFlags::default();
        flags.set(
            CombatantFlags::FACE_WHEN_AIRBORNE,
            config.locomotion.face_when_airborne,
        );

        Ok(Self {
            id,
            combat: config.combat.clone(),
            locomotion: config.locomotion.clone(),
            flags,
            damage_percent: 0.0,
            body,
            state_machine,
            input,
            dilation: TimeDilationStack::new(baseline),
            hit_stop: HitStop::new(),
            shake: MeshShake::new(
                config.combat.mesh_shake_amplitude,
                config.combat.mesh_shake_frequency,
            ),
            hit_landed_timer: None,
            grounded_announced: false,
            airborne_announced: false,
            moving_backward: false,
            events: VecDeque::new(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Combatant id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Status flags.
    #[must_use]
    pub fn flags(&self) -> CombatantFlags {
        self.flags
    }

    /// Sets or clears status flags.
    pub fn set_flags(&mut self, flags: CombatantFlags, value: bool) {
        self.flags.set(flags, value);
    }

    /// Returns `true` if incoming hits are processed.
    #[must_use]
    pub fn is_hittable(&self) -> bool {
        self.flags.contains(CombatantFlags::HITTABLE)
    }

    /// Returns `true` within the hit-landed window.
    #[must_use]
    pub fn has_just_landed_hit(&self) -> bool {
        self.flags.contains(CombatantFlags::JUST_LANDED_HIT)
    }

    /// Returns `true` while an air knockback is in progress.
    #[must_use]
    pub fn is_air_knockback_happening(&self) -> bool {
        self.flags.contains(CombatantFlags::AIR_KNOCKBACK)
    }

    /// Marks an air knockback as started or finished.
    pub fn set_air_knockback_happening(&mut self, value: bool) {
        self.flags.set(CombatantFlags::AIR_KNOCKBACK, value);
    }

    /// Accumulated damage percent.
    #[must_use]
    pub fn damage_percent(&self) -> f32 {
        self.damage_percent
    }

    /// Sets the damage percent, clamped at zero.
    pub fn set_damage_percent(&mut self, percent: f32) {
        self.damage_percent = percent.max(0.0);
    }

    /// Damage-based knockback scaling, `1.0` without a body.
    #[must_use]
    pub fn knockback_multiplier(&self) -> f32 {
        self.body
            .as_ref()
            .map_or(1.0, |b| b.knockback_multiplier(self.damage_percent))
    }

    /// World position, if a body is attached.
    #[must_use]
    pub fn location(&self) -> Option<Vec3> {
        self.body.as_ref().map(|b| b.location())
    }

    /// Input buffer controller.
    #[must_use]
    pub fn input(&self) -> &InputBufferController {
        &self.input
    }

    /// Mutable input buffer controller, for feeding device input.
    pub fn input_mut(&mut self) -> &mut InputBufferController {
        &mut self.input
    }

    /// Time dilation stack.
    #[must_use]
    pub fn dilation(&self) -> &TimeDilationStack {
        &self.dilation
    }

    /// Hit-stop phase.
    #[must_use]
    pub fn hit_stop_phase(&self) -> HitStopPhase {
        self.hit_stop.phase()
    }

    /// Hit-stop state.
    #[must_use]
    pub fn hit_stop(&self) -> &HitStop {
        &self.hit_stop
    }

    /// Returns `true` while the mesh shakes.
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake.is_active()
    }

    /// Returns `true` while walking away from the facing direction.
    #[must_use]
    pub fn is_moving_backward(&self) -> bool {
        self.moving_backward
    }

    /// Takes the events raised since the last call, oldest first.
    ///
    /// Hosts should drain once per frame. At most [`MAX_PENDING_EVENTS`]
    /// are kept; older ones are dropped.
    pub fn drain_events(&mut self) -> Vec<CombatantEvent> {
        self.events.drain(..).collect()
    }

    /// Number of events waiting to be drained.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn emit(&mut self, event: CombatantEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            if let Some(dropped) = self.events.pop_front() {
                trace!(combatant = %self.id, ?dropped, "undrained event dropped");
            }
        }
        self.events.push_back(event);
    }

    // ========================================================================
    // Time dilation
    // ========================================================================

    /// Pushes a time dilation and applies it to the body.
    pub fn push_time_dilation(&mut self, value: f32) {
        self.dilation.push(value);
        self.apply_dilation();
    }

    /// Pops the active time dilation and applies the one below.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::DilationUnderflow`] if only the baseline
    /// is left.
    pub fn pop_time_dilation(&mut self) -> Result<f32> {
        let popped = self.dilation.pop()?;
        self.apply_dilation();
        Ok(popped)
    }

    fn apply_dilation(&mut self) {
        let current = self.dilation.current();
        if let Some(body) = self.body.as_mut() {
            body.set_time_dilation(current);
        }
    }

    // ========================================================================
    // Hits
    // ========================================================================

    /// Processes an incoming hit. Returns `false` if the hit was ignored.
    ///
    /// `attacker_location` is used when the hit forces facing.
    pub fn on_hit_received(
        &mut self,
        hit: &HitDescriptor,
        attacker_location: Option<Vec3>,
        timers: &mut TimerManager,
    ) -> bool {
        if !self.is_hittable() {
            debug!(combatant = %self.id, attacker = %hit.owner, "hit ignored; not hittable");
            return false;
        }

        if let Some(body) = self.body.as_mut() {
            if hit.force_opponent_facing {
                if let Some(attacker) = attacker_location {
                    let right = is_other_on_the_right(body.location(), attacker);
                    body.set_facing(right, true);
                }
            }
        }

        self.damage_percent += hit.damage_percent.max(0.0);

        let magnitude = hit.knockback.length();
        let forward = match self.body.as_mut() {
            Some(body) => {
                body.apply_knockback(hit.knockback, magnitude, hit.ignore_knockback_multiplier);
                body.forward()
            }
            None => Vec3::ZERO,
        };

        let reaction = decide(forward, hit.knockback, &self.combat);
        if let Some(fsm) = self.state_machine.as_mut() {
            fsm.request_state(reaction.state_name(&self.combat));
        }
        debug!(
            combatant = %self.id,
            attacker = %hit.owner,
            magnitude,
            reaction = ?reaction,
            damage = self.damage_percent,
            "hit received"
        );
        self.emit(CombatantEvent::ReactionRequested(reaction));

        if hit.has_hit_stop() {
            self.enable_hit_stop(f64::from(hit.hit_stop_duration), hit.shake, timers);
        }

        self.emit(CombatantEvent::HitTaken {
            attacker: hit.owner,
            damage_percent: self.damage_percent,
        });
        true
    }

    /// Processes a hit this combatant landed on `target`.
    pub fn on_hit_landed(&mut self, target: EntityId, hit: &HitDescriptor, timers: &mut TimerManager) {
        self.flags.insert(CombatantFlags::JUST_LANDED_HIT);
        timers.clear_slot(&mut self.hit_landed_timer);
        self.hit_landed_timer = Some(timers.set(
            self.id,
            TimerTag::HitLandedWindow,
            self.combat.hit_landed_window,
        ));

        if hit.has_hit_stop() {
            self.enable_hit_stop(f64::from(hit.hit_stop_duration), false, timers);
        }

        trace!(combatant = %self.id, target = %target, "hit landed");
        self.emit(CombatantEvent::HitLanded { target });
    }

    /// Requests a hit-stop of `duration` seconds, replacing any pending one.
    pub fn enable_hit_stop(&mut self, duration: f64, shake: bool, timers: &mut TimerManager) {
        self.hit_stop.enable(
            self.id,
            duration,
            shake,
            self.combat.hit_stop_initial_delay,
            timers,
        );
    }

    // ========================================================================
    // Timers
    // ========================================================================

    /// Handles one of this combatant's timers firing.
    ///
    /// Timers this combatant no longer tracks are ignored.
    pub fn on_timer(&mut self, fired: &TimerEntry, timers: &mut TimerManager) {
        match fired.tag {
            TimerTag::HitStopBegin if self.hit_stop.is_begin_timer(fired.handle) => {
                let effects = self.hit_stop.begin(self.id, timers);
                if effects.push_dilation {
                    self.push_time_dilation(self.combat.min_time_dilation);
                }
                if effects.shake {
                    let offset = self.body.as_ref().map_or(Vec3::ZERO, |b| b.mesh_offset());
                    self.shake.start(offset);
                } else {
                    self.stop_shake();
                }
                debug!(combatant = %self.id, at = fired.deadline, "hit-stop began");
                self.emit(CombatantEvent::HitStopBegan);
            }
            TimerTag::HitStopEnd if self.hit_stop.is_stop_timer(fired.handle) => {
                if self.hit_stop.end() {
                    self.release_dilation();
                }
                self.stop_shake();
                debug!(combatant = %self.id, at = fired.deadline, "hit-stop ended");
                self.emit(CombatantEvent::HitStopEnded);
            }
            TimerTag::HitLandedWindow if self.hit_landed_timer == Some(fired.handle) => {
                self.hit_landed_timer = None;
                self.flags.remove(CombatantFlags::JUST_LANDED_HIT);
                self.emit(CombatantEvent::HitLandedWindowClosed);
            }
            _ => {
                trace!(combatant = %self.id, handle = %fired.handle, "stale timer ignored");
            }
        }
    }

    fn release_dilation(&mut self) {
        if let Err(err) = self.pop_time_dilation() {
            error!(combatant = %self.id, %err, "hit-stop released an unheld dilation");
        }
    }

    fn stop_shake(&mut self) {
        if let Some(baseline) = self.shake.stop() {
            if let Some(body) = self.body.as_mut() {
                body.set_mesh_offset(baseline);
            }
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances one frame.
    ///
    /// `dt` is world time; the input buffer samples with it scaled by the
    /// active dilation. `real_time` drives the mesh shake.
    pub fn tick(&mut self, dt: f32, real_time: f64, opponent_location: Option<Vec3>) {
        self.check_ground_events();
        self.update_facing(opponent_location);
        self.update_locomotion();

        if let Some(body) = self.body.as_ref() {
            self.input.set_facing_right(body.is_facing_right());
        }
        self.input.advance(dt * self.dilation.current());

        let airborne = self.body.as_ref().is_some_and(|b| b.is_airborne());
        if let Some(offset) = self.shake.offset(real_time, airborne) {
            if let Some(body) = self.body.as_mut() {
                body.set_mesh_offset(offset);
            }
        }
    }

    fn check_ground_events(&mut self) {
        let Some(airborne) = self.body.as_ref().map(|b| b.is_airborne()) else {
            return;
        };
        if airborne {
            self.grounded_announced = false;
            if !self.airborne_announced {
                self.airborne_announced = true;
                self.emit(CombatantEvent::BecameAirborne);
            }
        } else {
            self.airborne_announced = false;
            if !self.grounded_announced {
                self.grounded_announced = true;
                self.emit(CombatantEvent::Landed);
            }
        }
    }

    fn update_facing(&mut self, opponent_location: Option<Vec3>) {
        let movement = self.input.movement_direction();
        let face_when_airborne = self.flags.contains(CombatantFlags::FACE_WHEN_AIRBORNE);
        let Some(body) = self.body.as_mut() else {
            return;
        };
        let facing_right = body.is_facing_right();

        match opponent_location {
            Some(opponent) => {
                self.moving_backward =
                    (movement > 0.0 && !facing_right) || (movement < 0.0 && facing_right);
                if body.is_grounded() {
                    let right = is_other_on_the_right(body.location(), opponent);
                    if right != facing_right {
                        body.set_facing(right, false);
                    }
                }
            }
            None => {
                self.moving_backward = false;
                if (body.is_grounded() || face_when_airborne) && movement != 0.0 {
                    let right = movement > 0.0;
                    if right != facing_right {
                        body.set_facing(right, false);
                    }
                }
            }
        }
    }

    fn update_locomotion(&mut self) {
        let Some(body) = self.body.as_mut() else {
            return;
        };
        let gravity = if body.vertical_velocity() < 0.0 {
            self.locomotion.falling_gravity_scale
        } else {
            self.locomotion.regular_gravity_scale
        };
        body.set_gravity_scale(gravity);

        let speed = if self.moving_backward {
            self.locomotion.backward_walk_speed
        } else {
            self.locomotion.forward_walk_speed
        };
        body.set_max_walk_speed(speed);
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Cancels every timer this combatant owns and undoes held effects.
    pub fn teardown(&mut self, timers: &mut TimerManager) {
        let cancelled = timers.clear_owner(self.id);
        if self.hit_stop.cancel(timers) {
            self.release_dilation();
        }
        self.stop_shake();
        self.hit_landed_timer = None;
        self.flags.remove(CombatantFlags::JUST_LANDED_HIT);
        debug!(combatant = %self.id, cancelled, "combatant torn down");
    }
}
