//! Test helpers: recording collaborators and duel setup.
//!
//! Collaborators share their state through `Rc<RefCell<_>>` so tests can
//! inspect what the combatant did after handing the collaborator over.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

use riposte_input::{InputSymbol, SequenceId, SequenceNotifier, SequenceResolver};

use crate::body::{FacingEntity, GroundSensitive, PhysicalBody, StateMachine};
use crate::combatant::CombatantParts;
use crate::config::RiposteConfig;
use crate::duel::Duel;
use crate::entity::EntityId;

/// Player one.
pub const P1: EntityId = EntityId::new(1);
/// Player two.
pub const P2: EntityId = EntityId::new(2);

/// Mesh offset every mock body starts with.
pub const MESH_BASELINE: Vec3 = Vec3::new(0.0, 0.0, -90.0);

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Body
// =============================================================================

/// Everything a [`MockBody`] was told or reports.
#[derive(Debug, Clone)]
pub struct BodyState {
    pub facing_right: bool,
    pub location: Vec3,
    pub forward: Vec3,
    pub airborne: bool,
    pub vertical_velocity: f32,
    pub time_dilation: f32,
    pub mesh_offset: Vec3,
    pub gravity_scale: f32,
    pub max_walk_speed: f32,
    /// `(knockback, magnitude, ignore_multiplier)` per call.
    pub knockbacks: Vec<(Vec3, f32, bool)>,
    /// `(right, instant)` per call.
    pub facing_requests: Vec<(bool, bool)>,
    /// Every value passed to `set_time_dilation`.
    pub dilation_history: Vec<f32>,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            facing_right: true,
            location: Vec3::ZERO,
            forward: Vec3::X,
            airborne: false,
            vertical_velocity: 0.0,
            time_dilation: 1.0,
            mesh_offset: MESH_BASELINE,
            gravity_scale: 1.0,
            max_walk_speed: 0.0,
            knockbacks: Vec::new(),
            facing_requests: Vec::new(),
            dilation_history: Vec::new(),
        }
    }
}

/// Body that records every call.
#[derive(Debug, Clone, Default)]
pub struct MockBody {
    pub state: Rc<RefCell<BodyState>>,
}

impl MockBody {
    /// Body at `x`, facing right if `facing_right`.
    pub fn at(x: f32, facing_right: bool) -> Self {
        let body = Self::default();
        {
            let mut state = body.state.borrow_mut();
            state.location = Vec3::new(x, 0.0, 0.0);
            state.facing_right = facing_right;
            state.forward = if facing_right { Vec3::X } else { Vec3::NEG_X };
        }
        body
    }

    /// Shared handle to the recorded state.
    pub fn handle(&self) -> Rc<RefCell<BodyState>> {
        Rc::clone(&self.state)
    }
}

impl FacingEntity for MockBody {
    fn is_facing_right(&self) -> bool {
        self.state.borrow().facing_right
    }

    fn location(&self) -> Vec3 {
        self.state.borrow().location
    }
}

impl GroundSensitive for MockBody {
    fn is_airborne(&self) -> bool {
        self.state.borrow().airborne
    }
}

impl PhysicalBody for MockBody {
    fn forward(&self) -> Vec3 {
        self.state.borrow().forward
    }

    fn vertical_velocity(&self) -> f32 {
        self.state.borrow().vertical_velocity
    }

    fn set_facing(&mut self, right: bool, instant: bool) {
        let mut state = self.state.borrow_mut();
        state.facing_requests.push((right, instant));
        state.facing_right = right;
        state.forward = if right { Vec3::X } else { Vec3::NEG_X };
    }

    fn apply_knockback(&mut self, knockback: Vec3, magnitude: f32, ignore_multiplier: bool) {
        self.state
            .borrow_mut()
            .knockbacks
            .push((knockback, magnitude, ignore_multiplier));
    }

    fn knockback_multiplier(&self, damage_percent: f32) -> f32 {
        1.0 + damage_percent / 100.0
    }

    fn time_dilation(&self) -> f32 {
        self.state.borrow().time_dilation
    }

    fn set_time_dilation(&mut self, value: f32) {
        let mut state = self.state.borrow_mut();
        state.time_dilation = value;
        state.dilation_history.push(value);
    }

    fn mesh_offset(&self) -> Vec3 {
        self.state.borrow().mesh_offset
    }

    fn set_mesh_offset(&mut self, offset: Vec3) {
        self.state.borrow_mut().mesh_offset = offset;
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.state.borrow_mut().gravity_scale = scale;
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.state.borrow_mut().max_walk_speed = speed;
    }
}

// =============================================================================
// State machine and resolver
// =============================================================================

/// State machine that records requested state names.
#[derive(Debug, Clone, Default)]
pub struct RecordingStateMachine {
    pub requests: Rc<RefCell<Vec<String>>>,
}

impl StateMachine for RecordingStateMachine {
    fn request_state(&mut self, name: &str) {
        self.requests.borrow_mut().push(name.to_string());
    }
}

/// Down, down-forward, forward, attack.
pub const FIREBALL_MOTION: [InputSymbol; 4] = [
    InputSymbol::Down,
    InputSymbol::ForwardDown,
    InputSymbol::Forward,
    InputSymbol::Attack,
];

/// Resolver that recognises [`FIREBALL_MOTION`] as `"fireball"`.
#[derive(Debug, Default)]
pub struct MotionResolver {
    history: Vec<InputSymbol>,
    notifier: Option<SequenceNotifier>,
}

impl SequenceResolver for MotionResolver {
    fn subscribe(&mut self, notifier: SequenceNotifier) {
        self.notifier = Some(notifier);
    }

    fn unsubscribe(&mut self) {
        self.notifier = None;
    }

    fn register_input(&mut self, symbol: InputSymbol) {
        self.history.push(symbol);
        if self.history.ends_with(&FIREBALL_MOTION) {
            if let Some(notifier) = self.notifier.as_ref() {
                notifier.notify(SequenceId::new("fireball"), 2);
            }
        }
    }
}

// =============================================================================
// Duel setup
// =============================================================================

/// Handles onto both fighters' collaborators.
pub struct Fighters {
    pub body1: Rc<RefCell<BodyState>>,
    pub body2: Rc<RefCell<BodyState>>,
    pub states1: Rc<RefCell<Vec<String>>>,
    pub states2: Rc<RefCell<Vec<String>>>,
}

/// Spawns P1 at x=0 facing right and P2 at x=100 facing left, both with
/// mock bodies, recording state machines and motion resolvers.
pub fn setup_duel(config: RiposteConfig) -> (Duel, Fighters) {
    let mut duel = Duel::new(config).unwrap();

    let body1 = MockBody::at(0.0, true);
    let body2 = MockBody::at(100.0, false);
    let fsm1 = RecordingStateMachine::default();
    let fsm2 = RecordingStateMachine::default();
    let fighters = Fighters {
        body1: body1.handle(),
        body2: body2.handle(),
        states1: Rc::clone(&fsm1.requests),
        states2: Rc::clone(&fsm2.requests),
    };

    duel.spawn(
        P1,
        CombatantParts::new()
            .with_body(body1)
            .with_state_machine(fsm1)
            .with_resolver(MotionResolver::default()),
    )
    .unwrap();
    duel.spawn(
        P2,
        CombatantParts::new()
            .with_body(body2)
            .with_state_machine(fsm2)
            .with_resolver(MotionResolver::default()),
    )
    .unwrap();

    (duel, fighters)
}

/// Knockback of `magnitude` whose alignment with +X is `dot`.
pub fn knockback(magnitude: f32, dot: f32) -> Vec3 {
    Vec3::new(dot, 0.0, (1.0 - dot * dot).sqrt()) * magnitude
}
