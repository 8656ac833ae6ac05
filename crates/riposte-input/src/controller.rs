//! Input buffer controller.
//!
//! The [`InputBufferController`] owns the raw and sequence buffers and turns
//! variable frame deltas into fixed-rate samples:
//!
//! 1. Completions reported by the resolver are moved into the sequence buffer.
//! 2. Each buffer has its own accumulator. When it reaches the sample period
//!    it resets to zero and, if nothing was inserted since the previous
//!    sample, the buffer slides in an empty entry. One call slides each
//!    buffer at most once, however long the frame was.
//!
//! Button edges and stick direction changes are inserted immediately,
//! mirrored into the facing-agnostic frame, and forwarded to the resolver.
//!
//! # Example
//!
//! ```
//! use riposte_input::{ButtonEvent, InputBufferController, InputConfig, InputSymbol};
//!
//! let mut controller = InputBufferController::new(InputConfig::default(), None).unwrap();
//! controller.set_facing_right(false);
//! controller.on_button(ButtonEvent::AttackPressed);
//!
//! assert!(controller.query_input(InputSymbol::Attack, true));
//! assert!(!controller.query_input(InputSymbol::Attack, true));
//! ```

use glam::Vec2;
use std::fmt;
use tracing::{debug, trace, warn};

use crate::config::{ConfigError, InputConfig};
use crate::direction::{classify_angle, signed_angle_deg, DirectionalClassifier};
use crate::observer::BufferObserver;
use crate::raw::{RawEntry, RawInputBuffer};
use crate::resolver::{subscription, SequenceInbox, SequenceResolver};
use crate::sequence::{SequenceBuffer, SequenceEntry, SequenceId};
use crate::symbol::{ButtonEvent, InputSymbol};

/// Fixed-rate sampler for one accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sampler {
    period: f32,
    elapsed: f32,
    dirty: bool,
}

impl Sampler {
    fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            dirty: false,
        }
    }

    /// Accumulates `dt`; returns `true` when the buffer must be padded.
    fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed < self.period {
            return false;
        }
        self.elapsed = 0.0;
        let pad = !self.dirty;
        self.dirty = false;
        pad
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.dirty = false;
    }
}

/// Owns both input buffers and drives their sampling.
pub struct InputBufferController {
    classifier: DirectionalClassifier,
    movement_deadzone: f32,
    raw: RawInputBuffer,
    sequences: SequenceBuffer,
    raw_sampler: Sampler,
    sequence_sampler: Sampler,
    facing_right: bool,
    last_direction: InputSymbol,
    last_angle: Option<f32>,
    movement_direction: f32,
    resolver: Option<Box<dyn SequenceResolver>>,
    inbox: Option<SequenceInbox>,
}

impl fmt::Debug for InputBufferController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBufferController")
            .field("raw", &self.raw)
            .field("sequences", &self.sequences)
            .field("facing_right", &self.facing_right)
            .field("last_direction", &self.last_direction)
            .field("resolver", &self.resolver.as_ref().map(|_| "<resolver>"))
            .finish_non_exhaustive()
    }
}

impl InputBufferController {
    /// Builds a controller, subscribing to `resolver` if one is given.
    ///
    /// Without a resolver the sequence buffer only ever holds sentinels.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(
        config: InputConfig,
        mut resolver: Option<Box<dyn SequenceResolver>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let inbox = match resolver.as_mut() {
            Some(r) => {
                let (notifier, inbox) = subscription();
                r.subscribe(notifier);
                Some(inbox)
            }
            None => {
                warn!("input buffer has no sequence resolver; move sequences will not be buffered");
                None
            }
        };

        Ok(Self {
            classifier: config.classifier(),
            movement_deadzone: config.movement_deadzone,
            raw: RawInputBuffer::new(config.raw_capacity),
            sequences: SequenceBuffer::new(config.sequence_capacity),
            raw_sampler: Sampler::new(config.raw_period()),
            sequence_sampler: Sampler::new(config.sequence_period()),
            facing_right: true,
            last_direction: InputSymbol::None,
            last_angle: None,
            movement_direction: 0.0,
            resolver,
            inbox,
        })
    }

    /// Advances both samplers by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.pump_sequences();

        if self.raw_sampler.advance(dt) {
            self.raw.insert(InputSymbol::None);
        }
        if self.sequence_sampler.advance(dt) {
            self.sequences.insert_empty();
        }
    }

    /// Sets the facing used to mirror subsequent insertions.
    pub fn set_facing_right(&mut self, facing_right: bool) {
        self.facing_right = facing_right;
    }

    /// Current facing.
    #[must_use]
    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Inserts `symbol` immediately, mirrored for the current facing.
    ///
    /// Non-empty symbols are forwarded to the resolver.
    pub fn insert_raw(&mut self, symbol: InputSymbol) {
        let stored = symbol.for_facing(self.facing_right);
        self.raw.insert(stored);
        self.raw_sampler.dirty = true;
        trace!(input = %symbol, stored = %stored, "raw input buffered");

        if !stored.is_none() {
            if let Some(resolver) = self.resolver.as_mut() {
                resolver.register_input(stored);
            }
        }
        self.pump_sequences();
    }

    /// Records a button edge.
    pub fn on_button(&mut self, event: ButtonEvent) {
        self.insert_raw(event.symbol());
    }

    /// Classifies the stick and inserts the direction if it changed.
    ///
    /// Returns the inserted symbol. Sticks inside the deadzone are ignored
    /// and do not reset the last classified direction.
    pub fn update_direction(&mut self, stick: Vec2) -> Option<InputSymbol> {
        if !self.classifier.is_active(stick) {
            self.last_angle = None;
            return None;
        }

        let angle = signed_angle_deg(stick);
        self.last_angle = Some(angle);
        let symbol = classify_angle(angle, self.classifier.epsilon_deg);
        if symbol == self.last_direction {
            return None;
        }

        self.last_direction = symbol;
        self.insert_raw(symbol);
        Some(symbol)
    }

    /// Feeds both stick axes: walking direction and directional input.
    pub fn update_axes(&mut self, horizontal: f32, vertical: f32) -> Option<InputSymbol> {
        let moving_right = horizontal > self.movement_deadzone;
        let moving_left = horizontal < -self.movement_deadzone;
        self.movement_direction = match (moving_right, moving_left) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        self.update_direction(Vec2::new(horizontal, vertical))
    }

    /// Walking direction in world space: `-1`, `0` or `1`.
    #[must_use]
    pub fn movement_direction(&self) -> f32 {
        self.movement_direction
    }

    /// Last classified stick direction.
    #[must_use]
    pub fn last_direction(&self) -> InputSymbol {
        self.last_direction
    }

    /// Looks for an unconsumed raw `symbol`, marking it if `consume`.
    pub fn query_input(&mut self, symbol: InputSymbol, consume: bool) -> bool {
        self.raw.query(symbol, consume)
    }

    /// Returns `true` if an unconsumed raw `symbol` is buffered.
    #[must_use]
    pub fn contains_consumable_input(&self, symbol: InputSymbol) -> bool {
        self.raw.contains_consumable(symbol)
    }

    /// Marks every unconsumed raw `symbol` consumed.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` is not buffered; see
    /// [`RawInputBuffer::consume_all`].
    pub fn consume_input(&mut self, symbol: InputSymbol) -> usize {
        self.raw.consume_all(symbol)
    }

    /// Looks for an unconsumed sequence, marking it if `consume`.
    pub fn query_sequence(&mut self, id: &SequenceId, consume: bool) -> bool {
        self.sequences.query(id, consume)
    }

    /// Returns `true` if an unconsumed sequence `id` is buffered.
    #[must_use]
    pub fn contains_consumable_sequence(&self, id: &SequenceId) -> bool {
        self.sequences.contains_consumable(id)
    }

    /// Marks every unconsumed sequence `id` consumed.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not buffered; see [`SequenceBuffer::consume_all`].
    pub fn consume_sequence(&mut self, id: &SequenceId) -> usize {
        self.sequences.consume_all(id)
    }

    /// Highest-priority unconsumed sequence, newest on ties.
    pub fn best_sequence(&mut self, consume: bool) -> Option<SequenceEntry> {
        self.sequences.best(consume)
    }

    /// Sequence entries oldest first, optionally without sentinels.
    #[must_use]
    pub fn sequence_snapshot(&self, skip_empty: bool) -> Vec<SequenceEntry> {
        self.sequences.snapshot(skip_empty)
    }

    /// Raw entries oldest first.
    #[must_use]
    pub fn raw_snapshot(&self) -> Vec<RawEntry> {
        self.raw.entries().copied().collect()
    }

    /// Raw buffer.
    #[must_use]
    pub fn raw_buffer(&self) -> &RawInputBuffer {
        &self.raw
    }

    /// Sequence buffer.
    #[must_use]
    pub fn sequence_buffer(&self) -> &SequenceBuffer {
        &self.sequences
    }

    /// Returns `true` if a resolver is attached.
    #[must_use]
    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Empties both buffers and restarts sampling.
    pub fn reset(&mut self) {
        self.pump_sequences();
        self.raw.clear();
        self.sequences.clear();
        self.raw_sampler.reset();
        self.sequence_sampler.reset();
        self.last_direction = InputSymbol::None;
        self.last_angle = None;
        self.movement_direction = 0.0;
    }

    /// Reports buffer contents to a diagnostics sink.
    pub fn report(&self, observer: &mut dyn BufferObserver) {
        observer.raw_buffer(&self.raw_snapshot());
        observer.sequence_buffer(&self.sequence_snapshot(false));
        observer.direction(self.last_angle, self.last_direction);
    }

    fn pump_sequences(&mut self) {
        let Some(inbox) = self.inbox.as_ref() else {
            return;
        };
        for completed in inbox.drain() {
            debug!(sequence = %completed.id, priority = completed.priority, "sequence buffered");
            self.sequences.insert(completed.id, completed.priority);
            self.sequence_sampler.dirty = true;
        }
    }
}

impl Drop for InputBufferController {
    fn drop(&mut self) {
        if let Some(resolver) = self.resolver.as_mut() {
            resolver.unsubscribe();
        }
    }
}
