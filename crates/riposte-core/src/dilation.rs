//! Per-combatant time dilation stack.
//!
//! Effects that slow a combatant down push a multiplier and pop it when they
//! end; the top of the stack is the active multiplier. The bottom entry is
//! the baseline captured at construction and can never be popped, so the
//! stack is never empty.
//!
//! # Example
//!
//! ```
//! use riposte_core::TimeDilationStack;
//!
//! let mut stack = TimeDilationStack::new(1.0);
//! stack.push(0.5);
//! stack.push(0.01);
//! assert_eq!(stack.depth(), 3);
//!
//! assert_eq!(stack.pop().unwrap(), 0.01);
//! assert_eq!(stack.current(), 0.5);
//! ```

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{CoreError, Result};

/// LIFO of time-scale multipliers seeded with a baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDilationStack {
    values: Vec<f32>,
}

impl TimeDilationStack {
    /// Creates a stack holding only `baseline`.
    #[must_use]
    pub fn new(baseline: f32) -> Self {
        Self {
            values: vec![baseline],
        }
    }

    /// Pushes a multiplier and makes it active.
    pub fn push(&mut self, value: f32) {
        self.values.push(value);
    }

    /// Pops the active multiplier, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DilationUnderflow`] if only the baseline is left;
    /// the stack is unchanged.
    ///
    /// # Panics
    ///
    /// Debug builds also panic on underflow.
    pub fn pop(&mut self) -> Result<f32> {
        if self.values.len() <= 1 {
            error!(baseline = self.baseline(), "time dilation stack underflow");
            debug_assert!(self.values.len() > 1, "time dilation stack cannot pop its baseline");
            return Err(CoreError::DilationUnderflow);
        }
        self.values.pop().ok_or(CoreError::DilationUnderflow)
    }

    /// Active multiplier.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.values.last().copied().unwrap_or(1.0)
    }

    /// Baseline captured at construction.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.values.first().copied().unwrap_or(1.0)
    }

    /// Number of entries, baseline included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing is pushed above the baseline.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.values.len() == 1
    }

    /// Entries bottom to top.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

impl Default for TimeDilationStack {
    fn default() -> Self {
        Self::new(1.0)
    }
}
