//! Fixed-capacity sliding window.
//!
//! [`SlidingWindow`] is the storage behind both input buffers. Its length is
//! always equal to its capacity: pushing to the back evicts the front.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A FIFO window that never grows or shrinks after construction.
///
/// # Example
///
/// ```
/// use riposte_input::window::SlidingWindow;
///
/// let mut window = SlidingWindow::new(3, 0u8);
/// window.push(1);
/// window.push(2);
///
/// assert_eq!(window.len(), 3);
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlidingWindow<T> {
    slots: VecDeque<T>,
}

impl<T: Clone> SlidingWindow<T> {
    /// Creates a window of `capacity` copies of `fill`.
    #[must_use]
    pub fn new(capacity: usize, fill: T) -> Self {
        Self {
            slots: std::iter::repeat(fill).take(capacity).collect(),
        }
    }

    /// Overwrites every slot with `fill`.
    pub fn fill(&mut self, fill: &T) {
        for slot in &mut self.slots {
            *slot = fill.clone();
        }
    }
}

impl<T> SlidingWindow<T> {
    /// Appends `value` as the newest slot, returning the evicted oldest one.
    ///
    /// A zero-capacity window hands the value straight back.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.slots.is_empty() {
            return Some(value);
        }
        self.slots.push_back(value);
        self.slots.pop_front()
    }

    /// Number of slots, always equal to the capacity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` for a zero-capacity window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Oldest slot.
    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        self.slots.front()
    }

    /// Newest slot.
    #[must_use]
    pub fn newest(&self) -> Option<&T> {
        self.slots.back()
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.slots.iter()
    }

    /// Mutably iterates oldest to newest.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + ExactSizeIterator {
        self.slots.iter_mut()
    }
}
