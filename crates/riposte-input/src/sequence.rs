//! Move-sequence buffer: a sliding window of resolved, prioritized sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::window::SlidingWindow;

/// Name of a move sequence recognised by the resolver.
///
/// The empty string is reserved as the "no sequence" sentinel used to pad
/// the buffer on idle samples.
///
/// # Example
///
/// ```
/// use riposte_input::SequenceId;
///
/// let fireball = SequenceId::new("fireball");
/// assert!(!fireball.is_none());
/// assert!(SequenceId::none().is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceId(String);

impl SequenceId {
    /// Creates a sequence id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// The empty sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the empty sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("---")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for SequenceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SequenceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One slot of the sequence buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceEntry {
    /// Sequence held by the slot, or the empty sentinel.
    pub id: SequenceId,
    /// Resolver-assigned priority; higher wins.
    pub priority: i32,
    /// Set once gameplay has used this occurrence.
    pub consumed: bool,
}

impl SequenceEntry {
    /// A fresh, unconsumed entry.
    #[must_use]
    pub fn new(id: SequenceId, priority: i32) -> Self {
        Self {
            id,
            priority,
            consumed: false,
        }
    }

    /// Returns `true` if this slot holds a real, unconsumed sequence.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !self.id.is_none() && !self.consumed
    }

    fn is_consumable(&self, id: &SequenceId) -> bool {
        self.is_available() && self.id == *id
    }
}

/// Fixed-length window of resolved sequences, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceBuffer {
    window: SlidingWindow<SequenceEntry>,
}

impl SequenceBuffer {
    /// Creates a buffer of `capacity` empty slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            window: SlidingWindow::new(capacity, SequenceEntry::default()),
        }
    }

    /// Slides the window, appending a resolved sequence.
    pub fn insert(&mut self, id: SequenceId, priority: i32) {
        self.window.push(SequenceEntry::new(id, priority));
    }

    /// Slides the window, appending the empty sentinel.
    pub fn insert_empty(&mut self) {
        self.window.push(SequenceEntry::default());
    }

    /// Looks for the oldest unconsumed `id`, marking it if `consume`.
    pub fn query(&mut self, id: &SequenceId, consume: bool) -> bool {
        match self.window.iter_mut().find(|e| e.is_consumable(id)) {
            Some(entry) => {
                if consume {
                    entry.consumed = true;
                }
                true
            }
            None => false,
        }
    }

    /// Returns `true` if an unconsumed `id` is buffered.
    #[must_use]
    pub fn contains_consumable(&self, id: &SequenceId) -> bool {
        self.window.iter().any(|e| e.is_consumable(id))
    }

    /// Marks every unconsumed `id` as consumed, returning how many.
    ///
    /// # Panics
    ///
    /// Panics if no consumable `id` is buffered.
    pub fn consume_all(&mut self, id: &SequenceId) -> usize {
        assert!(
            self.contains_consumable(id),
            "consumed sequence {id} that is not buffered"
        );
        let mut marked = 0;
        for entry in self.window.iter_mut().filter(|e| e.is_consumable(id)) {
            entry.consumed = true;
            marked += 1;
        }
        marked
    }

    /// Highest-priority available sequence; ties go to the newest entry.
    ///
    /// When `consume` is set, the chosen slot is marked consumed.
    pub fn best(&mut self, consume: bool) -> Option<SequenceEntry> {
        let mut best: Option<&mut SequenceEntry> = None;
        for entry in self.window.iter_mut().filter(|e| e.is_available()) {
            let keep_current = best
                .as_ref()
                .is_some_and(|current| current.priority > entry.priority);
            if !keep_current {
                best = Some(entry);
            }
        }
        best.map(|entry| {
            if consume {
                entry.consumed = true;
            }
            entry.clone()
        })
    }

    /// Copies the entries oldest to newest, optionally dropping sentinels.
    #[must_use]
    pub fn snapshot(&self, skip_empty: bool) -> Vec<SequenceEntry> {
        self.window
            .iter()
            .filter(|e| !(skip_empty && e.id.is_none()))
            .cloned()
            .collect()
    }

    /// Resets every slot to the empty sentinel.
    pub fn clear(&mut self) {
        self.window.fill(&SequenceEntry::default());
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` for a zero-capacity buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Entries oldest to newest.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &SequenceEntry> + ExactSizeIterator {
        self.window.iter()
    }
}
