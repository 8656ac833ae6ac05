//! Raw input buffer: a sliding window of consumable input symbols.

use serde::{Deserialize, Serialize};

use crate::symbol::InputSymbol;
use crate::window::SlidingWindow;

/// One slot of the raw input buffer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawEntry {
    /// Symbol held by the slot.
    pub symbol: InputSymbol,
    /// Set once gameplay has used this occurrence of the symbol.
    pub consumed: bool,
}

impl RawEntry {
    /// A fresh, unconsumed entry.
    #[must_use]
    pub const fn new(symbol: InputSymbol) -> Self {
        Self {
            symbol,
            consumed: false,
        }
    }

    /// Returns `true` if this slot can satisfy a query for `symbol`.
    #[must_use]
    pub fn is_consumable(&self, symbol: InputSymbol) -> bool {
        !self.symbol.is_none() && self.symbol == symbol && !self.consumed
    }
}

/// Fixed-length window of raw input symbols, oldest first.
///
/// # Example
///
/// ```
/// use riposte_input::{InputSymbol, RawInputBuffer};
///
/// let mut buffer = RawInputBuffer::new(5);
/// buffer.insert(InputSymbol::Attack);
///
/// assert!(buffer.query(InputSymbol::Attack, true));
/// assert!(!buffer.query(InputSymbol::Attack, true));
/// assert_eq!(buffer.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputBuffer {
    window: SlidingWindow<RawEntry>,
}

impl RawInputBuffer {
    /// Creates a buffer of `capacity` empty slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            window: SlidingWindow::new(capacity, RawEntry::default()),
        }
    }

    /// Slides the window, appending `symbol` as the newest entry.
    pub fn insert(&mut self, symbol: InputSymbol) {
        self.window.push(RawEntry::new(symbol));
    }

    /// Looks for the oldest unconsumed `symbol`, marking it if `consume`.
    ///
    /// `None` slots never match.
    pub fn query(&mut self, symbol: InputSymbol, consume: bool) -> bool {
        match self.window.iter_mut().find(|e| e.is_consumable(symbol)) {
            Some(entry) => {
                if consume {
                    entry.consumed = true;
                }
                true
            }
            None => false,
        }
    }

    /// Returns `true` if an unconsumed `symbol` is buffered.
    #[must_use]
    pub fn contains_consumable(&self, symbol: InputSymbol) -> bool {
        self.window.iter().any(|e| e.is_consumable(symbol))
    }

    /// Marks every unconsumed `symbol` as consumed, returning how many.
    ///
    /// # Panics
    ///
    /// Panics if no consumable `symbol` is buffered. Check with
    /// [`contains_consumable`](Self::contains_consumable) or a non-consuming
    /// [`query`](Self::query) first.
    pub fn consume_all(&mut self, symbol: InputSymbol) -> usize {
        assert!(
            self.contains_consumable(symbol),
            "consumed input {symbol:?} that is not buffered"
        );
        let mut marked = 0;
        for entry in self.window.iter_mut().filter(|e| e.is_consumable(symbol)) {
            entry.consumed = true;
            marked += 1;
        }
        marked
    }

    /// Resets every slot to an unconsumed `None`.
    pub fn clear(&mut self) {
        self.window.fill(&RawEntry::default());
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
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &RawEntry> + ExactSizeIterator {
        self.window.iter()
    }

    /// Symbols oldest to newest.
    #[must_use]
    pub fn symbols(&self) -> Vec<InputSymbol> {
        self.window.iter().map(|e| e.symbol).collect()
    }

    /// Newest entry.
    #[must_use]
    pub fn newest(&self) -> Option<&RawEntry> {
        self.window.newest()
    }
}
