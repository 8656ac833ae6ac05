//! Contract with the external sequence resolver.
//!
//! The resolver turns an ordered run of raw symbols into named move
//! sequences. The buffer controller feeds it every non-empty explicit input
//! through [`SequenceResolver::register_input`] and learns about completed
//! patterns through a [`SequenceNotifier`] handed over at subscription time.
//!
//! The subscription is scoped: the controller keeps the receiving end and
//! calls [`SequenceResolver::unsubscribe`] when it is dropped. A resolver
//! that keeps notifying after that simply sees [`SequenceNotifier::notify`]
//! return `false`.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::sequence::SequenceId;
use crate::symbol::InputSymbol;

/// A pattern the resolver finished recognising.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedSequence {
    /// Name of the recognised sequence.
    pub id: SequenceId,
    /// Priority used when several sequences compete.
    pub priority: i32,
}

/// Sending half of a resolver subscription.
#[derive(Debug, Clone)]
pub struct SequenceNotifier {
    tx: Sender<CompletedSequence>,
}

impl SequenceNotifier {
    /// Reports a completed sequence. Returns `false` once the subscriber is
    /// gone.
    pub fn notify(&self, id: SequenceId, priority: i32) -> bool {
        self.tx.send(CompletedSequence { id, priority }).is_ok()
    }
}

/// Receiving half of a resolver subscription, owned by the controller.
#[derive(Debug)]
pub struct SequenceInbox {
    rx: Receiver<CompletedSequence>,
}

impl SequenceInbox {
    /// Drains every completion received so far, in arrival order.
    pub fn drain(&self) -> Vec<CompletedSequence> {
        self.rx.try_iter().collect()
    }
}

/// Creates a connected notifier/inbox pair.
#[must_use]
pub fn subscription() -> (SequenceNotifier, SequenceInbox) {
    let (tx, rx) = mpsc::channel();
    (SequenceNotifier { tx }, SequenceInbox { rx })
}

/// Pattern matcher mapping raw symbols to move sequences.
///
/// Symbols arrive already mirrored into the facing-agnostic frame.
pub trait SequenceResolver {
    /// Starts reporting completions to `notifier`.
    fn subscribe(&mut self, notifier: SequenceNotifier);

    /// Stops reporting completions and releases the notifier.
    fn unsubscribe(&mut self);

    /// Feeds one non-empty raw symbol.
    fn register_input(&mut self, symbol: InputSymbol);
}
