//! # Riposte Input
//!
//! Fixed-rate input buffering for Riposte fighters.
//!
//! Fighting-game moves are read from short histories of controller input
//! rather than from the current frame. This crate keeps those histories:
//!
//! - **Symbols**: stick directions and button edges, expressed relative to
//!   facing so left- and right-facing fighters share motion patterns
//! - **Classifier**: maps analog stick vectors to eight sectors with
//!   hysteresis on the cardinals
//! - **Buffers**: fixed-length sliding windows of raw symbols and of
//!   resolved move sequences, sampled at a configurable rate
//! - **Controller**: owns both buffers, drives sampling from frame deltas and
//!   talks to an external sequence resolver
//!
//! ## Usage
//!
//! ```rust
//! use riposte_input::{InputSymbol, RawInputBuffer};
//!
//! let mut buffer = RawInputBuffer::new(4);
//! buffer.insert(InputSymbol::Down);
//! buffer.insert(InputSymbol::Attack);
//!
//! assert!(buffer.query(InputSymbol::Attack, true));
//! assert!(!buffer.contains_consumable(InputSymbol::Attack));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod controller;
pub mod direction;
pub mod observer;
pub mod raw;
pub mod resolver;
pub mod sequence;
pub mod symbol;
pub mod window;

pub use config::{ConfigError, InputConfig};
pub use controller::InputBufferController;
pub use direction::DirectionalClassifier;
pub use observer::{BufferObserver, TextOverlay};
pub use raw::{RawEntry, RawInputBuffer};
pub use resolver::{subscription, CompletedSequence, SequenceInbox, SequenceNotifier, SequenceResolver};
pub use sequence::{SequenceBuffer, SequenceEntry, SequenceId};
pub use symbol::{ButtonEvent, InputSymbol};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
