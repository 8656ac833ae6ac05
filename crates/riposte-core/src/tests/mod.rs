//! Test module for duel-level integration and determinism tests.
//!
//! # Test Structure
//!
//! - `determinism.rs`: identical inputs produce identical state hashes, and
//!   timings do not depend on frame length
//! - `integration.rs`: hit reactions, hit-stop sequencing and teardown
//!   through a full duel
//! - `helpers.rs`: recording collaborators and setup utilities

mod helpers;
mod integration;

// Re-export for convenience
pub use helpers::*;
