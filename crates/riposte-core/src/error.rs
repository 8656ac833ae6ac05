//! Error types for the combat core.

use thiserror::Error;

use crate::entity::EntityId;
use riposte_input::ConfigError;

/// Errors raised by the combat core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input buffering configuration was rejected.
    #[error("input config error: {0}")]
    Config(#[from] ConfigError),

    /// A combat or locomotion field is out of range.
    #[error("invalid combat config: {field} {reason}")]
    InvalidCombatConfig {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Attempted to pop the baseline time dilation.
    #[error("time dilation stack cannot pop its baseline")]
    DilationUnderflow,

    /// No combatant with this id is spawned.
    #[error("combatant not found: {0:?}")]
    UnknownCombatant(EntityId),

    /// A combatant with this id is already spawned.
    #[error("combatant already spawned: {0:?}")]
    DuplicateCombatant(EntityId),

    /// Both duel slots are taken.
    #[error("duel already has {0} combatants")]
    DuelFull(usize),

    /// Configuration JSON could not be parsed.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for the combat core.
pub type Result<T> = std::result::Result<T, CoreError>;
