//! Combat, locomotion and aggregate configuration.
//!
//! All structs use `#[serde(default)]`, so a JSON document only needs the
//! fields it overrides:
//!
//! ```
//! use riposte_core::RiposteConfig;
//!
//! let config = RiposteConfig::from_json_str(
//!     r#"{ "combat": { "hit_stop_initial_delay": 0.1 }, "input": { "raw_capacity": 6 } }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.input.raw_capacity, 6);
//! assert!((config.combat.hit_stop_initial_delay - 0.1).abs() < 1e-12);
//! assert!((config.combat.launch_knockback_threshold - 500.0).abs() < f32::EPSILON);
//! ```

use riposte_input::InputConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Hit reaction and hit-stop tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Seconds between a hit and the visible freeze.
    pub hit_stop_initial_delay: f64,
    /// Time dilation pushed while a hit-stop is active.
    pub min_time_dilation: f32,
    /// Mesh shake amplitude in world units.
    pub mesh_shake_amplitude: f32,
    /// Mesh shake angular frequency in radians per second.
    pub mesh_shake_frequency: f32,
    /// Knockback magnitude at or above which a hit can launch.
    pub launch_knockback_threshold: f32,
    /// Facing alignment below which a hit can launch.
    pub launch_alignment_threshold: f32,
    /// State requested for hits that keep the victim grounded.
    pub grounded_reaction_state: String,
    /// State requested for hits that launch the victim.
    pub ground_to_air_reaction_state: String,
    /// Seconds the attacker keeps the "just landed a hit" flag.
    pub hit_landed_window: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            hit_stop_initial_delay: 0.05,
            min_time_dilation: 0.01,
            mesh_shake_amplitude: 2.0,
            mesh_shake_frequency: 80.0,
            launch_knockback_threshold: 500.0,
            launch_alignment_threshold: 0.9,
            grounded_reaction_state: "grounded".to_string(),
            ground_to_air_reaction_state: "ground-to-air".to_string(),
            hit_landed_window: 0.3,
        }
    }
}

impl CombatConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCombatConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        non_negative_secs("hit_stop_initial_delay", self.hit_stop_initial_delay)?;
        non_negative_secs("hit_landed_window", self.hit_landed_window)?;

        if !(self.min_time_dilation.is_finite() && self.min_time_dilation > 0.0) {
            return Err(invalid(
                "min_time_dilation",
                format!("must be positive, got {}", self.min_time_dilation),
            ));
        }
        non_negative("mesh_shake_amplitude", self.mesh_shake_amplitude)?;
        non_negative("mesh_shake_frequency", self.mesh_shake_frequency)?;
        non_negative("launch_knockback_threshold", self.launch_knockback_threshold)?;

        if !(0.0..=1.0).contains(&self.launch_alignment_threshold) {
            return Err(invalid(
                "launch_alignment_threshold",
                format!("must lie in [0, 1], got {}", self.launch_alignment_threshold),
            ));
        }
        if self.grounded_reaction_state.is_empty() {
            return Err(invalid("grounded_reaction_state", "must not be empty".to_string()));
        }
        if self.ground_to_air_reaction_state.is_empty() {
            return Err(invalid(
                "ground_to_air_reaction_state",
                "must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Movement tuning driven every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Gravity scale while rising or grounded.
    pub regular_gravity_scale: f32,
    /// Gravity scale while falling.
    pub falling_gravity_scale: f32,
    /// Max walk speed toward the facing direction.
    pub forward_walk_speed: f32,
    /// Max walk speed away from the facing direction.
    pub backward_walk_speed: f32,
    /// Keep turning toward movement while airborne when no opponent is set.
    pub face_when_airborne: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            regular_gravity_scale: 1.0,
            falling_gravity_scale: 2.0,
            forward_walk_speed: 350.0,
            backward_walk_speed: 250.0,
            face_when_airborne: false,
        }
    }
}

impl LocomotionConfig {
    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCombatConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        non_negative("regular_gravity_scale", self.regular_gravity_scale)?;
        non_negative("falling_gravity_scale", self.falling_gravity_scale)?;
        non_negative("forward_walk_speed", self.forward_walk_speed)?;
        non_negative("backward_walk_speed", self.backward_walk_speed)
    }
}

/// Everything a duel needs, loadable from one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiposteConfig {
    /// Input buffering.
    pub input: InputConfig,
    /// Hit reaction and hit-stop.
    pub combat: CombatConfig,
    /// Movement.
    pub locomotion: LocomotionConfig,
}

impl RiposteConfig {
    /// Validates all three sections.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, input section first.
    pub fn validate(&self) -> Result<()> {
        self.input.validate()?;
        self.combat.validate()?;
        self.locomotion.validate()
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] for malformed input, or a validation error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(field: &'static str, reason: String) -> CoreError {
    CoreError::InvalidCombatConfig { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative, got {value}")))
    }
}

fn non_negative_secs(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative seconds, got {value}")))
    }
}
