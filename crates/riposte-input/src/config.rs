//! Input buffering configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::direction::{DirectionalClassifier, BASE_HALF_SECTOR_DEG};

/// Configuration errors surfaced when a controller is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A buffer was configured with no slots.
    #[error("{0} capacity must be at least one frame")]
    ZeroCapacity(&'static str),

    /// A sample rate was zero, negative or not finite.
    #[error("{name} sample rate must be a positive finite frequency, got {value}")]
    InvalidSampleRate {
        /// Which rate.
        name: &'static str,
        /// Offending value in Hz.
        value: f32,
    },

    /// A deadzone was negative or not finite.
    #[error("{name} deadzone must be a non-negative finite magnitude, got {value}")]
    InvalidDeadzone {
        /// Which deadzone.
        name: &'static str,
        /// Offending value.
        value: f32,
    },

    /// The directional epsilon would close the diagonal sectors.
    #[error("directional epsilon must lie in [0, {max}) degrees, got {value}")]
    InvalidEpsilon {
        /// Offending value in degrees.
        value: f32,
        /// Exclusive upper bound.
        max: f32,
    },
}

/// Buffer sizes, sample rates and stick thresholds.
///
/// # Example
///
/// ```
/// use riposte_input::InputConfig;
///
/// let config = InputConfig {
///     raw_capacity: 5,
///     ..InputConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Raw buffer length in sampled frames.
    pub raw_capacity: usize,
    /// Sequence buffer length in sampled frames.
    pub sequence_capacity: usize,
    /// Raw buffer sample rate in Hz.
    pub raw_sample_rate: f32,
    /// Sequence buffer sample rate in Hz.
    pub sequence_sample_rate: f32,
    /// Stick magnitude below which no direction is classified.
    pub directional_deadzone: f32,
    /// Cardinal sector widening in degrees.
    pub directional_epsilon_deg: f32,
    /// Horizontal axis magnitude below which the fighter is not walking.
    pub movement_deadzone: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            raw_capacity: 12,
            sequence_capacity: 8,
            raw_sample_rate: 60.0,
            sequence_sample_rate: 60.0,
            directional_deadzone: 0.3,
            directional_epsilon_deg: 5.0,
            movement_deadzone: 0.2,
        }
    }
}

impl InputConfig {
    /// Checks every field, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raw_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("raw buffer"));
        }
        if self.sequence_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("sequence buffer"));
        }
        check_rate("raw", self.raw_sample_rate)?;
        check_rate("sequence", self.sequence_sample_rate)?;
        check_deadzone("directional", self.directional_deadzone)?;
        check_deadzone("movement", self.movement_deadzone)?;

        let eps = self.directional_epsilon_deg;
        if !eps.is_finite() || !(0.0..BASE_HALF_SECTOR_DEG).contains(&eps) {
            return Err(ConfigError::InvalidEpsilon {
                value: eps,
                max: BASE_HALF_SECTOR_DEG,
            });
        }
        Ok(())
    }

    /// Seconds between raw buffer samples.
    #[must_use]
    pub fn raw_period(&self) -> f32 {
        self.raw_sample_rate.recip()
    }

    /// Seconds between sequence buffer samples.
    #[must_use]
    pub fn sequence_period(&self) -> f32 {
        self.sequence_sample_rate.recip()
    }

    /// Classifier built from the directional fields.
    #[must_use]
    pub fn classifier(&self) -> DirectionalClassifier {
        DirectionalClassifier::new(self.directional_deadzone, self.directional_epsilon_deg)
    }
}

fn check_rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate { name, value })
    }
}

fn check_deadzone(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDeadzone { name, value })
    }
}
