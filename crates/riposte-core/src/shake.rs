//! Cosmetic mesh shake during hit-stop.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Sinusoidal mesh offset around a captured baseline.
///
/// The offset is recomputed from the baseline every tick, so stopping the
/// shake restores the exact pre-shake offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshShake {
    amplitude: f32,
    frequency: f32,
    baseline: Option<Vec3>,
}

impl MeshShake {
    /// Creates an idle shake.
    #[must_use]
    pub fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
            baseline: None,
        }
    }

    /// Starts shaking around `current_offset`. Already shaking keeps the
    /// original baseline.
    pub fn start(&mut self, current_offset: Vec3) {
        if self.baseline.is_none() {
            self.baseline = Some(current_offset);
        }
    }

    /// Stops shaking, returning the baseline to restore.
    pub fn stop(&mut self) -> Option<Vec3> {
        self.baseline.take()
    }

    /// Returns `true` while shaking.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    /// Offset for real time `t`. X always shakes; Z only while airborne.
    #[must_use]
    pub fn offset(&self, real_time: f64, airborne: bool) -> Option<Vec3> {
        let baseline = self.baseline?;
        #[allow(clippy::cast_possible_truncation)]
        let delta = (real_time as f32 * self.frequency).sin() * self.amplitude;
        let z = if airborne { delta } else { 0.0 };
        Some(baseline + Vec3::new(delta, 0.0, z))
    }
}
