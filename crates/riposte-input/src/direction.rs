//! Stick vector to directional symbol classification.
//!
//! Angles are measured from the up axis `(0, 1)`, positive toward forward
//! (`+x`), in degrees within `(-180, 180]`:
//!
//! ```text
//!              0 (Up)
//!     -45 (BU)     45 (UF)
//! -90 (B)               90 (F)
//!     -135 (DB)   135 (FD)
//!             180 (D)
//! ```
//!
//! Cardinal sectors span `22.5 + epsilon` degrees on each side of their
//! centre, so a positive epsilon widens them at the expense of the diagonals.
//! A stick hovering near a nominal 22.5° boundary therefore keeps resolving
//! to the cardinal instead of flickering between neighbours.
//!
//! # Down sector wrap
//!
//! The down sector covers `angle >= 180` and `(-180, -180 + half_width)`
//! only. The band `[180 - half_width, 180)` on the forward side resolves to
//! [`InputSymbol::None`]. Tuned move inputs rely on this exact shape, so it
//! is kept as-is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::symbol::InputSymbol;

/// Half-width of a strict 45° sector.
pub const BASE_HALF_SECTOR_DEG: f32 = 22.5;

const UP_DEG: f32 = 0.0;
const FORWARD_DEG: f32 = 90.0;
const DOWN_DEG: f32 = 180.0;
const BACK_DEG: f32 = -90.0;

/// Signed angle in degrees between `vector` and the up axis.
///
/// Returns a value in `(-180, 180]`; `(1, 0)` maps to `90`.
#[must_use]
pub fn signed_angle_deg(vector: Vec2) -> f32 {
    vector.x.atan2(vector.y).to_degrees()
}

/// Classifies a stick vector, returning [`InputSymbol::None`] inside the
/// deadzone.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use riposte_input::direction::classify;
/// use riposte_input::InputSymbol;
///
/// assert_eq!(classify(Vec2::new(1.0, 0.0), 0.2, 5.0), InputSymbol::Forward);
/// assert_eq!(classify(Vec2::new(0.1, 0.0), 0.2, 5.0), InputSymbol::None);
/// ```
#[must_use]
pub fn classify(vector: Vec2, deadzone: f32, epsilon_deg: f32) -> InputSymbol {
    if vector.length() <= deadzone {
        return InputSymbol::None;
    }
    classify_angle(signed_angle_deg(vector), epsilon_deg)
}

/// Maps an angle from [`signed_angle_deg`] to a directional symbol.
///
/// Cardinal sectors use open bounds, diagonals are half-open. Exact boundary
/// points and the down-sector wrap band fall through to `None`.
#[must_use]
pub fn classify_angle(angle: f32, epsilon_deg: f32) -> InputSymbol {
    let h = BASE_HALF_SECTOR_DEG + epsilon_deg;

    if angle > UP_DEG - h && angle < UP_DEG + h {
        return InputSymbol::Up;
    }
    if angle >= UP_DEG + h && angle < FORWARD_DEG - h {
        return InputSymbol::UpForward;
    }
    if angle > FORWARD_DEG - h && angle < FORWARD_DEG + h {
        return InputSymbol::Forward;
    }
    if angle >= FORWARD_DEG + h && angle < DOWN_DEG - h {
        return InputSymbol::ForwardDown;
    }
    if angle >= DOWN_DEG || (angle > -DOWN_DEG && angle < -DOWN_DEG + h) {
        return InputSymbol::Down;
    }
    if angle > -DOWN_DEG + h && angle < BACK_DEG - h {
        return InputSymbol::DownBackward;
    }
    if angle > BACK_DEG - h && angle < BACK_DEG + h {
        return InputSymbol::Backward;
    }
    if angle >= BACK_DEG + h && angle < UP_DEG - h {
        return InputSymbol::BackwardUp;
    }

    InputSymbol::None
}

/// Deadzone and epsilon bundled for repeated classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalClassifier {
    /// Stick magnitudes at or below this resolve to `None`.
    pub deadzone: f32,
    /// Extra half-width given to cardinal sectors, in degrees.
    pub epsilon_deg: f32,
}

impl DirectionalClassifier {
    /// Creates a classifier.
    #[must_use]
    pub const fn new(deadzone: f32, epsilon_deg: f32) -> Self {
        Self {
            deadzone,
            epsilon_deg,
        }
    }

    /// Returns `true` when the vector is outside the deadzone.
    #[must_use]
    pub fn is_active(&self, vector: Vec2) -> bool {
        vector.length() > self.deadzone
    }

    /// Classifies a stick vector.
    #[must_use]
    pub fn classify(&self, vector: Vec2) -> InputSymbol {
        classify(vector, self.deadzone, self.epsilon_deg)
    }
}
