//! Per-frame pose snapshot for renderers and HUDs.
//!
//! The model owns no mesh or window handle. A render adapter reads a
//! [`VehiclePose`] each frame and does its own drawing.

use nalgebra::{Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What is visible of the car after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehiclePose {
    /// Car center in the world plane.
    pub position: Vector2<f64>,
    /// Body heading (rad, unwrapped).
    pub heading: f64,
    /// Front wheel steer angle (rad).
    pub steer_angle: f64,
    /// Magnitude of the world velocity.
    pub speed: f64,
}

impl VehiclePose {
    /// Position on a y-up ground plane: world `(x, y)` becomes `(x, 0, y)`.
    #[must_use]
    pub fn placement(&self) -> Vector3<f64> {
        Vector3::new(self.position.x, 0.0, self.position.y)
    }

    /// Heading in degrees, for rotation about the up axis.
    #[must_use]
    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees()
    }

    /// Steer angle in degrees.
    #[must_use]
    pub fn steer_degrees(&self) -> f64 {
        self.steer_angle.to_degrees()
    }
}
