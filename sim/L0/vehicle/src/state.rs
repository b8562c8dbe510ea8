//! Kinematic state and driver inputs.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::VehicleError;

/// Mutable kinematic state of the car, all in the world plane.
///
/// `heading` accumulates without wrapping, so a car that has turned twice
/// around reads `4π`, not `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleState {
    /// Position of the car center (world units).
    pub position: Vector2<f64>,
    /// Velocity of the car center (world units/s).
    pub velocity: Vector2<f64>,
    /// Body orientation (rad).
    pub heading: f64,
    /// Yaw rate (rad/s).
    pub angular_velocity: f64,
}

impl VehicleState {
    /// A car at rest at `position`, facing `heading`.
    #[must_use]
    pub fn at_rest(position: Vector2<f64>, heading: f64) -> Self {
        Self {
            position,
            heading,
            ..Default::default()
        }
    }

    /// Set the world velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the yaw rate.
    #[must_use]
    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Magnitude of the world velocity.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Check if the state contains `NaN` or `Inf` values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|x| x.is_finite())
            && self.velocity.iter().all(|x| x.is_finite())
            && self.heading.is_finite()
            && self.angular_velocity.is_finite()
    }
}

/// Driver commands read by each step.
///
/// The model never clamps these. Limits belong to whoever sets them, see
/// [`controls`](crate::controls).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlInputs {
    /// Front wheel steer angle (rad). Positive steer yaws toward positive heading.
    pub steer_angle: f64,
    /// Drive command magnitude.
    pub throttle: f64,
    /// Brake command magnitude.
    pub brake: f64,
}

impl ControlInputs {
    /// Inputs with the given throttle and nothing else.
    #[must_use]
    pub fn throttle(throttle: f64) -> Self {
        Self {
            throttle,
            ..Default::default()
        }
    }

    /// Set the steer angle.
    #[must_use]
    pub fn steer(mut self, steer_angle: f64) -> Self {
        self.steer_angle = steer_angle;
        self
    }

    /// Set the brake.
    #[must_use]
    pub fn brake(mut self, brake: f64) -> Self {
        self.brake = brake;
        self
    }

    /// Reject `NaN` and infinite inputs.
    pub fn validate(&self) -> crate::Result<()> {
        for (field, value) in [
            ("steer_angle", self.steer_angle),
            ("throttle", self.throttle),
            ("brake", self.brake),
        ] {
            if !value.is_finite() {
                return Err(VehicleError::NonFiniteInput { field, value });
            }
        }
        Ok(())
    }
}
