//! Physical parameters of the simulated car.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::VehicleError;

/// Mass, inertia and geometry of a vehicle.
///
/// Only `mass`, `inertia` and the two axle distances feed the dynamics.
/// The body and wheel dimensions are carried for whatever draws the car.
///
/// # Example
///
/// ```
/// use sim_vehicle::VehicleParameters;
///
/// let params = VehicleParameters::default();
/// assert_eq!(params.wheelbase(), 2.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleParameters {
    /// Total mass (kg).
    pub mass: f64,
    /// Yaw moment of inertia (kg·m²).
    pub inertia: f64,
    /// Distance from the center of gravity to the front axle, `b` (m).
    pub cg_to_front_axle: f64,
    /// Distance from the center of gravity to the rear axle, `c` (m).
    pub cg_to_rear_axle: f64,
    /// Height of the center of gravity above the ground (m). Not simulated.
    pub cg_height: f64,
    /// Body length (m).
    pub length: f64,
    /// Body width (m).
    pub width: f64,
    /// Body height (m).
    pub height: f64,
    /// Wheel diameter as drawn (m).
    pub wheel_length: f64,
    /// Wheel tread width as drawn (m).
    pub wheel_width: f64,
}

impl Default for VehicleParameters {
    fn default() -> Self {
        Self {
            mass: 1500.0,
            inertia: 1500.0,
            cg_to_front_axle: 1.0,
            cg_to_rear_axle: 1.0,
            cg_height: 1.0,
            length: 3.0,
            width: 1.5,
            height: 1.2,
            wheel_length: 0.7,
            wheel_width: 0.3,
        }
    }
}

impl VehicleParameters {
    /// Distance between the axles, `b + c`.
    #[must_use]
    pub fn wheelbase(&self) -> f64 {
        self.cg_to_front_axle + self.cg_to_rear_axle
    }

    /// Set mass and yaw inertia.
    #[must_use]
    pub fn with_mass(mut self, mass: f64, inertia: f64) -> Self {
        self.mass = mass;
        self.inertia = inertia;
        self
    }

    /// Set the axle positions relative to the center of gravity.
    #[must_use]
    pub fn with_axles(mut self, cg_to_front: f64, cg_to_rear: f64) -> Self {
        self.cg_to_front_axle = cg_to_front;
        self.cg_to_rear_axle = cg_to_rear;
        self
    }

    /// Set the drawn body dimensions.
    #[must_use]
    pub fn with_body(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length = length;
        self.width = width;
        self.height = height;
        self
    }

    /// Offset of the body mesh origin from the center of gravity,
    /// in the `(x, up, z)` space a renderer places the mesh in.
    ///
    /// The mesh is centered on its own box, so it sits half its height
    /// above ground and is shifted along the body by `c - b`.
    #[must_use]
    pub fn mesh_offset(&self) -> Vector3<f64> {
        Vector3::new(
            self.cg_to_rear_axle - self.cg_to_front_axle,
            self.height / 2.0,
            0.0,
        )
    }

    /// Check the invariants `mass > 0`, `inertia > 0`, `b > 0`, `c > 0`.
    pub fn validate(&self) -> crate::Result<()> {
        let checks = [
            ("mass", self.mass),
            ("inertia", self.inertia),
            ("cg_to_front_axle", self.cg_to_front_axle),
            ("cg_to_rear_axle", self.cg_to_rear_axle),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(VehicleError::invalid_params(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        Ok(())
    }
}
