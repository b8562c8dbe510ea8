//! Configuration for the force model.
//!
//! Every coefficient the dynamics use lives here. [`DynamicsConfig::default`]
//! reproduces the reference car exactly; changing any value changes
//! trajectories.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::VehicleError;

/// Coefficients of the force model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DynamicsConfig {
    /// Gravitational acceleration used for axle load (m/s²).
    pub gravity: f64,
    /// Share of the weight carried by each axle.
    pub axle_load_fraction: f64,
    /// Force per unit of throttle or brake command (N).
    pub traction_gain: f64,
    /// Linear (rolling) resistance coefficient.
    pub rolling_resistance: f64,
    /// Quadratic (air) drag coefficient.
    pub drag: f64,
    /// Tire model.
    pub tires: TireConfig,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            axle_load_fraction: 0.5,
            traction_gain: 100.0,
            rolling_resistance: 30.0,
            drag: 5.0,
            tires: TireConfig::default(),
        }
    }
}

impl DynamicsConfig {
    /// Reference numerics with the tire clamp enabled at
    /// [`TireConfig::REFERENCE_MAX_GRIP`].
    #[must_use]
    pub fn grip_limited() -> Self {
        Self {
            tires: TireConfig::default().with_grip_limit(TireConfig::REFERENCE_MAX_GRIP),
            ..Default::default()
        }
    }

    /// Set the rolling resistance coefficient.
    #[must_use]
    pub fn rolling_resistance(mut self, coefficient: f64) -> Self {
        self.rolling_resistance = coefficient;
        self
    }

    /// Set the quadratic drag coefficient.
    #[must_use]
    pub fn drag(mut self, coefficient: f64) -> Self {
        self.drag = coefficient;
        self
    }

    /// Set the force produced per unit throttle/brake.
    #[must_use]
    pub fn traction_gain(mut self, gain: f64) -> Self {
        self.traction_gain = gain;
        self
    }

    /// Set the tire model.
    #[must_use]
    pub fn tires(mut self, tires: TireConfig) -> Self {
        self.tires = tires;
        self
    }

    /// Load carried by one axle for a vehicle of the given mass (N).
    #[must_use]
    pub fn axle_load(&self, mass: f64) -> f64 {
        mass * self.gravity * self.axle_load_fraction
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(VehicleError::invalid_config(
                "gravity must be positive and finite",
            ));
        }

        let fraction = self.axle_load_fraction;
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(VehicleError::invalid_config(
                "axle_load_fraction must be in (0, 1]",
            ));
        }

        for (name, value) in [
            ("traction_gain", self.traction_gain),
            ("rolling_resistance", self.rolling_resistance),
            ("drag", self.drag),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VehicleError::invalid_config(format!(
                    "{name} must be non-negative and finite"
                )));
            }
        }

        self.tires.validate()
    }
}

/// Linear cornering-stiffness tire model.
///
/// Lateral force per unit axle load is `stiffness * slip_angle`. Stiffness
/// is negative so the force opposes the slip.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TireConfig {
    /// Front axle cornering stiffness (per radian).
    pub front_cornering_stiffness: f64,
    /// Rear axle cornering stiffness (per radian).
    pub rear_cornering_stiffness: f64,
    /// Saturation of the normalized lateral force, applied before scaling
    /// by axle load. `None` leaves grip unbounded.
    ///
    /// Unbounded grip at large slip angles is not physical, but it is what
    /// the reference car does, so it stays the default.
    pub max_lateral_force: Option<f64>,
}

impl Default for TireConfig {
    fn default() -> Self {
        Self {
            front_cornering_stiffness: -5.0,
            rear_cornering_stiffness: -5.2,
            max_lateral_force: None,
        }
    }
}

impl TireConfig {
    /// Grip limit of the reference car when its clamp is switched on.
    pub const REFERENCE_MAX_GRIP: f64 = 2.0;

    /// Clamp normalized lateral force to `±limit`.
    #[must_use]
    pub fn with_grip_limit(mut self, limit: f64) -> Self {
        self.max_lateral_force = Some(limit);
        self
    }

    /// Remove the lateral force clamp.
    #[must_use]
    pub fn unclamped(mut self) -> Self {
        self.max_lateral_force = None;
        self
    }

    /// Set both cornering stiffnesses.
    #[must_use]
    pub fn stiffness(mut self, front: f64, rear: f64) -> Self {
        self.front_cornering_stiffness = front;
        self.rear_cornering_stiffness = rear;
        self
    }

    /// Apply the saturation policy to a normalized lateral force.
    #[must_use]
    pub fn saturate(&self, normalized: f64) -> f64 {
        match self.max_lateral_force {
            Some(limit) => normalized.clamp(-limit, limit),
            None => normalized,
        }
    }

    /// Validate the tire model.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.front_cornering_stiffness.is_finite() || !self.rear_cornering_stiffness.is_finite()
        {
            return Err(VehicleError::invalid_config(
                "cornering stiffness must be finite",
            ));
        }

        if let Some(limit) = self.max_lateral_force {
            if limit.is_nan() || limit <= 0.0 {
                return Err(VehicleError::invalid_config(format!(
                    "max_lateral_force must be positive, got {limit}"
                )));
            }
        }

        Ok(())
    }
}
