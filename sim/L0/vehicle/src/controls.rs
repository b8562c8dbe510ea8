//! Driver-side input shaping: gears, pedal ramps and steering range.
//!
//! The model accepts any input value. Everything that bounds or ramps the
//! inputs lives here, owned by the caller that polls the input devices:
//!
//! - [`Gear`] selects the throttle ceiling.
//! - [`ControlLimits`] holds the gear and the per-frame ramp rates.
//! - [`DriverCommand`] is one frame of abstract device state.
//! - [`DriverController`] turns commands into model inputs.
//!
//! # Example
//!
//! ```
//! use sim_vehicle::VehicleDynamicsModel;
//! use sim_vehicle::controls::{DriverCommand, DriverController};
//!
//! let mut car = VehicleDynamicsModel::new();
//! let mut driver = DriverController::default();
//!
//! for _ in 0..10 {
//!     driver.apply(&DriverCommand::accelerate(), &mut car);
//!     car.update(1.0 / 60.0);
//! }
//!
//! // First gear caps the throttle at 100.
//! assert_eq!(car.throttle(), 100.0);
//! ```

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{VehicleDynamicsModel, VehicleError};

/// Gearbox position. Each gear only raises the throttle ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gear {
    /// Throttle up to 100.
    #[default]
    First,
    /// Throttle up to 500.
    Second,
    /// Throttle up to 1000.
    Third,
    /// Throttle up to 2000.
    Fourth,
}

impl Gear {
    /// Throttle ceiling in this gear.
    #[must_use]
    pub const fn max_throttle(self) -> f64 {
        match self {
            Self::First => 100.0,
            Self::Second => 500.0,
            Self::Third => 1000.0,
            Self::Fourth => 2000.0,
        }
    }

    /// Next gear up, staying in top gear.
    #[must_use]
    pub const fn shift_up(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::Third,
            Self::Third | Self::Fourth => Self::Fourth,
        }
    }

    /// Next gear down, staying in first.
    #[must_use]
    pub const fn shift_down(self) -> Self {
        match self {
            Self::First | Self::Second => Self::First,
            Self::Third => Self::Second,
            Self::Fourth => Self::Third,
        }
    }

    /// Gear number, starting at 1.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }
}

impl std::fmt::Display for Gear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gear {}", self.number())
    }
}

/// A gear change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shift {
    /// One gear up.
    Up,
    /// One gear down.
    Down,
}

/// Input limits and ramp rates applied per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlLimits {
    /// Current gear.
    pub gear: Gear,
    /// Throttle added per frame while accelerating.
    pub throttle_rise: f64,
    /// Throttle removed per frame while coasting.
    pub throttle_decay: f64,
    /// Throttle removed per frame while actively decelerating.
    pub throttle_cut: f64,
    /// Brake value while the brake is held.
    pub brake_force: f64,
    /// Steer angle at full lock (rad).
    pub max_steer: f64,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            gear: Gear::First,
            throttle_rise: 20.0,
            throttle_decay: 5.0,
            throttle_cut: 20.0,
            brake_force: 1000.0,
            max_steer: 30.0_f64.to_radians(),
        }
    }
}

impl ControlLimits {
    /// Throttle ceiling of the current gear.
    #[must_use]
    pub fn max_throttle(&self) -> f64 {
        self.gear.max_throttle()
    }

    /// Start in the given gear.
    #[must_use]
    pub fn with_gear(mut self, gear: Gear) -> Self {
        self.gear = gear;
        self
    }

    /// Set the steering range (rad at full lock).
    #[must_use]
    pub fn with_max_steer(mut self, max_steer: f64) -> Self {
        self.max_steer = max_steer;
        self
    }

    /// Validate the limits.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("throttle_rise", self.throttle_rise),
            ("throttle_decay", self.throttle_decay),
            ("throttle_cut", self.throttle_cut),
            ("brake_force", self.brake_force),
            ("max_steer", self.max_steer),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VehicleError::invalid_config(format!(
                    "{name} must be non-negative and finite"
                )));
            }
        }
        Ok(())
    }
}

/// One frame of driver intent, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriverCommand {
    /// Accelerator held.
    pub accelerate: bool,
    /// Decelerate held.
    pub decelerate: bool,
    /// Brake held.
    pub brake: bool,
    /// Steering in `[-1, 1]`, scaled by [`ControlLimits::max_steer`]. Clamped
    /// when applied.
    pub steer_axis: f64,
    /// Gear change requested this frame.
    pub shift: Option<Shift>,
}

impl DriverCommand {
    /// Hold the accelerator and nothing else.
    #[must_use]
    pub fn accelerate() -> Self {
        Self {
            accelerate: true,
            ..Default::default()
        }
    }

    /// Hold the brake and nothing else.
    #[must_use]
    pub fn brake() -> Self {
        Self {
            brake: true,
            ..Default::default()
        }
    }

    /// Set the steering axis.
    #[must_use]
    pub fn steer(mut self, axis: f64) -> Self {
        self.steer_axis = axis;
        self
    }

    /// Request a gear change.
    #[must_use]
    pub fn shift(mut self, shift: Shift) -> Self {
        self.shift = Some(shift);
        self
    }
}

/// Steering axis from a horizontal pointer position across a window.
///
/// The window center is straight ahead, the left edge is `+1` and the right
/// edge is `-1`. A window without a positive finite width gives `0`.
#[must_use]
pub fn steer_axis_from_pointer(x: f64, width: f64) -> f64 {
    if !width.is_finite() || width <= 0.0 {
        return 0.0;
    }
    -2.0 * (x - width / 2.0) / width
}

/// Applies [`DriverCommand`]s to a model under [`ControlLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriverController {
    limits: ControlLimits,
}

impl DriverController {
    /// Create a controller with the given limits.
    #[must_use]
    pub fn new(limits: ControlLimits) -> Self {
        Self { limits }
    }

    /// Create a controller after validating `limits`.
    ///
    /// # Errors
    ///
    /// Returns an error if a ramp rate, the brake force or the steering
    /// range is negative or non-finite.
    pub fn try_new(limits: ControlLimits) -> crate::Result<Self> {
        limits.validate()?;
        Ok(Self::new(limits))
    }

    /// Current limits.
    #[must_use]
    pub fn limits(&self) -> &ControlLimits {
        &self.limits
    }

    /// Current gear.
    #[must_use]
    pub fn gear(&self) -> Gear {
        self.limits.gear
    }

    /// Apply one frame of driver intent to the model's inputs.
    ///
    /// In order: gear change, accelerator (or coast decay), decelerate,
    /// brake, steering. Holding the brake zeroes the throttle.
    pub fn apply(&mut self, command: &DriverCommand, model: &mut VehicleDynamicsModel) {
        if let Some(shift) = command.shift {
            let from = self.limits.gear;
            self.limits.gear = match shift {
                Shift::Up => from.shift_up(),
                Shift::Down => from.shift_down(),
            };
            if from != self.limits.gear {
                debug!(%from, to = %self.limits.gear, "gear change");
            }
        }

        let limits = self.limits;

        if command.accelerate {
            model.add_throttle(limits.throttle_rise);
            if model.throttle() > limits.max_throttle() {
                model.set_throttle(limits.max_throttle());
            }
        } else {
            model.add_throttle(-limits.throttle_decay);
            if model.throttle() < 0.0 {
                model.set_throttle(0.0);
            }
        }

        if command.decelerate {
            model.add_throttle(-limits.throttle_cut);
            if model.throttle() < 0.0 {
                model.set_throttle(0.0);
            }
        }

        if command.brake {
            model.set_brake(limits.brake_force);
            model.set_throttle(0.0);
        } else {
            model.set_brake(0.0);
        }

        model.set_steer_angle(limits.max_steer * command.steer_axis.clamp(-1.0, 1.0));
    }
}
