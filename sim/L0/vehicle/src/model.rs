//! The vehicle dynamics model and its time stepping.
//!
//! # Example
//!
//! ```
//! use sim_vehicle::VehicleDynamicsModel;
//!
//! let mut car = VehicleDynamicsModel::new();
//! car.set_throttle(1.0);
//! car.update(0.1);
//!
//! // Forward is world +y at zero heading.
//! assert!(car.velocity_world().y > 0.0);
//! assert_eq!(car.angular_velocity(), 0.0);
//! ```

use nalgebra::Vector2;
use tracing::{trace, warn};

use crate::forces::{compute_forces, ForceBreakdown};
use crate::pose::VehiclePose;
use crate::{ControlInputs, DynamicsConfig, VehicleError, VehicleParameters, VehicleState};

/// Upper bound on the number of steps a single [`VehicleDynamicsModel::run_for`]
/// call may take.
pub const MAX_RUN_STEPS: usize = 10_000_000;

/// Single-track car: fixed parameters, mutable state and current inputs.
///
/// One instance per simulated car. The model does no synchronization and
/// keeps no shared state, so each instance must be stepped by one caller.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDynamicsModel {
    params: VehicleParameters,
    config: DynamicsConfig,
    state: VehicleState,
    inputs: ControlInputs,
}

impl Default for VehicleDynamicsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleDynamicsModel {
    /// The reference car at rest at the origin with all inputs zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: VehicleParameters::default(),
            config: DynamicsConfig::default(),
            state: VehicleState::default(),
            inputs: ControlInputs::default(),
        }
    }

    /// A car with custom parameters and force model, at rest at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if either `params` or `config` fails validation.
    pub fn with_parameters(
        params: VehicleParameters,
        config: DynamicsConfig,
    ) -> crate::Result<Self> {
        params.validate()?;
        config.validate()?;
        Ok(Self {
            params,
            config,
            state: VehicleState::default(),
            inputs: ControlInputs::default(),
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Never fails. `dt` is used as given, without clamping or substeps.
    /// Non-finite `dt` or inputs propagate into the state; use
    /// [`try_update`](Self::try_update) where they may occur.
    pub fn update(&mut self, dt: f64) {
        let forces = self.forces();
        integrate(&mut self.state, &forces, dt);
    }

    /// Advance by `dt` after checking the timestep and inputs.
    ///
    /// # Errors
    ///
    /// - [`VehicleError::InvalidTimestep`] if `dt` is negative or non-finite.
    /// - [`VehicleError::NonFiniteInput`] if an input is `NaN` or infinite.
    /// - [`VehicleError::Diverged`] if the state is non-finite after the
    ///   step. The diverged state is kept.
    ///
    /// Nothing is stepped when the timestep or inputs are rejected.
    pub fn try_update(&mut self, dt: f64) -> crate::Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            warn!(dt, "rejecting vehicle step with invalid timestep");
            return Err(VehicleError::InvalidTimestep(dt));
        }

        if let Err(err) = self.inputs.validate() {
            warn!(%err, "rejecting vehicle step");
            return Err(err);
        }

        self.update(dt);

        if !self.state.is_finite() {
            warn!(state = ?self.state, "vehicle state diverged");
            return Err(VehicleError::diverged(format!(
                "non-finite state after step of {dt} s"
            )));
        }

        Ok(())
    }

    /// Step with a fixed `dt` until `duration` seconds have elapsed.
    ///
    /// The last step is shortened so the total is exactly `duration`.
    /// Returns the state after every step.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` is not positive, if the run would take more
    /// than [`MAX_RUN_STEPS`] steps, or on the first failed step.
    pub fn run_for(&mut self, duration: f64, dt: f64) -> crate::Result<Vec<VehicleState>> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(VehicleError::InvalidTimestep(dt));
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(VehicleError::invalid_config(format!(
                "run duration must be non-negative and finite, got {duration}"
            )));
        }

        let ratio = duration / dt;
        if ratio > MAX_RUN_STEPS as f64 {
            return Err(VehicleError::invalid_config(format!(
                "run of {duration} s at dt {dt} s exceeds {MAX_RUN_STEPS} steps"
            )));
        }

        // Safe cast: 0 <= ratio <= MAX_RUN_STEPS
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full_steps = ratio.floor() as usize;
        #[allow(clippy::cast_precision_loss)]
        let remainder = duration - full_steps as f64 * dt;
        let has_partial = remainder > 1e-12;

        let mut states = Vec::with_capacity(full_steps + usize::from(has_partial));

        for i in 0..full_steps {
            self.try_update(dt)?;
            trace!(step = i + 1, position = ?self.state.position, "vehicle step");
            states.push(self.state);
        }
        if has_partial {
            self.try_update(remainder)?;
            trace!(step = full_steps + 1, remainder, "vehicle step");
            states.push(self.state);
        }

        Ok(states)
    }

    /// Forces and accelerations for the current state and inputs.
    #[must_use]
    pub fn forces(&self) -> ForceBreakdown {
        compute_forces(&self.params, &self.config, &self.state, &self.inputs)
    }

    /// Snapshot of what a renderer or HUD needs this frame.
    #[must_use]
    pub fn pose(&self) -> VehiclePose {
        VehiclePose {
            position: self.state.position,
            heading: self.state.heading,
            steer_angle: self.inputs.steer_angle,
            speed: self.state.speed(),
        }
    }

    // ---- inputs ---------------------------------------------------------

    /// Set the throttle.
    pub fn set_throttle(&mut self, throttle: f64) {
        self.inputs.throttle = throttle;
    }

    /// Add to the throttle (pedal ramping).
    pub fn add_throttle(&mut self, delta: f64) {
        self.inputs.throttle += delta;
    }

    /// Set the brake.
    pub fn set_brake(&mut self, brake: f64) {
        self.inputs.brake = brake;
    }

    /// Set the front wheel steer angle (rad).
    pub fn set_steer_angle(&mut self, steer_angle: f64) {
        self.inputs.steer_angle = steer_angle;
    }

    /// Replace all inputs.
    pub fn set_inputs(&mut self, inputs: ControlInputs) {
        self.inputs = inputs;
    }

    /// Replace the kinematic state.
    pub fn set_state(&mut self, state: VehicleState) {
        self.state = state;
    }

    /// Zero state and inputs, keeping parameters and configuration.
    pub fn reset(&mut self) {
        self.state = VehicleState::default();
        self.inputs = ControlInputs::default();
    }

    // ---- accessors ------------------------------------------------------

    /// Current throttle.
    #[must_use]
    pub fn throttle(&self) -> f64 {
        self.inputs.throttle
    }

    /// Current brake.
    #[must_use]
    pub fn brake(&self) -> f64 {
        self.inputs.brake
    }

    /// Current steer angle (rad).
    #[must_use]
    pub fn steer_angle(&self) -> f64 {
        self.inputs.steer_angle
    }

    /// Current steer angle in degrees.
    #[must_use]
    pub fn steer_angle_degrees(&self) -> f64 {
        self.inputs.steer_angle.to_degrees()
    }

    /// Body heading (rad, unwrapped).
    #[must_use]
    pub fn heading(&self) -> f64 {
        self.state.heading
    }

    /// Yaw rate (rad/s).
    #[must_use]
    pub fn angular_velocity(&self) -> f64 {
        self.state.angular_velocity
    }

    /// Position in the world plane.
    #[must_use]
    pub fn position_world(&self) -> Vector2<f64> {
        self.state.position
    }

    /// Velocity in the world plane.
    #[must_use]
    pub fn velocity_world(&self) -> Vector2<f64> {
        self.state.velocity
    }

    /// Magnitude of the world velocity.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.state.speed()
    }

    /// Full kinematic state.
    #[must_use]
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Current inputs.
    #[must_use]
    pub fn inputs(&self) -> &ControlInputs {
        &self.inputs
    }

    /// Physical parameters.
    #[must_use]
    pub fn params(&self) -> &VehicleParameters {
        &self.params
    }

    /// Force model configuration.
    #[must_use]
    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }
}

/// Semi-implicit Euler: velocities first, then positions from the new
/// velocities.
fn integrate(state: &mut VehicleState, forces: &ForceBreakdown, dt: f64) {
    state.velocity += forces.acceleration_world * dt;
    state.position += state.velocity * dt;

    state.angular_velocity += forces.angular_acceleration * dt;
    state.heading += state.angular_velocity * dt;
}
