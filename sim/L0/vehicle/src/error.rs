//! Error types for vehicle simulation.
//!
//! [`VehicleDynamicsModel::update`](crate::VehicleDynamicsModel::update) never
//! fails. These errors come from the checked entry points: construction with
//! custom parameters, [`try_update`](crate::VehicleDynamicsModel::try_update)
//! and [`run_for`](crate::VehicleDynamicsModel::run_for).

use thiserror::Error;

/// Errors reported at the boundary of the vehicle model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VehicleError {
    /// Timestep was negative, `NaN` or infinite.
    #[error("invalid timestep: {0} (must be non-negative and finite)")]
    InvalidTimestep(f64),

    /// A control input was `NaN` or infinite.
    #[error("non-finite control input {field}: {value}")]
    NonFiniteInput {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Physical parameters violate the model invariants.
    #[error("invalid vehicle parameters: {reason}")]
    InvalidParameters {
        /// Description of what's wrong.
        reason: String,
    },

    /// Invalid dynamics or controls configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// State became `NaN` or `Inf` after a step.
    #[error("simulation diverged: {reason}")]
    Diverged {
        /// Description of what went wrong.
        reason: String,
    },
}

impl VehicleError {
    /// Create a diverged error.
    #[must_use]
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self::Diverged {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameters error.
    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParameters {
            reason: reason.into(),
        }
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Check if this is a configuration or parameter error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. } | Self::InvalidParameters { .. }
        )
    }

    /// Check if this error rejected an input before stepping.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestep(_) | Self::NonFiniteInput { .. }
        )
    }
}
