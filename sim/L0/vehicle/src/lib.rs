//! Single-track car dynamics.
//!
//! This crate simulates one ground vehicle with a bicycle (single-track)
//! model: linear cornering-stiffness tires on two axles, throttle/brake
//! traction, rolling resistance and quadratic drag, integrated with
//! semi-implicit Euler once per frame.
//!
//! - [`VehicleDynamicsModel`] - Parameters, state, inputs and `update(dt)`
//! - [`VehicleParameters`] - Mass, inertia, axle positions, drawn dimensions
//! - [`DynamicsConfig`] / [`TireConfig`] - Force model coefficients
//! - [`forces`] - Force evaluation without stepping
//! - [`controls`] - Gears, pedal ramps and steering range for input layers
//! - [`VehiclePose`] - Per-frame snapshot for renderers
//!
//! # Layer 0
//!
//! Like the rest of `sim/L0`, this crate has **no engine or rendering
//! dependencies**. Window, camera, input polling and drawing belong to the
//! caller, which sets inputs before each `update` and reads the pose after.
//!
//! # Coordinate System
//!
//! The world is a plane. At zero heading the car faces world **+y**; the
//! body frame uses **x** forward and **y** lateral. Positive steer yaws the
//! car toward positive heading, which swings the nose from world +y toward
//! world +x. See [`forces`] for the exact transform.
//!
//! # Example
//!
//! ```
//! use sim_vehicle::VehicleDynamicsModel;
//!
//! let mut car = VehicleDynamicsModel::new();
//! car.set_throttle(100.0);
//! car.set_steer_angle(0.2);
//!
//! for _ in 0..600 {
//!     car.update(1.0 / 60.0);
//! }
//!
//! assert!(car.speed() > 0.0);
//! assert!(car.heading() > 0.0);
//! ```

#![doc(html_root_url = "https://docs.rs/sim-vehicle/0.7.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to nalgebra
    clippy::suboptimal_flops,      // mul_add style changes aren't always clearer
    clippy::missing_errors_doc,    // Error docs added where non-obvious
)]

mod config;
pub mod controls;
mod error;
pub mod forces;
mod model;
mod params;
mod pose;
mod state;

pub use config::{DynamicsConfig, TireConfig};
pub use error::VehicleError;
pub use forces::{compute_forces, ForceBreakdown, SlipAngles};
pub use model::{VehicleDynamicsModel, MAX_RUN_STEPS};
pub use params::VehicleParameters;
pub use pose::VehiclePose;
pub use state::{ControlInputs, VehicleState};

// Re-export math types for convenience
pub use nalgebra::{Vector2, Vector3};

/// Result type for vehicle operations.
pub type Result<T> = std::result::Result<T, VehicleError>;
