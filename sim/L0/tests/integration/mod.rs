//! Integration tests for the sim-vehicle crate.
//!
//! These tests drive the model end to end over many frames:
//! - Rest and straight-line acceleration
//! - Cornering direction and mirror symmetry
//! - Braking
//! - The optional lateral grip limit
//! - Driver controls (gears, pedal ramps, steering)
//! - Determinism and force-model properties (proptest)

pub mod driver_controls;
pub mod grip_limit;
pub mod straight_line;
