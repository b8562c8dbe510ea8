//! Force and torque evaluation for the single-track car model.
//!
//! [`compute_forces`] evaluates everything a step needs, from the body-frame
//! velocity to the world-frame acceleration, without touching state. The
//! model's `update` integrates its result, so the numbers reported here are
//! exactly the numbers that move the car.
//!
//! # Frames
//!
//! The body frame uses x as the longitudinal (forward) axis and y as the
//! lateral axis, while in the world plane y is the forward distance at zero
//! heading. The map between the two,
//!
//! ```text
//! body.x =  sin(h)·w.x + cos(h)·w.y
//! body.y =  cos(h)·w.x − sin(h)·w.y
//! ```
//!
//! is a reflection and therefore its own inverse: [`world_to_body`] and
//! [`body_to_world`] compute the same thing.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{ControlInputs, DynamicsConfig, VehicleParameters, VehicleState};

/// Sign of `x` as `-1`, `0` or `1`. Zero (and `NaN`) map to zero.
#[must_use]
pub fn signum(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
fn swap_frame(v: Vector2<f64>, sn: f64, cs: f64) -> Vector2<f64> {
    Vector2::new(cs * v.y + sn * v.x, -sn * v.y + cs * v.x)
}

/// Express a world-plane vector in the body frame of a car at `heading`.
#[must_use]
pub fn world_to_body(world: Vector2<f64>, heading: f64) -> Vector2<f64> {
    let (sn, cs) = heading.sin_cos();
    swap_frame(world, sn, cs)
}

/// Express a body-frame vector in the world plane.
#[must_use]
pub fn body_to_world(body: Vector2<f64>, heading: f64) -> Vector2<f64> {
    let (sn, cs) = heading.sin_cos();
    swap_frame(body, sn, cs)
}

/// Slip angles of both axles (rad).
///
/// All four angles are zero unless the car moves forward in its body frame;
/// stationary or reversing cars generate no cornering force.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlipAngles {
    /// Angle added at each axle by the yaw rotation.
    pub rotation: f64,
    /// Angle between the body axis and the direction of travel.
    pub side_slip: f64,
    /// Front axle slip, including steer.
    pub front: f64,
    /// Rear axle slip.
    pub rear: f64,
}

impl SlipAngles {
    /// Compute slip angles from body velocity, the yaw-induced lateral
    /// speed at the axles and the front steer angle.
    #[must_use]
    pub fn compute(velocity_body: Vector2<f64>, yaw_speed: f64, steer_angle: f64) -> Self {
        if velocity_body.x <= 0.0 {
            return Self::default();
        }

        let rotation = yaw_speed.atan2(velocity_body.x);
        let side_slip = velocity_body.y.atan2(velocity_body.x);
        Self {
            rotation,
            side_slip,
            front: side_slip + rotation - steer_angle,
            rear: side_slip - rotation,
        }
    }
}

/// Every intermediate quantity of one force evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ForceBreakdown {
    /// Velocity in the body frame.
    pub velocity_body: Vector2<f64>,
    /// Lateral speed at the axles due to yaw.
    pub yaw_speed: f64,
    /// Per-axle slip angles.
    pub slip: SlipAngles,
    /// Normal load on each axle (N).
    pub axle_load: f64,
    /// Front tire lateral force, body frame. The x component is always zero.
    pub lateral_front: Vector2<f64>,
    /// Rear tire lateral force, body frame.
    pub lateral_rear: Vector2<f64>,
    /// Drive and brake force, body frame.
    pub traction: Vector2<f64>,
    /// Rolling resistance plus drag, body frame.
    pub resistance: Vector2<f64>,
    /// Net force, body frame.
    pub force: Vector2<f64>,
    /// Net yaw torque.
    pub torque: f64,
    /// Linear acceleration, body frame.
    pub acceleration_body: Vector2<f64>,
    /// Linear acceleration, world plane.
    pub acceleration_world: Vector2<f64>,
    /// Yaw acceleration.
    pub angular_acceleration: f64,
}

/// Evaluate forces, torque and accelerations for the given state and inputs.
#[must_use]
pub fn compute_forces(
    params: &VehicleParameters,
    config: &DynamicsConfig,
    state: &VehicleState,
    inputs: &ControlInputs,
) -> ForceBreakdown {
    let (sn, cs) = state.heading.sin_cos();
    let velocity_body = swap_frame(state.velocity, sn, cs);

    let yaw_speed = params.wheelbase() * 0.5 * state.angular_velocity;
    let slip = SlipAngles::compute(velocity_body, yaw_speed, inputs.steer_angle);

    let axle_load = config.axle_load(params.mass);
    let tires = &config.tires;

    // Tires only push sideways before steer projection.
    let lateral_front = Vector2::new(
        0.0,
        tires.saturate(tires.front_cornering_stiffness * slip.front) * axle_load,
    );
    let lateral_rear = Vector2::new(
        0.0,
        tires.saturate(tires.rear_cornering_stiffness * slip.rear) * axle_load,
    );

    let traction = Vector2::new(
        config.traction_gain * (inputs.throttle - inputs.brake * signum(velocity_body.x)),
        0.0,
    );

    let resistance =
        velocity_body.map(|v| -(config.rolling_resistance * v + config.drag * v * v.abs()));

    let (steer_sn, steer_cs) = inputs.steer_angle.sin_cos();
    let force = Vector2::new(
        traction.x - steer_sn * lateral_front.x + lateral_rear.x + resistance.x,
        traction.y + steer_cs * lateral_front.y + lateral_rear.y + resistance.y,
    );

    let torque =
        params.cg_to_front_axle * lateral_front.y - params.cg_to_rear_axle * lateral_rear.y;

    let acceleration_body = force / params.mass;
    let angular_acceleration = torque / params.inertia;
    let acceleration_world = swap_frame(acceleration_body, sn, cs);

    ForceBreakdown {
        velocity_body,
        yaw_speed,
        slip,
        axle_load,
        lateral_front,
        lateral_rear,
        traction,
        resistance,
        force,
        torque,
        acceleration_body,
        acceleration_world,
        angular_acceleration,
    }
}
