//! Rest and straight-line behavior.

use approx::assert_relative_eq;
use nalgebra::Vector2;
use sim_vehicle::{DynamicsConfig, VehicleDynamicsModel};

/// Speed where `gain * throttle = rolling * v + drag * v²`.
fn terminal_speed(throttle: f64) -> f64 {
    let config = DynamicsConfig::default();
    let (a, b, c) = (
        config.drag,
        config.rolling_resistance,
        -config.traction_gain * throttle,
    );
    (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a)
}

#[test]
fn zero_inputs_stay_at_rest() {
    let mut car = VehicleDynamicsModel::new();

    for dt in [0.0, 1e-4, 1.0 / 60.0, 0.5, 3.0] {
        for _ in 0..50 {
            car.update(dt);
        }
    }

    assert_eq!(car.position_world(), Vector2::zeros());
    assert_eq!(car.velocity_world(), Vector2::zeros());
    assert_eq!(car.heading(), 0.0);
    assert_eq!(car.angular_velocity(), 0.0);
}

#[test]
fn one_step_of_throttle_from_rest() {
    let mut car = VehicleDynamicsModel::new();
    car.set_steer_angle(0.0);
    car.set_throttle(1.0);
    car.set_brake(0.0);

    car.update(0.1);

    // 100 N on 1500 kg for 0.1 s, along world +y.
    assert_relative_eq!(car.velocity_world().x, 0.0, epsilon = 1e-15);
    assert_relative_eq!(car.velocity_world().y, 0.1 * 100.0 / 1500.0, epsilon = 1e-12);
    assert_relative_eq!(car.velocity_world().y, 0.006_667, epsilon = 1e-6);
}

#[test]
fn straight_line_never_yaws_and_approaches_terminal_speed() {
    let mut car = VehicleDynamicsModel::new();
    car.set_throttle(1.0);

    let mut previous = 0.0;
    for _ in 0..4000 {
        car.update(0.1);

        let v = car.velocity_world().y;
        assert!(v >= previous, "speed dropped from {previous} to {v}");
        previous = v;

        assert_eq!(car.angular_velocity(), 0.0);
        assert_eq!(car.heading(), 0.0);
        assert_eq!(car.velocity_world().x, 0.0);
    }

    assert_relative_eq!(car.velocity_world().y, terminal_speed(1.0), epsilon = 1e-4);
    assert!(car.velocity_world().y < terminal_speed(1.0));
}

#[test]
fn straight_line_at_an_angle() {
    // Rotated start: the car drives along its own heading.
    let heading = std::f64::consts::FRAC_PI_2;
    let mut car = VehicleDynamicsModel::new();
    car.set_state(sim_vehicle::VehicleState::at_rest(Vector2::zeros(), heading));
    car.set_throttle(50.0);

    for _ in 0..120 {
        car.update(1.0 / 60.0);
    }

    let v = car.velocity_world();
    assert!(v.x > 1.0);
    assert_relative_eq!(v.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(car.heading(), heading, epsilon = 1e-12);
}

#[test]
fn hud_readouts_follow_state() {
    let mut car = VehicleDynamicsModel::new();
    car.set_throttle(100.0);
    car.set_steer_angle(-10.0_f64.to_radians());

    for _ in 0..30 {
        car.update(1.0 / 60.0);
    }

    let pose = car.pose();
    assert_relative_eq!(pose.speed, car.velocity_world().norm(), epsilon = 1e-12);
    assert_relative_eq!(pose.steer_degrees(), -10.0, epsilon = 1e-9);
    assert_relative_eq!(car.steer_angle_degrees(), -10.0, epsilon = 1e-9);
    assert_eq!(pose.placement().y, 0.0);
    assert_eq!(pose.placement().z, car.position_world().y);
}
