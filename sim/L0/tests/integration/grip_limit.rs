//! The optional lateral force clamp.

use sim_vehicle::{DynamicsConfig, TireConfig, VehicleDynamicsModel, VehicleParameters};

const DT: f64 = 1.0 / 60.0;

fn hard_turn(config: DynamicsConfig) -> (VehicleDynamicsModel, f64) {
    let mut car =
        VehicleDynamicsModel::with_parameters(VehicleParameters::default(), config).unwrap();
    car.set_throttle(500.0);
    for _ in 0..300 {
        car.update(DT);
    }

    car.set_steer_angle(0.5);
    let mut peak_yaw_rate: f64 = 0.0;
    for _ in 0..120 {
        car.update(DT);
        peak_yaw_rate = peak_yaw_rate.max(car.angular_velocity().abs());
    }
    (car, peak_yaw_rate)
}

#[test]
fn default_matches_explicitly_unclamped() {
    let (default_car, _) = hard_turn(DynamicsConfig::default());
    let (unclamped_car, _) =
        hard_turn(DynamicsConfig::default().tires(TireConfig::default().unclamped()));

    assert_eq!(default_car.state(), unclamped_car.state());
}

#[test]
fn clamp_reduces_peak_yaw_rate() {
    let (_, unclamped) = hard_turn(DynamicsConfig::default());
    let (clamped_car, clamped) = hard_turn(DynamicsConfig::grip_limited());

    assert!(clamped < unclamped, "clamped {clamped} vs unclamped {unclamped}");
    assert!(clamped_car.state().is_finite());
}

#[test]
fn clamp_bounds_every_lateral_force() {
    let (mut car, _) = hard_turn(DynamicsConfig::grip_limited());
    let limit = TireConfig::REFERENCE_MAX_GRIP;

    for _ in 0..120 {
        let forces = car.forces();
        let bound = limit * forces.axle_load + 1e-9;
        assert!(forces.lateral_front.y.abs() <= bound);
        assert!(forces.lateral_rear.y.abs() <= bound);
        car.update(DT);
    }
}

#[test]
fn clamp_is_inactive_for_gentle_steering() {
    let gentle = |config: DynamicsConfig| {
        let mut car =
            VehicleDynamicsModel::with_parameters(VehicleParameters::default(), config).unwrap();
        car.set_throttle(100.0);
        for _ in 0..300 {
            car.update(DT);
        }
        car.set_steer_angle(0.01);
        for _ in 0..60 {
            car.update(DT);
        }
        *car.state()
    };

    assert_eq!(
        gentle(DynamicsConfig::default()),
        gentle(DynamicsConfig::grip_limited())
    );
}
