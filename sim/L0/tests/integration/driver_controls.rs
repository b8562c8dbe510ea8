//! Driving the model through the controls layer, one command per frame.

use approx::assert_relative_eq;
use sim_vehicle::controls::{
    steer_axis_from_pointer, ControlLimits, DriverCommand, DriverController, Gear, Shift,
};
use sim_vehicle::VehicleDynamicsModel;

const DT: f64 = 1.0 / 60.0;

fn drive(
    driver: &mut DriverController,
    car: &mut VehicleDynamicsModel,
    command: DriverCommand,
    frames: usize,
) {
    for _ in 0..frames {
        driver.apply(&command, car);
        car.update(DT);
    }
}

#[test]
fn higher_gear_reaches_higher_speed() {
    let mut first_car = VehicleDynamicsModel::new();
    let mut first = DriverController::default();
    drive(&mut first, &mut first_car, DriverCommand::accelerate(), 1200);

    let mut top_car = VehicleDynamicsModel::new();
    let mut top = DriverController::new(ControlLimits::default().with_gear(Gear::Fourth));
    drive(&mut top, &mut top_car, DriverCommand::accelerate(), 1200);

    assert_eq!(first_car.throttle(), 100.0);
    assert_eq!(top_car.throttle(), 2000.0);
    assert!(top_car.speed() > 2.0 * first_car.speed());
}

#[test]
fn shifting_through_the_gearbox() {
    let mut car = VehicleDynamicsModel::new();
    let mut driver = DriverController::default();

    for expected in [Gear::Second, Gear::Third, Gear::Fourth, Gear::Fourth] {
        drive(
            &mut driver,
            &mut car,
            DriverCommand::accelerate().shift(Shift::Up),
            1,
        );
        assert_eq!(driver.gear(), expected);
    }

    drive(&mut driver, &mut car, DriverCommand::accelerate(), 200);
    assert_eq!(car.throttle(), Gear::Fourth.max_throttle());

    // Shifting down caps the throttle again on the next accelerating frame.
    drive(
        &mut driver,
        &mut car,
        DriverCommand::accelerate().shift(Shift::Down),
        1,
    );
    assert_eq!(driver.gear(), Gear::Third);
    assert_eq!(car.throttle(), Gear::Third.max_throttle());
}

#[test]
fn releasing_the_pedal_coasts_down() {
    let mut car = VehicleDynamicsModel::new();
    let mut driver = DriverController::default();
    drive(&mut driver, &mut car, DriverCommand::accelerate(), 10);
    assert_eq!(car.throttle(), 100.0);

    drive(&mut driver, &mut car, DriverCommand::default(), 10);
    assert_eq!(car.throttle(), 50.0);

    drive(&mut driver, &mut car, DriverCommand::default(), 30);
    assert_eq!(car.throttle(), 0.0);
}

#[test]
fn braking_through_controls_cuts_throttle() {
    let mut car = VehicleDynamicsModel::new();
    let mut driver = DriverController::default();
    drive(&mut driver, &mut car, DriverCommand::accelerate(), 300);
    let cruising = car.speed();

    // Holding both pedals: the brake wins every frame.
    let mut both = DriverCommand::accelerate();
    both.brake = true;
    drive(&mut driver, &mut car, both, 10);

    assert_eq!(car.throttle(), 0.0);
    assert_eq!(car.brake(), 1000.0);
    assert!(car.speed() < cruising);
}

#[test]
fn pointer_steering_turns_the_car() {
    let width = 800.0;
    let mut car = VehicleDynamicsModel::new();
    let mut driver = DriverController::default();

    // Pointer halfway between the left edge and the center.
    let axis = steer_axis_from_pointer(200.0, width);
    drive(&mut driver, &mut car, DriverCommand::accelerate().steer(axis), 120);

    assert_relative_eq!(car.steer_angle_degrees(), 15.0, epsilon = 1e-9);
    assert!(car.heading() > 0.0);

    let mut mirrored = VehicleDynamicsModel::new();
    let mut driver = DriverController::default();
    let axis = steer_axis_from_pointer(600.0, width);
    drive(&mut driver, &mut mirrored, DriverCommand::accelerate().steer(axis), 120);

    assert_relative_eq!(mirrored.heading(), -car.heading(), epsilon = 1e-9);
}
