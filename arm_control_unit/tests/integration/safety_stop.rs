//! Travel-limit and stop behavior tests.

use super::{cycle_n, make_config, make_controller, DT};

#[test]
fn out_of_range_setpoint_drives_to_the_upper_stop_and_no_further() {
    // 720° is far beyond the 255° travel; the active setpoint clamps
    // to the bound and the plant never leaves its travel range.
    let config = make_config(50.0, 0.0, 720.0, 0.0);
    let max = config.arm.max_angle_rads;
    let mut arm = make_controller(&config);

    for _ in 0..600 {
        arm.control_step();
        arm.simulation_step(DT);
        let angle = arm.telemetry_frame().angle_rads;
        assert!(
            angle <= max + 1e-12,
            "angle {:.4} exceeded the upper stop {:.4}",
            angle,
            max
        );
    }

    let frame = arm.telemetry_frame();
    assert!((frame.angle_rads - max).abs() < 0.05);
}

#[test]
fn stop_zeroes_the_command_every_time() {
    let config = make_config(40.0, 0.0, 45.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 50);
    assert!(arm.commanded_voltage().abs() > 0.0);

    for _ in 0..5 {
        arm.stop();
        assert_eq!(arm.commanded_voltage(), 0.0);
    }
}

#[test]
fn stop_leaves_the_plant_coasting_not_reset() {
    let config = make_config(40.0, 0.0, 45.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 10);
    let before = arm.telemetry_frame();
    assert!(before.velocity_rad_per_sec.abs() > 0.0);

    arm.stop();
    arm.simulation_step(DT);

    // Unpowered: the plant keeps its state and only back-EMF brakes it.
    let after = arm.telemetry_frame();
    assert!(after.velocity_rad_per_sec.abs() <= before.velocity_rad_per_sec.abs());
    assert!(after.velocity_rad_per_sec.abs() > 0.0);
    assert_eq!(arm.commanded_voltage(), 0.0);
}

#[test]
fn close_is_safe_on_every_exit_path() {
    let config = make_config(40.0, 0.0, 45.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 10);
    assert!(arm.close().is_ok());
    // Second teardown is a no-op.
    assert!(arm.close().is_ok());
    assert_eq!(arm.commanded_voltage(), 0.0);
}
