//! Control accuracy validation tests.
//!
//! Verifies the PD loop converges the simulated arm onto its setpoint
//! and that the commanded voltage dies away at steady state.

use super::{cycle_n, make_config, make_controller};

#[test]
fn pd_loop_reaches_45_degrees_within_300_cycles() {
    // Arm at rest at 0 rad, setpoint 45°, kp = 40, kd = 4, gravity off.
    let config = make_config(40.0, 4.0, 45.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 300);

    let frame = arm.telemetry_frame();
    let target = 45.0_f64.to_radians();
    assert!(
        (frame.angle_rads - target).abs() < 0.01,
        "angle {:.4} not within 0.01 rad of {:.4}",
        frame.angle_rads,
        target
    );
    assert!(
        arm.commanded_voltage().abs() < 0.5,
        "steady-state voltage {:.3} V too large",
        arm.commanded_voltage()
    );
}

#[test]
fn proportional_only_loop_converges() {
    // kd = 0: back-EMF alone damps the loop.
    let config = make_config(40.0, 0.0, 45.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 500);

    let frame = arm.telemetry_frame();
    let target = 45.0_f64.to_radians();
    assert!(
        (frame.angle_rads - target).abs() < 1e-3,
        "angle {:.5} not within 1e-3 rad of {:.5}",
        frame.angle_rads,
        target
    );
    assert!(arm.commanded_voltage().abs() < 0.5);
}

#[test]
fn gravity_causes_a_small_proportional_droop() {
    // A pure P loop holding against gravity settles below the target:
    // the residual error is what generates the holding torque.
    let config = make_config(50.0, 0.0, 75.0, 9.81);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 1000);

    let frame = arm.telemetry_frame();
    let target = 75.0_f64.to_radians();
    let droop = target - frame.angle_rads;
    assert!(
        droop > 1e-3 && droop < 0.05,
        "unexpected droop {:.5} rad",
        droop
    );
    // The holding command is small but nonzero.
    assert!(arm.commanded_voltage() > 0.0);
    assert!(arm.commanded_voltage() < 1.0);
}

#[test]
fn setpoint_change_mid_run_is_tracked() {
    let config = make_config(40.0, 4.0, 30.0, 0.0);
    let mut arm = make_controller(&config);

    cycle_n(&mut arm, 200);
    arm.set_setpoint_degrees(-30.0);
    cycle_n(&mut arm, 300);

    let frame = arm.telemetry_frame();
    let target = (-30.0_f64).to_radians();
    assert!((frame.angle_rads - target).abs() < 0.01);
}
