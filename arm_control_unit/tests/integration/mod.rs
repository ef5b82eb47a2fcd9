//! Shared harness for the integration tests: a reference arm
//! configuration and a controller wired to the seeded simulation
//! backend.

mod control_accuracy;
mod hot_reload;
mod safety_stop;

use arm_common::hal::config::{estimate_moi, ArmConfig, MotorConfig};
use arm_control_unit::arm::ArmController;
use arm_control_unit::config::{ControlConfig, ControlUnitConfig};
use arm_hal::sim::SimulatedArm;
use std::time::Duration;

/// Nominal cycle period (20 ms).
pub const DT: Duration = Duration::from_millis(20);

/// Reference arm: 8 kg, 0.762 m, two Vex 775 Pro through 200:1,
/// travel -75° to 255°.
pub fn make_config(kp: f64, kd: f64, setpoint_degrees: f64, gravity: f64) -> ControlUnitConfig {
    ControlUnitConfig {
        cycle_time_us: 20_000,
        params_file: None,
        param_reload_cycles: 50,
        control: ControlConfig {
            kp,
            kd,
            setpoint_degrees,
        },
        arm: ArmConfig {
            gear_reduction: 200.0,
            moment_of_inertia_kg_m2: estimate_moi(0.762, 8.0),
            arm_length_m: 0.762,
            gravity_m_per_s2: gravity,
            min_angle_rads: -1.309,
            max_angle_rads: 4.451,
            encoder_noise_std_dev_rads: 0.0,
            motor: MotorConfig::vex_775_pro(2),
        },
    }
}

/// Controller around a deterministic simulated arm starting at rest.
pub fn make_controller(config: &ControlUnitConfig) -> ArmController {
    let hardware = SimulatedArm::with_seed(config.arm.clone(), 7).unwrap();
    ArmController::new(Box::new(hardware), config)
}

/// Run `n` control + simulation cycles.
pub fn cycle_n(arm: &mut ArmController, n: usize) {
    for _ in 0..n {
        arm.control_step();
        arm.simulation_step(DT);
    }
}
