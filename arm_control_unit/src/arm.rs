//! Arm controller orchestration.
//!
//! `ArmController` ties gains, setpoint, sensor, and actuator into one
//! periodic control cycle. It drives any `ArmHardware` backend, so the
//! simulation and real hardware are interchangeable here.
//!
//! Out-of-range setpoints clamp to the nearest travel bound; the clamp
//! is logged once per offending value, not reported to the caller.

use arm_common::hal::consts::{PARAM_KEY_KP, PARAM_KEY_SETPOINT_DEGREES};
use arm_common::hal::driver::{ArmHardware, HalError};
use arm_common::params::ParameterStore;
use arm_common::telemetry::TelemetryFrame;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ControlUnitConfig;
use crate::control::pd::{PdController, PdGains};

/// Orchestrates one arm joint: PD loop plus a hardware pair.
pub struct ArmController {
    controller: PdController,
    hardware: Box<dyn ArmHardware>,
    /// Travel limits [rad] used to clamp incoming setpoints.
    min_angle_rads: f64,
    max_angle_rads: f64,
    /// Target angle [deg].
    setpoint_degrees: f64,
    /// Last voltage written to the actuator [V].
    commanded_voltage: f64,
    /// Setpoint already reported as out of travel (warn throttle).
    clamp_warned_degrees: Option<f64>,
    closed: bool,
}

impl ArmController {
    /// Build the controller around an already-constructed backend.
    pub fn new(hardware: Box<dyn ArmHardware>, config: &ControlUnitConfig) -> Self {
        let gains = PdGains {
            kp: config.control.kp,
            kd: config.control.kd,
        };
        Self {
            controller: PdController::new(gains, config.cycle_period_seconds()),
            hardware,
            min_angle_rads: config.arm.min_angle_rads,
            max_angle_rads: config.arm.max_angle_rads,
            setpoint_degrees: config.control.setpoint_degrees,
            commanded_voltage: 0.0,
            clamp_warned_degrees: None,
            closed: false,
        }
    }

    /// Run one control cycle: sense → compute → actuate.
    pub fn control_step(&mut self) {
        let measured = self.hardware.angle_rads();
        if !measured.is_finite() {
            warn!("Non-finite angle reading; commanding 0 V");
            self.hardware.set_voltage(0.0);
            self.commanded_voltage = 0.0;
            return;
        }

        let setpoint_rads = self.clamped_setpoint_rads();
        let output = self.controller.compute(measured, setpoint_rads);
        self.hardware.set_voltage(output);
        self.commanded_voltage = output;
    }

    /// Advance simulated physics by `dt` (no-op on hardware backends).
    pub fn simulation_step(&mut self, dt: Duration) {
        self.hardware.advance(dt);
    }

    /// Command zero output and clear the recorded command.
    ///
    /// Idempotent; the plant state is left alone.
    pub fn stop(&mut self) {
        self.hardware.stop();
        self.commanded_voltage = 0.0;
    }

    /// Seed the parameter store once with the current defaults.
    ///
    /// Existing stored values are never overwritten.
    pub fn init_parameters(&self, store: &mut dyn ParameterStore) {
        store.init_double(PARAM_KEY_SETPOINT_DEGREES, self.setpoint_degrees);
        store.init_double(PARAM_KEY_KP, self.controller.gains().kp);
    }

    /// Reload setpoint and kp from the store.
    ///
    /// kp is forwarded to the control law only when it changed.
    pub fn load_parameters(&mut self, store: &dyn ParameterStore) {
        self.setpoint_degrees =
            store.get_double(PARAM_KEY_SETPOINT_DEGREES, self.setpoint_degrees);

        let gains = self.controller.gains();
        let kp = store.get_double(PARAM_KEY_KP, gains.kp);
        if kp != gains.kp {
            info!("kp updated: {} -> {}", gains.kp, kp);
            self.controller.set_gains(kp, gains.kd);
        }
    }

    /// Update the target angle [deg]; non-finite values are ignored.
    pub fn set_setpoint_degrees(&mut self, degrees: f64) {
        if !degrees.is_finite() {
            warn!("Ignoring non-finite setpoint {degrees}");
            return;
        }
        self.setpoint_degrees = degrees;
    }

    /// Current target angle [deg], as stored (before travel clamping).
    pub fn setpoint_degrees(&self) -> f64 {
        self.setpoint_degrees
    }

    /// Replace the proportional gain, keeping kd.
    pub fn set_kp(&mut self, kp: f64) {
        let gains = self.controller.gains();
        self.controller.set_gains(kp, gains.kd);
    }

    /// Replace the derivative gain, keeping kp.
    pub fn set_kd(&mut self, kd: f64) {
        let gains = self.controller.gains();
        self.controller.set_gains(gains.kp, kd);
    }

    /// Last voltage written to the actuator [V].
    pub fn commanded_voltage(&self) -> f64 {
        self.commanded_voltage
    }

    /// Snapshot for the telemetry sink.
    ///
    /// `battery_voltage` is left at 0; the cycle runner fills it from
    /// the battery model.
    pub fn telemetry_frame(&mut self) -> TelemetryFrame {
        TelemetryFrame {
            angle_rads: self.hardware.angle_rads(),
            velocity_rad_per_sec: self.hardware.velocity_rad_per_sec(),
            setpoint_rads: self.clamped_setpoint_rads(),
            commanded_voltage: self.commanded_voltage,
            current_draw_amps: self.hardware.current_draw_amps(),
            battery_voltage: 0.0,
        }
    }

    /// Deterministic teardown: stop the motor, then release the backend.
    ///
    /// Subsequent calls are no-ops.
    pub fn close(&mut self) -> Result<(), HalError> {
        if self.closed {
            return Ok(());
        }
        self.stop();
        self.closed = true;
        debug!("Arm controller closed");
        self.hardware.shutdown()
    }

    /// Active setpoint [rad], clamped to the travel limits.
    fn clamped_setpoint_rads(&mut self) -> f64 {
        let requested = self.setpoint_degrees.to_radians();
        let clamped = requested.clamp(self.min_angle_rads, self.max_angle_rads);
        if clamped != requested {
            if self.clamp_warned_degrees != Some(self.setpoint_degrees) {
                warn!(
                    "Setpoint {:.3} rad outside travel, clamped to {:.3} rad",
                    requested, clamped
                );
                self.clamp_warned_degrees = Some(self.setpoint_degrees);
            }
        } else {
            self.clamp_warned_degrees = None;
        }
        clamped
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
