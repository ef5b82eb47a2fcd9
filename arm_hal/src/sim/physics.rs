//! Arm plant physics.
//!
//! `ArmDynamics` advances the joint state under an applied motor
//! voltage: DC-motor torque balance against gravity, semi-implicit
//! Euler integration (velocity first, then position with the new
//! velocity), and hard travel stops that clamp the angle and kill the
//! velocity.

use arm_common::hal::config::ArmConfig;
use arm_common::hal::driver::HalError;
use arm_common::hal::types::ArmState;
use tracing::warn;

/// Physics model of the single-jointed arm.
///
/// Pure over explicit state: `step` consumes a state and returns the
/// next one. The model itself holds only the validated configuration
/// and derived motor constants.
#[derive(Debug, Clone)]
pub struct ArmDynamics {
    config: ArmConfig,
    /// Torque constant [Nm/A], per motor.
    kt: f64,
    /// Back-EMF constant [rad/s per V].
    kv: f64,
    /// Combined winding resistance [Ω] (`num_motors` windings in parallel).
    resistance: f64,
}

impl ArmDynamics {
    /// Build the model, failing fast on invalid configuration.
    pub fn new(config: ArmConfig) -> Result<Self, HalError> {
        config.validate()?;
        let kt = config.motor.kt();
        let kv = config.motor.kv();
        let resistance = config.motor.resistance_ohms / config.motor.num_motors as f64;
        Ok(Self {
            config,
            kt,
            kv,
            resistance,
        })
    }

    /// Advance `state` by `dt_seconds` under `applied_voltage_volts`.
    ///
    /// Non-finite voltage or non-positive dt returns the state
    /// unchanged, so degenerate inputs never reach the held plant state.
    pub fn step(&self, state: ArmState, applied_voltage_volts: f64, dt_seconds: f64) -> ArmState {
        if !applied_voltage_volts.is_finite() || !dt_seconds.is_finite() || dt_seconds <= 0.0 {
            warn!(
                "Degenerate step input ignored: voltage={}, dt={}",
                applied_voltage_volts, dt_seconds
            );
            return state;
        }

        let net_torque = self.motor_torque(state.velocity_rad_per_sec, applied_voltage_volts)
            + self.gravity_torque(state.angle_rads);
        let accel = net_torque / self.config.moment_of_inertia_kg_m2;

        // Semi-implicit Euler: velocity first, position with the new velocity.
        let mut velocity = state.velocity_rad_per_sec + accel * dt_seconds;
        let mut angle = state.angle_rads + velocity * dt_seconds;

        // Hard mechanical stop: clamp the angle and kill the velocity.
        if angle <= self.config.min_angle_rads {
            angle = self.config.min_angle_rads;
            velocity = 0.0;
        } else if angle >= self.config.max_angle_rads {
            angle = self.config.max_angle_rads;
            velocity = 0.0;
        }

        ArmState {
            angle_rads: angle,
            velocity_rad_per_sec: velocity,
        }
    }

    /// Motor current draw [A] for the given state and applied voltage.
    ///
    /// Same current term as the torque balance, folded with the sign of
    /// the applied voltage; feeds downstream battery modeling.
    pub fn current_draw_amps(&self, state: &ArmState, voltage: f64) -> f64 {
        if !voltage.is_finite() || voltage == 0.0 {
            return 0.0;
        }
        let motor_speed = state.velocity_rad_per_sec * self.config.gear_reduction;
        let current = (voltage - motor_speed / self.kv) / self.resistance;
        current * voltage.signum()
    }

    /// Travel limits [rad] as (min, max).
    pub fn travel_limits(&self) -> (f64, f64) {
        (self.config.min_angle_rads, self.config.max_angle_rads)
    }

    /// Motor torque at the joint [Nm].
    ///
    /// Standard DC-motor relation: back-EMF at the motor shaft opposes
    /// the applied voltage, the resulting winding current produces
    /// torque, and the gear reduction multiplies it to the joint.
    fn motor_torque(&self, velocity_rad_per_sec: f64, voltage: f64) -> f64 {
        let motor_speed = velocity_rad_per_sec * self.config.gear_reduction;
        let current = (voltage - motor_speed / self.kv) / self.resistance;
        self.config.gear_reduction * self.kt * current
    }

    /// Gravity torque about the pivot [Nm].
    ///
    /// The arm is lumped as a uniform rod (J = m·L²/3, COM at L/2), so
    /// the configured inertia implies the mass: τ = −(3·J·g)/(2·L)·cos θ.
    fn gravity_torque(&self, angle_rads: f64) -> f64 {
        -1.5 * self.config.moment_of_inertia_kg_m2 * self.config.gravity_m_per_s2
            * angle_rads.cos()
            / self.config.arm_length_m
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
