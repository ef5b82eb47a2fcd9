//! Arm configuration types.
//!
//! This module contains configuration types for the arm plant:
//! - `ArmConfig` - Physical parameters of the joint (loaded from arm.toml)
//! - `MotorConfig` - DC-motor characteristic of the driving gearbox
//!
//! Both are immutable once constructed. `validate()` rejects physically
//! meaningless parameters before any control or simulation code runs.

use crate::hal::driver::HalError;
use serde::{Deserialize, Serialize};

/// Default function for gravity_m_per_s2
fn default_gravity() -> f64 {
    9.81
}

/// Default function for nominal_voltage_volts
fn default_nominal_voltage() -> f64 {
    12.0
}

/// Default function for num_motors
fn default_num_motors() -> u32 {
    1
}

/// DC-motor characteristic, per motor.
///
/// `num_motors` identical motors share the load in one gearbox; the
/// derived constants fold the count in where it matters (winding
/// resistance halves with two motors, torque and back-EMF constants
/// stay per-motor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Stall torque [Nm].
    pub stall_torque_nm: f64,
    /// Stall current [A].
    pub stall_current_amps: f64,
    /// Free (no-load) current [A].
    #[serde(default)]
    pub free_current_amps: f64,
    /// Free (no-load) speed [rad/s].
    pub free_speed_rad_per_sec: f64,
    /// Winding resistance [Ω].
    pub resistance_ohms: f64,
    /// Nominal supply voltage [V].
    #[serde(default = "default_nominal_voltage")]
    pub nominal_voltage_volts: f64,
    /// Number of identical motors in the gearbox.
    #[serde(default = "default_num_motors")]
    pub num_motors: u32,
}

impl MotorConfig {
    /// Vex 775 Pro characteristic with `num_motors` motors.
    pub fn vex_775_pro(num_motors: u32) -> Self {
        Self {
            stall_torque_nm: 0.71,
            stall_current_amps: 134.0,
            free_current_amps: 0.7,
            free_speed_rad_per_sec: 1961.0,
            resistance_ohms: 12.0 / 134.0,
            nominal_voltage_volts: 12.0,
            num_motors,
        }
    }

    /// Torque constant kt [Nm/A].
    pub fn kt(&self) -> f64 {
        self.stall_torque_nm / self.stall_current_amps
    }

    /// Back-EMF constant kv [rad/s per V].
    pub fn kv(&self) -> f64 {
        self.free_speed_rad_per_sec
            / (self.nominal_voltage_volts - self.resistance_ohms * self.free_current_amps)
    }

    /// Validate the motor characteristic.
    pub fn validate(&self) -> Result<(), HalError> {
        if self.stall_torque_nm <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "stall_torque_nm must be greater than 0 (got {})",
                self.stall_torque_nm
            )));
        }
        if self.stall_current_amps <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "stall_current_amps must be greater than 0 (got {})",
                self.stall_current_amps
            )));
        }
        if self.free_current_amps < 0.0 {
            return Err(HalError::ConfigError(format!(
                "free_current_amps must not be negative (got {})",
                self.free_current_amps
            )));
        }
        if self.free_speed_rad_per_sec <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "free_speed_rad_per_sec must be greater than 0 (got {})",
                self.free_speed_rad_per_sec
            )));
        }
        if self.resistance_ohms <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "resistance_ohms must be greater than 0 (got {})",
                self.resistance_ohms
            )));
        }
        if self.nominal_voltage_volts <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "nominal_voltage_volts must be greater than 0 (got {})",
                self.nominal_voltage_volts
            )));
        }
        if self.num_motors == 0 {
            return Err(HalError::ConfigError(
                "num_motors must be at least 1".to_string(),
            ));
        }
        // Back-EMF denominator must stay positive or kv is meaningless.
        if self.nominal_voltage_volts <= self.resistance_ohms * self.free_current_amps {
            return Err(HalError::ConfigError(
                "free_current_amps * resistance_ohms must stay below nominal_voltage_volts"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Physical configuration of the single-jointed arm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Gear reduction between motor and joint (> 1 multiplies torque).
    pub gear_reduction: f64,
    /// Moment of inertia about the pivot [kg·m²].
    pub moment_of_inertia_kg_m2: f64,
    /// Arm length from pivot to tip [m].
    pub arm_length_m: f64,
    /// Gravitational acceleration [m/s²]; 0 disables gravity torque.
    #[serde(default = "default_gravity")]
    pub gravity_m_per_s2: f64,
    /// Minimum travel angle [rad] (hard mechanical stop).
    pub min_angle_rads: f64,
    /// Maximum travel angle [rad] (hard mechanical stop).
    pub max_angle_rads: f64,
    /// Encoder angle noise standard deviation [rad]; 0 disables noise.
    #[serde(default)]
    pub encoder_noise_std_dev_rads: f64,
    /// Motor characteristic of the driving gearbox.
    pub motor: MotorConfig,
}

impl ArmConfig {
    /// Validate the arm configuration.
    ///
    /// # Validation Rules
    /// 1. `gear_reduction`, `moment_of_inertia_kg_m2`, `arm_length_m` > 0
    /// 2. `gravity_m_per_s2` >= 0
    /// 3. `min_angle_rads` < `max_angle_rads`
    /// 4. `encoder_noise_std_dev_rads` >= 0 and finite
    /// 5. Motor characteristic valid
    pub fn validate(&self) -> Result<(), HalError> {
        if !self.gear_reduction.is_finite() || self.gear_reduction <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "gear_reduction must be greater than 0 (got {})",
                self.gear_reduction
            )));
        }
        if !self.moment_of_inertia_kg_m2.is_finite() || self.moment_of_inertia_kg_m2 <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "moment_of_inertia_kg_m2 must be greater than 0 (got {})",
                self.moment_of_inertia_kg_m2
            )));
        }
        if !self.arm_length_m.is_finite() || self.arm_length_m <= 0.0 {
            return Err(HalError::ConfigError(format!(
                "arm_length_m must be greater than 0 (got {})",
                self.arm_length_m
            )));
        }
        if !self.gravity_m_per_s2.is_finite() || self.gravity_m_per_s2 < 0.0 {
            return Err(HalError::ConfigError(format!(
                "gravity_m_per_s2 must not be negative (got {})",
                self.gravity_m_per_s2
            )));
        }
        if self.min_angle_rads >= self.max_angle_rads {
            return Err(HalError::ConfigError(format!(
                "min_angle_rads ({}) must be below max_angle_rads ({})",
                self.min_angle_rads, self.max_angle_rads
            )));
        }
        if !self.encoder_noise_std_dev_rads.is_finite() || self.encoder_noise_std_dev_rads < 0.0 {
            return Err(HalError::ConfigError(format!(
                "encoder_noise_std_dev_rads must not be negative (got {})",
                self.encoder_noise_std_dev_rads
            )));
        }
        self.motor.validate()
    }
}

/// Moment of inertia of a uniform rod pivoting at one end [kg·m²].
pub fn estimate_moi(length_m: f64, mass_kg: f64) -> f64 {
    mass_kg * length_m * length_m / 3.0
}
