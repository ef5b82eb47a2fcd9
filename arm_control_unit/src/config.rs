//! TOML configuration loader with validation.
//!
//! Loads `ControlUnitConfig` from a single TOML file: loop timing,
//! default gains and setpoint, the parameter-store file, and the
//! embedded `[arm]` plant configuration. Validates parameter bounds
//! before anything else runs.

use std::path::{Path, PathBuf};

use arm_common::hal::config::ArmConfig;
use arm_common::hal::consts::DEFAULT_CYCLE_TIME_US;
use serde::{Deserialize, Serialize};

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    /// File I/O error.
    IoError(String),
    /// TOML parse error.
    ParseError(String),
    /// Parameter validation error.
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "config I/O error: {e}"),
            Self::ParseError(e) => write!(f, "config parse error: {e}"),
            Self::ValidationError(e) => write!(f, "config validation: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ─── Config Types ───────────────────────────────────────────────────

/// Default function for cycle_time_us
fn default_cycle_time_us() -> u32 {
    DEFAULT_CYCLE_TIME_US
}

/// Default function for param_reload_cycles
fn default_param_reload_cycles() -> u32 {
    50
}

/// Default function for kp
fn default_kp() -> f64 {
    50.0
}

/// Default function for setpoint_degrees
fn default_setpoint_degrees() -> f64 {
    75.0
}

/// Startup gains and setpoint (`[control]` table).
///
/// These are only defaults: setpoint and kp are re-read from the
/// parameter store at reload points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Proportional gain [V/rad].
    #[serde(default = "default_kp")]
    pub kp: f64,
    /// Derivative gain [V·s/rad].
    #[serde(default)]
    pub kd: f64,
    /// Target angle [deg].
    #[serde(default = "default_setpoint_degrees")]
    pub setpoint_degrees: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            kp: default_kp(),
            kd: 0.0,
            setpoint_degrees: default_setpoint_degrees(),
        }
    }
}

/// Control unit configuration loaded from `arm.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlUnitConfig {
    /// Control/simulation cycle time in microseconds.
    /// Defaults to DEFAULT_CYCLE_TIME_US (20 ms) if omitted.
    #[serde(default = "default_cycle_time_us")]
    pub cycle_time_us: u32,

    /// Parameter-store file; omit to run with a transient in-memory store.
    #[serde(default)]
    pub params_file: Option<PathBuf>,

    /// Reload setpoint/kp from the store every this many cycles.
    #[serde(default = "default_param_reload_cycles")]
    pub param_reload_cycles: u32,

    /// Startup gains and setpoint.
    #[serde(default)]
    pub control: ControlConfig,

    /// Plant configuration.
    pub arm: ArmConfig,
}

impl ControlUnitConfig {
    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cycle_time_us == 0 {
            return Err("cycle_time_us must be greater than 0".to_string());
        }
        if self.param_reload_cycles == 0 {
            return Err("param_reload_cycles must be greater than 0".to_string());
        }
        if !self.control.kp.is_finite() || self.control.kp < 0.0 {
            return Err(format!(
                "control.kp must be finite and not negative (got {})",
                self.control.kp
            ));
        }
        if !self.control.kd.is_finite() || self.control.kd < 0.0 {
            return Err(format!(
                "control.kd must be finite and not negative (got {})",
                self.control.kd
            ));
        }
        if !self.control.setpoint_degrees.is_finite() {
            return Err(format!(
                "control.setpoint_degrees must be finite (got {})",
                self.control.setpoint_degrees
            ));
        }
        self.arm.validate().map_err(|e| e.to_string())
    }

    /// Cycle period in seconds.
    pub fn cycle_period_seconds(&self) -> f64 {
        self.cycle_time_us as f64 / 1_000_000.0
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the control unit configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ControlUnitConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("failed to read {}: {e}", path.display())))?;

    let config: ControlUnitConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.validate().map_err(ConfigError::ValidationError)?;

    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────
