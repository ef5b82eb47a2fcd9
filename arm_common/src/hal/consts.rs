//! HAL constants: parameter-store keys and timing defaults.

/// Parameter-store key for the arm setpoint in degrees.
pub const PARAM_KEY_SETPOINT_DEGREES: &str = "arm/setpoint_degrees";

/// Parameter-store key for the proportional gain.
pub const PARAM_KEY_KP: &str = "arm/kp";

/// Default control/simulation cycle time in microseconds (20 ms).
pub const DEFAULT_CYCLE_TIME_US: u32 = 20_000;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/arm.toml";
