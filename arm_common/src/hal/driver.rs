//! Hardware capability traits and error types.
//!
//! This module defines:
//! - `MotorActuator` / `PositionSensor` traits - The capability seam
//!   between control logic and hardware
//! - `ArmHardware` trait - Combined backend interface with lifecycle hooks
//! - `HalError` enum - Error types for HAL operations

use std::time::Duration;
use thiserror::Error;

/// Error types for HAL operations.
#[derive(Debug, Clone, Error)]
pub enum HalError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Hardware communication error
    #[error("Hardware communication error: {0}")]
    CommunicationError(String),

    /// Parameter persistence error
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// Telemetry sink error
    #[error("Telemetry error: {0}")]
    TelemetryError(String),
}

/// Voltage-commanded motor output.
///
/// An actuator reports no feedback itself; pairing it with a
/// [`PositionSensor`] is what closes the loop.
pub trait MotorActuator {
    /// Apply a voltage command to the motor.
    fn set_voltage(&mut self, volts: f64);

    /// Command zero output.
    fn stop(&mut self);
}

/// Angular position and velocity feedback.
///
/// Reads take `&mut self`: real encoder drivers drain receive buffers on
/// read, and the simulated encoder draws noise samples.
pub trait PositionSensor {
    /// Current angle in radians.
    fn angle_rads(&mut self) -> f64;

    /// Current angular velocity in radians per second.
    fn velocity_rad_per_sec(&mut self) -> f64;
}

/// Combined hardware backend: one device exposing both capabilities.
///
/// The controller drives any backend through this trait, which makes
/// real hardware and the simulation interchangeable without touching
/// control logic.
///
/// # Lifecycle
///
/// 1. Construction (backend-specific)
/// 2. `advance()` every simulation period - simulation backends
///    integrate physics; hardware backends keep the default no-op
///    because the real plant advances on its own
/// 3. `shutdown()` - release device handles; safe to call on every
///    exit path
pub trait ArmHardware: MotorActuator + PositionSensor {
    /// Advance simulated physics by `dt` under the last commanded voltage.
    fn advance(&mut self, _dt: Duration) {}

    /// Motor current draw in amps (0.0 where the backend cannot measure it).
    fn current_draw_amps(&self) -> f64 {
        0.0
    }

    /// Release any device or display handles.
    fn shutdown(&mut self) -> Result<(), HalError> {
        Ok(())
    }
}
