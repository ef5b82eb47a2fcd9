//! Telemetry sink for display and visualization.
//!
//! The control loop publishes one frame per cycle. Publishing is
//! best-effort: a failing sink is logged by the caller and must never
//! interrupt control.

use crate::hal::driver::HalError;
use tracing::trace;

/// One cycle's worth of displayable state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryFrame {
    /// Measured arm angle [rad].
    pub angle_rads: f64,
    /// Measured angular velocity [rad/s].
    pub velocity_rad_per_sec: f64,
    /// Active setpoint [rad].
    pub setpoint_rads: f64,
    /// Last commanded motor voltage [V].
    pub commanded_voltage: f64,
    /// Motor current draw [A].
    pub current_draw_amps: f64,
    /// Estimated loaded battery voltage [V].
    pub battery_voltage: f64,
}

/// Destination for per-cycle display values.
pub trait TelemetrySink {
    /// Publish one frame.
    ///
    /// Errors are reported to the caller, which logs them and keeps
    /// cycling; control never stops for telemetry.
    fn publish(&mut self, frame: &TelemetryFrame) -> Result<(), HalError>;
}

/// Sink that emits frames as trace events.
#[derive(Debug, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn publish(&mut self, frame: &TelemetryFrame) -> Result<(), HalError> {
        trace!(
            "arm: angle={:.4}rad vel={:.4}rad/s setpoint={:.4}rad u={:.2}V i={:.1}A vbat={:.2}V",
            frame.angle_rads,
            frame.velocity_rad_per_sec,
            frame.setpoint_rads,
            frame.commanded_voltage,
            frame.current_draw_amps,
            frame.battery_voltage
        );
        Ok(())
    }
}
