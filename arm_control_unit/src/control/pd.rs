//! Position PD controller.
//!
//! Proportional-derivative control on position error, with the
//! derivative estimated from consecutive errors at a fixed assumed
//! period. No output clamping: saturation is the actuator's concern,
//! the controller just emits a voltage-scale value.

use tracing::warn;

/// PD gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdGains {
    /// Proportional gain [V/rad].
    pub kp: f64,
    /// Derivative gain [V·s/rad] (0 = disabled).
    pub kd: f64,
}

/// Stateful PD controller.
///
/// Holds the previous position error for the derivative estimate.
/// `set_gains` swaps gains without touching that state, so a gain
/// change applies cleanly on the very next `compute`.
#[derive(Debug, Clone)]
pub struct PdController {
    gains: PdGains,
    /// Assumed period between `compute` calls [s].
    period_seconds: f64,
    /// Previous position error [rad].
    prev_error: f64,
}

impl PdController {
    /// Create a controller with the given gains and call period.
    pub fn new(gains: PdGains, period_seconds: f64) -> Self {
        Self {
            gains,
            period_seconds,
            prev_error: 0.0,
        }
    }

    /// Current gains.
    pub fn gains(&self) -> PdGains {
        self.gains
    }

    /// Replace both gains; takes effect on the next `compute`.
    pub fn set_gains(&mut self, kp: f64, kd: f64) {
        self.gains = PdGains { kp, kd };
    }

    /// Compute the drive command [V] from measurement and setpoint [rad].
    ///
    /// Non-finite inputs return the 0.0 V safe-stop sentinel and leave
    /// the previous-error state untouched.
    pub fn compute(&mut self, measurement_rads: f64, setpoint_rads: f64) -> f64 {
        if !measurement_rads.is_finite() || !setpoint_rads.is_finite() {
            warn!(
                "Non-finite controller input: measurement={}, setpoint={}",
                measurement_rads, setpoint_rads
            );
            return 0.0;
        }

        let error = setpoint_rads - measurement_rads;
        let derivative = if self.period_seconds > 0.0 {
            (error - self.prev_error) / self.period_seconds
        } else {
            0.0
        };
        self.prev_error = error;

        self.gains.kp * error + self.gains.kd * derivative
    }

    /// Reset the derivative state (previous error back to zero).
    pub fn reset(&mut self) {
        self.prev_error = 0.0;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
