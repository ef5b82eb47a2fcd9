//! Simulation backend.
//!
//! `SimulatedArm` implements the `ArmHardware` capability pair against
//! the physics model in [`physics`]. Voltage commands are latched and
//! only take effect when `advance()` integrates the plant, mirroring an
//! actuator that holds its last command between control cycles. The
//! simulated encoder injects bounded Gaussian noise into angle reads;
//! velocity reads are noise-free.

pub mod battery;
pub mod physics;

use arm_common::hal::config::ArmConfig;
use arm_common::hal::driver::{ArmHardware, HalError, MotorActuator, PositionSensor};
use arm_common::hal::types::ArmState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;
use tracing::{debug, warn};

use physics::ArmDynamics;

/// Noise samples are clamped to this many standard deviations.
const NOISE_CLAMP_SIGMA: f64 = 3.0;

/// Software stand-in for the motor controller + encoder pair.
pub struct SimulatedArm {
    dynamics: ArmDynamics,
    state: ArmState,
    /// Most recent commanded voltage; applied on every `advance`.
    commanded_voltage: f64,
    /// Encoder angle noise; `None` when the configured σ is 0.
    noise: Option<Normal<f64>>,
    noise_std_dev_rads: f64,
    rng: StdRng,
}

impl SimulatedArm {
    /// Create the backend at rest, entropy-seeded.
    pub fn new(config: ArmConfig) -> Result<Self, HalError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(config: ArmConfig, seed: u64) -> Result<Self, HalError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ArmConfig, rng: StdRng) -> Result<Self, HalError> {
        let noise_std_dev_rads = config.encoder_noise_std_dev_rads;
        let dynamics = ArmDynamics::new(config)?;
        let noise = if noise_std_dev_rads > 0.0 {
            let dist = Normal::new(0.0, noise_std_dev_rads).map_err(|e| {
                HalError::ConfigError(format!("Invalid encoder noise std dev: {e}"))
            })?;
            Some(dist)
        } else {
            None
        };

        // Start at rest at 0 rad, pulled inside the travel range when
        // 0 is outside it.
        let (min, max) = dynamics.travel_limits();
        let state = ArmState::at_rest(0.0_f64.clamp(min, max));

        Ok(Self {
            dynamics,
            state,
            commanded_voltage: 0.0,
            noise,
            noise_std_dev_rads,
            rng,
        })
    }

    /// True plant state, bypassing sensor noise.
    pub fn true_state(&self) -> ArmState {
        self.state
    }

    /// Last latched voltage command [V].
    pub fn commanded_voltage(&self) -> f64 {
        self.commanded_voltage
    }

    /// Place the plant at rest at `angle_rads`, clamped into travel.
    pub fn reset(&mut self, angle_rads: f64) {
        let (min, max) = self.dynamics.travel_limits();
        self.state = ArmState::at_rest(angle_rads.clamp(min, max));
    }
}

impl MotorActuator for SimulatedArm {
    fn set_voltage(&mut self, volts: f64) {
        if !volts.is_finite() {
            warn!("Non-finite voltage command treated as 0 V");
            self.commanded_voltage = 0.0;
            return;
        }
        self.commanded_voltage = volts;
    }

    fn stop(&mut self) {
        self.commanded_voltage = 0.0;
    }
}

impl PositionSensor for SimulatedArm {
    fn angle_rads(&mut self) -> f64 {
        match &self.noise {
            Some(dist) => {
                // One bounded sample per read; never folded back into
                // the true state.
                let bound = NOISE_CLAMP_SIGMA * self.noise_std_dev_rads;
                let sample = dist.sample(&mut self.rng).clamp(-bound, bound);
                self.state.angle_rads + sample
            }
            None => self.state.angle_rads,
        }
    }

    fn velocity_rad_per_sec(&mut self) -> f64 {
        self.state.velocity_rad_per_sec
    }
}

impl ArmHardware for SimulatedArm {
    fn advance(&mut self, dt: Duration) {
        self.state = self
            .dynamics
            .step(self.state, self.commanded_voltage, dt.as_secs_f64());
    }

    fn current_draw_amps(&self) -> f64 {
        self.dynamics
            .current_draw_amps(&self.state, self.commanded_voltage)
    }

    fn shutdown(&mut self) -> Result<(), HalError> {
        debug!("Simulated arm shut down");
        self.commanded_voltage = 0.0;
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
