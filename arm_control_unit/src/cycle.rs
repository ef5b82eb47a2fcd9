//! Periodic cycle runner.
//!
//! Drives the control and simulation steps at a fixed period from a
//! single thread: control step → simulation step → best-effort
//! telemetry → timing statistics → sleep for the remainder. Setpoint
//! and kp are re-read from the parameter store on a configurable
//! cadence, so the loop can be tuned while it runs.

use arm_common::hal::driver::HalError;
use arm_common::params::ParameterStore;
use arm_common::telemetry::TelemetrySink;
use arm_hal::sim::battery;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::arm::ArmController;
use crate::config::ControlUnitConfig;

/// Timing statistics for loop monitoring.
#[derive(Debug, Default)]
pub struct TimingStats {
    /// Number of cycles executed
    pub cycle_count: u64,
    /// Number of cycles that exceeded the target period
    pub overruns: u64,
    /// Maximum observed cycle time
    pub max_cycle_time_us: u64,
    /// Sum of cycle times for average calculation
    pub total_cycle_time_us: u64,
}

/// Owns the controller, parameter store, and telemetry sink, and runs
/// the fixed-period loop until the running flag clears.
pub struct CycleRunner {
    controller: ArmController,
    store: Box<dyn ParameterStore>,
    telemetry: Box<dyn TelemetrySink>,
    /// Configured cycle period.
    cycle_time: Duration,
    /// Parameter reload cadence [cycles].
    param_reload_cycles: u64,
    /// Running flag for loop control (cleared by signal handlers).
    running: Arc<AtomicBool>,
    stats: TimingStats,
}

impl CycleRunner {
    /// Create a runner; seeds the parameter store and picks up any
    /// values already stored there.
    pub fn new(
        mut controller: ArmController,
        mut store: Box<dyn ParameterStore>,
        telemetry: Box<dyn TelemetrySink>,
        config: &ControlUnitConfig,
    ) -> Self {
        controller.init_parameters(store.as_mut());
        controller.load_parameters(store.as_ref());

        Self {
            controller,
            store,
            telemetry,
            cycle_time: Duration::from_micros(config.cycle_time_us as u64),
            param_reload_cycles: config.param_reload_cycles as u64,
            running: Arc::new(AtomicBool::new(true)),
            stats: TimingStats::default(),
        }
    }

    /// Get the running flag for signal handlers.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Timing statistics.
    pub fn stats(&self) -> &TimingStats {
        &self.stats
    }

    /// Enter the fixed-period loop.
    ///
    /// Returns after the running flag clears and the controller has
    /// been torn down.
    pub fn run(&mut self) -> Result<(), HalError> {
        info!(
            "Entering control loop (cycle_time={}µs)",
            self.cycle_time.as_micros()
        );

        while self.running.load(Ordering::SeqCst) {
            let cycle_start = Instant::now();

            self.cycle_body();

            let elapsed = cycle_start.elapsed();
            let cycle_time_us = elapsed.as_micros() as u64;
            self.stats.cycle_count += 1;
            self.stats.total_cycle_time_us += cycle_time_us;
            if cycle_time_us > self.stats.max_cycle_time_us {
                self.stats.max_cycle_time_us = cycle_time_us;
            }

            if elapsed > self.cycle_time {
                self.stats.overruns += 1;
                if self.stats.overruns <= 10 || self.stats.overruns % 1000 == 0 {
                    warn!(
                        "Cycle overrun #{}: {}µs (target {}µs)",
                        self.stats.overruns,
                        cycle_time_us,
                        self.cycle_time.as_micros()
                    );
                }
            }

            if let Some(remaining) = self.cycle_time.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }

        info!(
            "Control loop stopped after {} cycles (overruns: {})",
            self.stats.cycle_count, self.stats.overruns
        );
        self.controller.close()
    }

    /// One cycle: reload → control → simulate → publish.
    fn cycle_body(&mut self) {
        if self.stats.cycle_count % self.param_reload_cycles == 0 {
            self.controller.load_parameters(self.store.as_ref());
        }

        self.controller.control_step();
        self.controller.simulation_step(self.cycle_time);

        // Telemetry is best-effort: log and keep cycling.
        let mut frame = self.controller.telemetry_frame();
        frame.battery_voltage = battery::loaded_voltage(frame.current_draw_amps);
        if let Err(e) = self.telemetry.publish(&frame) {
            debug!("Telemetry publish failed: {e}");
        }
    }
}
