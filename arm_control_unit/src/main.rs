//! Arm Control Unit
//!
//! Closed-loop position controller for a single-jointed arm, running
//! against the built-in simulation backend. The setpoint and the
//! proportional gain live in the parameter store, so both can be tuned
//! while the loop runs.

use arm_common::hal::consts::DEFAULT_CONFIG_PATH;
use arm_common::params::{FileParameterStore, MemoryParameterStore, ParameterStore};
use arm_common::telemetry::TracingTelemetry;
use arm_control_unit::arm::ArmController;
use arm_control_unit::config::load_config;
use arm_control_unit::cycle::CycleRunner;
use arm_hal::sim::SimulatedArm;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Arm Control Unit — single-joint position control loop
#[derive(Parser, Debug)]
#[command(name = "arm_control_unit")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Closed-loop arm position controller with simulation backend")]
struct Args {
    /// Path to configuration TOML.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Arm Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Arm Control Unit shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    info!(
        "Config OK: cycle_time={}µs, travel=[{:.3}, {:.3}] rad",
        config.cycle_time_us, config.arm.min_angle_rads, config.arm.max_angle_rads
    );

    let hardware = SimulatedArm::new(config.arm.clone())?;

    let store: Box<dyn ParameterStore> = match &config.params_file {
        Some(path) => Box::new(FileParameterStore::open(path)?),
        None => Box::new(MemoryParameterStore::default()),
    };

    let controller = ArmController::new(Box::new(hardware), &config);
    let mut runner = CycleRunner::new(controller, store, Box::new(TracingTelemetry), &config);

    // Graceful shutdown on Ctrl-C.
    let running = runner.running_flag();
    ctrlc::set_handler(move || {
        info!("Shutdown requested");
        running.store(false, Ordering::SeqCst);
    })?;

    runner.run()?;
    Ok(())
}

fn setup_tracing(args: &Args) {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if args.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
