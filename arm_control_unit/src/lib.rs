//! Arm Control Unit Library
//!
//! Closed-loop position control for a single-jointed rotating arm.
//! Provides the PD control law, the orchestrating controller, the
//! configuration loader, and the fixed-period cycle runner.
//!
//! Hardware access goes through the `ArmHardware` capability pair from
//! `arm_common`, so the simulation backend in `arm_hal` and a real
//! motor driver are interchangeable without touching control logic.

pub mod arm;
pub mod config;
pub mod control;
pub mod cycle;
