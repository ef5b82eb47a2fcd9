//! Arm HAL
//!
//! Hardware backends for the arm control unit. Currently provides the
//! simulation backend: [`sim::SimulatedArm`] implements the
//! `ArmHardware` capability pair over a physics model of the joint, so
//! the control loop runs unchanged with or without real hardware.

pub mod sim;
