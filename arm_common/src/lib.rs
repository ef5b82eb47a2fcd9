//! Arm Common Library
//!
//! This crate provides shared types and configuration for the arm-core
//! workspace crates.
//!
//! # Module Structure
//!
//! - [`hal`] - Hardware capability traits, plant types, and configuration
//! - [`params`] - Tunable-parameter store (named doubles with defaults)
//! - [`telemetry`] - Best-effort display sink for per-cycle state

pub mod hal;
pub mod params;
pub mod telemetry;
