//! Plant state types shared between control and simulation.

/// Instantaneous state of the arm joint.
///
/// `angle_rads` stays within the configured travel limits after every
/// simulation step; only the plant model mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    /// Angle from horizontal in radians.
    pub angle_rads: f64,
    /// Angular velocity in radians per second.
    pub velocity_rad_per_sec: f64,
}

impl ArmState {
    /// State at rest at the given angle.
    pub fn at_rest(angle_rads: f64) -> Self {
        Self {
            angle_rads,
            velocity_rad_per_sec: 0.0,
        }
    }
}

impl Default for ArmState {
    fn default() -> Self {
        Self::at_rest(0.0)
    }
}
