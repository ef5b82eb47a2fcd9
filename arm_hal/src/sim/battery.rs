//! Loaded-battery-voltage estimate.
//!
//! Models the supply as an ideal 12 V source behind a small internal
//! resistance; heavy motor current sags the estimated rail voltage.

/// Nominal open-circuit battery voltage [V].
pub const NOMINAL_VOLTAGE: f64 = 12.0;

/// Battery internal resistance [Ω].
pub const INTERNAL_RESISTANCE_OHMS: f64 = 0.02;

/// Rail voltage under the given total current draw [A].
pub fn loaded_voltage(current_draw_amps: f64) -> f64 {
    (NOMINAL_VOLTAGE - current_draw_amps * INTERNAL_RESISTANCE_OHMS).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_load_reads_nominal() {
        assert_eq!(loaded_voltage(0.0), NOMINAL_VOLTAGE);
    }

    #[test]
    fn load_sags_the_rail() {
        let sagged = loaded_voltage(100.0);
        assert!((sagged - 10.0).abs() < 1e-12);
    }

    #[test]
    fn voltage_never_goes_negative() {
        assert_eq!(loaded_voltage(10_000.0), 0.0);
    }
}
