//! # Motor model
//!
//! An ideal motor whose speed is proportional to the applied voltage. There
//! is no current, torque or load modelling, and voltages beyond the rated
//! maximum are extrapolated linearly rather than limited. Callers are
//! responsible for keeping voltages in range.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::lin_map;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Conversion factor from revolutions/minute to radians/second (pi/30).
pub const RPM_TO_RADS: f64 = std::f64::consts::PI / 30.0;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the angular velocity of a wheel driven at the given voltage.
///
/// `max_rpm` is the speed reached at `max_voltage_v`.
///
/// Units: radians/second
pub fn wheel_rate_rads(voltage_v: f64, max_voltage_v: f64, max_rpm: f64) -> f64 {
    lin_map((0.0, max_voltage_v), (0.0, max_rpm * RPM_TO_RADS), voltage_v)
}

/// Convert a wheel rate into revolutions/minute for display.
pub fn rads_to_rpm(rate_rads: f64) -> f64 {
    rate_rads / RPM_TO_RADS
}

#[cfg(test)]
mod test {
    use super::*;

    const MAX_V: f64 = 400.0;
    const MAX_RPM: f64 = 18000.0;

    #[test]
    fn test_wheel_rate() {
        let max_rads = MAX_RPM * RPM_TO_RADS;

        assert_eq!(wheel_rate_rads(0.0, MAX_V, MAX_RPM), 0.0);
        assert!((wheel_rate_rads(MAX_V, MAX_V, MAX_RPM) - max_rads).abs() < 1e-9);
        assert!((wheel_rate_rads(-MAX_V, MAX_V, MAX_RPM) + max_rads).abs() < 1e-9);
        assert!((wheel_rate_rads(100.0, MAX_V, MAX_RPM) - 0.25 * max_rads).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_extrapolates() {
        let max_rads = MAX_RPM * RPM_TO_RADS;

        assert!((wheel_rate_rads(2.0 * MAX_V, MAX_V, MAX_RPM) - 2.0 * max_rads).abs() < 1e-9);
    }

    #[test]
    fn test_rpm() {
        assert!((rads_to_rpm(wheel_rate_rads(200.0, MAX_V, MAX_RPM)) - 9000.0).abs() < 1e-9);
    }
}
