//! Vehicle parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry and drive capabilities of the vehicle.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleParams {

    // ---- GEOMETRY ----

    /// The radius of the vehicle's wheels.
    ///
    /// Units: meters
    pub wheel_radius_m: f64,

    /// Distance between the left and right wheel contact points.
    ///
    /// Units: meters
    pub track_width_m: f64,

    // ---- MOTORS ----

    /// Rated motor voltage, the voltage at which `max_rpm` is reached.
    ///
    /// Units: volts
    pub max_voltage_v: f64,

    /// Wheel speed at the rated voltage.
    ///
    /// Units: revolutions/minute
    pub max_rpm: f64
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            wheel_radius_m: 0.15,
            track_width_m: 0.4,
            max_voltage_v: 400.0,
            max_rpm: 18000.0
        }
    }
}
