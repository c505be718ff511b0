//! Path following parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for path following
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Params {

    /// Heading controller proportional gain
    pub turn_k_p: f64,

    /// Distance controller proportional gain
    pub distance_k_p: f64,

    /// Turn rate demand limit (applied to both directions)
    ///
    /// Units: radians/second
    pub max_turn_rate_rads: f64,

    /// Speed demand limit
    ///
    /// Units: meters/second
    pub max_speed_ms: f64,

    /// Distance under which a waypoint is considered reached.
    ///
    /// Units: meters
    pub arrival_threshold_m: f64
}

impl Default for Params {
    fn default() -> Self {
        Self {
            turn_k_p: 2.0,
            distance_k_p: 1.0,
            max_turn_rate_rads: 2.0,
            max_speed_ms: 1.0,
            arrival_threshold_m: 0.05
        }
    }
}
