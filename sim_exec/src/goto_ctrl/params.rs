//! Go-to-position parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for go-to-position control.
///
/// The controller runs with one of two sets of gains, "far" while heading for
/// the target position and "close" once inside `close_threshold_m`, when it
/// turns to the final heading and creeps in.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Params {

    /// Distance inside which the close gains are used and the controller
    /// steers to the target's final heading.
    ///
    /// Units: meters
    pub close_threshold_m: f64,

    // ---- FAR ----

    /// Heading controller proportional gain when far from the target
    pub far_turn_k_p: f64,

    /// Distance controller proportional gain when far from the target
    pub far_distance_k_p: f64,

    /// Speed limit when far from the target
    ///
    /// Units: meters/second
    pub far_max_speed_ms: f64,

    // ---- CLOSE ----

    /// Heading controller proportional gain when close to the target
    pub close_turn_k_p: f64,

    /// Distance controller proportional gain when close to the target
    pub close_distance_k_p: f64,

    /// Speed limit when close to the target
    ///
    /// Units: meters/second
    pub close_max_speed_ms: f64,

    // ---- LIMITS ----

    /// Turn rate demand limit (applied to both directions)
    ///
    /// Units: radians/second
    pub max_turn_rate_rads: f64,

    /// Distance under which the target position is considered reached.
    ///
    /// Units: meters
    pub arrival_threshold_m: f64,

    /// Heading error under which the final heading is considered reached.
    ///
    /// Units: radians
    pub heading_threshold_rad: f64
}

impl Default for Params {
    fn default() -> Self {
        Self {
            close_threshold_m: 0.3,
            far_turn_k_p: 2.0,
            far_distance_k_p: 1.0,
            far_max_speed_ms: 1.0,
            close_turn_k_p: 2.5,
            close_distance_k_p: 0.5,
            close_max_speed_ms: 0.3,
            max_turn_rate_rads: 2.0,
            arrival_threshold_m: 0.05,
            heading_threshold_rad: 0.05
        }
    }
}
