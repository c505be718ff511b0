//! # Path following module
//!
//! The path follower drives the vehicle through an ordered list of waypoints.
//! It always heads straight for the current target waypoint using a pair of
//! proportional controllers:
//!
//! - the heading error (the angle between the vehicle's heading and the line
//!   to the target, wrapped into (-pi, pi]) sets the turn rate,
//! - the distance to the target sets the speed, so the vehicle slows as it
//!   approaches.
//!
//! Both demands are saturated. Once the vehicle is within the arrival
//! threshold of a waypoint the follower moves on to the next, and after the
//! last one the path is complete.
//!
//! Only the position of a waypoint gates progress. Its `theta_rad` is carried
//! along but isn't an arrival criterion, not even for the final waypoint.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

pub use params::Params;
pub use state::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The status report for a cycle of path following.
#[derive(Debug, Default, Copy, Clone, Serialize)]
pub struct StatusReport {
    /// Index of the waypoint being driven towards
    pub target_index: usize,

    /// Distance to the target waypoint at the start of the cycle
    pub distance_m: f64,

    /// Heading error to the target waypoint
    pub head_error_rad: f64,

    pub speed_ms: f64,
    pub turn_rate_rads: f64,

    /// True if the target was reached this cycle
    pub waypoint_reached: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Whether the path is still being followed after a cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    Following,
    Complete
}
