//! # Go-to-position module
//!
//! Drives the vehicle to a single target position and final heading.
//!
//! While far from the target the controller behaves like the path follower,
//! turning towards the target and driving at a speed proportional to the
//! distance. Once inside the close threshold it switches to gentler gains and
//! steers to the target's final heading instead, so the vehicle creeps in
//! while lining up.
//!
//! The target is reached when both the distance and the heading error are
//! inside their thresholds. This is checked before driving, so the vehicle
//! doesn't move on the cycle it arrives.

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

/// The status report for a cycle of go-to-position control.
#[derive(Debug, Default, Copy, Clone, Serialize)]
pub struct StatusReport {
    /// Distance to the target at the start of the cycle
    pub distance_m: f64,

    /// Heading error, either to the target position or to the final heading
    /// depending on `close_to_target`
    pub head_error_rad: f64,

    /// True if the close gains were used
    pub close_to_target: bool,

    pub speed_ms: f64,
    pub turn_rate_rads: f64,

    pub arrived: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Whether the target is still being driven to after a cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GoToOutcome {
    Driving,
    Arrived
}
