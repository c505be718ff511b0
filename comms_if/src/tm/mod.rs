//! # Telemetry module
//!
//! Telemetry is produced by the simulation once per cycle and consumed by
//! whatever is presenting the vehicle (a renderer, a plotter, the archive).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Vehicle pose as reported in telemetry.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PoseTm {
    pub x_m: f64,
    pub y_m: f64,

    /// Unwrapped heading, may be outside [-pi, pi].
    pub heading_rad: f64
}

/// Telemetry for a single simulation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimTm {
    /// Simulation time at the end of the cycle.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// The mode that drove the vehicle during the cycle.
    pub mode: ModeKind,

    pub pose: PoseTm,

    /// Left and right wheel angular velocities.
    ///
    /// Units: radians/second
    pub wheel_rates_rads: [f64; 2],

    /// Left and right wheel speeds, for display.
    ///
    /// Units: revolutions/minute
    pub wheel_rpm: [f64; 2],

    /// Number of samples currently held in the trajectory log.
    pub traj_len: usize,

    /// Events raised during the cycle.
    pub notifications: Vec<Notification>
}

/// A discrete event raised by one of the controllers.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,

    /// Index of the waypoint concerned, for path following events.
    pub waypoint_index: Option<usize>,

    /// Pose of the vehicle when the event was raised.
    pub pose: PoseTm
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The kinds of notification the simulation can raise.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationKind {
    WaypointReached,
    PathComplete,
    DestinationReached
}

/// Which controller is driving the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModeKind {
    Manual,
    FollowingPath,
    GoingToPosition
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::WaypointReached => write!(f, "Waypoint reached"),
            NotificationKind::PathComplete => write!(f, "Path complete"),
            NotificationKind::DestinationReached => write!(f, "Destination reached")
        }
    }
}

impl Default for ModeKind {
    fn default() -> Self {
        ModeKind::Manual
    }
}
