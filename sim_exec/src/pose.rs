//! # Pose module
//!
//! Defines the vehicle pose and the waypoints the autonomous controllers
//! drive towards. All angles in here are in radians, conversion from
//! operator-entered degrees happens before anything reaches the core.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
use comms_if::tm::PoseTm;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the world frame) of the vehicle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the world frame
    ///
    /// Units: meters
    pub position_m: Vector2<f64>,

    /// Heading, the angle to the +ve X axis.
    ///
    /// This is an accumulator and is never wrapped, so after a few turns on
    /// the spot it can be well outside [-pi, pi].
    ///
    /// Units: radians
    pub heading_rad: f64
}

/// A target pose for one of the autonomous controllers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Target position
    ///
    /// Units: meters
    pub position_m: Vector2<f64>,

    /// Desired heading at the waypoint.
    ///
    /// Units: radians
    pub theta_rad: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad
        }
    }

    pub fn x(&self) -> f64 {
        self.position_m[0]
    }

    pub fn y(&self) -> f64 {
        self.position_m[1]
    }

    /// Unit vector pointing in the direction the vehicle is facing.
    pub fn forward2(&self) -> Vector2<f64> {
        Vector2::new(self.heading_rad.cos(), self.heading_rad.sin())
    }

    /// Returns true if all components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|v| v.is_finite()) && self.heading_rad.is_finite()
    }

    /// Convert into the telemetry representation.
    pub fn to_tm(&self) -> PoseTm {
        PoseTm {
            x_m: self.x(),
            y_m: self.y(),
            heading_rad: self.heading_rad
        }
    }
}

impl Waypoint {
    pub fn new(x_m: f64, y_m: f64, theta_rad: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            theta_rad
        }
    }

    /// Returns true if all components are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|v| v.is_finite()) && self.theta_rad.is_finite()
    }

    /// Vector from the given pose to this waypoint.
    pub fn offset_from(&self, pose: &Pose) -> Vector2<f64> {
        self.position_m - pose.position_m
    }
}
