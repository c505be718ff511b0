//! # Manual control module
//!
//! Manual control drives the vehicle directly from operator-set motor
//! voltages. Each cycle the voltages are converted into wheel rates by the
//! motor model and the pose is stepped through the kinematics.
//!
//! The trajectory log is only updated when the vehicle is actually moving, so
//! an idle vehicle doesn't fill it with copies of the same point.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

pub use state::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for manual control
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {
    /// Linear speed above which the vehicle is considered to be moving.
    ///
    /// Units: meters/second
    pub moving_speed_threshold_ms: f64,

    /// Turn rate above which the vehicle is considered to be moving.
    ///
    /// Units: radians/second
    pub moving_turn_rate_threshold_rads: f64
}

/// The voltages applied to the motors under manual control.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelCommand {
    /// Units: volts
    pub left_voltage_v: f64,

    /// Units: volts
    pub right_voltage_v: f64
}

/// Status report for manual control processing.
#[derive(Debug, Copy, Clone, Default, Serialize)]
pub struct StatusReport {
    pub linear_ms: f64,
    pub angular_rads: f64,

    /// True if the position was logged this cycle
    pub logged: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            moving_speed_threshold_ms: 0.01,
            moving_turn_rate_threshold_rads: 0.01
        }
    }
}

impl WheelCommand {
    pub fn new(left_voltage_v: f64, right_voltage_v: f64) -> Self {
        Self { left_voltage_v, right_voltage_v }
    }

    pub fn is_finite(&self) -> bool {
        self.left_voltage_v.is_finite() && self.right_voltage_v.is_finite()
    }
}
