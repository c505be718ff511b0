//! # Mode arbiter module
//!
//! The mode arbiter owns the simulation state and decides which controller
//! drives the vehicle on each cycle. Exactly one of them does:
//!
//! - `GoingToPosition` while a go-to target is set, the go-to controller
//!   drives and any path is held back,
//! - `FollowingPath` while a path is being followed, the path follower
//!   drives,
//! - `Manual` otherwise, driven by the latest wheel command.
//!
//! Commands only change the mode between cycles. A cycle that has started
//! always finishes with the controller it started with.
//!
//! A go-to target preempts a path that is being followed. The path is kept
//! and resumes, at the waypoint it was heading for, once the target has been
//! reached or cancelled. A path submitted while going to a target is queued
//! in the same way.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

pub use state::*;

use comms_if::tm::ModeKind;
use crate::{
    goto_ctrl,
    manual_ctrl::{self, WheelCommand},
    params::ParamsError,
    path_ctrl::{self, PathProgress},
    pose::{Pose, Waypoint}
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Input data to the mode arbiter, the commands to apply before the next
/// cycle.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    pub cmds: Vec<SimCmd>
}

/// Status report for a cycle of the simulation.
///
/// Only the report for the controller that drove the vehicle is set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    pub mode: ModeKind,

    pub manual: Option<manual_ctrl::StatusReport>,
    pub path: Option<path_ctrl::StatusReport>,
    pub goto: Option<goto_ctrl::StatusReport>,

    /// Number of commands rejected before the cycle
    pub num_rejected_cmds: usize
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The active mode and the data it drives with.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Manual,

    FollowingPath(PathProgress),

    GoingToPosition {
        target: Waypoint,

        /// Path to pick up once the target is cleared
        queued_path: Option<PathProgress>
    }
}

/// Commands that can be given to the simulation.
///
/// All angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCmd {
    /// Set the voltages used in manual mode
    SetWheelCmd(WheelCommand),

    /// Follow a new path, replacing any current one
    ProgramPath(Vec<Waypoint>),

    /// Go to a target pose
    GoTo(Waypoint),

    StopPath,

    CancelGoTo,

    /// Move the vehicle and clear its trajectory
    SetPose(Pose)
}

/// Errors raised by the simulation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    #[error("Rejected non-finite value in {0}")]
    NonFiniteInput(&'static str),

    #[error("Time step must be finite and greater than zero, got {0}")]
    InvalidTimeStep(f64),

    #[error("Invalid simulation parameters: {0}")]
    InvalidParams(#[from] ParamsError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Manual => ModeKind::Manual,
            Mode::FollowingPath(_) => ModeKind::FollowingPath,
            Mode::GoingToPosition { .. } => ModeKind::GoingToPosition
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Manual
    }
}
