//! # Telecommand processor module
//!
//! The telecommand processor handles TCs coming from any source, turning them into commands for
//! the simulation. Operators give angles in degrees, they are converted to radians here so the
//! simulation only ever sees radians.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use comms_if::tc::{PoseSpec, Tc};
use crate::{
    manual_ctrl::WheelCommand,
    mode_arbiter::{InputData, SimCmd},
    pose::{Pose, Waypoint}
};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Queues the matching command in the input data for the next cycle.
pub fn exec(input: &mut InputData, tc: &Tc) {
    debug!("Recieved {:?} command", tc);

    input.cmds.push(to_sim_cmd(tc));
}

/// Convert a telecommand into a simulation command.
pub fn to_sim_cmd(tc: &Tc) -> SimCmd {
    match tc {
        Tc::WheelCmd(v) => SimCmd::SetWheelCmd(WheelCommand::new(v.left_v, v.right_v)),
        Tc::ProgramPath(p) => SimCmd::ProgramPath(
            p.waypoints.iter().map(to_waypoint).collect()
        ),
        Tc::GoTo(t) => SimCmd::GoTo(to_waypoint(t)),
        Tc::StopPath => SimCmd::StopPath,
        Tc::CancelGoTo => SimCmd::CancelGoTo,
        Tc::ResetPose(p) => SimCmd::SetPose(Pose::new(p.x, p.y, p.theta_deg.to_radians()))
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn to_waypoint(spec: &PoseSpec) -> Waypoint {
    Waypoint::new(spec.x, spec.y, spec.theta_deg.to_radians())
}
