//! Path following module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{Params, PathOutcome, StatusReport};
use comms_if::tm::NotificationKind;
use crate::{
    controllers::{DriveDemand, PropController},
    kinematics::VehicleParams,
    pose::Waypoint,
    sim_state::SimState
};
use util::maths::wrap_to_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path being followed: the waypoints and the index of the current target.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProgress {
    waypoints: Vec<Waypoint>,

    /// Index of the waypoint being driven towards
    index: usize
}

/// The path follower.
#[derive(Debug, Clone)]
pub struct PathFollower {
    params: Params,

    /// Turn rate from heading error
    head_ctrl: PropController,

    /// Speed from distance to target
    dist_ctrl: PropController
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathProgress {
    /// Start a new path at its first waypoint.
    ///
    /// Returns `None` if there are no waypoints, as there is nothing to
    /// follow.
    pub fn new(waypoints: Vec<Waypoint>) -> Option<Self> {
        if waypoints.is_empty() {
            None
        }
        else {
            Some(Self { waypoints, index: 0 })
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn target(&self) -> &Waypoint {
        &self.waypoints[self.index]
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.waypoints.len()
    }
}

impl PathFollower {
    pub fn new(params: Params) -> Self {
        Self {
            head_ctrl: PropController::new(params.turn_k_p, params.max_turn_rate_rads),
            dist_ctrl: PropController::new(params.distance_k_p, params.max_speed_ms),
            params
        }
    }

    /// Follow the path for one cycle.
    ///
    /// Processing involves:
    ///  1. Calculating the distance and heading error to the target waypoint.
    ///  1. Driving at the demands from the controllers, logging the position.
    ///  1. If the distance (from before the motion) was inside the arrival
    ///     threshold, moving on to the next waypoint or finishing the path.
    pub fn proc(
        &self,
        progress: &mut PathProgress,
        state: &mut SimState,
        vehicle: &VehicleParams,
        dt_s: f64
    ) -> (PathOutcome, StatusReport) {

        let offset_m = progress.target().offset_from(&state.pose);
        let distance_m = offset_m.norm();
        let target_heading_rad = offset_m[1].atan2(offset_m[0]);
        let head_error_rad = wrap_to_pi(target_heading_rad - state.pose.heading_rad);

        let demand = DriveDemand {
            speed_ms: self.dist_ctrl.get(distance_m),
            turn_rate_rads: self.head_ctrl.get(head_error_rad)
        };

        trace!(
            "PathCtrl target {}: dist {:.4} m, head err {:.4} rad, demand {:?}",
            progress.index, distance_m, head_error_rad, demand
        );

        demand.apply(state, vehicle, dt_s);

        let mut report = StatusReport {
            target_index: progress.index,
            distance_m,
            head_error_rad,
            speed_ms: demand.speed_ms,
            turn_rate_rads: demand.turn_rate_rads,
            waypoint_reached: false
        };

        // ---- TARGET MANAGEMENT ----

        if distance_m >= self.params.arrival_threshold_m {
            return (PathOutcome::Following, report)
        }

        report.waypoint_reached = true;
        state.notify(NotificationKind::WaypointReached, Some(progress.index));

        if progress.is_last() {
            progress.index = 0;
            state.notify(NotificationKind::PathComplete, None);

            (PathOutcome::Complete, report)
        }
        else {
            progress.index += 1;
            debug!("PathCtrl moving on to waypoint {}", progress.index);

            (PathOutcome::Following, report)
        }
    }
}

impl Default for PathFollower {
    fn default() -> Self {
        Self::new(Params::default())
    }
}
