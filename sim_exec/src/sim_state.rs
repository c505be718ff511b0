//! # Simulation state
//!
//! The state shared between the controllers. It's owned by the
//! [`ModeArbiter`](crate::mode_arbiter::ModeArbiter) and lent to whichever
//! controller is driving on a given cycle, so only one controller can ever
//! write to it at a time.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;

use comms_if::tm::{Notification, NotificationKind};
use crate::{
    kinematics::WheelRates,
    pose::Pose,
    traj_log::TrajLog
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SimState {
    /// Current pose of the vehicle
    pub pose: Pose,

    /// Wheel rates applied during the last cycle
    pub wheel_rates: WheelRates,

    /// Where the vehicle has been
    pub traj_log: TrajLog,

    /// Events raised since they were last drained
    notifications: Vec<Notification>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimState {
    pub fn new(traj_log_capacity: usize) -> Self {
        Self {
            traj_log: TrajLog::with_capacity(traj_log_capacity),
            ..Default::default()
        }
    }

    /// Record the current position in the trajectory log.
    pub fn log_position(&mut self) {
        self.traj_log.push(self.pose.x(), self.pose.y());
    }

    /// Raise a notification at the current pose.
    pub fn notify(&mut self, kind: NotificationKind, waypoint_index: Option<usize>) {
        match waypoint_index {
            Some(i) => info!("{} (waypoint {}) at {:?}", kind, i, self.pose),
            None => info!("{} at {:?}", kind, self.pose)
        }

        self.notifications.push(Notification {
            kind,
            waypoint_index,
            pose: self.pose.to_tm()
        });
    }

    /// Take all notifications raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
