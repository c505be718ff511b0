//! Implementations for the ModeArbiter state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};

// Internal
use super::{InputData, Mode, SimCmd, SimError, StatusReport};
use comms_if::tm::{ModeKind, Notification, SimTm};
use crate::{
    goto_ctrl::{GoToCtrl, GoToOutcome},
    kinematics::{self, WheelRates},
    manual_ctrl::{ManualCtrl, WheelCommand},
    motor_model::wheel_rate_rads,
    params::SimParams,
    path_ctrl::{PathFollower, PathOutcome, PathProgress},
    pose::{Pose, Waypoint},
    sim_state::SimState
};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Mode arbiter state, the whole of the simulation.
#[derive(Debug, Clone)]
pub struct ModeArbiter {
    params: SimParams,

    state: SimState,
    mode: Mode,

    manual: ManualCtrl,
    path: PathFollower,
    goto: GoToCtrl,

    /// Simulated time since start
    ///
    /// Units: seconds
    time_s: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ModeArbiter {
    type InitData = SimParams;
    type InitError = SimError;

    type InputData = InputData;
    type OutputData = SimTm;
    type StatusReport = StatusReport;
    type ProcError = SimError;

    /// Initialise the simulation with new parameters.
    ///
    /// The vehicle is placed back at the origin in manual mode.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        *self = Self::new(init_data)?;
        Ok(())
    }

    /// Apply the input commands, then advance the simulation by one cycle.
    ///
    /// Rejected commands are warned about and counted in the status report,
    /// they don't stop the cycle.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let mut num_rejected_cmds = 0;

        for cmd in input_data.cmds.iter() {
            if let Err(e) = self.apply(cmd.clone()) {
                warn!("Command rejected: {}", e);
                num_rejected_cmds += 1;
            }
        }

        let mut report = self.advance(self.params.cycle_period_s)?;
        report.num_rejected_cmds = num_rejected_cmds;

        let tm = SimTm {
            time_s: self.time_s,
            mode: report.mode,
            pose: self.state.pose.to_tm(),
            wheel_rates_rads: self.state.wheel_rates.as_array(),
            wheel_rpm: self.state.wheel_rates.to_rpm(),
            traj_len: self.state.traj_log.len(),
            notifications: self.state.drain_notifications()
        };

        Ok((tm, report))
    }
}

impl ModeArbiter {
    /// Create a new simulation with the vehicle at the origin in manual mode.
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        params.validate()?;

        Ok(Self::from_valid_params(params))
    }

    fn from_valid_params(params: SimParams) -> Self {
        Self {
            state: SimState::new(params.traj_log_capacity),
            mode: Mode::Manual,
            manual: ManualCtrl::new(params.manual.clone()),
            path: PathFollower::new(params.path.clone()),
            goto: GoToCtrl::new(params.goto.clone()),
            time_s: 0.0,
            params
        }
    }

    // ---- COMMANDS ----

    /// Apply a single command.
    pub fn apply(&mut self, cmd: SimCmd) -> Result<(), SimError> {
        match cmd {
            SimCmd::SetWheelCmd(c) => self.set_wheel_cmd(c),
            SimCmd::ProgramPath(w) => self.program_path(w),
            SimCmd::GoTo(t) => self.go_to(t),
            SimCmd::StopPath => {
                self.stop_path();
                Ok(())
            },
            SimCmd::CancelGoTo => {
                self.cancel_go_to();
                Ok(())
            },
            SimCmd::SetPose(p) => self.set_pose(p)
        }
    }

    /// Set the voltages used under manual control.
    ///
    /// The command is accepted in any mode but only drives the vehicle once
    /// control is back to manual. Voltages so large that the resulting rates
    /// overflow are rejected.
    pub fn set_wheel_cmd(&mut self, cmd: WheelCommand) -> Result<(), SimError> {
        if !cmd.is_finite() {
            return Err(SimError::NonFiniteInput("wheel command"))
        }

        let vehicle = &self.params.vehicle;
        let rates = WheelRates::new(
            wheel_rate_rads(cmd.left_voltage_v, vehicle.max_voltage_v, vehicle.max_rpm),
            wheel_rate_rads(cmd.right_voltage_v, vehicle.max_voltage_v, vehicle.max_rpm)
        );
        let body = kinematics::body_rates(&rates, vehicle.wheel_radius_m, vehicle.track_width_m);

        let rates_finite = rates.left_rads.is_finite()
            && rates.right_rads.is_finite()
            && body.linear_ms.is_finite()
            && body.angular_rads.is_finite();

        if !rates_finite {
            return Err(SimError::NonFiniteInput("wheel command"))
        }

        if self.mode.kind() != ModeKind::Manual {
            debug!("Wheel command held until manual control resumes");
        }

        self.manual.set_cmd(cmd);
        Ok(())
    }

    /// Start following a new path.
    ///
    /// If going to a target the path is queued behind it. An empty path stops
    /// any path being followed or queued.
    pub fn program_path(&mut self, waypoints: Vec<Waypoint>) -> Result<(), SimError> {
        if !waypoints.iter().all(Waypoint::is_finite) {
            return Err(SimError::NonFiniteInput("path"))
        }

        let num_waypoints = waypoints.len();
        let progress = PathProgress::new(waypoints);

        if progress.is_none() {
            warn!("Empty path submitted, stopping path following");
            self.stop_path();
            return Ok(())
        }

        if let Mode::GoingToPosition { queued_path, .. } = &mut self.mode {
            info!("Path of {} waypoints queued behind the go-to target", num_waypoints);
            *queued_path = progress;
        }
        else if let Some(p) = progress {
            info!("Following new path of {} waypoints", num_waypoints);
            self.set_mode(Mode::FollowingPath(p));
        }

        Ok(())
    }

    /// Go to a target pose.
    ///
    /// Any path being followed is paused and picks up again once the target is
    /// cleared. A previous target is replaced.
    pub fn go_to(&mut self, target: Waypoint) -> Result<(), SimError> {
        if !target.is_finite() {
            return Err(SimError::NonFiniteInput("go-to target"))
        }

        let queued_path = match &mut self.mode {
            Mode::Manual => None,
            Mode::FollowingPath(progress) => {
                info!("Path paused at waypoint {}", progress.index());
                Some(progress.clone())
            },
            Mode::GoingToPosition { queued_path, .. } => {
                info!("Go-to target replaced");
                queued_path.take()
            }
        };

        info!("Going to {:?}", target);
        self.set_mode(Mode::GoingToPosition { target, queued_path });

        Ok(())
    }

    /// Stop following the current or queued path.
    pub fn stop_path(&mut self) {
        match &mut self.mode {
            Mode::GoingToPosition { queued_path, .. } => {
                if queued_path.take().is_some() {
                    info!("Queued path dropped");
                }
            },
            Mode::FollowingPath(_) => self.set_mode(Mode::Manual),
            Mode::Manual => debug!("No path to stop")
        }
    }

    /// Cancel the current go-to target, resuming any queued path.
    pub fn cancel_go_to(&mut self) {
        if let Mode::GoingToPosition { queued_path, .. } = &mut self.mode {
            info!("Go-to target cancelled");

            let next = match queued_path.take() {
                Some(p) => Mode::FollowingPath(p),
                None => Mode::Manual
            };
            self.set_mode(next);
        }
        else {
            debug!("No go-to target to cancel");
        }
    }

    /// Move the vehicle to a new pose, clearing the trajectory log.
    ///
    /// The mode is unchanged.
    pub fn set_pose(&mut self, pose: Pose) -> Result<(), SimError> {
        if !pose.is_finite() {
            return Err(SimError::NonFiniteInput("pose"))
        }

        info!("Pose set to {:?}", pose);

        self.state.pose = pose;
        self.state.wheel_rates = WheelRates::default();
        self.state.traj_log.clear();

        Ok(())
    }

    // ---- PROCESSING ----

    /// Advance the simulation by `dt_s` seconds with whichever controller is
    /// active.
    pub fn advance(&mut self, dt_s: f64) -> Result<StatusReport, SimError> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(SimError::InvalidTimeStep(dt_s))
        }

        let mut report = StatusReport {
            mode: self.mode.kind(),
            ..Default::default()
        };

        let vehicle = &self.params.vehicle;

        let next_mode = match &mut self.mode {
            Mode::Manual => {
                report.manual = Some(self.manual.proc(&mut self.state, vehicle, dt_s));
                None
            },
            Mode::FollowingPath(progress) => {
                let (outcome, rpt) = self.path.proc(progress, &mut self.state, vehicle, dt_s);
                report.path = Some(rpt);

                match outcome {
                    PathOutcome::Following => None,
                    PathOutcome::Complete => Some(Mode::Manual)
                }
            },
            Mode::GoingToPosition { target, queued_path } => {
                let (outcome, rpt) = self.goto.proc(target, &mut self.state, vehicle, dt_s);
                report.goto = Some(rpt);

                match outcome {
                    GoToOutcome::Driving => None,
                    GoToOutcome::Arrived => match queued_path.take() {
                        Some(p) => Some(Mode::FollowingPath(p)),
                        None => Some(Mode::Manual)
                    }
                }
            }
        };

        if let Some(mode) = next_mode {
            self.set_mode(mode);
        }

        self.time_s += dt_s;

        Ok(report)
    }

    fn set_mode(&mut self, mode: Mode) {
        let prev = self.mode.kind();
        let next = mode.kind();

        if prev != next {
            info!("Mode changed from {:?} to {:?}", prev, next);
        }

        self.mode = mode;
    }

    // ---- ACCESSORS ----

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn pose(&self) -> Pose {
        self.state.pose
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn wheel_rates(&self) -> WheelRates {
        self.state.wheel_rates
    }

    /// A copy of the trajectory log, oldest sample first.
    pub fn traj_snapshot(&self) -> Vec<[f64; 2]> {
        self.state.traj_log.snapshot()
    }

    /// Take all notifications raised since the last call.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.state.drain_notifications()
    }

    pub fn time_s(&self) -> f64 {
        self.time_s
    }
}

impl Default for ModeArbiter {
    fn default() -> Self {
        Self::from_valid_params(SimParams::default())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tm::NotificationKind;
    use crate::motor_model::RPM_TO_RADS;

    const DT: f64 = 1.0 / 60.0;

    /// Advance until the mode is no longer `kind`, returning the number of
    /// cycles taken.
    fn run_while(arb: &mut ModeArbiter, kind: ModeKind, max_cycles: usize) -> Option<usize> {
        for i in 0..max_cycles {
            if arb.mode_kind() != kind {
                return Some(i)
            }
            arb.advance(DT).unwrap();
        }

        None
    }

    fn kinds(arb: &mut ModeArbiter) -> Vec<(NotificationKind, Option<usize>)> {
        arb.drain_notifications()
            .iter()
            .map(|n| (n.kind, n.waypoint_index))
            .collect()
    }

    #[test]
    fn test_single_waypoint_path() {
        let mut arb = ModeArbiter::default();

        arb.program_path(vec![Waypoint::new(1.0, 0.0, 0.0)]).unwrap();
        assert_eq!(arb.mode_kind(), ModeKind::FollowingPath);

        assert!(run_while(&mut arb, ModeKind::FollowingPath, 1000).is_some());

        assert_eq!(arb.mode_kind(), ModeKind::Manual);
        assert!((arb.pose().position_m - Waypoint::new(1.0, 0.0, 0.0).position_m).norm() < 0.05);
        assert_eq!(
            kinds(&mut arb),
            vec![
                (NotificationKind::WaypointReached, Some(0)),
                (NotificationKind::PathComplete, None)
            ]
        );
    }

    #[test]
    fn test_go_to_current_pose() {
        let mut arb = ModeArbiter::default();

        arb.go_to(Waypoint::new(0.0, 0.0, 0.0)).unwrap();
        let report = arb.advance(DT).unwrap();

        assert_eq!(report.mode, ModeKind::GoingToPosition);
        assert!(report.goto.unwrap().arrived);
        assert_eq!(arb.mode_kind(), ModeKind::Manual);
        assert_eq!(arb.pose(), Pose::default());
        assert_eq!(kinds(&mut arb), vec![(NotificationKind::DestinationReached, None)]);

        // Nothing left to drive to, the vehicle stays put
        let report = arb.advance(DT).unwrap();

        assert_eq!(report.mode, ModeKind::Manual);
        assert_eq!(arb.pose(), Pose::default());
        assert!(arb.drain_notifications().is_empty());
        assert!(arb.traj_snapshot().is_empty());
    }

    #[test]
    fn test_manual_full_voltage() {
        let mut arb = ModeArbiter::default();

        arb.set_wheel_cmd(WheelCommand::new(400.0, 400.0)).unwrap();
        arb.advance(DT).unwrap();

        let params = arb.params().vehicle.clone();
        let expected_x = params.max_rpm * RPM_TO_RADS * params.wheel_radius_m * DT;

        assert!((arb.pose().x() - expected_x).abs() < 1e-9);
        assert_eq!(arb.pose().y(), 0.0);
        assert_eq!(arb.pose().heading_rad, 0.0);
    }

    #[test]
    fn test_wheel_cmd_ignored_while_going_to() {
        let target = Waypoint::new(2.0, 0.0, 0.0);

        let mut arb_a = ModeArbiter::default();
        let mut arb_b = ModeArbiter::default();

        arb_a.go_to(target).unwrap();
        arb_b.go_to(target).unwrap();
        arb_b.set_wheel_cmd(WheelCommand::new(400.0, -400.0)).unwrap();

        for _ in 0..50 {
            arb_a.advance(DT).unwrap();
            arb_b.advance(DT).unwrap();
            assert_eq!(arb_a.pose(), arb_b.pose());
        }

        // The command is kept for when manual control resumes
        arb_b.cancel_go_to();
        let before = arb_b.pose();
        arb_b.advance(DT).unwrap();
        assert!(arb_b.pose().heading_rad < before.heading_rad);
    }

    #[test]
    fn test_go_to_preempts_path() {
        let mut arb = ModeArbiter::default();

        arb.program_path(vec![Waypoint::new(2.0, 0.0, 0.0)]).unwrap();
        for _ in 0..10 {
            arb.advance(DT).unwrap();
        }

        arb.go_to(Waypoint::new(0.5, 0.0, 0.0)).unwrap();
        assert!(matches!(
            arb.mode(),
            Mode::GoingToPosition { queued_path: Some(_), .. }
        ));

        assert!(run_while(&mut arb, ModeKind::GoingToPosition, 2000).is_some());

        // Path picks up where it left off
        assert_eq!(arb.mode_kind(), ModeKind::FollowingPath);
        assert!((arb.pose().x() - 0.5).abs() < 0.05);

        assert!(run_while(&mut arb, ModeKind::FollowingPath, 2000).is_some());

        assert!((arb.pose().x() - 2.0).abs() < 0.05);
        assert_eq!(
            kinds(&mut arb),
            vec![
                (NotificationKind::DestinationReached, None),
                (NotificationKind::WaypointReached, Some(0)),
                (NotificationKind::PathComplete, None)
            ]
        );
    }

    #[test]
    fn test_path_queued_behind_go_to() {
        let mut arb = ModeArbiter::default();

        arb.go_to(Waypoint::new(1.0, 0.0, 0.0)).unwrap();
        arb.program_path(vec![Waypoint::new(0.0, 0.0, 0.0)]).unwrap();

        assert_eq!(arb.mode_kind(), ModeKind::GoingToPosition);

        assert!(run_while(&mut arb, ModeKind::GoingToPosition, 2000).is_some());

        match arb.mode() {
            Mode::FollowingPath(p) => assert_eq!(p.index(), 0),
            m => panic!("Expected to be following the queued path, got {:?}", m)
        }
    }

    #[test]
    fn test_stop_and_cancel() {
        let mut arb = ModeArbiter::default();
        let path = vec![Waypoint::new(1.0, 1.0, 0.0)];

        arb.program_path(path.clone()).unwrap();
        arb.stop_path();
        assert_eq!(arb.mode(), &Mode::Manual);

        arb.go_to(Waypoint::new(1.0, 0.0, 0.0)).unwrap();
        arb.cancel_go_to();
        assert_eq!(arb.mode(), &Mode::Manual);

        // Stopping the path while going to a target drops the queued path
        arb.program_path(path.clone()).unwrap();
        arb.go_to(Waypoint::new(1.0, 0.0, 0.0)).unwrap();
        arb.stop_path();
        assert!(matches!(
            arb.mode(),
            Mode::GoingToPosition { queued_path: None, .. }
        ));
        arb.cancel_go_to();
        assert_eq!(arb.mode(), &Mode::Manual);

        // Cancelling the target resumes the queued path
        arb.program_path(path).unwrap();
        arb.go_to(Waypoint::new(1.0, 0.0, 0.0)).unwrap();
        arb.cancel_go_to();
        assert_eq!(arb.mode_kind(), ModeKind::FollowingPath);

        // An empty path stops following
        arb.program_path(vec![]).unwrap();
        assert_eq!(arb.mode(), &Mode::Manual);

        // None of this moved the vehicle
        assert_eq!(arb.pose(), Pose::default());
    }

    #[test]
    fn test_reject_non_finite() {
        let mut arb = ModeArbiter::default();

        assert_eq!(
            arb.set_wheel_cmd(WheelCommand::new(f64::NAN, 0.0)),
            Err(SimError::NonFiniteInput("wheel command"))
        );
        assert!(arb.program_path(vec![
            Waypoint::new(1.0, 0.0, 0.0),
            Waypoint::new(f64::INFINITY, 0.0, 0.0)
        ]).is_err());
        assert!(arb.go_to(Waypoint::new(0.0, 0.0, f64::NAN)).is_err());
        assert!(arb.set_pose(Pose::new(f64::NEG_INFINITY, 0.0, 0.0)).is_err());

        assert_eq!(arb.mode(), &Mode::Manual);

        for _ in 0..10 {
            arb.advance(DT).unwrap();
        }
        assert_eq!(arb.pose(), Pose::default());
        assert!(arb.pose().is_finite());
    }

    #[test]
    fn test_reject_overflowing_wheel_cmd() {
        let mut arb = ModeArbiter::default();

        assert_eq!(
            arb.set_wheel_cmd(WheelCommand::new(1.0e306, 1.0e306)),
            Err(SimError::NonFiniteInput("wheel command"))
        );
        assert_eq!(
            arb.set_wheel_cmd(WheelCommand::new(-1.0e306, 0.0)),
            Err(SimError::NonFiniteInput("wheel command"))
        );

        arb.advance(DT).unwrap();
        assert!(arb.pose().is_finite());
        assert_eq!(arb.pose(), Pose::default());

        // Outside the rated range but still representable
        arb.set_wheel_cmd(WheelCommand::new(1000.0, 1000.0)).unwrap();
        arb.advance(DT).unwrap();
        assert!(arb.pose().is_finite());
        assert!(arb.pose().x() > 0.0);
    }

    #[test]
    fn test_traj_log_bounded() {
        let mut arb = ModeArbiter::default();

        arb.set_wheel_cmd(WheelCommand::new(100.0, 100.0)).unwrap();
        for _ in 0..600 {
            arb.advance(DT).unwrap();
        }

        let traj = arb.traj_snapshot();
        assert_eq!(traj.len(), 500);
        assert_eq!(traj[499], [arb.pose().x(), arb.pose().y()]);

        // Oldest samples evicted first
        assert!(traj[0][0] > 0.0);
        assert!(traj.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn test_set_pose() {
        let mut arb = ModeArbiter::default();

        arb.set_wheel_cmd(WheelCommand::new(100.0, 100.0)).unwrap();
        arb.advance(DT).unwrap();
        assert_eq!(arb.traj_snapshot().len(), 1);

        arb.set_pose(Pose::new(3.0, -1.0, 1.0)).unwrap();

        assert_eq!(arb.pose(), Pose::new(3.0, -1.0, 1.0));
        assert!(arb.traj_snapshot().is_empty());
        assert_eq!(arb.wheel_rates(), WheelRates::default());
    }

    #[test]
    fn test_state_interface() {
        let mut arb = ModeArbiter::default();

        let mut bad_params = SimParams::default();
        bad_params.vehicle.wheel_radius_m = -1.0;
        assert!(arb.init(bad_params).is_err());

        arb.init(SimParams::default()).unwrap();

        let input = InputData {
            cmds: vec![
                SimCmd::SetWheelCmd(WheelCommand::new(f64::NAN, 1.0)),
                SimCmd::GoTo(Waypoint::new(0.0, 0.0, 0.0))
            ]
        };

        let (tm, report) = arb.proc(&input).unwrap();

        assert_eq!(report.num_rejected_cmds, 1);
        assert_eq!(tm.mode, ModeKind::GoingToPosition);
        assert!((tm.time_s - DT).abs() < 1e-12);
        assert_eq!(tm.notifications.len(), 1);
        assert_eq!(tm.notifications[0].kind, NotificationKind::DestinationReached);

        // Notifications were handed over in the telemetry
        assert!(arb.drain_notifications().is_empty());
        assert!((arb.time_s() - DT).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_time_step() {
        let mut arb = ModeArbiter::default();

        assert_eq!(arb.advance(0.0).unwrap_err(), SimError::InvalidTimeStep(0.0));
        assert!(arb.advance(f64::NAN).is_err());
        assert_eq!(arb.time_s(), 0.0);
    }
}
