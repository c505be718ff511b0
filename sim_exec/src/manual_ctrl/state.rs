//! Manual control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::{Params, StatusReport, WheelCommand};
use crate::{
    kinematics::{self, VehicleParams, WheelRates},
    motor_model::wheel_rate_rads,
    sim_state::SimState
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ManualCtrl {
    params: Params,

    /// The latest command from the operator
    cmd: WheelCommand
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ManualCtrl {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            cmd: WheelCommand::default()
        }
    }

    /// Set the voltages to drive at.
    ///
    /// The command is kept while another controller is driving and resumes
    /// once control returns to manual.
    pub fn set_cmd(&mut self, cmd: WheelCommand) {
        debug!("Manual command set to {:?}", cmd);
        self.cmd = cmd;
    }

    pub fn cmd(&self) -> WheelCommand {
        self.cmd
    }

    /// Drive the vehicle for one cycle.
    pub fn proc(
        &mut self,
        state: &mut SimState,
        vehicle: &VehicleParams,
        dt_s: f64
    ) -> StatusReport {
        state.wheel_rates = WheelRates::new(
            wheel_rate_rads(self.cmd.left_voltage_v, vehicle.max_voltage_v, vehicle.max_rpm),
            wheel_rate_rads(self.cmd.right_voltage_v, vehicle.max_voltage_v, vehicle.max_rpm)
        );

        let body = kinematics::body_rates(
            &state.wheel_rates,
            vehicle.wheel_radius_m,
            vehicle.track_width_m
        );

        state.pose = kinematics::integrate(&state.pose, &body, dt_s);

        let logged = body.linear_ms.abs() > self.params.moving_speed_threshold_ms
            || body.angular_rads.abs() > self.params.moving_turn_rate_threshold_rads;

        if logged {
            state.log_position();
        }

        StatusReport {
            linear_ms: body.linear_ms,
            angular_rads: body.angular_rads,
            logged
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::motor_model::RPM_TO_RADS;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_full_voltage_straight_line() {
        let vehicle = VehicleParams::default();
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::new(Params::default());

        ctrl.set_cmd(WheelCommand::new(400.0, 400.0));
        let report = ctrl.proc(&mut state, &vehicle, DT);

        let expected_x = vehicle.max_rpm * RPM_TO_RADS * vehicle.wheel_radius_m * DT;

        assert!((state.pose.x() - expected_x).abs() < 1e-9);
        assert_eq!(state.pose.y(), 0.0);
        assert_eq!(state.pose.heading_rad, 0.0);
        assert!(report.logged);
        assert_eq!(state.traj_log.len(), 1);
    }

    #[test]
    fn test_idle_not_logged() {
        let vehicle = VehicleParams::default();
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::default();

        for _ in 0..10 {
            let report = ctrl.proc(&mut state, &vehicle, DT);
            assert!(!report.logged);
        }

        assert!(state.traj_log.is_empty());
        assert_eq!(state.pose, Default::default());
    }

    #[test]
    fn test_creep_below_threshold_not_logged() {
        let vehicle = VehicleParams::default();
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::default();

        // 0.01 V gives roughly 0.007 m/s
        ctrl.set_cmd(WheelCommand::new(0.01, 0.01));
        let report = ctrl.proc(&mut state, &vehicle, DT);

        assert!(report.linear_ms > 0.0 && report.linear_ms < 0.01);
        assert!(!report.logged);
        assert!(state.pose.x() > 0.0);
    }

    #[test]
    fn test_speed_on_threshold_not_logged() {
        let vehicle = VehicleParams::default();
        let cmd = WheelCommand::new(1.0, 1.0);

        let rate_rads = wheel_rate_rads(1.0, vehicle.max_voltage_v, vehicle.max_rpm);
        let body = kinematics::body_rates(
            &WheelRates::new(rate_rads, rate_rads),
            vehicle.wheel_radius_m,
            vehicle.track_width_m
        );

        // Moving exactly at the threshold speed
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::new(Params {
            moving_speed_threshold_ms: body.linear_ms,
            ..Params::default()
        });
        ctrl.set_cmd(cmd);

        let report = ctrl.proc(&mut state, &vehicle, DT);

        assert_eq!(report.linear_ms, body.linear_ms);
        assert!(!report.logged);
        assert!(state.traj_log.is_empty());

        // Just below it
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::new(Params {
            moving_speed_threshold_ms: body.linear_ms * 0.999,
            ..Params::default()
        });
        ctrl.set_cmd(cmd);

        assert!(ctrl.proc(&mut state, &vehicle, DT).logged);
        assert_eq!(state.traj_log.len(), 1);
    }

    #[test]
    fn test_spin_in_place() {
        let vehicle = VehicleParams::default();
        let mut state = SimState::default();
        let mut ctrl = ManualCtrl::default();

        ctrl.set_cmd(WheelCommand::new(-100.0, 100.0));
        let report = ctrl.proc(&mut state, &vehicle, DT);

        assert_eq!(report.linear_ms, 0.0);
        assert!(report.angular_rads > 0.0);
        assert!(report.logged);
        assert_eq!(state.pose.position_m, nalgebra::Vector2::<f64>::default());
        assert!(state.wheel_rates.left_rads < 0.0);
    }
}
