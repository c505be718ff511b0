//! Go-to-position module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{GoToOutcome, Params, StatusReport};
use comms_if::tm::NotificationKind;
use crate::{
    controllers::{DriveDemand, PropController},
    kinematics::{VehicleParams, WheelRates},
    pose::Waypoint,
    sim_state::SimState
};
use util::maths::wrap_to_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The go-to-position controller.
#[derive(Debug, Clone)]
pub struct GoToCtrl {
    params: Params,

    far: GainSet,
    close: GainSet
}

/// Controllers for one side of the close threshold.
#[derive(Debug, Clone, Copy)]
struct GainSet {
    head_ctrl: PropController,
    dist_ctrl: PropController
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GoToCtrl {
    pub fn new(params: Params) -> Self {
        Self {
            far: GainSet {
                head_ctrl: PropController::new(params.far_turn_k_p, params.max_turn_rate_rads),
                dist_ctrl: PropController::new(params.far_distance_k_p, params.far_max_speed_ms)
            },
            close: GainSet {
                head_ctrl: PropController::new(params.close_turn_k_p, params.max_turn_rate_rads),
                dist_ctrl: PropController::new(
                    params.close_distance_k_p,
                    params.close_max_speed_ms
                )
            },
            params
        }
    }

    /// Drive towards the target for one cycle.
    pub fn proc(
        &self,
        target: &Waypoint,
        state: &mut SimState,
        vehicle: &VehicleParams,
        dt_s: f64
    ) -> (GoToOutcome, StatusReport) {

        let offset_m = target.offset_from(&state.pose);
        let distance_m = offset_m.norm();
        let close_to_target = distance_m < self.params.close_threshold_m;

        // Blend from facing the target to facing the final heading
        let target_heading_rad = if close_to_target {
            target.theta_rad
        }
        else {
            offset_m[1].atan2(offset_m[0])
        };
        let head_error_rad = wrap_to_pi(target_heading_rad - state.pose.heading_rad);

        let mut report = StatusReport {
            distance_m,
            head_error_rad,
            close_to_target,
            ..Default::default()
        };

        // ---- ARRIVAL ----

        if distance_m < self.params.arrival_threshold_m
            && head_error_rad.abs() < self.params.heading_threshold_rad
        {
            state.wheel_rates = WheelRates::default();
            state.notify(NotificationKind::DestinationReached, None);

            report.arrived = true;
            return (GoToOutcome::Arrived, report)
        }

        // ---- COMMAND GENERATION ----

        let gains = if close_to_target { &self.close } else { &self.far };

        let demand = DriveDemand {
            speed_ms: gains.dist_ctrl.get(distance_m),
            turn_rate_rads: gains.head_ctrl.get(head_error_rad)
        };

        trace!(
            "GoToCtrl dist {:.4} m (close: {}), head err {:.4} rad, demand {:?}",
            distance_m, close_to_target, head_error_rad, demand
        );

        demand.apply(state, vehicle, dt_s);

        report.speed_ms = demand.speed_ms;
        report.turn_rate_rads = demand.turn_rate_rads;

        (GoToOutcome::Driving, report)
    }
}

impl Default for GoToCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}
