//! # Controllers module
//!
//! Building blocks shared by the autonomous controllers: a saturated
//! proportional controller and the kinematic drive demand they output.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use util::maths::clamp;
use crate::{
    kinematics::{self, BodyRates, VehicleParams},
    sim_state::SimState
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A proportional controller with a saturated output.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct PropController {
    /// Proportional gain
    k_p: f64,

    /// Output limit, the output is kept within `[-limit, limit]`
    limit: f64
}

/// Speed and turn rate demanded by an autonomous controller.
///
/// These are kinematic demands, they bypass the motor model.
#[derive(Debug, Serialize, Clone, Copy, Default, PartialEq)]
pub struct DriveDemand {
    /// Units: meters/second
    pub speed_ms: f64,

    /// Units: radians/second
    pub turn_rate_rads: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PropController {

    /// Create a new controller with the given gain and output limit.
    pub fn new(k_p: f64, limit: f64) -> Self {
        Self {
            k_p,
            limit: limit.abs()
        }
    }

    /// Get the value of the controller for the given error.
    pub fn get(&self, error: f64) -> f64 {
        clamp(&(self.k_p * error), &-self.limit, &self.limit)
    }
}

impl DriveDemand {

    /// Drive the vehicle at this demand for one cycle.
    ///
    /// The wheel rates needed to achieve the demand are stored for display,
    /// the pose is integrated directly from the demand and the new position
    /// is logged.
    pub fn apply(&self, state: &mut SimState, vehicle: &VehicleParams, dt_s: f64) {
        let body = BodyRates {
            linear_ms: self.speed_ms,
            angular_rads: self.turn_rate_rads
        };

        state.wheel_rates = kinematics::wheel_rates(
            &body,
            vehicle.wheel_radius_m,
            vehicle.track_width_m
        );
        state.pose = kinematics::integrate(&state.pose, &body, dt_s);
        state.log_position();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_saturation() {
        let ctrl = PropController::new(2.0, 2.0);

        assert_eq!(ctrl.get(0.5), 1.0);
        assert_eq!(ctrl.get(-0.5), -1.0);
        assert_eq!(ctrl.get(3.0), 2.0);
        assert_eq!(ctrl.get(-3.0), -2.0);

        // Negative limits are treated as magnitudes
        assert_eq!(PropController::new(1.0, -0.3).get(5.0), 0.3);
    }

    #[test]
    fn test_apply_demand() {
        let vehicle = VehicleParams::default();
        let mut state = SimState::new(10);
        let demand = DriveDemand { speed_ms: 0.6, turn_rate_rads: 0.0 };

        demand.apply(&mut state, &vehicle, 0.5);

        assert!((state.pose.x() - 0.3).abs() < 1e-12);
        assert_eq!(state.traj_log.len(), 1);
        assert!((state.wheel_rates.left_rads - 0.6 / vehicle.wheel_radius_m).abs() < 1e-12);
        assert_eq!(state.wheel_rates.left_rads, state.wheel_rates.right_rads);
    }
}
