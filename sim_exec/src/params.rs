//! # Simulation Executable Parameters
//!
//! This module provides parameters for the simulation executable, loaded from
//! `params/sim.toml`. Every table and key is optional, anything left out takes
//! its default.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

use crate::{
    goto_ctrl,
    kinematics::VehicleParams,
    manual_ctrl,
    path_ctrl,
    traj_log::DEFAULT_TRAJ_LOG_CAPACITY
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {

    /// Physical parameters of the vehicle
    pub vehicle: VehicleParams,

    /// Simulated time advanced by each cycle
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Maximum number of samples kept in the trajectory log
    pub traj_log_capacity: usize,

    pub manual: manual_ctrl::Params,
    pub path: path_ctrl::Params,
    pub goto: goto_ctrl::Params
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("Parameter {0} must be finite and greater than zero, got {1}")]
    NotPositive(&'static str, f64),

    #[error("The trajectory log capacity must be at least 1")]
    ZeroTrajLogCapacity
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimParams {
    /// Check the parameters can be used to run a simulation.
    ///
    /// The kinematics divide by the wheel radius and track width, and the
    /// motor model by the max voltage, so these must all be positive.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("vehicle.wheel_radius_m", self.vehicle.wheel_radius_m),
            ("vehicle.track_width_m", self.vehicle.track_width_m),
            ("vehicle.max_voltage_v", self.vehicle.max_voltage_v),
            ("cycle_period_s", self.cycle_period_s)
        ];

        for (name, value) in positive.iter() {
            if !value.is_finite() || *value <= 0.0 {
                return Err(ParamsError::NotPositive(name, *value))
            }
        }

        if self.traj_log_capacity == 0 {
            return Err(ParamsError::ZeroTrajLogCapacity)
        }

        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            vehicle: VehicleParams::default(),
            cycle_period_s: 1.0 / 60.0,
            traj_log_capacity: DEFAULT_TRAJ_LOG_CAPACITY,
            manual: manual_ctrl::Params::default(),
            path: path_ctrl::Params::default(),
            goto: goto_ctrl::Params::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        assert_eq!(SimParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_toml() {
        let params: SimParams = util::params::from_str(r#"
            cycle_period_s = 0.02

            [vehicle]
            track_width_m = 0.5

            [goto]
            close_threshold_m = 0.5
        "#).unwrap();

        assert_eq!(params.cycle_period_s, 0.02);
        assert_eq!(params.vehicle.track_width_m, 0.5);
        assert_eq!(params.vehicle.wheel_radius_m, 0.15);
        assert_eq!(params.goto.close_threshold_m, 0.5);
        assert_eq!(params.goto.close_turn_k_p, 2.5);
        assert_eq!(params.traj_log_capacity, 500);
    }

    #[test]
    fn test_invalid() {
        let mut params = SimParams::default();
        params.vehicle.track_width_m = 0.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("vehicle.track_width_m", 0.0))
        );

        let mut params = SimParams::default();
        params.cycle_period_s = f64::NAN;
        assert!(params.validate().is_err());

        let mut params = SimParams::default();
        params.traj_log_capacity = 0;
        assert_eq!(params.validate(), Err(ParamsError::ZeroTrajLogCapacity));
    }
}
