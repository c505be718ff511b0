//! # Simulation library.
//!
//! The core of the differential drive vehicle simulation. This library allows the executable, the
//! benchmarks and any other crate in the workspace to drive the simulation directly.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Shared building blocks for the autonomous controllers
pub mod controllers;

/// Go-to-position control - drives the vehicle to a single target pose
pub mod goto_ctrl;

/// Kinematics - converts between wheel rates and body rates and integrates the pose
pub mod kinematics;

/// Manual control - drives the vehicle from operator set motor voltages
pub mod manual_ctrl;

/// Mode arbiter - owns the simulation and picks which controller drives each cycle
pub mod mode_arbiter;

/// Motor model - converts motor voltages to wheel rates
pub mod motor_model;

/// Parameters for the whole simulation
pub mod params;

/// Path following - drives the vehicle through a sequence of waypoints
pub mod path_ctrl;

/// Pose and waypoint types
pub mod pose;

/// State shared between the controllers
pub mod sim_state;

/// Telecommand processor - turns telecommands into simulation commands
pub mod tc_processor;

/// Trajectory log - a bounded history of where the vehicle has been
pub mod traj_log;
