//! # Kinematics module
//!
//! Differential drive kinematics. The vehicle has two independently driven
//! wheels on a common axle, and steers purely by varying their relative
//! speed.
//!
//! Wheel rates map onto body rates with
//!
//! ```text
//! v = (w_l + w_r) / 2 * r
//! w = (w_r - w_l) * r / track
//! ```
//!
//! Pose is integrated with a first order (Euler) step which rotates first and
//! then translates along the *new* heading. Trajectory shapes depend on this
//! ordering, so don't swap it.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
pub use params::VehicleParams;
use crate::pose::Pose;
use crate::motor_model::rads_to_rpm;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Angular velocities of the left and right wheels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct WheelRates {
    /// Units: radians/second
    pub left_rads: f64,

    /// Units: radians/second
    pub right_rads: f64
}

/// Velocities of the vehicle body.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct BodyRates {
    /// Forward speed, positive forwards.
    ///
    /// Units: meters/second
    pub linear_ms: f64,

    /// Turn rate, positive anticlockwise (to the left).
    ///
    /// Units: radians/second
    pub angular_rads: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WheelRates {
    pub fn new(left_rads: f64, right_rads: f64) -> Self {
        Self { left_rads, right_rads }
    }

    /// The rates as `[left, right]` in revolutions/minute.
    pub fn to_rpm(&self) -> [f64; 2] {
        [rads_to_rpm(self.left_rads), rads_to_rpm(self.right_rads)]
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.left_rads, self.right_rads]
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the body rates produced by the given wheel rates.
pub fn body_rates(
    wheel_rates: &WheelRates,
    wheel_radius_m: f64,
    track_width_m: f64
) -> BodyRates {
    BodyRates {
        linear_ms: (wheel_rates.left_rads + wheel_rates.right_rads) / 2.0 * wheel_radius_m,
        angular_rads:
            (wheel_rates.right_rads - wheel_rates.left_rads) * wheel_radius_m / track_width_m
    }
}

/// Get the wheel rates needed to achieve the given body rates.
///
/// Each wheel's ground speed is the body speed plus or minus the speed
/// contributed by the turn at half the track width.
pub fn wheel_rates(
    body_rates: &BodyRates,
    wheel_radius_m: f64,
    track_width_m: f64
) -> WheelRates {
    let half_track_speed_ms = body_rates.angular_rads * track_width_m / 2.0;

    WheelRates {
        left_rads: (body_rates.linear_ms - half_track_speed_ms) / wheel_radius_m,
        right_rads: (body_rates.linear_ms + half_track_speed_ms) / wheel_radius_m
    }
}

/// Integrate the pose forward by `dt_s` at the given body rates.
pub fn integrate(pose: &Pose, body_rates: &BodyRates, dt_s: f64) -> Pose {
    // Rotate first
    let heading_rad = pose.heading_rad + body_rates.angular_rads * dt_s;

    // Then translate along the new heading
    let mut next = Pose {
        position_m: pose.position_m,
        heading_rad
    };
    let delta_m = next.forward2() * body_rates.linear_ms * dt_s;
    next.position_m += delta_m;

    trace!(
        "Integrated {:?} at v = {:.4} m/s, w = {:.4} rad/s -> {:?}",
        pose, body_rates.linear_ms, body_rates.angular_rads, next
    );

    next
}

/// Step the pose forward by `dt_s` with the given wheel angular velocities.
pub fn step(
    pose: &Pose,
    left_rads: f64,
    right_rads: f64,
    wheel_radius_m: f64,
    track_width_m: f64,
    dt_s: f64
) -> Pose {
    let rates = body_rates(
        &WheelRates::new(left_rads, right_rads),
        wheel_radius_m,
        track_width_m
    );

    integrate(pose, &rates, dt_s)
}
