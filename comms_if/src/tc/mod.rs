//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface.
//!
//! Telecommands are encoded as JSON objects with a `type` string and an
//! optional `payload`, for example:
//!
//! ```json
//! {"type": "GoTo", "payload": {"x": 1.0, "y": 2.0, "theta_deg": 90.0}}
//! ```
//!
//! Angles in telecommands are given in degrees, as entered by an operator.
//! Conversion into radians is the job of whoever consumes the TC.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static TYPE_HAS_NO_PAYLOAD: [&str; 2] = [
    "StopPath",
    "CancelGoTo"
];

static KNOWN_TYPES: [&str; 6] = [
    "WheelCmd",
    "ProgramPath",
    "GoTo",
    "StopPath",
    "CancelGoTo",
    "ResetPose"
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Voltages to apply to the left and right motors during manual driving.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelVoltages {
    /// Left motor voltage.
    ///
    /// Units: volts
    pub left_v: f64,

    /// Right motor voltage.
    ///
    /// Units: volts
    pub right_v: f64
}

/// A point and heading in the plane, as entered by an operator.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoseSpec {
    /// X coordinate.
    ///
    /// Units: meters
    pub x: f64,

    /// Y coordinate.
    ///
    /// Units: meters
    pub y: f64,

    /// Heading, measured anticlockwise from the +ve X axis.
    ///
    /// Units: degrees
    #[serde(default)]
    pub theta_deg: f64
}

/// An ordered list of waypoints to be visited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathSpec {
    pub waypoints: Vec<PoseSpec>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
pub enum Tc {
    /// Set the manual drive voltages.
    WheelCmd(WheelVoltages),

    /// Begin following the given sequence of waypoints.
    ProgramPath(PathSpec),

    /// Navigate to the given position and final heading.
    GoTo(PoseSpec),

    /// Stop following the current path.
    StopPath,

    /// Cancel the current go-to-position target.
    CancelGoTo,

    /// Place the vehicle at the given pose.
    ResetPose(PoseSpec)
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, serde_json::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e))
        };

        // Get the type of the TC
        let tc_type = match val["type"].as_str() {
            Some(s) => s.to_string(),
            None => return Err(TcParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        if !KNOWN_TYPES.contains(&tc_type.as_str()) {
            return Err(TcParseError::InvalidType(
                format!("{} is not a recognised TC type", tc_type)
            ))
        }

        // Get the payload. If it's null and the type does not have a payload
        // then an error is returned
        if val["payload"].is_null()
            &&
            !TYPE_HAS_NO_PAYLOAD.contains(&tc_type.as_str())
        {
            return Err(TcParseError::MissingPayload(tc_type))
        }

        // Payload-less types are rebuilt without the payload field, so that
        // `{"type": "StopPath", "payload": null}` is accepted too.
        let val = if TYPE_HAS_NO_PAYLOAD.contains(&tc_type.as_str()) {
            serde_json::json!({ "type": tc_type })
        }
        else {
            val
        };

        serde_json::from_value(val)
            .map_err(|e| TcParseError::InvalidPayload(tc_type, e))
    }

    /// Serialise the TC into a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_wheel_cmd() {
        let tc = Tc::from_json(
            r#"{"type": "WheelCmd", "payload": {"left_v": 400.0, "right_v": -120.5}}"#
        ).unwrap();

        assert_eq!(tc, Tc::WheelCmd(WheelVoltages { left_v: 400.0, right_v: -120.5 }));
    }

    #[test]
    fn test_parse_path() {
        let tc = Tc::from_json(
            r#"{
                "type": "ProgramPath",
                "payload": {"waypoints": [
                    {"x": 1.0, "y": 0.0, "theta_deg": 0.0},
                    {"x": 1.0, "y": 1.0}
                ]}
            }"#
        ).unwrap();

        match tc {
            Tc::ProgramPath(p) => {
                assert_eq!(p.waypoints.len(), 2);
                assert_eq!(p.waypoints[1].theta_deg, 0.0);
                assert_eq!(p.waypoints[1].y, 1.0);
            },
            t => panic!("Expected a ProgramPath TC, got {:?}", t)
        }
    }

    #[test]
    fn test_parse_no_payload() {
        assert_eq!(Tc::from_json(r#"{"type": "StopPath"}"#).unwrap(), Tc::StopPath);
        assert_eq!(
            Tc::from_json(r#"{"type": "CancelGoTo", "payload": null}"#).unwrap(),
            Tc::CancelGoTo
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Tc::from_json("{not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "Launch"}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"payload": {}}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "GoTo"}"#),
            Err(TcParseError::MissingPayload(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "GoTo", "payload": {"x": "far"}}"#),
            Err(TcParseError::InvalidPayload(_, _))
        ));
    }

    #[test]
    fn test_json_is_symmetric_with_parser() {
        let tc = Tc::GoTo(PoseSpec { x: -2.0, y: 3.5, theta_deg: 45.0 });
        let json = tc.to_json().unwrap();

        assert_eq!(Tc::from_json(&json).unwrap(), tc);
    }
}
