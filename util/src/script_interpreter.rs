//! # Script interpreter module
//!
//! This module provides an interpreter for simulation scripts, allowing
//! telecommands to be executed at given simulation times.
//!
//! A script is a list of entries of the form `<time_s>: <tc json>;`. Anything
//! not matching that pattern is ignored, so comments can be freely written
//! between entries:
//!
//! ```text
//! Drive forwards for a second then stop
//! 0.0: {"type": "WheelCmd", "payload": {"left_v": 200.0, "right_v": 200.0}};
//! 1.0: {"type": "WheelCmd", "payload": {"left_v": 0.0, "right_v": 0.0}};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use log::debug;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
pub struct Command {
    /// The simulation time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
#[derive(Debug)]
pub struct ScriptInterpreter {
    _script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError),

    #[error("Script entries must be in time order, {0} s follows {1} s")]
    OutOfOrder(f64, f64)
}

#[derive(Debug)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(
                ScriptError::ScriptNotFound(path.display().to_string()));
        }

        // Load the script into a string
        let script = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => return Err(ScriptError::ScriptLoadError(e))
        };

        let mut si = Self::from_script_str(&script)?;
        si._script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        for cap in re.captures_iter(script) {
            // Group 1 and 3 are not optional in the regex so will always be
            // present in a match
            let exec_time_s: f64 = match cap[1].parse() {
                Ok(t) => t,
                Err(e) => return Err(
                    ScriptError::InvalidTimestamp(format!("{}", e)))
            };

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = match Tc::from_json(&cap[3]) {
                Ok(c) => c,
                Err(e) => return Err(ScriptError::InvalidTc(
                    exec_time_s, e
                ))
            };

            // Entries are consumed from the front so must be in order
            if let Some(prev) = tc_queue.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(exec_time_s, prev.exec_time_s))
                }
            }

            debug!("Scripted TC at {:.3} s: {:?}", exec_time_s, tc);

            // Build command from the match
            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            _script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs that are due at the given simulation time.
    ///
    /// A TC is due once the time reaches its timestamp. When no TCs remain
    /// `PendingTcs::EndOfScript` is returned.
    pub fn get_pending_tcs(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while the head's exec time has been
        // reached.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        // If the vector is longer than 0 return Some, otherwise None
        if tc_vec.len() > 0 {
            PendingTcs::Some(tc_vec)
        }
        else {
            PendingTcs::None
        }
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::{PoseSpec, WheelVoltages};

    const SCRIPT: &str = r#"
        Drive forwards, then head for a target
        0.0: {"type": "WheelCmd", "payload": {"left_v": 100.0, "right_v": 100.0}};
        0.5: {"type": "WheelCmd", "payload": {"left_v": 0.0, "right_v": 0.0}};
        0.5: {"type": "GoTo", "payload": {"x": 1.0, "y": 1.0, "theta_deg": 90.0}};
        2: {"type": "CancelGoTo"};
    "#;

    #[test]
    fn test_load() {
        let si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 4);
        assert_eq!(si.get_duration(), 2.0);
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_script_str(SCRIPT).unwrap();

        match si.get_pending_tcs(0.0) {
            PendingTcs::Some(tcs) => assert_eq!(
                tcs,
                vec![Tc::WheelCmd(WheelVoltages { left_v: 100.0, right_v: 100.0 })]
            ),
            p => panic!("Expected one TC, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs(0.25), PendingTcs::None));

        match si.get_pending_tcs(0.6) {
            PendingTcs::Some(tcs) => {
                assert_eq!(tcs.len(), 2);
                assert_eq!(tcs[1], Tc::GoTo(PoseSpec { x: 1.0, y: 1.0, theta_deg: 90.0 }));
            },
            p => panic!("Expected two TCs, got {:?}", p)
        }

        match si.get_pending_tcs(10.0) {
            PendingTcs::Some(tcs) => assert_eq!(tcs, vec![Tc::CancelGoTo]),
            p => panic!("Expected one TC, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs(10.0), PendingTcs::EndOfScript));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ScriptInterpreter::from_script_str("nothing to see here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(r#"1.0: {"type": "Jump"};"#),
            Err(ScriptError::InvalidTc(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::from_script_str(
                "2.0: {\"type\": \"StopPath\"};\n1.0: {\"type\": \"StopPath\"};"
            ),
            Err(ScriptError::OutOfOrder(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::new("/no/such/script.txt"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
