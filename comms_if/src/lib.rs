//! # Communications interface crate.
//!
//! Provides the common interfaces between the simulation core and anything driving or
//! displaying it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommands - instructions sent to the simulation
pub mod tc;

/// Telemetry - data produced by the simulation each cycle
pub mod tm;
