//! # Trajectory log
//!
//! A bounded record of where the vehicle has been, used for drawing its
//! trail. Once full the oldest samples are dropped to make room for new ones.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;
use serde::Serialize;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Default maximum number of samples held in the log.
pub const DEFAULT_TRAJ_LOG_CAPACITY: usize = 500;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Trajectory log, an ordered FIFO of `[x, y]` samples.
#[derive(Debug, Clone, Serialize)]
pub struct TrajLog {
    capacity: usize,
    samples_m: VecDeque<[f64; 2]>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajLog {
    /// Create an empty log holding at most `capacity` samples.
    ///
    /// A capacity of zero is raised to one so the newest sample is always
    /// available.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            capacity,
            samples_m: VecDeque::with_capacity(capacity)
        }
    }

    /// Append a sample, evicting the oldest if the log is full.
    pub fn push(&mut self, x_m: f64, y_m: f64) {
        while self.samples_m.len() >= self.capacity {
            self.samples_m.pop_front();
        }

        self.samples_m.push_back([x_m, y_m]);
    }

    /// Copy the current contents, oldest first.
    ///
    /// The log keeps changing as the simulation runs, consumers should only
    /// hold on to snapshots.
    pub fn snapshot(&self) -> Vec<[f64; 2]> {
        self.samples_m.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<[f64; 2]> {
        self.samples_m.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_m.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples_m.clear();
    }
}

impl Default for TrajLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRAJ_LOG_CAPACITY)
    }
}
