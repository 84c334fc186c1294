//! Simulation configuration.

use std::time::Duration;

use crate::domain::Clock;

/// Configuration parameters for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of trams registered on every line.
    pub fleet_size: usize,

    /// Simulated time shown when the simulation starts.
    pub start: Clock,

    /// Real time between two ticks (one simulated minute each).
    pub tick: Duration,
}

impl SimConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(fleet_size: usize, start: Clock, tick: Duration) -> Self {
        Self {
            fleet_size,
            start,
            tick,
        }
    }

    pub fn with_fleet_size(mut self, fleet_size: usize) -> Self {
        self.fleet_size = fleet_size;
        self
    }

    pub fn with_start(mut self, start: Clock) -> Self {
        self.start = start;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fleet_size: 5,
            start: Clock::default(),
            tick: Duration::from_secs(1), // 1 s real time = 1 simulated minute
        }
    }
}
