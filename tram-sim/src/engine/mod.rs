//! Scheduling and movement engine.
//!
//! This module drives the network forward one simulated minute at a
//! time. It is a deterministic state stepper: given the same network
//! and start time it always produces the same sequence of tick reports.

mod config;
mod movement;
mod simulation;

pub use config::SimConfig;
pub use movement::step_vector;
pub use simulation::{
    DAILY_RESET, EngineError, Simulation, TickReport, TramEvent, TramEventKind, TramPosition,
};
