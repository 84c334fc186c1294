//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::engine::Simulation;

/// Shared application state.
///
/// The ticker holds a write lock for the duration of one tick; request
/// handlers only read.
#[derive(Clone)]
pub struct AppState {
    pub simulation: Arc<RwLock<Simulation>>,

    /// Wall-clock time between ticks, used as the page's poll interval
    pub tick: Duration,
}

impl AppState {
    pub fn new(simulation: Simulation, tick: Duration) -> Self {
        Self {
            simulation: Arc::new(RwLock::new(simulation)),
            tick,
        }
    }
}
