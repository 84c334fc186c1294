//! Background task driving the simulation in wall-clock time.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::{EngineError, TramEventKind};
use crate::web::AppState;

/// Tick the shared simulation every `state.tick` until `max_ticks` ticks
/// have run, forever if `None`. Stops at the first engine error.
pub async fn run(state: AppState, max_ticks: Option<u64>) -> Result<(), EngineError> {
    // tokio rejects a zero period.
    let mut interval = time::interval(state.tick.max(Duration::from_millis(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ran = 0u64;
    while max_ticks.is_none_or(|max| ran < max) {
        interval.tick().await;

        let report = {
            let mut simulation = state.simulation.write().await;
            simulation.tick()?
        };
        ran += 1;

        let departures = report
            .events
            .iter()
            .filter(|e| matches!(e.kind, TramEventKind::Departed { .. }))
            .count();
        debug!(
            time = %report.time,
            departures,
            on_map = report.positions.len(),
            "tick"
        );
    }

    info!(ticks = ran, "ticker finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Clock, Line, Point, Stop};
    use crate::engine::Simulation;
    use crate::network::Network;

    fn state(connected: bool) -> AppState {
        let mut network = Network::new();
        let a = network.add_stop(Stop::new("A", "Alpha", Point::new(0.0, 0.0))).unwrap();
        let b = network.add_stop(Stop::new("B", "Bravo", Point::new(3.0, 0.0))).unwrap();
        if connected {
            network.add_connected_stop(a, b, 3).unwrap();
        }
        let mut line = Line::new("1", vec![a, b], 5, 0, 10).unwrap();
        line.add_tram(1).unwrap();
        network.add_line(line);

        let simulation = Simulation::new(network, Clock::new(5, 0).unwrap());
        AppState::new(simulation, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn runs_requested_number_of_ticks() {
        let state = state(true);
        run(state.clone(), Some(3)).await.unwrap();

        let simulation = state.simulation.read().await;
        assert_eq!(simulation.ticks(), 3);
        assert_eq!(simulation.clock().to_string(), "05:03");
        assert_eq!(simulation.positions()[0].position, Point::new(3.0, 0.0));
    }

    #[tokio::test]
    async fn stops_on_engine_error() {
        let state = state(false);
        let err = run(state.clone(), Some(10)).await.unwrap_err();
        assert!(matches!(err, EngineError::BrokenItinerary { .. }));
        assert_eq!(state.simulation.read().await.ticks(), 0);
    }
}
