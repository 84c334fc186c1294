//! Data transfer objects for the JSON API.

use serde::Serialize;

use crate::engine::{Simulation, TramPosition};
use crate::network::Network;

/// Static layout of the network.
#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub stops: Vec<StopResult>,
    pub connections: Vec<ConnectionResult>,
    pub lines: Vec<LineResult>,
}

/// A tram stop.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Stop id as given in the configuration
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// An undirected connection between two stops.
#[derive(Debug, Serialize)]
pub struct ConnectionResult {
    pub from: String,
    pub to: String,

    /// Travel time in minutes
    pub minutes: u32,
}

/// A tram line and its timetable.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub line: String,

    /// First departure in HH:MM format
    pub start: String,

    /// Minutes between consecutive departures
    pub interval: u32,

    /// Stop ids in forward order
    pub stops: Vec<String>,

    pub fleet_size: usize,
}

/// Live tram positions.
#[derive(Debug, Serialize)]
pub struct TramsResponse {
    /// Time the next tick will run at, in HH:MM format
    pub time: String,

    /// Ticks run since start
    pub ticks: u64,

    pub trams: Vec<TramResult>,
}

/// One tram on the map.
#[derive(Debug, Serialize)]
pub struct TramResult {
    pub line: String,
    pub sequence: u32,
    pub x: f64,
    pub y: f64,

    /// `false` while parked at a terminus
    pub activated: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl NetworkResponse {
    pub fn from_network(network: &Network) -> Self {
        let stops = network
            .stops()
            .iter()
            .map(|(_, stop)| StopResult {
                id: stop.code().to_string(),
                name: stop.name().to_string(),
                x: stop.position().x,
                y: stop.position().y,
            })
            .collect();

        let code = |id| network.stop(id).ok().map(|s| s.code().to_string());
        let connections = network
            .connections()
            .into_iter()
            .filter_map(|(a, b, minutes)| {
                Some(ConnectionResult {
                    from: code(a)?,
                    to: code(b)?,
                    minutes,
                })
            })
            .collect();

        let lines = network
            .lines()
            .iter()
            .map(|line| {
                let schedule = line.schedule();
                LineResult {
                    line: line.code().to_string(),
                    start: format!(
                        "{:02}:{:02}",
                        schedule.hours_start(),
                        schedule.minutes_start()
                    ),
                    interval: schedule.interval(),
                    stops: line.itinerary().iter().filter_map(|&id| code(id)).collect(),
                    fleet_size: line.fleet_size(),
                }
            })
            .collect();

        Self {
            stops,
            connections,
            lines,
        }
    }
}

impl TramResult {
    pub fn from_position(network: &Network, position: &TramPosition) -> Self {
        let line = network
            .line(position.tram.line)
            .map(|l| l.code().to_string())
            .unwrap_or_else(|_| position.tram.line.to_string());
        Self {
            line,
            sequence: position.tram.sequence,
            x: position.position.x,
            y: position.position.y,
            activated: position.activated,
        }
    }
}

impl TramsResponse {
    pub fn from_simulation(simulation: &Simulation) -> Self {
        let network = simulation.network();
        let trams = simulation
            .positions()
            .iter()
            .map(|p| TramResult::from_position(network, p))
            .collect();
        Self {
            time: simulation.clock().to_string(),
            ticks: simulation.ticks(),
            trams,
        }
    }
}
