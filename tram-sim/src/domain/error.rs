//! Domain error types.
//!
//! These errors represent validation failures and broken invariants in
//! the network model. They are distinct from file and parsing errors,
//! which live in the loader.

use super::{LineId, StopId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Start hour outside 0-23 or start minute outside 0-59
    #[error("invalid time of day: {hours}:{minutes:02}")]
    InvalidTime { hours: i64, minutes: i64 },

    /// Interval between departures must be positive
    #[error("interval must be positive, got {0}")]
    InvalidInterval(i64),

    /// Tram sequence numbers start at 1
    #[error("tram sequence number must be positive, got {0}")]
    InvalidSequence(i64),

    /// A tram with this sequence number already runs on the line
    #[error("tram {sequence} is already registered on line {line}")]
    DuplicateTram { line: String, sequence: u32 },

    /// A line must call at one stop at least
    #[error("line {0} has an empty itinerary")]
    EmptyItinerary(String),

    /// Two stops declared with the same identifier
    #[error("tram stop id {0} is already in use")]
    DuplicateStopId(String),

    /// Two stops declared at the same coordinate
    #[error("tram stops {existing} and {new} share position ({x}, {y})")]
    DuplicatePosition {
        existing: String,
        new: String,
        x: f64,
        y: f64,
    },

    /// The unordered pair is already connected
    #[error("connection between {0} and {1} is already set")]
    ConnectionAlreadySet(String, String),

    /// A stop cannot be its own neighbour
    #[error("tram stop {0} cannot be connected to itself")]
    SelfConnection(String),

    /// Travel time between stops must be at least one minute
    #[error("travel time must be positive, got {0}")]
    InvalidDistance(i64),

    /// Distance lookup between stops with no direct connection
    #[error("tram stops {0} and {1} are not directly connected")]
    StopsNotAdjacent(String, String),

    /// Stop index does not belong to this network
    #[error("unknown tram stop {0}")]
    UnknownStop(StopId),

    /// Line index does not belong to this network
    #[error("unknown line {0}")]
    UnknownLine(LineId),
}
