//! Domain types for the tram simulator.
//!
//! This module contains the core model: stops, lines, trams and the
//! simulated clock. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod clock;
mod error;
mod line;
mod stop;
mod tram;

pub use clock::{Clock, MINUTES_PER_DAY};
pub use error::DomainError;
pub use line::{Line, LineId, Schedule};
pub use stop::{Connection, Point, Stop, StopId};
pub use tram::{Direction, Tram, TramId, TramState};
