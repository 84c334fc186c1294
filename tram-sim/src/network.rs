//! The tram network: an arena of stops and the lines running over them.
//!
//! Stops refer to each other by [`StopId`] and trams refer to their line
//! by [`LineId`], so the network is the single owner of the whole graph.
//! Connections are symmetric: connecting A to B also connects B to A
//! with the same travel time.

use std::collections::HashMap;

use crate::domain::{DomainError, Line, LineId, Point, Stop, StopId};

/// The stop arena, with lookup by configuration code.
#[derive(Debug, Clone, Default)]
pub struct Stops {
    stops: Vec<Stop>,
    by_code: HashMap<String, StopId>,
}

impl Stops {
    pub fn get(&self, id: StopId) -> Result<&Stop, DomainError> {
        self.stops.get(id.0).ok_or(DomainError::UnknownStop(id))
    }

    pub fn position(&self, id: StopId) -> Result<Point, DomainError> {
        self.get(id).map(Stop::position)
    }

    pub fn by_code(&self, code: &str) -> Option<StopId> {
        self.by_code.get(code).copied()
    }

    /// Travel time in minutes between two directly connected stops.
    pub fn distance(&self, from: StopId, to: StopId) -> Result<u32, DomainError> {
        let origin = self.get(from)?;
        let target = self.get(to)?;
        origin
            .connection_to(to)
            .map(|c| c.minutes)
            .ok_or_else(|| {
                DomainError::StopsNotAdjacent(origin.code().to_string(), target.code().to_string())
            })
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }
}

/// All stops and lines of a simulation.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stops: Stops,
    lines: Vec<Line>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stop.
    ///
    /// Fails if another stop already uses the same code or stands at the
    /// same coordinate.
    pub fn add_stop(&mut self, stop: Stop) -> Result<StopId, DomainError> {
        if self.stops.by_code.contains_key(stop.code()) {
            return Err(DomainError::DuplicateStopId(stop.code().to_string()));
        }
        if let Some(existing) = self
            .stops
            .stops
            .iter()
            .find(|s| s.position() == stop.position())
        {
            return Err(DomainError::DuplicatePosition {
                existing: existing.code().to_string(),
                new: stop.code().to_string(),
                x: stop.position().x,
                y: stop.position().y,
            });
        }

        let id = StopId(self.stops.stops.len());
        self.stops.by_code.insert(stop.code().to_string(), id);
        self.stops.stops.push(stop);
        Ok(id)
    }

    /// Connect two stops with the given travel time in minutes.
    ///
    /// The connection is stored on both stops.
    pub fn add_connected_stop(
        &mut self,
        a: StopId,
        b: StopId,
        minutes: i64,
    ) -> Result<(), DomainError> {
        let stop_a = self.stops.get(a)?;
        let stop_b = self.stops.get(b)?;

        if a == b {
            return Err(DomainError::SelfConnection(stop_a.code().to_string()));
        }
        if stop_a.connection_to(b).is_some() || stop_b.connection_to(a).is_some() {
            return Err(DomainError::ConnectionAlreadySet(
                stop_a.code().to_string(),
                stop_b.code().to_string(),
            ));
        }
        let minutes = u32::try_from(minutes)
            .ok()
            .filter(|m| *m > 0)
            .ok_or(DomainError::InvalidDistance(minutes))?;

        self.stops.stops[a.0].push_connection(b, minutes);
        self.stops.stops[b.0].push_connection(a, minutes);
        Ok(())
    }

    /// Append a line to the network and return its id.
    pub fn add_line(&mut self, mut line: Line) -> LineId {
        let id = LineId(self.lines.len());
        line.assign_id(id);
        self.lines.push(line);
        id
    }

    /// Travel time in minutes between two directly connected stops.
    pub fn get_distance(&self, from: StopId, to: StopId) -> Result<u32, DomainError> {
        self.stops.distance(from, to)
    }

    /// Check that every consecutive pair of an itinerary is connected.
    pub fn check_itinerary(&self, itinerary: &[StopId]) -> Result<(), DomainError> {
        for hop in itinerary.windows(2) {
            self.get_distance(hop[0], hop[1])?;
        }
        Ok(())
    }

    pub fn stops(&self) -> &Stops {
        &self.stops
    }

    pub fn stop(&self, id: StopId) -> Result<&Stop, DomainError> {
        self.stops.get(id)
    }

    pub fn stop_by_code(&self, code: &str) -> Option<StopId> {
        self.stops.by_code(code)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, id: LineId) -> Result<&Line, DomainError> {
        self.lines.get(id.0).ok_or(DomainError::UnknownLine(id))
    }

    pub fn line_mut(&mut self, id: LineId) -> Result<&mut Line, DomainError> {
        self.lines.get_mut(id.0).ok_or(DomainError::UnknownLine(id))
    }

    /// Every connection once, as `(lower id, higher id, minutes)`.
    pub fn connections(&self) -> Vec<(StopId, StopId, u32)> {
        self.stops
            .iter()
            .flat_map(|(id, stop)| {
                stop.connections()
                    .iter()
                    .filter(move |c| id < c.to)
                    .map(move |c| (id, c.to, c.minutes))
            })
            .collect()
    }

    /// Read-only stops alongside mutable lines, for the tick loop.
    pub(crate) fn split_mut(&mut self) -> (&Stops, &mut [Line]) {
        (&self.stops, &mut self.lines)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Connecting A and B makes the distance symmetric, listed once per side
        #[test]
        fn symmetric_distance(
            ax in -500i32..500, ay in -500i32..500,
            dx in 1i32..100, d in 1i64..240,
        ) {
            let mut network = Network::new();
            let a = network.add_stop(Stop::new("A", "A", Point::new(f64::from(ax), f64::from(ay)))).unwrap();
            let b = network.add_stop(Stop::new("B", "B", Point::new(f64::from(ax + dx), f64::from(ay)))).unwrap();
            network.add_connected_stop(a, b, d).unwrap();

            prop_assert_eq!(network.get_distance(a, b), Ok(d as u32));
            prop_assert_eq!(network.get_distance(b, a), Ok(d as u32));
            prop_assert_eq!(network.stop(a).unwrap().connections().iter().filter(|c| c.to == b).count(), 1);
            prop_assert_eq!(network.stop(b).unwrap().connections().iter().filter(|c| c.to == a).count(), 1);
        }
    }
}
