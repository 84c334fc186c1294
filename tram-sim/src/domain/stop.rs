//! Tram stops and the connections between them.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// Index of a stop within its network.
///
/// Stops are stored in an arena owned by the network; everything else
/// refers to them by index.
///
/// # Examples
///
/// ```
/// use tram_sim::domain::StopId;
///
/// let id = StopId(3);
/// assert_eq!(id.to_string(), "#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub usize);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point on the map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One side of a bidirectional connection: the neighbour and the
/// travel time to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// The neighbouring stop.
    pub to: StopId,

    /// Travel time in minutes (always at least 1).
    pub minutes: u32,
}

/// A fixed point in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    code: String,
    name: String,
    position: Point,
    connections: Vec<Connection>,
}

impl Stop {
    /// Create an unconnected stop.
    pub fn new(code: impl Into<String>, name: impl Into<String>, position: Point) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            position,
            connections: Vec::new(),
        }
    }

    /// The identifier used in configuration files.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable stop name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Connections in the order they were added.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The connection leading to `other`, if the two stops are adjacent.
    pub fn connection_to(&self, other: StopId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.to == other)
    }

    /// Only the network calls this, always in pairs, to keep connections
    /// symmetric.
    pub(crate) fn push_connection(&mut self, to: StopId, minutes: u32) {
        self.connections.push(Connection { to, minutes });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stop_has_no_connections() {
        let stop = Stop::new("1", "Teatr Bagatela", Point::new(20.0, -70.0));
        assert_eq!(stop.code(), "1");
        assert_eq!(stop.name(), "Teatr Bagatela");
        assert_eq!(stop.position(), Point::new(20.0, -70.0));
        assert!(stop.connections().is_empty());
    }

    #[test]
    fn connection_lookup() {
        let mut stop = Stop::new("1", "Teatr Bagatela", Point::default());
        stop.push_connection(StopId(1), 4);
        stop.push_connection(StopId(2), 3);

        assert_eq!(stop.connection_to(StopId(2)).map(|c| c.minutes), Some(3));
        assert!(stop.connection_to(StopId(5)).is_none());
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -2.0);
        assert_eq!(b - a, Point::new(3.0, -4.0));
        assert_eq!(a + b, Point::new(5.0, 0.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(a.to_string(), "(1, 2)");
    }
}
