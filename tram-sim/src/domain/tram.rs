//! Trams and their per-trip state.
//!
//! A `Tram` never leaves its line. It starts in the depot, is placed on
//! the map at its first departure, and from then on alternates between
//! running a trip and waiting at a terminus for its next departure:
//!
//! ```text
//! Depot ──depart──► Running ──terminus──► Layover ──depart──► Running ─► …
//!                   (forward)             (reversed)          (reverse)
//! ```

use std::fmt;

use super::{LineId, Point, Schedule, StopId};

/// Identity of a tram: its line and its position in that line's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TramId {
    pub line: LineId,
    pub sequence: u32,
}

impl fmt::Display for TramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.line, self.sequence)
    }
}

/// Which way along its line's itinerary a tram travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// First itinerary stop to last.
    Forward,
    /// Last itinerary stop to first.
    Reverse,
}

impl Direction {
    /// Odd-numbered trams start at the head of the line, even-numbered
    /// trams at its tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use tram_sim::domain::Direction;
    ///
    /// assert_eq!(Direction::for_sequence(1), Direction::Forward);
    /// assert_eq!(Direction::for_sequence(2), Direction::Reverse);
    /// ```
    pub fn for_sequence(sequence: u32) -> Self {
        if sequence % 2 == 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// The `index`-th stop of `itinerary` when travelled in this direction.
    pub fn stop_at(self, itinerary: &[StopId], index: usize) -> Option<StopId> {
        let stop = match self {
            Direction::Forward => itinerary.get(index),
            Direction::Reverse => itinerary
                .len()
                .checked_sub(index + 1)
                .and_then(|i| itinerary.get(i)),
        };
        stop.copied()
    }
}

/// Where a tram is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TramState {
    /// Not yet placed on the map.
    Depot,
    /// On the map and moving along its itinerary.
    Running,
    /// On the map, parked at a terminus until its next departure.
    Layover,
}

/// A scheduled unit travelling its line's itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct Tram {
    id: TramId,
    position: Point,
    direction: Direction,
    state: TramState,
    /// Index (in travel direction) of the last stop reached.
    last_stop: usize,
    /// Ticks spent on the current hop.
    steps_taken: u32,
    /// Minutes added to the line's start time for the next departure.
    offset: u32,
}

impl Tram {
    /// Trams are created through [`Line::add_tram`](super::Line::add_tram).
    pub(crate) fn new(id: TramId, schedule: &Schedule) -> Self {
        Self {
            id,
            position: Point::default(),
            direction: Direction::for_sequence(id.sequence),
            state: TramState::Depot,
            last_stop: 0,
            steps_taken: 0,
            offset: (id.sequence - 1).saturating_mul(schedule.interval()),
        }
    }

    pub fn id(&self) -> TramId {
        self.id
    }

    /// The line this tram runs on.
    pub fn line(&self) -> LineId {
        self.id.line
    }

    /// 1-based position in the line's roster.
    pub fn sequence(&self) -> u32 {
        self.id.sequence
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> TramState {
        self.state
    }

    /// Whether the tram is currently running a trip.
    pub fn is_activated(&self) -> bool {
        self.state == TramState::Running
    }

    /// Whether the tram has ever been placed on the map. Once true it
    /// stays true.
    pub fn is_on_map(&self) -> bool {
        self.state != TramState::Depot
    }

    /// Index of the last stop reached, counted in travel direction.
    pub fn last_stop_index(&self) -> usize {
        self.last_stop
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// The last stop reached.
    pub fn last_stop(&self, line_itinerary: &[StopId]) -> Option<StopId> {
        self.direction.stop_at(line_itinerary, self.last_stop)
    }

    /// The stop the tram is heading to, or `None` at the terminus.
    pub fn next_stop(&self, line_itinerary: &[StopId]) -> Option<StopId> {
        self.direction.stop_at(line_itinerary, self.last_stop + 1)
    }

    /// Minute of the day (possibly past midnight) of the next departure.
    pub fn start_time(&self, schedule: &Schedule) -> u32 {
        schedule.base_minutes().saturating_add(self.offset)
    }

    /// Start the daily cycle over: the next departure is the line's first.
    ///
    /// The direction is left alone. A tram that ended the day at the far
    /// terminus starts the next day from there, facing back.
    pub fn restart_start_time(&mut self) {
        self.offset = 0;
    }

    /// Roll the next departure forward by one full roster cycle.
    pub fn increase_tram_interval(&mut self, schedule: &Schedule, fleet_size: usize) {
        let fleet = u32::try_from(fleet_size).unwrap_or(u32::MAX);
        self.offset = self
            .offset
            .saturating_add(fleet.saturating_mul(schedule.interval()));
    }

    pub(crate) fn set_line(&mut self, line: LineId) {
        self.id.line = line;
    }

    /// Begin a trip. A tram leaving the depot is placed at `origin`; a
    /// tram on layover departs from where it stands.
    ///
    /// Returns `false` if the tram was already running.
    pub(crate) fn depart(&mut self, origin: Point) -> bool {
        match self.state {
            TramState::Depot => {
                self.position = origin;
                self.state = TramState::Running;
                true
            }
            TramState::Layover => {
                self.state = TramState::Running;
                true
            }
            TramState::Running => false,
        }
    }

    /// Record one tick of travel along the current hop.
    pub(crate) fn step(&mut self, position: Point) {
        self.steps_taken += 1;
        self.position = position;
    }

    /// The current hop is finished; `position` is the stop reached.
    pub(crate) fn reach_next_stop(&mut self, position: Point) {
        self.last_stop += 1;
        self.steps_taken = 0;
        self.position = position;
    }

    /// The trip is over: park, face the other way and rewind the cursor.
    pub(crate) fn turn_around(&mut self) {
        self.state = TramState::Layover;
        self.set_direction(self.direction.reversed());
    }

    /// The only place the direction changes, so the cursor can never
    /// point into the old itinerary.
    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.last_stop = 0;
        self.steps_taken = 0;
    }
}
