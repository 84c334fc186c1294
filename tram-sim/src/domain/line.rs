//! Tram lines: an itinerary, a departure schedule and a fleet.

use std::fmt;

use super::{DomainError, StopId, Tram, TramId};

/// Index of a line within its network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// When a line's first tram departs and how often the next ones follow.
///
/// # Examples
///
/// ```
/// use tram_sim::domain::Schedule;
///
/// let schedule = Schedule::new(5, 30, 12).unwrap();
/// assert_eq!(schedule.base_minutes(), 330);
///
/// assert!(Schedule::new(24, 0, 12).is_err());
/// assert!(Schedule::new(5, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Schedule {
    hours_start: u32,
    minutes_start: u32,
    interval: u32,
}

impl Schedule {
    pub fn new(hours_start: i64, minutes_start: i64, interval: i64) -> Result<Self, DomainError> {
        let invalid_time = || DomainError::InvalidTime {
            hours: hours_start,
            minutes: minutes_start,
        };

        if !(0..=23).contains(&hours_start) || !(0..=59).contains(&minutes_start) {
            return Err(invalid_time());
        }
        if interval <= 0 {
            return Err(DomainError::InvalidInterval(interval));
        }

        Ok(Self {
            hours_start: u32::try_from(hours_start).map_err(|_| invalid_time())?,
            minutes_start: u32::try_from(minutes_start).map_err(|_| invalid_time())?,
            interval: u32::try_from(interval).map_err(|_| DomainError::InvalidInterval(interval))?,
        })
    }

    pub fn hours_start(&self) -> u32 {
        self.hours_start
    }

    pub fn minutes_start(&self) -> u32 {
        self.minutes_start
    }

    /// Minutes between successive departures.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Start time of the first departure, in minutes since midnight.
    pub fn base_minutes(&self) -> u32 {
        self.hours_start * 60 + self.minutes_start
    }
}

/// An ordered itinerary plus its schedule and roster of trams.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: LineId,
    code: String,
    itinerary: Vec<StopId>,
    schedule: Schedule,
    trams: Vec<Tram>,
}

impl Line {
    /// Create a line with an empty roster.
    ///
    /// The line gets its final [`LineId`] when it is added to a network.
    pub fn new(
        code: impl Into<String>,
        itinerary: Vec<StopId>,
        hours_start: i64,
        minutes_start: i64,
        interval: i64,
    ) -> Result<Self, DomainError> {
        let code = code.into();
        let schedule = Schedule::new(hours_start, minutes_start, interval)?;
        if itinerary.is_empty() {
            return Err(DomainError::EmptyItinerary(code));
        }

        Ok(Self {
            id: LineId::default(),
            code,
            itinerary,
            schedule,
            trams: Vec::new(),
        })
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    /// The line number shown on the map.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn itinerary(&self) -> &[StopId] {
        &self.itinerary
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Trams in the order they were registered.
    pub fn trams(&self) -> &[Tram] {
        &self.trams
    }

    pub fn fleet_size(&self) -> usize {
        self.trams.len()
    }

    /// Look up a tram by its sequence number.
    pub fn tram(&self, sequence: u32) -> Option<&Tram> {
        self.trams.iter().find(|t| t.sequence() == sequence)
    }

    /// Register a new tram with the given 1-based sequence number.
    pub fn add_tram(&mut self, sequence: i64) -> Result<TramId, DomainError> {
        if sequence <= 0 {
            return Err(DomainError::InvalidSequence(sequence));
        }
        let sequence = u32::try_from(sequence).map_err(|_| DomainError::InvalidSequence(sequence))?;
        if self.tram(sequence).is_some() {
            return Err(DomainError::DuplicateTram {
                line: self.code.clone(),
                sequence,
            });
        }

        let id = TramId {
            line: self.id,
            sequence,
        };
        self.trams.push(Tram::new(id, &self.schedule));
        Ok(id)
    }

    /// Stamp the network-assigned id on the line and its trams.
    pub(crate) fn assign_id(&mut self, id: LineId) {
        self.id = id;
        for tram in &mut self.trams {
            tram.set_line(id);
        }
    }

    /// Borrow the static parts of the line alongside its mutable roster.
    pub(crate) fn roster_mut(&mut self) -> RosterMut<'_> {
        RosterMut {
            code: &self.code,
            itinerary: &self.itinerary,
            schedule: &self.schedule,
            trams: &mut self.trams,
        }
    }
}

/// A line split into its fixed data and its mutable trams.
pub(crate) struct RosterMut<'a> {
    pub code: &'a str,
    pub itinerary: &'a [StopId],
    pub schedule: &'a Schedule,
    pub trams: &'a mut [Tram],
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range time with a positive interval is accepted
        #[test]
        fn valid_schedule_accepted(h in 0i64..24, m in 0i64..60, interval in 1i64..500) {
            prop_assert!(Schedule::new(h, m, interval).is_ok());
        }

        /// Out-of-range hours always fail with the time error
        #[test]
        fn bad_hours_rejected(h in prop_oneof![i64::MIN..0, 24i64..i64::MAX], m in 0i64..60) {
            let is_time_error = matches!(Schedule::new(h, m, 10), Err(DomainError::InvalidTime { .. }));
            prop_assert!(is_time_error);
        }

        /// Out-of-range minutes always fail with the time error
        #[test]
        fn bad_minutes_rejected(h in 0i64..24, m in prop_oneof![i64::MIN..0, 60i64..i64::MAX]) {
            let is_time_error = matches!(Schedule::new(h, m, 10), Err(DomainError::InvalidTime { .. }));
            prop_assert!(is_time_error);
        }

        /// Non-positive intervals always fail with the interval error
        #[test]
        fn bad_interval_rejected(interval in i64::MIN..=0) {
            prop_assert_eq!(Schedule::new(5, 0, interval), Err(DomainError::InvalidInterval(interval)));
        }

        /// The Nth tram departs (N-1) intervals after the line's start
        #[test]
        fn nth_tram_start(h in 0i64..24, m in 0i64..60, interval in 1i64..120, n in 1i64..20) {
            let mut line = Line::new("1", vec![StopId(0)], h, m, interval).unwrap();
            line.add_tram(n).unwrap();
            let tram = &line.trams()[0];
            let expected = h * 60 + m + (n - 1) * interval;
            prop_assert_eq!(i64::from(tram.start_time(line.schedule())), expected);
        }

        /// Non-positive sequence numbers are always rejected
        #[test]
        fn bad_sequence_rejected(n in i64::MIN..=0) {
            let mut line = Line::new("1", vec![StopId(0)], 5, 0, 10).unwrap();
            prop_assert_eq!(line.add_tram(n), Err(DomainError::InvalidSequence(n)));
        }
    }
}
