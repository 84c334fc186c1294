//! Simulated time of day.
//!
//! The clock knows nothing about wall-clock time. It moves forward by
//! exactly one minute per tick and wraps around every 24 hours.

use std::fmt;

use chrono::{NaiveTime, Timelike};

use super::DomainError;

/// Number of minutes in a simulated day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Time of day with minute resolution.
///
/// # Examples
///
/// ```
/// use tram_sim::domain::Clock;
///
/// let mut clock = Clock::new(23, 59).unwrap();
/// clock.increase_time();
/// assert_eq!(clock.to_string(), "00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clock {
    hours: u32,
    minutes: u32,
}

impl Clock {
    /// Create a clock showing `hours:minutes`.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, DomainError> {
        if hours > 23 || minutes > 59 {
            return Err(DomainError::InvalidTime {
                hours: i64::from(hours),
                minutes: i64::from(minutes),
            });
        }
        Ok(Self { hours, minutes })
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveTime::parse_from_str(s, "%H:%M").map(Self::from)
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Minutes since midnight; the key the scheduler compares against.
    pub fn time_in_minutes(&self) -> u32 {
        self.minutes + 60 * self.hours
    }

    /// Whether the clock currently shows `hours:minutes`.
    pub fn is_at(&self, hours: u32, minutes: u32) -> bool {
        self.hours == hours && self.minutes == minutes
    }

    /// Advance by one minute.
    pub fn increase_time(&mut self) {
        if self.minutes == 59 {
            self.increase_hours();
        } else {
            self.minutes += 1;
        }
    }

    fn increase_hours(&mut self) {
        self.hours = if self.hours == 23 { 0 } else { self.hours + 1 };
        self.minutes = 0;
    }
}

impl Default for Clock {
    /// Service starts at 05:00.
    fn default() -> Self {
        Self {
            hours: 5,
            minutes: 0,
        }
    }
}

impl From<NaiveTime> for Clock {
    fn from(time: NaiveTime) -> Self {
        Self {
            hours: time.hour(),
            minutes: time.minute(),
        }
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// One tick always adds one minute, modulo a day
        #[test]
        fn tick_adds_one_minute(h in 0u32..24, m in 0u32..60) {
            let mut clock = Clock::new(h, m).unwrap();
            let before = clock.time_in_minutes();
            clock.increase_time();
            prop_assert_eq!(clock.time_in_minutes(), (before + 1) % MINUTES_PER_DAY);
        }

        /// The clock never leaves its valid range
        #[test]
        fn stays_in_range(h in 0u32..24, m in 0u32..60, ticks in 0usize..3000) {
            let mut clock = Clock::new(h, m).unwrap();
            for _ in 0..ticks {
                clock.increase_time();
            }
            prop_assert!(clock.hours() < 24);
            prop_assert!(clock.minutes() < 60);
        }
    }
}
