//! The per-tick scheduling loop.
//!
//! Every tick runs two passes over all lines. The activation pass
//! compares each tram's next start time with the clock and sends due
//! trams on their way. The movement pass then advances every running
//! tram by one step and turns trams that finished their trip around.
//! Finally the clock moves on by one minute.

use tracing::{debug, info, trace};

use crate::domain::{Clock, DomainError, Line, Point, StopId, TramId};
use crate::network::{Network, Stops};

use super::movement::{Progress, advance};

/// Time of day at which every tram's offset is reset.
pub const DAILY_RESET: (u32, u32) = (4, 0);

/// Error from the tick loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An itinerary hop has no matching connection
    #[error("line {line} has a broken itinerary: {source}")]
    BrokenItinerary { line: String, source: DomainError },
}

/// Something that happened to a tram during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TramEventKind {
    /// Started a trip from the given stop.
    Departed { from: StopId },
    /// Reached an intermediate or final stop.
    Arrived { at: StopId },
    /// Finished its trip at the given terminus and now faces the other way.
    TurnedAround { at: StopId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TramEvent {
    pub tram: TramId,
    pub kind: TramEventKind,
}

/// Where a tram on the map stands after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TramPosition {
    pub tram: TramId,
    pub position: Point,
    /// `false` while parked at a terminus.
    pub activated: bool,
}

/// Everything a presentation layer needs after one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Simulated time at which the tick ran.
    pub time: Clock,
    pub events: Vec<TramEvent>,
    pub positions: Vec<TramPosition>,
}

/// A network together with its clock.
#[derive(Debug, Clone)]
pub struct Simulation {
    network: Network,
    clock: Clock,
    ticks: u64,
}

impl Simulation {
    pub fn new(network: Network, clock: Clock) -> Self {
        Self {
            network,
            clock,
            ticks: 0,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The time the next tick will run at.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one simulated minute.
    pub fn tick(&mut self) -> Result<TickReport, EngineError> {
        let now = self.clock;
        let mut events = Vec::new();

        let (stops, lines) = self.network.split_mut();
        if now.is_at(DAILY_RESET.0, DAILY_RESET.1) {
            info!(time = %now, "restarting daily timetable");
        }
        for line in lines.iter_mut() {
            activate_due_trams(stops, line, now, &mut events)?;
        }
        for line in lines.iter_mut() {
            move_running_trams(stops, line, &mut events)?;
        }

        let positions = self.positions();
        self.clock.increase_time();
        self.ticks += 1;

        Ok(TickReport {
            time: now,
            events,
            positions,
        })
    }

    /// Run `count` ticks; returns the report of the last one.
    pub fn run_for(&mut self, count: u64) -> Result<Option<TickReport>, EngineError> {
        let mut last = None;
        for _ in 0..count {
            last = Some(self.tick()?);
        }
        Ok(last)
    }

    /// Positions of every tram that has been placed on the map.
    pub fn positions(&self) -> Vec<TramPosition> {
        self.network
            .lines()
            .iter()
            .flat_map(|line| line.trams())
            .filter(|tram| tram.is_on_map())
            .map(|tram| TramPosition {
                tram: tram.id(),
                position: tram.position(),
                activated: tram.is_activated(),
            })
            .collect()
    }
}

fn broken(line: &str) -> impl FnOnce(DomainError) -> EngineError + '_ {
    move |source| EngineError::BrokenItinerary {
        line: line.to_string(),
        source,
    }
}

/// Activation pass for one line.
fn activate_due_trams(
    stops: &Stops,
    line: &mut Line,
    now: Clock,
    events: &mut Vec<TramEvent>,
) -> Result<(), EngineError> {
    let roster = line.roster_mut();
    let fleet_size = roster.trams.len();

    for tram in roster.trams.iter_mut() {
        if now.is_at(DAILY_RESET.0, DAILY_RESET.1) {
            tram.restart_start_time();
        }
        if now.time_in_minutes() != tram.start_time(roster.schedule) {
            continue;
        }

        tram.increase_tram_interval(roster.schedule, fleet_size);

        let origin = tram
            .direction()
            .stop_at(roster.itinerary, 0)
            .ok_or_else(|| DomainError::EmptyItinerary(roster.code.to_string()))
            .map_err(broken(roster.code))?;
        let position = stops.position(origin).map_err(broken(roster.code))?;

        if tram.depart(position) {
            debug!(line = roster.code, tram = tram.sequence(), time = %now, "tram departed");
            events.push(TramEvent {
                tram: tram.id(),
                kind: TramEventKind::Departed { from: origin },
            });
        } else {
            trace!(
                line = roster.code,
                tram = tram.sequence(),
                "departure slot passed while running"
            );
        }
    }

    Ok(())
}

/// Movement pass for one line.
fn move_running_trams(
    stops: &Stops,
    line: &mut Line,
    events: &mut Vec<TramEvent>,
) -> Result<(), EngineError> {
    let roster = line.roster_mut();

    for tram in roster.trams.iter_mut().filter(|t| t.is_activated()) {
        match advance(stops, roster.itinerary, tram).map_err(broken(roster.code))? {
            Progress::Moved => {
                trace!(
                    line = roster.code,
                    tram = tram.sequence(),
                    position = %tram.position(),
                    "tram moved"
                );
            }
            Progress::Arrived(at) => events.push(TramEvent {
                tram: tram.id(),
                kind: TramEventKind::Arrived { at },
            }),
            Progress::AtTerminus => {
                let Some(at) = tram.last_stop(roster.itinerary) else {
                    continue;
                };
                tram.turn_around();
                debug!(line = roster.code, tram = tram.sequence(), "tram turned around");
                events.push(TramEvent {
                    tram: tram.id(),
                    kind: TramEventKind::TurnedAround { at },
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, LineId, Stop, TramState};

    /// A(0,0) -3- B(3,0), line "1" A-B starting at 05:00 every `interval`.
    fn two_stop_network(trams: i64, interval: i64) -> (Network, StopId, StopId) {
        let mut network = Network::new();
        let a = network.add_stop(Stop::new("A", "Alpha", Point::new(0.0, 0.0))).unwrap();
        let b = network.add_stop(Stop::new("B", "Bravo", Point::new(3.0, 0.0))).unwrap();
        network.add_connected_stop(a, b, 3).unwrap();

        let mut line = Line::new("1", vec![a, b], 5, 0, interval).unwrap();
        for n in 1..=trams {
            line.add_tram(n).unwrap();
        }
        network.add_line(line);
        (network, a, b)
    }

    fn tram_state(sim: &Simulation, sequence: u32) -> (TramState, Point, usize) {
        let tram = sim.network().lines()[0].tram(sequence).unwrap();
        (tram.state(), tram.position(), tram.last_stop_index())
    }

    #[test]
    fn tram_waits_for_its_start_time() {
        let (network, _, _) = two_stop_network(1, 10);
        let mut sim = Simulation::new(network, Clock::new(4, 58).unwrap());

        let report = sim.tick().unwrap();
        assert_eq!(report.time.to_string(), "04:58");
        assert!(report.positions.is_empty());
        assert!(report.events.is_empty());
        assert_eq!(sim.clock().to_string(), "04:59");
    }

    #[test]
    fn end_to_end_three_ticks_to_next_stop() {
        let (network, a, b) = two_stop_network(1, 10);
        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        let tram = TramId {
            line: LineId(0),
            sequence: 1,
        };

        let report = sim.tick().unwrap();
        assert_eq!(
            report.events,
            vec![TramEvent {
                tram,
                kind: TramEventKind::Departed { from: a }
            }]
        );
        assert_eq!(report.positions[0].position, Point::new(1.0, 0.0));

        sim.tick().unwrap();
        assert_eq!(tram_state(&sim, 1), (TramState::Running, Point::new(2.0, 0.0), 0));

        let report = sim.tick().unwrap();
        assert_eq!(
            report.events,
            vec![TramEvent {
                tram,
                kind: TramEventKind::Arrived { at: b }
            }]
        );
        assert_eq!(tram_state(&sim, 1), (TramState::Running, Point::new(3.0, 0.0), 1));
    }

    #[test]
    fn bounce_on_next_pass_after_arrival() {
        let (network, _, b) = two_stop_network(1, 10);
        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        sim.run_for(3).unwrap();

        let report = sim.tick().unwrap();
        assert_eq!(
            report.events[0].kind,
            TramEventKind::TurnedAround { at: b }
        );
        let tram = sim.network().lines()[0].tram(1).unwrap();
        assert_eq!(tram.state(), TramState::Layover);
        assert_eq!(tram.direction(), Direction::Reverse);
        assert_eq!(tram.last_stop_index(), 0);
        assert_eq!(tram.position(), Point::new(3.0, 0.0));

        // Still on the map, but parked
        assert_eq!(report.positions.len(), 1);
        assert!(!report.positions[0].activated);
    }

    #[test]
    fn single_tram_repeats_after_full_cycle() {
        // One tram every 10 minutes: next departure at 05:10, back from B
        let (network, a, b) = two_stop_network(1, 10);
        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        sim.run_for(10).unwrap();
        assert_eq!(tram_state(&sim, 1).0, TramState::Layover);

        let report = sim.tick().unwrap();
        assert_eq!(report.time.to_string(), "05:10");
        assert_eq!(report.events[0].kind, TramEventKind::Departed { from: b });
        assert_eq!(tram_state(&sim, 1).1, Point::new(2.0, 0.0));

        sim.run_for(2).unwrap();
        let tram = sim.network().lines()[0].tram(1).unwrap();
        assert_eq!(tram.last_stop(sim.network().lines()[0].itinerary()), Some(a));
        assert_eq!(tram.position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn fleet_is_staggered_and_alternates_ends() {
        let (network, a, b) = two_stop_network(2, 5);
        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());

        let first = sim.tick().unwrap();
        assert_eq!(first.events.len(), 1);
        assert_eq!(first.events[0].kind, TramEventKind::Departed { from: a });

        sim.run_for(4).unwrap();
        let report = sim.tick().unwrap();
        assert_eq!(report.time.to_string(), "05:05");
        let departure = report
            .events
            .iter()
            .find(|e| e.tram.sequence == 2)
            .unwrap();
        assert_eq!(departure.kind, TramEventKind::Departed { from: b });
        assert_eq!(tram_state(&sim, 2).1, Point::new(2.0, 0.0));

        // Tram 1 departs again only after a full roster cycle (2 * 5 min)
        let line = &sim.network().lines()[0];
        assert_eq!(line.tram(1).unwrap().start_time(line.schedule()), 310);
        assert_eq!(line.tram(2).unwrap().start_time(line.schedule()), 315);
    }

    #[test]
    fn long_trip_skips_departure_slot() {
        // Trip takes 3 ticks plus the turnaround; interval 2 with one tram
        // means the 05:02 slot arrives while the tram is still running.
        let (network, _, _) = two_stop_network(1, 2);
        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        sim.run_for(2).unwrap();

        let report = sim.tick().unwrap();
        assert_eq!(report.time.to_string(), "05:02");
        assert!(!report.events.iter().any(|e| matches!(e.kind, TramEventKind::Departed { .. })));
        let line = &sim.network().lines()[0];
        assert_eq!(line.tram(1).unwrap().start_time(line.schedule()), 304);
    }

    #[test]
    fn daily_reset_restarts_offsets() {
        let (network, _, _) = two_stop_network(3, 10);
        let mut sim = Simulation::new(network, Clock::new(3, 59).unwrap());
        sim.run_for(2).unwrap();

        let line = &sim.network().lines()[0];
        for tram in line.trams() {
            assert_eq!(tram.offset(), 0);
            assert_eq!(tram.start_time(line.schedule()), 300);
        }
    }

    #[test]
    fn odd_trip_count_alternates_direction_between_days() {
        // Five trams every 7 minutes all leave at 05:00 after the reset
        // and make 33 trips a day, so each day ends at the other terminus.
        let (network, a, b) = two_stop_network(5, 7);
        let mut sim = Simulation::new(network, Clock::new(4, 0).unwrap());
        let fleet = |sim: &Simulation| sim.network().lines()[0].trams().to_vec();

        sim.run_for(1440).unwrap();
        assert_eq!(sim.clock().to_string(), "04:00");
        let day_one = fleet(&sim);
        for tram in &day_one {
            assert_eq!(tram.state(), TramState::Layover);
            let (direction, at) = if tram.sequence() % 2 == 1 {
                (Direction::Reverse, Point::new(3.0, 0.0))
            } else {
                (Direction::Forward, Point::new(0.0, 0.0))
            };
            assert_eq!(tram.direction(), direction);
            assert_eq!(tram.position(), at);
        }

        sim.run_for(60).unwrap();
        let line = &sim.network().lines()[0];
        for tram in line.trams() {
            assert_eq!(tram.offset(), 0);
            assert_eq!(tram.start_time(line.schedule()), 300);
        }

        let report = sim.tick().unwrap();
        assert_eq!(report.time.to_string(), "05:00");
        let departures: Vec<(u32, StopId)> = report
            .events
            .iter()
            .filter_map(|e| match e.kind {
                TramEventKind::Departed { from } => Some((e.tram.sequence, from)),
                _ => None,
            })
            .collect();
        assert_eq!(departures, vec![(1, b), (2, a), (3, b), (4, a), (5, b)]);

        sim.run_for(1440 - 61).unwrap();
        let day_two = fleet(&sim);
        assert_ne!(day_one, day_two);
        assert!(day_two.iter().all(|t| t.state() == TramState::Layover));

        // Two days bring every tram back to where it ended day one
        sim.run_for(1440).unwrap();
        assert_eq!(fleet(&sim), day_one);
        assert_eq!(sim.ticks(), 3 * 1440);
    }

    #[test]
    fn broken_itinerary_is_fatal() {
        let mut network = Network::new();
        let a = network.add_stop(Stop::new("A", "Alpha", Point::new(0.0, 0.0))).unwrap();
        let b = network.add_stop(Stop::new("B", "Bravo", Point::new(3.0, 0.0))).unwrap();
        let mut line = Line::new("9", vec![a, b], 5, 0, 10).unwrap();
        line.add_tram(1).unwrap();
        network.add_line(line);

        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        let err = sim.tick().unwrap_err();
        assert_eq!(
            err,
            EngineError::BrokenItinerary {
                line: "9".into(),
                source: DomainError::StopsNotAdjacent("A".into(), "B".into()),
            }
        );
    }

    #[test]
    fn single_stop_line_turns_around_in_place() {
        let mut network = Network::new();
        let a = network.add_stop(Stop::new("A", "Alpha", Point::new(7.0, 7.0))).unwrap();
        let mut line = Line::new("0", vec![a], 5, 0, 10).unwrap();
        line.add_tram(1).unwrap();
        network.add_line(line);

        let mut sim = Simulation::new(network, Clock::new(5, 0).unwrap());
        let report = sim.tick().unwrap();
        let kinds: Vec<TramEventKind> = report.events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TramEventKind::Departed { from: a },
                TramEventKind::TurnedAround { at: a },
            ]
        );
        assert_eq!(report.positions[0].position, Point::new(7.0, 7.0));
    }
}
