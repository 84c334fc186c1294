//! Incremental movement of a tram along one hop of its itinerary.
//!
//! A hop between stops connected with travel time `d` takes exactly `d`
//! ticks. Each tick the tram moves by `(next - last) / d`; on the last
//! tick it snaps onto the next stop, so repeated fractional steps can
//! never miss the target.

use crate::domain::{DomainError, Point, StopId, Tram};
use crate::network::Stops;

/// What one movement step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Progress {
    /// Still between stops.
    Moved,
    /// Reached the given stop this tick.
    Arrived(StopId),
    /// Already standing at the last stop of the itinerary.
    AtTerminus,
}

/// Per-tick displacement between two stops `distance` minutes apart.
pub fn step_vector(from: Point, to: Point, distance: u32) -> Point {
    let d = f64::from(distance);
    Point::new((to.x - from.x) / d, (to.y - from.y) / d)
}

/// Move `tram` one tick along `itinerary`.
pub(crate) fn advance(
    stops: &Stops,
    itinerary: &[StopId],
    tram: &mut Tram,
) -> Result<Progress, DomainError> {
    let (Some(last), Some(next)) = (tram.last_stop(itinerary), tram.next_stop(itinerary)) else {
        return Ok(Progress::AtTerminus);
    };

    let distance = stops.distance(last, next)?;
    let from = stops.position(last)?;
    let to = stops.position(next)?;

    let steps = tram.steps_taken() + 1;
    if steps >= distance {
        tram.reach_next_stop(to);
        return Ok(Progress::Arrived(next));
    }

    let step = step_vector(from, to, distance);
    tram.step(from + step * f64::from(steps));
    Ok(Progress::Moved)
}
