//! Parsers for the three comma-separated configuration inputs.
//!
//! Each input has one record per line. Blank lines are skipped and
//! whitespace around fields is ignored:
//!
//! ```text
//! stops:        id,name,x,y
//! connections:  stop_a,stop_b,minutes
//! lines:        line_id,start_hour,start_minute,interval,stop_id[,stop_id...]
//! ```

use std::io::BufRead;
use std::str::FromStr;

use crate::domain::{Line, Point, Stop, StopId};
use crate::network::Network;

use super::error::LoadError;

/// Non-blank records with their 1-based line numbers.
fn records<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String), LoadError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, text)| match text {
            Err(source) => Some(Err(LoadError::Read {
                line: index + 1,
                source,
            })),
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(Ok((index + 1, text))),
        })
}

fn fields(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}

fn number<T: FromStr>(field: &str, what: &str, line: usize) -> Result<T, LoadError> {
    field
        .parse()
        .map_err(|_| LoadError::malformed(line, format!("{what} must be an integer, got {field:?}")))
}

fn stop_id(network: &Network, code: &str, line: usize) -> Result<StopId, LoadError> {
    network
        .stop_by_code(code)
        .ok_or_else(|| LoadError::UnknownStop {
            line,
            id: code.to_string(),
        })
}

/// Read stop records into `network`. Returns the number of stops added.
///
/// # Examples
///
/// ```
/// use tram_sim::loader::read_tram_stops;
/// use tram_sim::network::Network;
///
/// let data = "1,Teatr Bagatela,20,-70\n2,Stary Kleparz,80,-110";
/// let mut network = Network::new();
/// assert_eq!(read_tram_stops(data.as_bytes(), &mut network).unwrap(), 2);
/// ```
pub fn read_tram_stops<R: BufRead>(reader: R, network: &mut Network) -> Result<usize, LoadError> {
    let mut added = 0;
    for record in records(reader) {
        let (line, text) = record?;
        let fields = fields(&text);
        let [code, name, x, y] = fields.as_slice() else {
            return Err(LoadError::malformed(
                line,
                format!("expected 4 fields (id,name,x,y), found {}", fields.len()),
            ));
        };

        let x: i32 = number(x, "x", line)?;
        let y: i32 = number(y, "y", line)?;
        let stop = Stop::new(*code, *name, Point::new(f64::from(x), f64::from(y)));
        network
            .add_stop(stop)
            .map_err(|source| LoadError::Invalid { line, source })?;
        added += 1;
    }
    Ok(added)
}

/// Read connection records into `network`. Returns the number of
/// connections added.
pub fn read_connections<R: BufRead>(reader: R, network: &mut Network) -> Result<usize, LoadError> {
    let mut added = 0;
    for record in records(reader) {
        let (line, text) = record?;
        let fields = fields(&text);
        let [a, b, minutes] = fields.as_slice() else {
            return Err(LoadError::malformed(
                line,
                format!(
                    "expected 3 fields (stop_a,stop_b,minutes), found {}",
                    fields.len()
                ),
            ));
        };

        let minutes: i64 = number(minutes, "travel time", line)?;
        let a = stop_id(network, a, line)?;
        let b = stop_id(network, b, line)?;
        network
            .add_connected_stop(a, b, minutes)
            .map_err(|source| LoadError::Invalid { line, source })?;
        added += 1;
    }
    Ok(added)
}

/// Read line records, resolving stop ids against `network`.
///
/// Every consecutive pair of stops in an itinerary must already be
/// connected. The returned lines have no trams yet.
pub fn read_tram_lines<R: BufRead>(reader: R, network: &Network) -> Result<Vec<Line>, LoadError> {
    let mut lines = Vec::new();
    for record in records(reader) {
        let (line, text) = record?;
        let fields = fields(&text);
        let [code, hours, minutes, interval, stops @ ..] = fields.as_slice() else {
            return Err(LoadError::malformed(
                line,
                format!(
                    "expected at least 4 fields (line,hour,minute,interval,...), found {}",
                    fields.len()
                ),
            ));
        };

        let hours: i64 = number(hours, "start hour", line)?;
        let minutes: i64 = number(minutes, "start minute", line)?;
        let interval: i64 = number(interval, "interval", line)?;
        let itinerary = stops
            .iter()
            .map(|code| stop_id(network, code, line))
            .collect::<Result<Vec<_>, _>>()?;

        let invalid = |source| LoadError::Invalid { line, source };
        network.check_itinerary(&itinerary).map_err(invalid)?;
        let tram_line = Line::new(*code, itinerary, hours, minutes, interval).map_err(invalid)?;
        lines.push(tram_line);
    }
    Ok(lines)
}
