//! Building a complete network from configuration files.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::network::Network;

use super::error::{LoadError, SetupError};
use super::parse::{read_connections, read_tram_lines, read_tram_stops};

/// Locations of the three configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPaths {
    pub stops: PathBuf,
    pub connections: PathBuf,
    pub lines: PathBuf,
}

impl NetworkPaths {
    pub fn new(
        stops: impl Into<PathBuf>,
        connections: impl Into<PathBuf>,
        lines: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stops: stops.into(),
            connections: connections.into(),
            lines: lines.into(),
        }
    }

    /// All three files inside `dir`, under their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self::new(
            dir.join(defaults.stops),
            dir.join(defaults.connections),
            dir.join(defaults.lines),
        )
    }
}

impl Default for NetworkPaths {
    fn default() -> Self {
        Self::new(
            "tram_stops.txt",
            "tram_stops_connection.txt",
            "tram_line.txt",
        )
    }
}

fn open(path: &Path) -> Result<BufReader<File>, SetupError> {
    let env_error = |err: io::Error| match err.kind() {
        io::ErrorKind::NotFound => SetupError::NotFound {
            path: path.to_path_buf(),
        },
        io::ErrorKind::PermissionDenied => SetupError::PermissionDenied {
            path: path.to_path_buf(),
        },
        io::ErrorKind::IsADirectory => SetupError::IsADirectory {
            path: path.to_path_buf(),
        },
        _ => SetupError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    };

    // Opening a directory succeeds on some platforms, so check first.
    let metadata = std::fs::metadata(path).map_err(env_error)?;
    if metadata.is_dir() {
        return Err(SetupError::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map(BufReader::new).map_err(env_error)
}

fn parse_file<T>(
    path: &Path,
    parse: impl FnOnce(BufReader<File>) -> Result<T, LoadError>,
) -> Result<T, SetupError> {
    let reader = open(path)?;
    parse(reader).map_err(|source| SetupError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Register trams `1..=fleet_size` on every line.
fn register_fleet(network: &mut Network, fleet_size: usize) -> Result<(), SetupError> {
    let ids: Vec<_> = network.lines().iter().map(|l| l.id()).collect();
    for id in ids {
        let line = network.line_mut(id).map_err(|source| SetupError::Fleet {
            line: id.to_string(),
            source,
        })?;
        for sequence in 1..=fleet_size {
            let sequence = i64::try_from(sequence).unwrap_or(i64::MAX);
            line.add_tram(sequence)
                .map_err(|source| SetupError::Fleet {
                    line: line.code().to_string(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Load the network described by `paths`, with `fleet_size` trams per
/// line.
///
/// Fails on the first problem; no partially built network is returned.
pub fn load_network(paths: &NetworkPaths, fleet_size: usize) -> Result<Network, SetupError> {
    let mut network = Network::new();

    let stops = parse_file(&paths.stops, |r| read_tram_stops(r, &mut network))?;
    let connections = parse_file(&paths.connections, |r| read_connections(r, &mut network))?;
    let lines = parse_file(&paths.lines, |r| read_tram_lines(r, &network))?;

    let line_count = lines.len();
    for line in lines {
        network.add_line(line);
    }
    register_fleet(&mut network, fleet_size)?;

    info!(
        stops,
        connections,
        lines = line_count,
        fleet_size,
        "tram network loaded"
    );
    Ok(network)
}
