//! Reading the tram network from its three configuration files.

mod error;
mod parse;
mod setup;

pub use error::{LoadError, SetupError};
pub use parse::{read_connections, read_tram_lines, read_tram_stops};
pub use setup::{NetworkPaths, load_network};
