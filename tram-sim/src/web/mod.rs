//! Web layer for the tram simulator.
//!
//! Serves the live map page and a small JSON API over the shared
//! simulation.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
