//! Tram network simulator.
//!
//! Loads stops, connections and lines from text files, then moves every
//! line's fleet along its itinerary one simulated minute per tick. A
//! small web server shows the trams on a live map.

pub mod domain;
pub mod engine;
pub mod loader;
pub mod network;
pub mod ticker;
pub mod web;
