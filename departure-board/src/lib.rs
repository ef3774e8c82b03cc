//! Departure board server.
//!
//! Shows upcoming trains and buses for a fixed set of Stockholm public
//! transport stations, refreshed in the background from the SL realtime
//! departures API.

pub mod board;
pub mod config;
pub mod domain;
pub mod refresh;
pub mod sl;
pub mod web;
