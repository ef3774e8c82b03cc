//! Domain types for the departure board.
//!
//! These are the validated shapes the rest of the crate works with; the raw
//! upstream DTOs live in [`crate::sl`].

mod departure;
mod site;
mod station;

pub use departure::{DepartureEvent, Deviation, StationDepartures};
pub use site::{InvalidSiteId, SiteId};
pub use station::{DEFAULT_TIME_WINDOW_MINS, StationQuery, StationView};
