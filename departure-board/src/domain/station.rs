//! Station queries and the per-station view derived from them.

use serde::Serialize;

use super::departure::DepartureEvent;
use super::site::SiteId;

/// Time window requested from the API when none is configured.
pub const DEFAULT_TIME_WINDOW_MINS: u16 = 60;

/// What to ask the API for one monitored station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationQuery {
    /// Site to fetch departures for.
    pub site_id: SiteId,
    /// How far ahead to look, in minutes.
    pub time_window_mins: u16,
}

impl StationQuery {
    /// Create a query with the default time window.
    pub fn new(site_id: SiteId) -> Self {
        Self {
            site_id,
            time_window_mins: DEFAULT_TIME_WINDOW_MINS,
        }
    }

    /// Set a custom time window.
    pub fn with_time_window(mut self, mins: u16) -> Self {
        self.time_window_mins = mins;
        self
    }
}

/// The filtered departures of one station, ready for rendering.
///
/// Rebuilt from scratch on every refresh cycle. A `None` list means the block
/// is not rendered at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationView {
    /// Section heading.
    pub title: String,
    /// Train departures, if any were available.
    pub trains: Option<Vec<DepartureEvent>>,
    /// Bus departures, if buses are shown for this station and were available.
    pub buses: Option<Vec<DepartureEvent>>,
    /// Heading for the bus block, e.g. "Buss 722/723".
    pub bus_heading: Option<String>,
}

impl StationView {
    /// A view with no data, used when a station could not be fetched.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            trains: None,
            buses: None,
            bus_heading: None,
        }
    }

    /// Whether either list is present.
    pub fn has_data(&self) -> bool {
        self.trains.is_some() || self.buses.is_some()
    }
}
