//! Departure types.

use serde::Serialize;

/// A disruption notice attached to a departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deviation {
    /// Upstream importance level (higher is more important).
    pub importance_level: i64,
    /// Human-readable notice.
    pub text: String,
}

/// A single upcoming departure from a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureEvent {
    /// Line designation, e.g. "40" or "722".
    pub line_number: String,
    /// Destination shown on the vehicle.
    pub destination: String,
    /// Pre-formatted time, e.g. "5 min" or "14:32".
    pub display_time: String,
    /// Journey number, unique per line and day.
    pub journey_number: i64,
    /// Direction of travel along the line (1 or 2 on SL).
    pub journey_direction: i64,
    /// Disruption notices, in upstream order. Empty when there are none.
    pub deviations: Vec<Deviation>,
}

/// Departures for one site as returned by one upstream call.
///
/// `None` means the response did not carry that list at all, which is
/// distinct from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationDepartures {
    /// Commuter train departures.
    pub trains: Option<Vec<DepartureEvent>>,
    /// Bus departures.
    pub buses: Option<Vec<DepartureEvent>>,
}

impl StationDepartures {
    /// Departures with neither list present.
    pub fn absent() -> Self {
        Self::default()
    }
}
