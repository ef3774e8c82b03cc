//! A monitored station: what to fetch, how to filter it, what to call it.

use crate::domain::{StationDepartures, StationQuery, StationView};

use super::filter::StationFilter;

/// One station shown on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredStation {
    /// Section heading, e.g. "Tullinge Station".
    pub title: String,
    /// Upstream query for this station.
    pub query: StationQuery,
    /// Which departures to keep.
    pub filter: StationFilter,
}

impl MonitoredStation {
    /// Create a station that keeps every departure.
    pub fn new(title: impl Into<String>, query: StationQuery) -> Self {
        Self {
            title: title.into(),
            query,
            filter: StationFilter::default(),
        }
    }

    /// Set the filter policy.
    pub fn with_filter(mut self, filter: StationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Shape one upstream response into this station's view.
    pub fn view_from(&self, departures: StationDepartures) -> StationView {
        let buses = self.filter.buses.apply(departures.buses);
        let bus_heading = buses.as_ref().and(self.filter.buses.heading());

        StationView {
            title: self.title.clone(),
            trains: departures.trains.map(|t| self.filter.trains.apply(t)),
            buses,
            bus_heading,
        }
    }

    /// The view shown when this station could not be fetched.
    pub fn empty_view(&self) -> StationView {
        StationView::empty(self.title.clone())
    }
}
