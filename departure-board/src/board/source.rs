//! The seam between the aggregator and the upstream API.

use std::future::Future;

use crate::domain::{StationDepartures, StationQuery};
use crate::sl::{MockSlClient, SlClient, SlError, SlSource};

/// Something that can fetch current departures for a station.
///
/// Implemented by the live client and the mock client; tests provide their
/// own implementations.
pub trait DepartureSource: Send + Sync {
    /// Fetch departures for one station.
    fn departures(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<StationDepartures, SlError>> + Send;
}

impl DepartureSource for SlClient {
    fn departures(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<StationDepartures, SlError>> + Send {
        self.get_departures(query)
    }
}

impl DepartureSource for MockSlClient {
    fn departures(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<StationDepartures, SlError>> + Send {
        self.get_departures(query)
    }
}

impl DepartureSource for SlSource {
    fn departures(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<StationDepartures, SlError>> + Send {
        self.get_departures(query)
    }
}
