//! Fetch-all-stations aggregation.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{StationDepartures, StationView};

use super::error::FetchError;
use super::source::DepartureSource;
use super::station::MonitoredStation;

/// Fetches every monitored station and shapes the results into views.
pub struct Aggregator<S> {
    source: S,
    stations: Vec<MonitoredStation>,
}

impl<S: DepartureSource> Aggregator<S> {
    /// Create an aggregator over the given stations, in display order.
    pub fn new(source: S, stations: Vec<MonitoredStation>) -> Self {
        Self { source, stations }
    }

    /// The monitored stations, in display order.
    pub fn stations(&self) -> &[MonitoredStation] {
        &self.stations
    }

    /// Fetch and filter one station.
    ///
    /// A body that could not be decoded is not an error: the station simply
    /// has no data this cycle. Anything else that goes wrong with the request
    /// is reported as a [`FetchError`].
    pub async fn fetch_station(&self, station: &MonitoredStation) -> Result<StationView, FetchError> {
        match self.source.departures(&station.query).await {
            Ok(departures) => Ok(station.view_from(departures)),
            Err(e) if e.is_decode() => {
                warn!(
                    station = %station.title,
                    site_id = %station.query.site_id,
                    error = %e,
                    "undecodable response, treating as no data"
                );
                Ok(station.view_from(StationDepartures::absent()))
            }
            Err(source) => Err(FetchError {
                station: station.title.clone(),
                site_id: station.query.site_id.clone(),
                source,
            }),
        }
    }

    /// Fetch every station concurrently, reporting failures per station.
    ///
    /// The output has one entry per station, in station order.
    pub async fn try_fetch_all(&self) -> Vec<Result<StationView, FetchError>> {
        join_all(self.stations.iter().map(|station| self.fetch_station(station))).await
    }

    /// Fetch every station concurrently.
    ///
    /// A station that fails is logged and shown empty; the other stations are
    /// unaffected. The output has one view per station, in station order.
    pub async fn fetch_all(&self) -> Vec<StationView> {
        let results = self.try_fetch_all().await;

        let views: Vec<StationView> = self
            .stations
            .iter()
            .zip(results)
            .map(|(station, result)| match result {
                Ok(view) => view,
                Err(e) => {
                    warn!(
                        station = %e.station,
                        site_id = %e.site_id,
                        error = %e.source,
                        "failed to fetch departures, showing station empty"
                    );
                    station.empty_view()
                }
            })
            .collect();

        debug!(
            stations = views.len(),
            with_data = views.iter().filter(|v| v.has_data()).count(),
            "aggregation complete"
        );

        views
    }
}
