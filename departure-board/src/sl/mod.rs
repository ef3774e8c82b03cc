//! SL realtime departures client.
//!
//! This module provides an HTTP client for the SL `realtimedeparturesV4`
//! endpoint, which returns upcoming departures for one site grouped by
//! transport mode.
//!
//! Key characteristics of the API:
//! - Authentication is a static key passed as a query parameter
//! - HTTP 200 does not mean success; the body carries its own `StatusCode`
//! - Lists and fields are omitted rather than sent empty in many cases

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, SlClient, SlConfig};
pub use convert::{ConversionError, parse_departures};
pub use error::SlError;
pub use mock::MockSlClient;
pub use types::{DepartureItem, DeparturesResponse, DeviationItem, ResponseData};

use crate::domain::{StationDepartures, StationQuery};

/// The departure source chosen at startup: the live API or canned files.
#[derive(Debug, Clone)]
pub enum SlSource {
    Live(SlClient),
    Mock(MockSlClient),
}

impl SlSource {
    /// Fetch departures from whichever backend is configured.
    pub async fn get_departures(&self, query: &StationQuery) -> Result<StationDepartures, SlError> {
        match self {
            SlSource::Live(client) => client.get_departures(query).await,
            SlSource::Mock(client) => client.get_departures(query).await,
        }
    }
}
