//! Aggregator error types.

use crate::domain::SiteId;
use crate::sl::SlError;

/// Fetching one station failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to fetch departures for {station} (site {site_id}): {source}")]
pub struct FetchError {
    /// Title of the station that failed.
    pub station: String,
    /// Site id that was queried.
    pub site_id: SiteId,
    /// Underlying client error.
    #[source]
    pub source: SlError,
}
