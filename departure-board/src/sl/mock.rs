//! Mock SL client for running without API access.
//!
//! Loads canned responses from JSON files and serves them as if they were
//! live API responses. The bodies go through the same decoding as real
//! responses, so malformed files behave like malformed upstream data.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{SiteId, StationDepartures, StationQuery};

use super::convert::parse_departures;
use super::error::SlError;

/// Mock SL client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockSlClient {
    /// Raw response bodies, keyed by site id.
    bodies: Arc<HashMap<SiteId, String>>,
}

impl MockSlClient {
    /// Load mock responses from a directory.
    ///
    /// Expects files named `{site_id}.json` (e.g. `9525.json`). Other files
    /// are ignored.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SlError> {
        let data_dir = data_dir.as_ref();
        let mut bodies = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| SlError::Api {
            status: 0,
            message: format!("failed to read mock data directory {data_dir:?}: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| SlError::Api {
                status: 0,
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(site_id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| SiteId::parse(s).ok())
            else {
                continue;
            };

            let body = std::fs::read_to_string(&path).map_err(|e| SlError::Api {
                status: 0,
                message: format!("failed to read {path:?}: {e}"),
            })?;

            bodies.insert(site_id, body);
        }

        if bodies.is_empty() {
            return Err(SlError::Api {
                status: 0,
                message: format!("no mock response files found in {data_dir:?}"),
            });
        }

        Ok(Self {
            bodies: Arc::new(bodies),
        })
    }

    /// Create a mock client from in-memory bodies.
    pub fn from_bodies(bodies: impl IntoIterator<Item = (SiteId, String)>) -> Self {
        Self {
            bodies: Arc::new(bodies.into_iter().collect()),
        }
    }

    /// Serve departures for a station.
    ///
    /// Mimics [`super::SlClient::get_departures`]. The time window is ignored,
    /// mock data is static. Unknown sites answer like a 404.
    pub async fn get_departures(&self, query: &StationQuery) -> Result<StationDepartures, SlError> {
        let body = self.bodies.get(&query.site_id).ok_or_else(|| SlError::Api {
            status: 404,
            message: format!("no mock data for site {}", query.site_id),
        })?;

        parse_departures(body)
    }

    /// Site ids with mock data available.
    pub fn available_sites(&self) -> Vec<SiteId> {
        let mut sites: Vec<_> = self.bodies.keys().cloned().collect();
        sites.sort();
        sites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BODY: &str = r#"{"StatusCode":0,"ResponseData":{"Trains":[{"LineNumber":"41","Destination":"Märsta","DisplayTime":"3 min","JourneyNumber":2741,"JourneyDirection":1}],"Buses":[]}}"#;

    fn query(site: &str) -> StationQuery {
        StationQuery::new(SiteId::parse(site).unwrap())
    }

    #[tokio::test]
    async fn loads_json_files_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("9525.json"), BODY).unwrap();
        std::fs::write(dir.path().join("1002.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let client = MockSlClient::new(dir.path()).unwrap();
        assert_eq!(
            client.available_sites(),
            vec![SiteId::parse("1002").unwrap(), SiteId::parse("9525").unwrap()]
        );

        let deps = client.get_departures(&query("9525")).await.unwrap();
        assert_eq!(deps.trains.unwrap()[0].destination, "Märsta");
        assert_eq!(deps.buses, Some(vec![]));

        let err = client.get_departures(&query("1002")).await.unwrap_err();
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn unknown_site_returns_error() {
        let client = MockSlClient::from_bodies([(SiteId::parse("9525").unwrap(), BODY.into())]);

        let err = client.get_departures(&query("1")).await.unwrap_err();
        assert!(matches!(err, SlError::Api { status: 404, .. }));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(MockSlClient::new(dir.path()).is_err());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(MockSlClient::new("/nonexistent/mock/dir").is_err());
    }
}
