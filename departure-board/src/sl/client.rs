//! SL realtime departures HTTP client.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::domain::{StationDepartures, StationQuery};

use super::convert::parse_departures;
use super::error::SlError;

/// Default base URL for the SL API.
pub const DEFAULT_BASE_URL: &str = "https://api.sl.se/api2";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the SL client.
#[derive(Clone)]
pub struct SlConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production SL)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SlConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for SlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// SL realtime departures client.
#[derive(Clone)]
pub struct SlClient {
    http: reqwest::Client,
    departures_url: String,
    api_key: String,
}

impl SlClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SlConfig) -> Result<Self, SlError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("departure-board/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            departures_url: departures_url(&config.base_url),
            api_key: config.api_key,
        })
    }

    /// Fetch current departures for one station.
    ///
    /// Network failures and non-success statuses are errors. A body that
    /// cannot be decoded comes back as [`SlError::Decode`] so callers can
    /// tell "no data" apart from "request failed".
    pub async fn get_departures(&self, query: &StationQuery) -> Result<StationDepartures, SlError> {
        debug!(
            site_id = %query.site_id,
            time_window = query.time_window_mins,
            "fetching departures"
        );

        let response = self
            .http
            .get(&self.departures_url)
            .query(&[
                ("key", self.api_key.clone()),
                ("siteid", query.site_id.as_str().to_string()),
                ("timewindow", query.time_window_mins.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SlError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        parse_departures(&body)
    }
}

impl fmt::Debug for SlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlClient")
            .field("departures_url", &self.departures_url)
            .finish_non_exhaustive()
    }
}

/// Build the departures endpoint URL from a base URL.
fn departures_url(base_url: &str) -> String {
    format!(
        "{}/realtimedeparturesV4.json",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = SlConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(5);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = SlConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn debug_hides_api_key() {
        let config = SlConfig::new("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let client = SlClient::new(config).unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[test]
    fn url_building() {
        assert_eq!(
            departures_url("https://api.sl.se/api2"),
            "https://api.sl.se/api2/realtimedeparturesV4.json"
        );
        assert_eq!(
            departures_url("http://localhost:8080/"),
            "http://localhost:8080/realtimedeparturesV4.json"
        );
    }

    #[test]
    fn client_creation() {
        let client = SlClient::new(SlConfig::new("test-key"));
        assert!(client.is_ok());
    }
}
