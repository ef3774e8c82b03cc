//! SL realtime departures (v4) response DTOs.
//!
//! Field names follow the API's PascalCase. Everything is optional: the API
//! omits or nulls fields freely, and absence is handled during conversion.
//! Only the fields the board shows are declared.

use serde::Deserialize;
use serde_json::Value;

/// Top-level response from `realtimedeparturesV4.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeparturesResponse {
    /// 0 on success; anything else is an API-level failure.
    pub status_code: Option<i64>,

    /// Error message accompanying a non-zero status code.
    pub message: Option<String>,

    /// The departure data. Missing or null on failure.
    pub response_data: Option<ResponseData>,
}

/// Departures grouped by transport mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    /// Commuter train departures, decoded item by item into [`DepartureItem`].
    pub trains: Option<Vec<Value>>,

    /// Bus departures, decoded item by item into [`DepartureItem`].
    pub buses: Option<Vec<Value>>,
}

/// One departure in any of the transport mode lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureItem {
    pub line_number: Option<String>,
    pub destination: Option<String>,
    pub journey_direction: Option<i64>,
    pub display_time: Option<String>,
    pub journey_number: Option<i64>,
    pub deviations: Option<Vec<DeviationItem>>,
}

/// A deviation (disruption notice) attached to a departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviationItem {
    pub text: Option<String>,
    pub importance_level: Option<i64>,
}
