//! Conversion from SL DTOs to domain types.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{DepartureEvent, Deviation, StationDepartures};

use super::error::SlError;
use super::types::{DepartureItem, DeparturesResponse, DeviationItem};

/// Error converting a single departure item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape
    #[error("malformed departure: {0}")]
    Malformed(String),
}

/// Decode a raw response body into departures.
///
/// A body that is not valid JSON yields [`SlError::Decode`]. A non-zero
/// `StatusCode` yields [`SlError::Upstream`]. A response without
/// `ResponseData`, or without one of the lists, is not an error: the missing
/// lists are simply `None`.
pub fn parse_departures(body: &str) -> Result<StationDepartures, SlError> {
    let response: DeparturesResponse =
        serde_json::from_str(body).map_err(|e| SlError::Decode {
            message: e.to_string(),
        })?;

    convert_response(response)
}

/// Convert a decoded response into departures.
pub fn convert_response(response: DeparturesResponse) -> Result<StationDepartures, SlError> {
    if let Some(code) = response.status_code
        && code != 0
    {
        return Err(SlError::Upstream {
            code,
            message: response.message.unwrap_or_default(),
        });
    }

    let Some(data) = response.response_data else {
        return Ok(StationDepartures::absent());
    };

    Ok(StationDepartures {
        trains: data.trains.map(|items| convert_items(&items)),
        buses: data.buses.map(|items| convert_items(&items)),
    })
}

/// Convert a list of raw items, skipping (and logging) the malformed ones.
///
/// Items are decoded one at a time so a single bad entry cannot take the
/// rest of the station's departures with it.
fn convert_items(items: &[Value]) -> Vec<DepartureEvent> {
    items
        .iter()
        .filter_map(|value| match convert_value(value) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(
                    line = value.get("LineNumber").and_then(serde_json::Value::as_str).unwrap_or("?"),
                    journey = ?value.get("JourneyNumber"),
                    error = %e,
                    "skipping departure"
                );
                None
            }
        })
        .collect()
}

/// Decode and convert one raw item.
fn convert_value(value: &Value) -> Result<DepartureEvent, ConversionError> {
    let item = DepartureItem::deserialize(value)
        .map_err(|e| ConversionError::Malformed(e.to_string()))?;
    convert_item(&item)
}

/// Convert a single departure item.
pub fn convert_item(item: &DepartureItem) -> Result<DepartureEvent, ConversionError> {
    let line_number = item
        .line_number
        .clone()
        .ok_or(ConversionError::MissingField("LineNumber"))?;
    let destination = item
        .destination
        .clone()
        .ok_or(ConversionError::MissingField("Destination"))?;
    let display_time = item
        .display_time
        .clone()
        .ok_or(ConversionError::MissingField("DisplayTime"))?;
    let journey_number = item
        .journey_number
        .ok_or(ConversionError::MissingField("JourneyNumber"))?;
    let journey_direction = item
        .journey_direction
        .ok_or(ConversionError::MissingField("JourneyDirection"))?;

    let deviations = item
        .deviations
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter_map(convert_deviation)
        .collect();

    Ok(DepartureEvent {
        line_number,
        destination,
        display_time,
        journey_number,
        journey_direction,
        deviations,
    })
}

/// Deviations without text carry nothing worth showing.
fn convert_deviation(item: &DeviationItem) -> Option<Deviation> {
    let text = item.text.clone().filter(|t| !t.trim().is_empty())?;
    Some(Deviation {
        importance_level: item.importance_level.unwrap_or(0),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_train() {
        let body = r#"{
            "ResponseData": {
                "Trains": [{
                    "LineNumber": "40",
                    "JourneyDirection": 1,
                    "JourneyNumber": 100,
                    "Destination": "X",
                    "DisplayTime": "5 min"
                }]
            }
        }"#;

        let deps = parse_departures(body).unwrap();
        let trains = deps.trains.unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].line_number, "40");
        assert_eq!(trains[0].destination, "X");
        assert_eq!(trains[0].display_time, "5 min");
        assert_eq!(trains[0].journey_number, 100);
        assert_eq!(trains[0].journey_direction, 1);
        assert!(trains[0].deviations.is_empty());
        assert!(deps.buses.is_none());
    }

    #[test]
    fn parses_deviations_in_order() {
        let body = r#"{
            "StatusCode": 0,
            "ResponseData": {
                "Trains": [],
                "Buses": [{
                    "LineNumber": "722",
                    "JourneyDirection": 2,
                    "JourneyNumber": 31,
                    "Destination": "Tullinge station",
                    "DisplayTime": "Nu",
                    "Deviations": [
                        {"ImportanceLevel": 5, "Text": "Inställd", "Consequence": "CANCELLED"},
                        {"ImportanceLevel": 2, "Text": "Ändrad hållplats"},
                        {"ImportanceLevel": 1, "Text": "   "}
                    ]
                }]
            }
        }"#;

        let deps = parse_departures(body).unwrap();
        assert_eq!(deps.trains, Some(vec![]));

        let buses = deps.buses.unwrap();
        assert_eq!(
            buses[0].deviations,
            vec![
                Deviation {
                    importance_level: 5,
                    text: "Inställd".into()
                },
                Deviation {
                    importance_level: 2,
                    text: "Ändrad hållplats".into()
                },
            ]
        );
    }

    #[test]
    fn missing_response_data_is_absent() {
        let deps = parse_departures(r#"{"StatusCode": 0, "Message": null}"#).unwrap();
        assert_eq!(deps, StationDepartures::absent());

        let deps = parse_departures(r#"{"ResponseData": null}"#).unwrap();
        assert_eq!(deps, StationDepartures::absent());
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let err = parse_departures("<html>Bad gateway</html>").unwrap_err();
        assert!(err.is_decode());

        let err = parse_departures(r#"{"ResponseData": {"Trains": 7}}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn non_zero_status_code_is_upstream_error() {
        let body = r#"{"StatusCode": 1002, "Message": "Key is invalid", "ResponseData": null}"#;
        let err = parse_departures(body).unwrap_err();
        assert!(matches!(err, SlError::Upstream { code: 1002, .. }));
    }

    #[test]
    fn skips_items_missing_required_fields() {
        let body = r#"{
            "ResponseData": {
                "Trains": [
                    {"Destination": "X", "DisplayTime": "1 min", "JourneyNumber": 1, "JourneyDirection": 1},
                    {"LineNumber": "41", "Destination": "Y", "DisplayTime": "3 min", "JourneyNumber": 2, "JourneyDirection": 1}
                ]
            }
        }"#;

        let trains = parse_departures(body).unwrap().trains.unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].line_number, "41");
    }

    #[test]
    fn mistyped_item_only_drops_that_item() {
        let body = r#"{
            "ResponseData": {
                "Trains": [
                    {"LineNumber": "41", "Destination": "Märsta", "DisplayTime": "3 min", "JourneyNumber": 2846, "JourneyDirection": 2}
                ],
                "Buses": [
                    {"LineNumber": "722", "Destination": "Tullinge gymnasium", "DisplayTime": "Nu", "JourneyNumber": "abc", "JourneyDirection": 1},
                    {"LineNumber": "723", "Destination": "Flemingsberg", "DisplayTime": "9 min", "JourneyNumber": 31155, "JourneyDirection": 2}
                ]
            }
        }"#;

        let deps = parse_departures(body).unwrap();
        assert_eq!(deps.trains.unwrap().len(), 1);

        let buses = deps.buses.unwrap();
        assert_eq!(buses.len(), 1);
        assert_eq!(buses[0].line_number, "723");
    }

    #[test]
    fn convert_value_reports_wrong_type() {
        let value = serde_json::json!({"LineNumber": 40, "Destination": "X"});
        assert!(matches!(
            convert_value(&value),
            Err(ConversionError::Malformed(_))
        ));
    }

    #[test]
    fn convert_item_reports_missing_field() {
        let item = DepartureItem {
            line_number: Some("40".into()),
            destination: Some("X".into()),
            journey_direction: None,
            display_time: Some("5 min".into()),
            journey_number: Some(1),
            deviations: None,
        };

        assert_eq!(
            convert_item(&item).unwrap_err(),
            ConversionError::MissingField("JourneyDirection")
        );
    }
}
