//! Data transfer objects for JSON responses.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::StationView;
use crate::refresh::{BoardSnapshot, RefreshStatus};

/// The whole board as JSON.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Whether a refresh is in flight
    pub status: RefreshStatus,

    /// Number of completed refresh cycles
    pub generation: u64,

    /// When the shown departures were fetched
    pub updated_at: Option<DateTime<Local>>,

    /// One entry per monitored station, in display order
    pub stations: Vec<StationView>,
}

impl BoardResponse {
    /// Create from a board snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            status: snapshot.status,
            generation: snapshot.generation,
            updated_at: snapshot.updated_at,
            stations: snapshot.views.as_ref().clone(),
        }
    }
}

/// Payload of a server-sent `board` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardEvent {
    pub status: RefreshStatus,
    pub generation: u64,
}

impl BoardEvent {
    /// Create from a board snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            status: snapshot.status,
            generation: snapshot.generation,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
