//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{DepartureEvent, StationView};
use crate::refresh::BoardSnapshot;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The departure board page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page_title: String,
    pub board: BoardView,
}

// ============================================================================
// Fragment Templates (re-fetched by the page, no base.html)
// ============================================================================

/// The station sections, swapped in after each refresh.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board: BoardView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Board view model.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub loading: bool,
    pub generation: u64,
    /// "HH:MM:SS" of the last completed refresh, empty before the first one.
    pub updated_at: String,
    pub stations: Vec<StationSectionView>,
}

impl BoardView {
    /// Create from a board snapshot.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            loading: snapshot.status.is_loading(),
            generation: snapshot.generation,
            updated_at: snapshot
                .updated_at
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default(),
            stations: snapshot
                .views
                .iter()
                .map(StationSectionView::from_view)
                .collect(),
        }
    }
}

/// One station section.
///
/// Absent lists turn into hidden blocks rather than empty ones.
#[derive(Debug, Clone)]
pub struct StationSectionView {
    pub title: String,
    pub show_trains: bool,
    pub trains: Vec<DepartureRowView>,
    pub show_buses: bool,
    pub buses: Vec<DepartureRowView>,
    pub bus_heading: String,
}

impl StationSectionView {
    /// Create from a domain StationView.
    pub fn from_view(view: &StationView) -> Self {
        let rows = |list: &Option<Vec<DepartureEvent>>| -> Vec<DepartureRowView> {
            list.as_deref()
                .unwrap_or(&[])
                .iter()
                .map(DepartureRowView::from_departure)
                .collect()
        };

        Self {
            title: view.title.clone(),
            show_trains: view.trains.is_some(),
            trains: rows(&view.trains),
            show_buses: view.buses.is_some(),
            buses: rows(&view.buses),
            bus_heading: view.bus_heading.clone().unwrap_or_else(|| "Buss".to_string()),
        }
    }
}

/// One departure row.
#[derive(Debug, Clone)]
pub struct DepartureRowView {
    pub journey_number: i64,
    /// "40 Södertälje centrum"
    pub label: String,
    pub display_time: String,
    pub deviations: Vec<String>,
}

impl DepartureRowView {
    /// Create from a domain DepartureEvent.
    pub fn from_departure(departure: &DepartureEvent) -> Self {
        Self {
            journey_number: departure.journey_number,
            label: format!("{} {}", departure.line_number, departure.destination),
            display_time: departure.display_time.clone(),
            deviations: departure
                .deviations
                .iter()
                .map(|d| d.text.clone())
                .collect(),
        }
    }
}
