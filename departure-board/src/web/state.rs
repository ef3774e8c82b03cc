//! Application state for the web layer.

use std::sync::Arc;

use crate::refresh::BoardState;

/// Shared application state.
///
/// Handlers only ever read the board; the refresh scheduler owns writing.
#[derive(Clone)]
pub struct AppState {
    /// Latest departures and refresh status
    pub board: BoardState,

    /// Document title of the page
    pub page_title: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(board: BoardState, page_title: impl Into<Arc<str>>) -> Self {
        Self {
            board,
            page_title: page_title.into(),
        }
    }
}
