//! Web layer for the departure board.
//!
//! Serves the board page, an HTML/JSON view of the latest departures, and a
//! server-sent event stream that tells open pages when to reload.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
