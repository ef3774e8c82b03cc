//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use futures::{Stream, stream};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/api/departures", get(api_departures))
        .route("/events", get(events))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The full departure board page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.board.snapshot();
    let html = IndexTemplate {
        page_title: state.page_title.to_string(),
        board: BoardView::from_snapshot(&snapshot),
    }
    .render()?;
    Ok(Html(html))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Current board, as an HTML fragment or JSON depending on `Accept`.
async fn board(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    let snapshot = state.board.snapshot();

    if accepts_html(&headers) {
        let html = BoardTemplate {
            board: BoardView::from_snapshot(&snapshot),
        }
        .render()?;
        Ok(Html(html).into_response())
    } else {
        Ok(Json(BoardResponse::from_snapshot(&snapshot)).into_response())
    }
}

/// Current board as JSON.
async fn api_departures(State(state): State<AppState>) -> Json<BoardResponse> {
    Json(BoardResponse::from_snapshot(&state.board.snapshot()))
}

/// Server-sent `board` events: one for the current state on connect, then
/// one per status change.
async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let rx = state.board.subscribe();

    let stream = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let payload = BoardEvent::from_snapshot(&rx.borrow_and_update());
        let event = Event::default().event("board").json_data(payload);
        Some((event, (rx, false)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
