//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(map_page))
        .route("/health", get(health))
        .route("/api/network", get(network))
        .route("/api/trams", get(trams))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        message: format!("No route for {uri}"),
    }
}

/// Live map page.
async fn map_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let map = {
        let simulation = state.simulation.read().await;
        MapView::from_network(simulation.network())
    };
    let poll_ms = u64::try_from(state.tick.as_millis()).unwrap_or(u64::MAX);

    MapTemplate { map, poll_ms }
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {e}"),
        })
}

/// Stops, connections and lines.
async fn network(State(state): State<AppState>) -> Json<NetworkResponse> {
    let simulation = state.simulation.read().await;
    Json(NetworkResponse::from_network(simulation.network()))
}

/// Current clock and tram positions.
async fn trams(State(state): State<AppState>) -> Json<TramsResponse> {
    let simulation = state.simulation.read().await;
    Json(TramsResponse::from_simulation(&simulation))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        } else {
            warn!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
