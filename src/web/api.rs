//! Defines the Axum API routes and handlers.

use crate::fleet::FleetStore;
use crate::router::NavAction;
use crate::session::{SessionError, SessionHandle};
use crate::views::detail::PrinterControl;
use crate::views::fleet::active_job_count;
use crate::web::models::{
    AcceptedResponse, AlertListResponse, HealthResponse, PrinterListQuery, PrinterListResponse,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use printlab_shared::PrinterStatus;
use std::sync::Arc;

/// Helper to create a JSON error response with a message and status code
fn json_error(message: &str, status: StatusCode) -> axum::response::Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn session_error(err: SessionError) -> axum::response::Response {
    let status = match err {
        SessionError::Navigation(_) => StatusCode::NOT_FOUND,
        SessionError::BookingNotMounted => StatusCode::CONFLICT,
        SessionError::Closed => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(&err.to_string(), status)
}

pub struct AppStateInner {
    pub session: SessionHandle,
    pub fleet: FleetStore,
}
pub type AppState = Arc<AppStateInner>;

/// Creates the Axum router with all the API endpoints.
pub fn create_router(session: SessionHandle, fleet: FleetStore) -> Router {
    create_router_with_state(Arc::new(AppStateInner { session, fleet }))
}

pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/screen", get(get_screen))
        .route("/api/v1/navigate", post(navigate))
        .route("/api/v1/printers", get(list_printers))
        .route("/api/v1/printers/{id}", get(get_printer))
        .route("/api/v1/printers/{id}/{control}", post(printer_control))
        .route("/api/v1/alerts", get(list_alerts))
        .route("/api/v1/booking/refresh", post(refresh_booking))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler returning the active screen.
async fn get_screen(State(state): State<AppState>) -> axum::response::Response {
    match state.session.screen().await {
        Ok(frame) => (StatusCode::OK, Json(frame)).into_response(),
        Err(e) => session_error(e),
    }
}

/// Handler applying a navigation action and returning the resulting screen.
async fn navigate(State(state): State<AppState>, Json(action): Json<NavAction>) -> axum::response::Response {
    match state.session.navigate(action).await {
        Ok(frame) => (StatusCode::OK, Json(frame)).into_response(),
        Err(e) => session_error(e),
    }
}

/// Lists the fleet, optionally narrowed to one status.
async fn list_printers(
    State(state): State<AppState>,
    Query(query): Query<PrinterListQuery>,
) -> axum::response::Response {
    let status = match query.status.as_deref().map(str::parse::<PrinterStatus>).transpose() {
        Ok(status) => status,
        Err(e) => return json_error(&e.to_string(), StatusCode::BAD_REQUEST),
    };
    let mut printers = state.fleet.printers().await;
    let active_jobs = active_job_count(&printers);
    if let Some(status) = status {
        printers.retain(|p| p.status == status);
    }
    (StatusCode::OK, Json(PrinterListResponse { printers, active_jobs })).into_response()
}

async fn get_printer(State(state): State<AppState>, Path(id): Path<String>) -> axum::response::Response {
    match state.fleet.printer(&id).await {
        Some(printer) => (StatusCode::OK, Json(printer)).into_response(),
        None => json_error(&format!("Printer '{}' not found", id), StatusCode::NOT_FOUND),
    }
}

/// Pause, resume and stop are accepted for known printers but not wired to
/// any device.
async fn printer_control(
    State(state): State<AppState>,
    Path((id, control)): Path<(String, String)>,
) -> axum::response::Response {
    let control: PrinterControl = match control.parse() {
        Ok(control) => control,
        Err(e) => return json_error(&e.to_string(), StatusCode::BAD_REQUEST),
    };
    if state.fleet.printer(&id).await.is_none() {
        return json_error(&format!("Printer '{}' not found", id), StatusCode::NOT_FOUND);
    }
    tracing::warn!("Ignoring {} request for printer {}: printer control is not wired", control.as_str(), id);
    json_error("Printer control is not wired", StatusCode::NOT_IMPLEMENTED)
}

async fn list_alerts(State(state): State<AppState>) -> Json<AlertListResponse> {
    Json(AlertListResponse {
        alerts: state.fleet.alerts().to_vec(),
    })
}

/// Starts a booking fetch; the screen reports `loading` until it lands.
async fn refresh_booking(State(state): State<AppState>) -> axum::response::Response {
    match state.session.refresh_booking().await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(AcceptedResponse {
                result: "refreshing".to_string(),
            }),
        )
            .into_response(),
        Err(e) => session_error(e),
    }
}
