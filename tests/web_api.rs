//! Integration tests for the dashboard HTTP API

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt; // for .collect().await
use printlab::booking::MockBookingSource;
use printlab::fleet::{DriftSettings, FleetStore};
use printlab::session::{DashboardSession, SessionHandle, SessionSettings};
use printlab::web::api::create_router;
use printlab_shared::fixtures::{initial_printers, mock_alerts};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt; // for `oneshot`

fn test_app() -> Router {
    let fleet = FleetStore::new(initial_printers(), mock_alerts(), DriftSettings::default(), StdRng::seed_from_u64(1));
    let source = Arc::new(MockBookingSource::from_fixture(Duration::ZERO));
    let session = DashboardSession::new(fleet.clone(), source, SessionSettings::default());
    let (handle, _task) = SessionHandle::spawn(session);
    create_router(handle, fleet)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_initial_screen_is_fleet() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/v1/screen", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["screen"]["view"], "fleet");
    assert_eq!(json["screen"]["active_jobs"], 2);
    assert_eq!(json["navbar"]["app_name"], "PrintLab OS");
}

#[tokio::test]
async fn test_navigate_to_detail_and_back() {
    let app = test_app();
    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/navigate",
        Some(json!({ "action": "select_printer", "printer_id": "p3" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["screen"]["view"], "detail");
    assert_eq!(json["screen"]["name"], "Bambu A3");

    let (_, json) = send(&app, "GET", "/api/v1/screen", None).await;
    assert_eq!(json["screen"]["view"], "detail");

    let (status, json) = send(&app, "POST", "/api/v1/navigate", Some(json!({ "action": "back" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["screen"]["view"], "fleet");
}

#[tokio::test]
async fn test_navigate_to_unknown_printer() {
    let app = test_app();
    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/navigate",
        Some(json!({ "action": "select_printer", "printer_id": "p9" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("p9"));

    let (_, json) = send(&app, "GET", "/api/v1/screen", None).await;
    assert_eq!(json["screen"]["view"], "fleet");
}

#[tokio::test]
async fn test_navigate_rejects_unknown_action() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/api/v1/navigate", Some(json!({ "action": "fly" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_kiosk_screen_has_no_navbar() {
    let app = test_app();
    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/navigate",
        Some(json!({ "action": "open_visualization" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["screen"]["view"], "visualization");
    assert!(json["navbar"].is_null());
}

#[tokio::test]
async fn test_list_and_get_printers() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/v1/printers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["printers"].as_array().unwrap().len(), 5);
    assert_eq!(json["active_jobs"], 2);

    let (status, json) = send(&app, "GET", "/api/v1/printers/p4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["jobName"], "Bracket_Support.stl");

    let (status, _) = send(&app, "GET", "/api/v1/printers/p9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_printers_by_status() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/v1/printers?status=printing", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json["printers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["p1", "p4"]);
    assert_eq!(json["active_jobs"], 2);

    let (status, json) = send(&app, "GET", "/api/v1/printers?status=Finished", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["printers"][0]["id"], "p5");

    let (status, json) = send(&app, "GET", "/api/v1/printers?status=paused", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("paused"));
}

#[tokio::test]
async fn test_alerts() {
    let app = test_app();
    let (status, json) = send(&app, "GET", "/api/v1/alerts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["alerts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_printer_controls_are_not_wired() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/api/v1/printers/p1/pause", None).await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
    let (status, _) = send(&app, "POST", "/api/v1/printers/p1/explode", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "POST", "/api/v1/printers/p9/stop", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_refresh_requires_booking_view() {
    let app = test_app();
    let (status, _) = send(&app, "POST", "/api/v1/booking/refresh", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, "POST", "/api/v1/navigate", Some(json!({ "action": "open_booking" }))).await;
    let (status, json) = send(&app, "POST", "/api/v1/booking/refresh", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["result"], "refreshing");
}
