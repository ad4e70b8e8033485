// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use nextserve_courts::config::Config;
use nextserve_courts::models::{Court, TriState};
use nextserve_courts::routes::create_router;
use nextserve_courts::services::{CourtSource, GeoJsonCourtRepository, MapView};
use nextserve_courts::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Sample court data shipped with the repo.
#[allow(dead_code)]
pub const SAMPLE_GEOJSON: &str = "data/courts.geojson";

/// Three courts around Jersey City with distinct attributes.
#[allow(dead_code)]
pub fn test_courts() -> Vec<Court> {
    let mut a = Court::new("A", "Alpha Park Courts", 40.7178, -74.0431);
    a.surface = Some("hard".to_string());
    a.court_type = Some("public".to_string());
    a.lighted = TriState::Yes;
    a.description = Some("Free • Lights until 10pm".to_string());

    let mut b = Court::new("B", "Beta Racquet Club", 40.7300, -74.0600);
    b.surface = Some("clay".to_string());
    b.court_type = Some("private".to_string());
    b.lighted = TriState::No;
    b.indoor = TriState::Yes;
    b.contact = Some("betaracquet.com".to_string());

    let mut c = Court::new("C", "Gamma School Courts", 40.7500, -74.0500);
    c.surface = Some("hard".to_string());
    c.court_type = Some("school".to_string());

    vec![a, b, c]
}

/// Create a test app serving the given courts, already loaded.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app_with(courts: Vec<Court>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let source = CourtSource::GeoJson(GeoJsonCourtRepository::from_courts(courts));
    let map = MapView::new(source, config.map.clone());
    map.load().await;

    let state = Arc::new(AppState { config, map });
    (create_router(state.clone()), state)
}

/// Create a test app serving [`test_courts`].
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(test_courts()).await
}

/// Send a GET request and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "GET", uri).await
}

/// Send a request with an empty body and decode the JSON response.
#[allow(dead_code)]
pub async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
