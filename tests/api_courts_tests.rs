// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court API endpoint tests.

use axum::http::StatusCode;

mod common;

fn court_ids(json: &serde_json::Value) -> Vec<String> {
    json["markers"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["court_id"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_list_courts_unfiltered() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["visible"], 3);
    assert_eq!(court_ids(&json), vec!["A", "B", "C"]);
    assert_eq!(json["viewport"]["mode"], "fit");
    assert!(json["loaded_at"].is_string());
    assert_eq!(json["loading"], false);
    assert!(json["error"].is_null());
}

#[tokio::test]
async fn test_list_courts_filter_by_surface_and_query() {
    let (app, _state) = common::create_test_app().await;
    let (_, json) = common::get_json(app.clone(), "/api/courts?surface=hard").await;
    assert_eq!(court_ids(&json), vec!["A", "C"]);
    assert_eq!(json["total"], 3);
    assert_eq!(json["visible"], 2);

    let (_, json) = common::get_json(app.clone(), "/api/courts?surface=hard&query=school").await;
    assert_eq!(court_ids(&json), vec!["C"]);

    // Query matches description text too
    let (_, json) = common::get_json(app, "/api/courts?query=LIGHTS").await;
    assert_eq!(court_ids(&json), vec!["A"]);
}

#[tokio::test]
async fn test_list_courts_multi_value_type() {
    let (app, _state) = common::create_test_app().await;
    let (_, json) = common::get_json(app, "/api/courts?type=private,school").await;

    assert_eq!(court_ids(&json), vec!["B", "C"]);
}

#[tokio::test]
async fn test_boolean_filter_excludes_unknown() {
    let (app, _state) = common::create_test_app().await;

    // C has no lighting information and must not match either way
    let (_, json) = common::get_json(app.clone(), "/api/courts?lighted=true").await;
    assert_eq!(court_ids(&json), vec!["A"]);

    let (_, json) = common::get_json(app, "/api/courts?lighted=false").await;
    assert_eq!(court_ids(&json), vec!["B"]);
}

#[tokio::test]
async fn test_malformed_boolean_is_ignored() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts?indoor=maybe").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["visible"], 3);
}

#[tokio::test]
async fn test_filter_with_no_matches_uses_default_view() {
    let (app, state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts?query=wimbledon").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["visible"], 0);
    assert!(json["markers"].as_array().unwrap().is_empty());
    assert_eq!(json["viewport"]["mode"], "center");
    assert_eq!(
        json["viewport"]["zoom"],
        u64::from(state.config.map.default_zoom)
    );
}

#[tokio::test]
async fn test_selected_marker_state() {
    let (app, _state) = common::create_test_app().await;
    let (_, json) = common::get_json(app, "/api/courts?selected=B").await;

    let markers = json["markers"].as_array().unwrap();
    let states: Vec<&str> = markers
        .iter()
        .map(|m| m["state"].as_str().unwrap())
        .collect();
    assert_eq!(states, vec!["default", "selected", "default"]);
}

#[tokio::test]
async fn test_single_court_viewport_centers_on_it() {
    let (app, _state) = common::create_test_app().await;
    let (_, json) = common::get_json(app, "/api/courts?type=private").await;

    let center = &json["viewport"]["center"];
    assert!((center["lat"].as_f64().unwrap() - 40.73).abs() < 1e-9);
    assert!((center["lng"].as_f64().unwrap() + 74.06).abs() < 1e-9);
}

#[tokio::test]
async fn test_nearest_court() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts/nearest?lat=40.751&lng=-74.049").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["court"]["id"], "C");
    assert!(json["distance_km"].as_f64().unwrap() < 0.5);
}

#[tokio::test]
async fn test_nearest_rejects_invalid_coordinates() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts/nearest?lat=91&lng=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
}

#[tokio::test]
async fn test_nearest_requires_coordinates() {
    let (app, _state) = common::create_test_app().await;
    let (status, _) = common::get_json(app, "/api/courts/nearest?lat=40.7").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nearest_with_no_courts() {
    let (app, _state) = common::create_test_app_with(Vec::new()).await;
    let (status, json) = common::get_json(app, "/api/courts/nearest?lat=40.7&lng=-74.0").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_court_details() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts/B").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Beta Racquet Club");
    assert_eq!(json["contact_url"], "https://betaracquet.com");

    let labels: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["label"].as_str().unwrap())
        .collect();
    assert!(labels.contains(&"Surface"));
    assert!(labels.contains(&"Indoor"));
    // Hours were never set, so no placeholder row
    assert!(!labels.contains(&"Hours"));
}

#[tokio::test]
async fn test_court_details_not_found() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_courts_geojson_export() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::get_json(app, "/api/courts/geojson?surface=clay").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "FeatureCollection");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["geometry"]["type"], "Point");
    assert_eq!(features[0]["properties"]["name"], "Beta Racquet Club");
}

#[tokio::test]
async fn test_refresh_applies() {
    let (app, _state) = common::create_test_app().await;
    let (status, json) = common::send_json(app, "POST", "/api/courts/refresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "applied");
    assert_eq!(json["count"], 3);
}

#[tokio::test]
async fn test_security_headers_present() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let (app, _state) = common::create_test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/api/courts").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("X-Content-Type-Options").unwrap(),
        "nosniff"
    );
}
