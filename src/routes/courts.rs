// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court discovery routes for the map client.
//!
//! Each request filters the shared court snapshot with its own
//! parameters; per-request filters and selections are never stored.

use crate::error::{AppError, Result};
use crate::models::{Coordinates, Court, CourtDetails, FilterParams, FilterSpec};
use crate::services::court_geojson::courts_to_geojson;
use crate::services::filter::filter;
use crate::services::geo::nearest_court;
use crate::services::markers::{present_markers, Marker};
use crate::services::viewport::{fit_viewport, Viewport};
use crate::services::LoadOutcome;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::SecondsFormat;
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Court routes (public).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courts", get(list_courts))
        .route("/api/courts/geojson", get(courts_geojson))
        .route("/api/courts/nearest", get(get_nearest))
        .route("/api/courts/refresh", post(refresh_courts))
        .route("/api/courts/{id}", get(get_court))
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CourtsQuery {
    #[serde(flatten)]
    filter: FilterParams,
    /// Currently selected court id (for marker highlighting)
    selected: Option<String>,
}

/// Everything the map surface needs to draw one frame.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourtsResponse {
    pub markers: Vec<Marker>,
    pub viewport: Viewport,
    /// Courts in the snapshot
    pub total: usize,
    /// Courts passing the filter
    pub visible: usize,
    pub loaded_at: Option<String>,
    /// A refresh is in flight
    pub loading: bool,
    /// Message from the last failed refresh; stale data is still served
    pub error: Option<String>,
}

/// Get markers and viewport for a filter.
async fn list_courts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CourtsQuery>,
) -> Json<CourtsResponse> {
    let spec = FilterSpec::from_params(&params.filter);
    let snapshot = state.map.snapshot();
    let visible = filter(&snapshot, &spec);

    tracing::debug!(
        total = snapshot.len(),
        visible = visible.len(),
        selected = ?params.selected,
        "Listing courts"
    );

    Json(CourtsResponse {
        markers: present_markers(&visible, params.selected.as_deref(), None),
        viewport: fit_viewport(&visible, state.map.config()),
        total: snapshot.len(),
        visible: visible.len(),
        loaded_at: state
            .map
            .last_loaded_at()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        loading: state.map.is_loading(),
        error: state.map.error(),
    })
}

/// Filtered courts as a GeoJSON FeatureCollection.
async fn courts_geojson(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<serde_json::Value>> {
    let visible = filter(&state.map.snapshot(), &FilterSpec::from_params(&params));
    let collection = GeoJson::FeatureCollection(courts_to_geojson(&visible));

    let body = serde_json::to_value(collection)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("GeoJSON encoding failed: {}", e)))?;
    Ok(Json(body))
}

// ─── Nearest ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct NearestQuery {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NearestResponse {
    pub court: Court,
    pub distance_km: f64,
}

/// Find the court nearest to a position.
async fn get_nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQuery>,
) -> Result<Json<NearestResponse>> {
    let origin = Coordinates::new(params.lat, params.lng);
    if !origin.is_valid() {
        return Err(AppError::BadRequest(format!(
            "Invalid coordinates: {}, {}",
            params.lat, params.lng
        )));
    }

    let snapshot = state.map.snapshot();
    let (court, distance_km) = nearest_court(origin, &snapshot)
        .ok_or_else(|| AppError::NotFound("No courts loaded".to_string()))?;

    Ok(Json(NearestResponse {
        court: court.clone(),
        distance_km,
    }))
}

// ─── Details ─────────────────────────────────────────────────

/// Details panel for one court.
async fn get_court(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CourtDetails>> {
    let snapshot = state.map.snapshot();
    let court = snapshot
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Court {}", id)))?;

    Ok(Json(CourtDetails::from_court(court)))
}

// ─── Refresh ─────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RefreshResponse {
    pub status: String,
    pub count: Option<usize>,
}

/// Re-fetch courts from the backend.
async fn refresh_courts(State(state): State<Arc<AppState>>) -> Result<Json<RefreshResponse>> {
    match state.map.load().await {
        LoadOutcome::Applied { count } => Ok(Json(RefreshResponse {
            status: "applied".to_string(),
            count: Some(count),
        })),
        LoadOutcome::Superseded => Ok(Json(RefreshResponse {
            status: "superseded".to_string(),
            count: None,
        })),
        LoadOutcome::Failed { error } => Err(AppError::Repository(error)),
    }
}
