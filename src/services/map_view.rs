// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court map state: load → filter → select → display.
//!
//! All state transitions happen inside a short synchronous critical
//! section; the lock is never held across an `.await`, so `load()` and
//! `locate_user()` only suspend at their own I/O boundary.
//!
//! Overlapping loads are resolved with a request token: each `load()`
//! takes the next token before fetching, and a response is only applied
//! if its token is still the latest one issued.

use crate::config::MapConfig;
use crate::models::{Coordinates, Court, CourtDetails, FilterSpec};
use crate::services::filter::filter;
use crate::services::geo::nearest_court;
use crate::services::geolocation::{GeolocationError, GeolocationProvider};
use crate::services::markers::{present_markers, Marker};
use crate::services::repository::{CourtRepository, RepositoryError};
use crate::services::viewport::{fit_viewport, Viewport};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of a `load()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The response replaced the snapshot.
    Applied { count: usize },
    /// A newer `load()` was issued while this one was in flight.
    Superseded,
    /// The fetch failed; the previous snapshot is kept.
    Failed { error: RepositoryError },
}

/// Errors from map interactions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapViewError {
    #[error("Court not found: {0}")]
    CourtNotFound(String),

    #[error("No courts loaded")]
    NoCourts,

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

struct MapState {
    snapshot: Arc<Vec<Court>>,
    filter: FilterSpec,
    visible: Arc<Vec<Court>>,
    selected: Option<String>,
    user_location: Option<Coordinates>,
    /// Set by a failed load; cleared only by a successful load or dismissal
    load_error: Option<String>,
    /// Set by a failed locate; cleared by a successful locate or dismissal
    location_error: Option<String>,
    viewport: Viewport,
    latest_token: u64,
    /// The latest issued load has not resolved yet
    loading: bool,
    loaded_at: Option<DateTime<Utc>>,
}

/// State owner for one map screen.
pub struct MapView<R> {
    repository: R,
    config: MapConfig,
    state: Mutex<MapState>,
}

impl<R: CourtRepository> MapView<R> {
    pub fn new(repository: R, config: MapConfig) -> Self {
        let viewport = Viewport::default_for(&config);
        Self {
            repository,
            config,
            state: Mutex::new(MapState {
                snapshot: Arc::new(Vec::new()),
                filter: FilterSpec::default(),
                visible: Arc::new(Vec::new()),
                selected: None,
                user_location: None,
                load_error: None,
                location_error: None,
                viewport,
                latest_token: 0,
                loading: false,
                loaded_at: None,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MapState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Fetch the full court list and replace the snapshot.
    pub async fn load(&self) -> LoadOutcome {
        let token = {
            let mut state = self.state();
            state.latest_token += 1;
            state.loading = true;
            state.latest_token
        };
        tracing::debug!(token, "Loading courts");

        let result = self.repository.list_courts().await;

        let mut state = self.state();
        if token != state.latest_token {
            tracing::debug!(
                token,
                latest = state.latest_token,
                "Discarding superseded court load"
            );
            return LoadOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(courts) => {
                let count = courts.len();
                state.snapshot = Arc::new(courts);
                state.load_error = None;
                state.loaded_at = Some(Utc::now());
                // Selection must refer to a court in the snapshot.
                if let Some(id) = state.selected.take() {
                    if state.snapshot.iter().any(|c| c.id == id) {
                        state.selected = Some(id);
                    } else {
                        tracing::debug!(court_id = %id, "Selected court no longer exists");
                    }
                }
                self.refresh_visible(&mut state);
                tracing::info!(token, count, visible = state.visible.len(), "Courts loaded");
                LoadOutcome::Applied { count }
            }
            Err(e) => {
                let message = format!("Failed to load courts: {}", e);
                tracing::warn!(token, error = %e, "Court load failed, keeping previous snapshot");
                state.load_error = Some(message);
                LoadOutcome::Failed { error: e }
            }
        }
    }

    /// Replace the active filter and re-derive the visible courts.
    pub fn set_filter(&self, spec: FilterSpec) {
        let mut state = self.state();
        state.filter = spec;
        self.refresh_visible(&mut state);
        tracing::debug!(visible = state.visible.len(), "Filter applied");
    }

    /// Select a court from the unfiltered snapshot.
    pub fn select_court(&self, id: &str) -> Result<(), MapViewError> {
        let mut state = self.state();
        if !state.snapshot.iter().any(|c| c.id == id) {
            return Err(MapViewError::CourtNotFound(id.to_string()));
        }
        state.selected = Some(id.to_string());
        tracing::debug!(court_id = id, "Court selected");
        Ok(())
    }

    pub fn clear_selection(&self) {
        self.state().selected = None;
    }

    /// Return to the configured default center and zoom.
    pub fn reset_view(&self) {
        self.state().viewport = Viewport::default_for(&self.config);
    }

    /// Route a marker click. Returns whether the selection changed.
    pub fn click_marker(&self, marker: &Marker) -> Result<bool, MapViewError> {
        match (&marker.court_id, marker.is_selectable()) {
            (Some(id), true) => self.select_court(id).map(|()| true),
            _ => Ok(false),
        }
    }

    /// Locate the user, select the nearest court and center the map on it
    /// at the default zoom.
    ///
    /// Failures (including timeout) are recorded as the location error and
    /// leave the selection unchanged. A pending load error is never cleared
    /// here.
    pub async fn locate_user<G: GeolocationProvider>(
        &self,
        provider: &G,
    ) -> Result<Court, MapViewError> {
        let position =
            match tokio::time::timeout(self.config.locate_timeout, provider.current_position())
                .await
            {
                Ok(Ok(position)) => position,
                Ok(Err(e)) => return Err(self.record_geolocation_error(e)),
                Err(_) => return Err(self.record_geolocation_error(GeolocationError::Timeout)),
            };

        let mut state = self.state();
        state.user_location = Some(position);

        let snapshot = state.snapshot.clone();
        let Some((court, distance_km)) = nearest_court(position, &snapshot) else {
            state.location_error = Some("No courts to search".to_string());
            return Err(MapViewError::NoCourts);
        };
        let court = court.clone();

        tracing::info!(
            court_id = %court.id,
            distance_km,
            "Selected nearest court to user"
        );
        state.selected = Some(court.id.clone());
        state.location_error = None;
        state.viewport = Viewport::Center {
            center: court.coordinates(),
            zoom: self.config.default_zoom,
        };
        Ok(court)
    }

    fn record_geolocation_error(&self, e: GeolocationError) -> MapViewError {
        tracing::warn!(error = %e, "Could not determine user location");
        self.state().location_error = Some(format!("Unable to retrieve your location: {}", e));
        MapViewError::Geolocation(e)
    }

    fn refresh_visible(&self, state: &mut MapState) {
        state.visible = Arc::new(filter(&state.snapshot, &state.filter));
        state.viewport = fit_viewport(&state.visible, &self.config);
    }

    // ─── Read accessors ──────────────────────────────────────────

    /// The full, unfiltered court list.
    pub fn snapshot(&self) -> Arc<Vec<Court>> {
        self.state().snapshot.clone()
    }

    /// Courts passing the active filter.
    pub fn visible(&self) -> Arc<Vec<Court>> {
        self.state().visible.clone()
    }

    pub fn filter_spec(&self) -> FilterSpec {
        self.state().filter.clone()
    }

    pub fn selected(&self) -> Option<String> {
        self.state().selected.clone()
    }

    pub fn selected_court(&self) -> Option<Court> {
        let state = self.state();
        let id = state.selected.as_deref()?;
        state.snapshot.iter().find(|c| c.id == id).cloned()
    }

    pub fn user_location(&self) -> Option<Coordinates> {
        self.state().user_location
    }

    /// User-visible error message; a load failure takes precedence.
    pub fn error(&self) -> Option<String> {
        let state = self.state();
        state
            .load_error
            .clone()
            .or_else(|| state.location_error.clone())
    }

    pub fn load_error(&self) -> Option<String> {
        self.state().load_error.clone()
    }

    pub fn location_error(&self) -> Option<String> {
        self.state().location_error.clone()
    }

    /// Dismiss every error message.
    pub fn dismiss_error(&self) {
        let mut state = self.state();
        state.load_error = None;
        state.location_error = None;
    }

    /// Whether the most recent `load()` is still in flight.
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn viewport(&self) -> Viewport {
        self.state().viewport
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.state().loaded_at
    }

    /// Markers for the visible courts and the user's location.
    pub fn markers(&self) -> Vec<Marker> {
        let state = self.state();
        present_markers(
            &state.visible,
            state.selected.as_deref(),
            state.user_location,
        )
    }

    /// Details panel content for the selected court.
    pub fn details(&self) -> Option<CourtDetails> {
        self.selected_court()
            .as_ref()
            .map(CourtDetails::from_court)
    }

    /// The details panel was closed.
    pub fn close_details(&self) {
        self.clear_selection();
    }
}
