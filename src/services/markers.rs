// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker presentation for the map surface.

use crate::models::{Coordinates, Court};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Title of the synthetic marker placed at the user's position.
pub const USER_LOCATION_TITLE: &str = "Your Location";

/// Visual state of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MarkerState {
    Default,
    Selected,
    UserLocation,
}

/// A marker to draw on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    /// Court id; `None` for the user-location marker
    pub court_id: Option<String>,
    pub position: Coordinates,
    pub state: MarkerState,
    pub title: String,
    /// Short tooltip lines (surface, type) for court markers
    pub tooltip: Vec<String>,
}

impl Marker {
    /// Clicking a court marker selects it; the user marker is inert.
    pub fn is_selectable(&self) -> bool {
        self.state != MarkerState::UserLocation && self.court_id.is_some()
    }
}

/// Presentation state of a court marker given the current selection.
pub fn presentation_state(court: &Court, selection: Option<&str>) -> MarkerState {
    if selection == Some(court.id.as_str()) {
        MarkerState::Selected
    } else {
        MarkerState::Default
    }
}

/// Build markers for the visible courts plus the user's location.
pub fn present_markers(
    visible: &[Court],
    selection: Option<&str>,
    user_location: Option<Coordinates>,
) -> Vec<Marker> {
    let mut markers: Vec<Marker> = visible
        .iter()
        .map(|court| Marker {
            court_id: Some(court.id.clone()),
            position: court.coordinates(),
            state: presentation_state(court, selection),
            title: court.name.clone(),
            tooltip: tooltip_lines(court),
        })
        .collect();

    if let Some(position) = user_location {
        markers.push(Marker {
            court_id: None,
            position,
            state: MarkerState::UserLocation,
            title: USER_LOCATION_TITLE.to_string(),
            tooltip: Vec::new(),
        });
    }

    markers
}

fn tooltip_lines(court: &Court) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(surface) = &court.surface {
        lines.push(format!("Surface: {}", surface));
    }
    if let Some(court_type) = &court.court_type {
        lines.push(format!("Type: {}", court_type));
    }
    lines
}
