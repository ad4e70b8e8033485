// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - court discovery logic.

pub mod court_geojson;
pub mod filter;
pub mod geo;
pub mod geolocation;
pub mod map_view;
pub mod markers;
pub mod repository;
pub mod supabase;
pub mod viewport;

pub use court_geojson::GeoJsonCourtRepository;
pub use geolocation::{FixedGeolocation, GeolocationError, GeolocationProvider};
pub use map_view::{LoadOutcome, MapView, MapViewError};
pub use markers::{Marker, MarkerState};
pub use repository::{CourtRepository, CourtSource, RepositoryError};
pub use supabase::SupabaseCourtRepository;
pub use viewport::Viewport;
