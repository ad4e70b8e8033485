// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! NextServe courts: find tennis courts on a map
//!
//! This crate provides the court discovery core (filtering, distance,
//! viewport fitting, marker and details presentation) and a small JSON
//! API that serves it to the map client.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{CourtSource, MapView};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub map: MapView<CourtSource>,
}
