// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! NextServe courts API server
//!
//! Serves tennis court locations, filters, and map viewports to the
//! NextServe map client.

use nextserve_courts::{
    config::Config,
    services::{
        CourtSource, GeoJsonCourtRepository, LoadOutcome, MapView, SupabaseCourtRepository,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting NextServe courts API");

    let source = match &config.courts_geojson {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading courts from GeoJSON");
            CourtSource::GeoJson(GeoJsonCourtRepository::load_from_file(path)?)
        }
        None => {
            tracing::info!(url = %config.supabase_url, "Using Supabase court repository");
            CourtSource::Supabase(SupabaseCourtRepository::new(
                &config.supabase_url,
                config.supabase_anon_key.clone(),
            ))
        }
    };

    let map = MapView::new(source, config.map.clone());

    // A failed first load is not fatal: the error is reported to clients
    // and a later refresh can recover.
    match map.load().await {
        LoadOutcome::Applied { count } => tracing::info!(count, "Courts loaded"),
        LoadOutcome::Superseded => {}
        LoadOutcome::Failed { error } => {
            tracing::warn!(error = %error, "Initial court load failed")
        }
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        map,
    });

    // Build router
    let app = nextserve_courts::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nextserve_courts=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
