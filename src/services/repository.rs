// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court repository seam.
//!
//! The map only ever reads the full court list; writes belong to the
//! admin tooling that owns the backend tables.

use crate::models::Court;
use crate::services::court_geojson::GeoJsonCourtRepository;
use crate::services::supabase::SupabaseCourtRepository;
use std::future::Future;

/// Read-only source of court records.
pub trait CourtRepository {
    /// Fetch every court. Malformed rows are dropped, not reported.
    fn list_courts(&self) -> impl Future<Output = Result<Vec<Court>, RepositoryError>> + Send;
}

/// Errors from fetching courts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Failed to decode courts: {0}")]
    Decode(String),

    #[error("Failed to read courts: {0}")]
    Io(String),
}

/// The court sources the server can be configured with.
#[derive(Clone)]
pub enum CourtSource {
    Supabase(SupabaseCourtRepository),
    GeoJson(GeoJsonCourtRepository),
}

impl CourtRepository for CourtSource {
    async fn list_courts(&self) -> Result<Vec<Court>, RepositoryError> {
        match self {
            CourtSource::Supabase(repo) => repo.list_courts().await,
            CourtSource::GeoJson(repo) => repo.list_courts().await,
        }
    }
}
