// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase (PostgREST) court repository.

use crate::models::court::{courts_from_records, RawCourtRecord};
use crate::models::Court;
use crate::services::repository::{CourtRepository, RepositoryError};
use serde::Deserialize;

/// Table holding court rows.
pub const COURTS_TABLE: &str = "courts";

/// Reads courts through the Supabase REST endpoint.
#[derive(Clone)]
pub struct SupabaseCourtRepository {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseCourtRepository {
    /// Create a repository for a project URL (e.g. `https://xyz.supabase.co`).
    pub fn new(base_url: &str, anon_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, COURTS_TABLE)
    }
}

/// PostgREST error body.
#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

impl CourtRepository for SupabaseCourtRepository {
    async fn list_courts(&self) -> Result<Vec<Court>, RepositoryError> {
        let response = self
            .http
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "name")])
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PostgrestError>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(body);
            tracing::warn!(status = status.as_u16(), error = %message, "Supabase court query failed");
            return Err(RepositoryError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<RawCourtRecord> = response
            .json()
            .await
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        let courts = courts_from_records(records);
        tracing::debug!(count = courts.len(), "Fetched courts from Supabase");
        Ok(courts)
    }
}
