// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court filter specification.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The active set of court filters.
///
/// Empty sets and `None` booleans impose no constraint. A present boolean
/// constraint is only satisfied by a court whose attribute is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against name and description
    #[serde(default)]
    pub query: String,
    /// Accepted surfaces, lowercase
    #[serde(default)]
    pub surface: BTreeSet<String>,
    /// Accepted court types, lowercase
    #[serde(rename = "type", default)]
    pub court_type: BTreeSet<String>,
    #[serde(default)]
    pub lighted: Option<bool>,
    #[serde(default)]
    pub indoor: Option<bool>,
    #[serde(default)]
    pub reservable: Option<bool>,
}

impl FilterSpec {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.surface.is_empty()
            && self.court_type.is_empty()
            && self.lighted.is_none()
            && self.indoor.is_none()
            && self.reservable.is_none()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_surfaces<I, S>(mut self, surfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.surface = normalize_set(surfaces);
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.court_type = normalize_set(types);
        self
    }

    pub fn with_lighted(mut self, lighted: bool) -> Self {
        self.lighted = Some(lighted);
        self
    }

    pub fn with_indoor(mut self, indoor: bool) -> Self {
        self.indoor = Some(indoor);
        self
    }

    pub fn with_reservable(mut self, reservable: bool) -> Self {
        self.reservable = Some(reservable);
        self
    }

    /// Build a spec from untyped request parameters.
    ///
    /// Never fails: unrecognized boolean values become absent constraints.
    pub fn from_params(params: &FilterParams) -> Self {
        Self {
            query: params.query.clone().unwrap_or_default().trim().to_string(),
            surface: params
                .surface
                .as_deref()
                .map(|s| normalize_set(s.split(',')))
                .unwrap_or_default(),
            court_type: params
                .court_type
                .as_deref()
                .map(|s| normalize_set(s.split(',')))
                .unwrap_or_default(),
            lighted: params.lighted.as_deref().and_then(parse_bool),
            indoor: params.indoor.as_deref().and_then(parse_bool),
            reservable: params.reservable.as_deref().and_then(parse_bool),
        }
    }
}

/// Filter parameters as they arrive in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub query: Option<String>,
    /// Comma-separated surfaces
    pub surface: Option<String>,
    /// Comma-separated court types
    #[serde(rename = "type")]
    pub court_type: Option<String>,
    pub lighted: Option<String>,
    pub indoor: Option<String>,
    pub reservable: Option<String>,
}

fn normalize_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
