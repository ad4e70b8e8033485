// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court filter engine.

use crate::models::{Court, FilterSpec, TriState};
use std::collections::BTreeSet;

/// Return the courts matching every constraint in `spec`, in input order.
pub fn filter(courts: &[Court], spec: &FilterSpec) -> Vec<Court> {
    if spec.is_empty() {
        return courts.to_vec();
    }

    let query = spec.query.trim().to_lowercase();
    courts
        .iter()
        .filter(|c| matches_normalized(c, spec, &query))
        .cloned()
        .collect()
}

/// Check a single court against `spec`.
pub fn matches(court: &Court, spec: &FilterSpec) -> bool {
    matches_normalized(court, spec, &spec.query.trim().to_lowercase())
}

fn matches_normalized(court: &Court, spec: &FilterSpec, query: &str) -> bool {
    matches_query(court, query)
        && matches_set(court.surface.as_deref(), &spec.surface)
        && matches_set(court.court_type.as_deref(), &spec.court_type)
        && matches_flag(court.lighted, spec.lighted)
        && matches_flag(court.indoor, spec.indoor)
        && matches_flag(court.reservable, spec.reservable)
}

fn matches_query(court: &Court, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    court.name.to_lowercase().contains(query)
        || court
            .description
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(query)
}

fn matches_set(value: Option<&str>, accepted: &BTreeSet<String>) -> bool {
    if accepted.is_empty() {
        return true;
    }
    value.is_some_and(|v| accepted.contains(&v.trim().to_lowercase()))
}

fn matches_flag(value: TriState, expected: Option<bool>) -> bool {
    expected.map_or(true, |e| value.satisfies(e))
}
