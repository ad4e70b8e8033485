// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Great-circle distance and nearest-court lookup.

use crate::models::{Coordinates, Court};

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two lat/lng points.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just outside [0, 1] near antipodes.
    let a = a.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance in kilometers between two coordinates.
pub fn distance_between(a: Coordinates, b: Coordinates) -> f64 {
    distance_km(a.lat, a.lng, b.lat, b.lng)
}

/// Find the court closest to `origin`.
///
/// Ties go to the court that appears first. Returns `None` for an empty
/// slice.
pub fn nearest_court(origin: Coordinates, courts: &[Court]) -> Option<(&Court, f64)> {
    courts
        .iter()
        .map(|c| (c, distance_between(origin, c.coordinates())))
        .fold(None, |best, (court, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((court, d)),
        })
}
