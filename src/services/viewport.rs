// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map viewport fitting.
//!
//! Zoom levels follow the slippy-map convention: at zoom `z` the whole
//! Web Mercator world is `256 * 2^z` pixels wide.

use crate::config::MapConfig;
use crate::models::{Coordinates, Court};
use geo::{BoundingRect, MultiPoint, Point};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const TILE_SIZE: f64 = 256.0;

/// Web Mercator is undefined at the poles; latitudes are clamped here.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Southwest/northeast corners of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    pub fn contains(&self, c: Coordinates) -> bool {
        c.lat >= self.south_west.lat
            && c.lat <= self.north_east.lat
            && c.lng >= self.south_west.lng
            && c.lng <= self.north_east.lng
    }
}

/// Viewport directive for the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Viewport {
    /// Show a fixed center at a fixed zoom.
    Center { center: Coordinates, zoom: u8 },
    /// Fit the given bounds; `center`/`zoom` are the computed result.
    Fit {
        bounds: Bounds,
        center: Coordinates,
        zoom: u8,
    },
}

impl Viewport {
    /// The configured default view.
    pub fn default_for(config: &MapConfig) -> Self {
        Viewport::Center {
            center: config.default_center,
            zoom: config.default_zoom,
        }
    }

    pub fn center(&self) -> Coordinates {
        match self {
            Viewport::Center { center, .. } | Viewport::Fit { center, .. } => *center,
        }
    }

    pub fn zoom(&self) -> u8 {
        match self {
            Viewport::Center { zoom, .. } | Viewport::Fit { zoom, .. } => *zoom,
        }
    }
}

/// Compute the viewport showing every court.
///
/// Empty input resets to the configured default; otherwise the zoom is
/// the closest one that keeps all markers inside the padded viewport,
/// never above `config.max_zoom`.
pub fn fit_viewport(courts: &[Court], config: &MapConfig) -> Viewport {
    let points: MultiPoint<f64> = courts
        .iter()
        .map(|c| Point::new(c.lng, c.lat))
        .collect::<Vec<_>>()
        .into();

    let Some(rect) = points.bounding_rect() else {
        return Viewport::default_for(config);
    };

    let bounds = Bounds {
        south_west: Coordinates::new(rect.min().y, rect.min().x),
        north_east: Coordinates::new(rect.max().y, rect.max().x),
    };

    let (west, east) = (lng_to_x(rect.min().x), lng_to_x(rect.max().x));
    let (north, south) = (lat_to_y(rect.max().y), lat_to_y(rect.min().y));

    let center = Coordinates::new(y_to_lat((north + south) / 2.0), x_to_lng((west + east) / 2.0));
    let zoom = fit_zoom(east - west, south - north, config);

    Viewport::Fit {
        bounds,
        center,
        zoom,
    }
}

/// Largest integer zoom at which a span (in zoom-0 pixels) fits.
fn fit_zoom(span_x: f64, span_y: f64, config: &MapConfig) -> u8 {
    let avail_x = (config.viewport_width_px - 2.0 * config.fit_padding_px).max(1.0);
    let avail_y = (config.viewport_height_px - 2.0 * config.fit_padding_px).max(1.0);

    let scale_x = if span_x > 0.0 { avail_x / span_x } else { f64::INFINITY };
    let scale_y = if span_y > 0.0 { avail_y / span_y } else { f64::INFINITY };
    let scale = scale_x.min(scale_y);

    if !scale.is_finite() {
        return config.max_zoom;
    }

    let zoom = scale.log2().floor().clamp(0.0, f64::from(config.max_zoom));
    zoom as u8
}

/// Longitude to zoom-0 pixel x.
pub fn lng_to_x(lng: f64) -> f64 {
    (lng + 180.0) / 360.0 * TILE_SIZE
}

/// Latitude to zoom-0 pixel y (north is smaller).
pub fn lat_to_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * TILE_SIZE
}

pub fn x_to_lng(x: f64) -> f64 {
    x / TILE_SIZE * 360.0 - 180.0
}

pub fn y_to_lat(y: f64) -> f64 {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / TILE_SIZE;
    n.sinh().atan().to_degrees()
}
