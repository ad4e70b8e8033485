// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geolocation provider seam.

use crate::models::Coordinates;
use std::future::Future;

/// Source of the user's current position (browser, device, request).
pub trait GeolocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, GeolocationError>>;
}

/// Position supplied up front, e.g. coordinates sent with a request.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation {
    position: Option<Coordinates>,
}

impl FixedGeolocation {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A provider that never has a position (permission not granted).
    pub fn denied() -> Self {
        Self { position: None }
    }
}

impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let position = self.position.ok_or(GeolocationError::PermissionDenied)?;
        if !position.is_valid() {
            return Err(GeolocationError::Unavailable(format!(
                "Invalid coordinates: {}, {}",
                position.lat, position.lng
            )));
        }
        Ok(position)
    }
}

/// Errors from geolocation lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("Timed out waiting for location")]
    Timeout,
}
