//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup. Map tuning values fall back to their
//! defaults when unset or unparseable.

use crate::models::Coordinates;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Jersey City, the default map center.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 40.7178,
    lng: -74.0431,
};
pub const DEFAULT_ZOOM: u8 = 15;

/// Map display and interaction settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Center used when there is nothing to fit
    pub default_center: Coordinates,
    /// Zoom used when there is nothing to fit
    pub default_zoom: u8,
    /// Bounds-fit never zooms in closer than this
    pub max_zoom: u8,
    /// Padding kept around fitted markers, in pixels
    pub fit_padding_px: f64,
    pub viewport_width_px: f64,
    pub viewport_height_px: f64,
    /// Upper bound on waiting for a geolocation response
    pub locate_timeout: Duration,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            max_zoom: DEFAULT_ZOOM,
            fit_padding_px: 50.0,
            viewport_width_px: 800.0,
            viewport_height_px: 600.0,
            locate_timeout: Duration::from_secs(10),
        }
    }
}

impl MapConfig {
    /// Read map settings from the environment, defaulting each one.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let default_zoom = env_or("MAP_DEFAULT_ZOOM", defaults.default_zoom);

        let lat = env_or("MAP_DEFAULT_LAT", defaults.default_center.lat);
        let lng = env_or("MAP_DEFAULT_LNG", defaults.default_center.lng);
        let default_center = if Coordinates::new(lat, lng).is_valid() {
            Coordinates::new(lat, lng)
        } else {
            tracing::warn!(lat, lng, "Ignoring invalid default map center");
            defaults.default_center
        };

        Self {
            default_center,
            default_zoom,
            max_zoom: default_zoom,
            fit_padding_px: env_or("MAP_FIT_PADDING_PX", defaults.fit_padding_px),
            viewport_width_px: env_or("MAP_VIEWPORT_WIDTH_PX", defaults.viewport_width_px),
            viewport_height_px: env_or("MAP_VIEWPORT_HEIGHT_PX", defaults.viewport_height_px),
            locate_timeout: Duration::from_secs(env_or(
                "LOCATE_TIMEOUT_SECS",
                defaults.locate_timeout.as_secs(),
            )),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL (e.g. https://xyz.supabase.co)
    pub supabase_url: String,
    /// Supabase anon (public) API key
    pub supabase_anon_key: String,
    /// Serve courts from this GeoJSON file instead of Supabase
    pub courts_geojson: Option<PathBuf>,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    pub map: MapConfig,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test_anon_key".to_string(),
            courts_geojson: None,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            map: MapConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let courts_geojson = env::var("COURTS_GEOJSON")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        // Supabase credentials are only needed when not serving from a file.
        let (supabase_url, supabase_anon_key) = match &courts_geojson {
            Some(_) => (
                env::var("SUPABASE_URL").unwrap_or_default(),
                env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            ),
            None => (
                env::var("SUPABASE_URL").map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
                env::var("SUPABASE_ANON_KEY")
                    .map(|v| v.trim().to_string())
                    .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            ),
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            courts_geojson,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env_or("PORT", 8080),
            map: MapConfig::from_env(),
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("SUPABASE_URL", "https://example.supabase.co");
        env::set_var("SUPABASE_ANON_KEY", " anon ");
        env::set_var("MAP_DEFAULT_ZOOM", "13");
        env::set_var("MAP_FIT_PADDING_PX", "not-a-number");
        env::set_var("MAP_DEFAULT_LAT", "123.0");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.supabase_url, "https://example.supabase.co");
        assert_eq!(config.supabase_anon_key, "anon");
        assert_eq!(config.port, 8080);
        assert_eq!(config.map.default_zoom, 13);
        assert_eq!(config.map.max_zoom, 13);
        assert_eq!(config.map.fit_padding_px, 50.0);
        assert_eq!(config.map.default_center, DEFAULT_CENTER);
    }

    #[test]
    fn test_map_config_defaults() {
        let map = MapConfig::default();
        assert_eq!(map.default_center, DEFAULT_CENTER);
        assert_eq!(map.max_zoom, map.default_zoom);
        assert_eq!(map.locate_timeout, Duration::from_secs(10));
    }
}
