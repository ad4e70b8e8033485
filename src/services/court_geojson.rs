// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeoJSON court loading and export.

use crate::models::court::{courts_from_records, RawCourtRecord};
use crate::models::Court;
use crate::services::repository::{CourtRepository, RepositoryError};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Court repository backed by a GeoJSON FeatureCollection of points.
#[derive(Debug, Default, Clone)]
pub struct GeoJsonCourtRepository {
    courts: Arc<Vec<Court>>,
}

impl GeoJsonCourtRepository {
    /// Load courts from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| RepositoryError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load courts from a GeoJSON string.
    ///
    /// Features without a point geometry or with invalid properties are
    /// skipped.
    pub fn load_from_json(json_data: &str) -> Result<Self, RepositoryError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| RepositoryError::Decode(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(RepositoryError::Decode(
                "Expected a FeatureCollection".to_string(),
            ));
        };

        let records: Vec<RawCourtRecord> = collection
            .features
            .into_iter()
            .filter_map(Self::feature_to_record)
            .collect();

        let courts = courts_from_records(records);
        tracing::info!(count = courts.len(), "Loaded courts from GeoJSON");
        Ok(Self {
            courts: Arc::new(courts),
        })
    }

    /// Wrap an existing list of courts.
    pub fn from_courts(courts: Vec<Court>) -> Self {
        Self {
            courts: Arc::new(courts),
        }
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    /// Turn a feature into a raw record, taking lat/lng from the geometry.
    fn feature_to_record(feature: Feature) -> Option<RawCourtRecord> {
        let Some(geojson::Value::Point(position)) = feature.geometry.map(|g| g.value) else {
            tracing::warn!(id = ?feature.id, "Skipping court feature without point geometry");
            return None;
        };

        let mut properties = feature.properties.unwrap_or_default();
        if !properties.contains_key("id") {
            if let Some(id) = feature.id {
                let id = match id {
                    geojson::feature::Id::String(s) => Value::String(s),
                    geojson::feature::Id::Number(n) => Value::Number(n),
                };
                properties.insert("id".to_string(), id);
            }
        }

        let mut record: RawCourtRecord = match serde_json::from_value(Value::Object(properties)) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping court feature with invalid properties");
                return None;
            }
        };

        // GeoJSON positions are [lng, lat].
        record.lng = position.first().copied().map(Value::from);
        record.lat = position.get(1).copied().map(Value::from);
        Some(record)
    }
}

impl CourtRepository for GeoJsonCourtRepository {
    async fn list_courts(&self) -> Result<Vec<Court>, RepositoryError> {
        Ok(self.courts.as_ref().clone())
    }
}

/// Export courts as a FeatureCollection of points for map clients.
pub fn courts_to_geojson(courts: &[Court]) -> FeatureCollection {
    let features = courts
        .iter()
        .map(|court| {
            let mut properties = match serde_json::to_value(court) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            };
            properties.remove("lat");
            properties.remove("lng");

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::Point(vec![
                    court.lng, court.lat,
                ]))),
                id: Some(geojson::feature::Id::String(court.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TriState;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "lincoln",
                "geometry": { "type": "Point", "coordinates": [-74.0785, 40.7247] },
                "properties": { "name": "Lincoln Park", "surface": "hard", "lighted": true }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-74.0431, 40.7178] },
                "properties": { "id": 7, "name": "Hamilton Park", "lighted": null }
            },
            {
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                "properties": { "id": "line", "name": "Not a court" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-74.05, 40.73] },
                "properties": { "id": "nameless" }
            }
        ]
    }"#;

    #[test]
    fn test_load_skips_bad_features() {
        let repo = GeoJsonCourtRepository::load_from_json(SAMPLE).unwrap();
        let courts = repo.courts();

        assert_eq!(courts.len(), 2);
        assert_eq!(courts[0].id, "lincoln");
        assert_eq!(courts[0].lat, 40.7247);
        assert_eq!(courts[0].lng, -74.0785);
        assert_eq!(courts[0].lighted, TriState::Yes);
        assert_eq!(courts[1].id, "7");
        assert_eq!(courts[1].lighted, TriState::Unknown);
    }

    #[test]
    fn test_rejects_non_collection() {
        let result = GeoJsonCourtRepository::load_from_json(
            r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#,
        );
        assert!(matches!(result, Err(RepositoryError::Decode(_))));
        assert!(GeoJsonCourtRepository::load_from_json("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GeoJsonCourtRepository::load_from_file("does/not/exist.geojson");
        assert!(matches!(result, Err(RepositoryError::Io(_))));
    }

    #[test]
    fn test_export_reloads_to_same_courts() {
        let repo = GeoJsonCourtRepository::load_from_json(SAMPLE).unwrap();
        let exported =
            serde_json::to_string(&GeoJson::FeatureCollection(courts_to_geojson(repo.courts())))
                .unwrap();
        let reloaded = GeoJsonCourtRepository::load_from_json(&exported).unwrap();
        assert_eq!(reloaded.courts(), repo.courts());
    }

    #[tokio::test]
    async fn test_list_courts_returns_snapshot() {
        let repo = GeoJsonCourtRepository::from_courts(vec![Court::new("a", "A", 1.0, 2.0)]);
        let courts = repo.list_courts().await.unwrap();
        assert_eq!(courts.len(), 1);
    }
}
