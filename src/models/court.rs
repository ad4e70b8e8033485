// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Court model, tri-state attributes and record validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Separator used between feature tags in a court description
/// (e.g. "10 courts • Spacious").
pub const FEATURE_SEPARATOR: char = '•';

/// A boolean attribute that may also be unknown.
///
/// `Unknown` is distinct from `No`: a court whose lighting was never
/// recorded is not the same as a court known to be unlit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

impl TriState {
    /// The known value, if any.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::Unknown => None,
            TriState::Yes => Some(true),
            TriState::No => Some(false),
        }
    }

    pub fn is_known(self) -> bool {
        self != TriState::Unknown
    }

    /// True only when the value is known and equal to `expected`.
    pub fn satisfies(self, expected: bool) -> bool {
        self.as_bool() == Some(expected)
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => TriState::Unknown,
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        value.as_bool()
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        Some(value).into()
    }
}

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that latitude and longitude are finite and within range.
    pub fn is_valid(&self) -> bool {
        is_valid_location(self.lat, self.lng)
    }
}

impl From<Coordinates> for geo::Point<f64> {
    fn from(c: Coordinates) -> Self {
        geo::Point::new(c.lng, c.lat)
    }
}

/// Check a latitude/longitude pair against the WGS84 ranges.
pub fn is_valid_location(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}

/// A tennis court location.
///
/// Courts are only ever built through validation (see
/// [`Court::try_from`] on [`RawCourtRecord`]), so name and coordinates
/// are always usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Court {
    /// Backend-assigned identifier
    pub id: String,
    /// Display name (e.g. "Pershing Field Tennis Courts")
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Reverse-geocoded city, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Free text, often a `•`-separated list of features
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Surface kind ("hard", "clay", "grass", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Court type ("public", "private", "school", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub court_type: Option<String>,
    /// Opening hours as entered by the operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
    /// Website domain or phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | null"))]
    pub lighted: TriState,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | null"))]
    pub indoor: TriState,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "boolean | null"))]
    pub reservable: TriState,
}

impl Court {
    /// Create a court with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
            city: None,
            description: None,
            surface: None,
            court_type: None,
            hours: None,
            contact: None,
            lighted: TriState::Unknown,
            indoor: TriState::Unknown,
            reservable: TriState::Unknown,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Feature tags parsed from the description.
    pub fn features(&self) -> Vec<String> {
        self.description
            .as_deref()
            .map(parse_features)
            .unwrap_or_default()
    }
}

/// Split a description into its `•`-separated feature tags.
pub fn parse_features(description: &str) -> Vec<String> {
    description
        .split(FEATURE_SEPARATOR)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize a description's feature separators (`"a•b"` -> `"a • b"`).
pub fn format_description(description: &str) -> String {
    parse_features(description).join(" • ")
}

/// Court row as returned by the backend, before validation.
///
/// Every field is optional and loosely typed: ids may be numbers,
/// coordinates may arrive as strings from spreadsheet imports.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCourtRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lng: Option<Value>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(rename = "type", default)]
    pub court_type: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub lighted: Option<Value>,
    #[serde(default)]
    pub indoor: Option<Value>,
    #[serde(default)]
    pub reservable: Option<Value>,
}

/// A backend row that could not be turned into a [`Court`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid court record {}: {}", .id.as_deref().unwrap_or("<no id>"), .problems.join("; "))]
pub struct CourtValidationError {
    pub id: Option<String>,
    pub problems: Vec<String>,
}

impl TryFrom<RawCourtRecord> for Court {
    type Error = CourtValidationError;

    fn try_from(raw: RawCourtRecord) -> Result<Self, Self::Error> {
        let mut problems = Vec::new();

        let id = raw.id.as_ref().and_then(coerce_id);
        if id.is_none() {
            problems.push("Court id is required".to_string());
        }

        let name = non_empty(raw.name);
        if name.is_none() {
            problems.push("Court name is required".to_string());
        }

        let lat = raw.lat.as_ref().and_then(coerce_f64);
        match lat {
            None => problems.push("Valid latitude is required".to_string()),
            Some(v) if !(-90.0..=90.0).contains(&v) => {
                problems.push("Latitude must be between -90 and 90".to_string())
            }
            _ => {}
        }

        let lng = raw.lng.as_ref().and_then(coerce_f64);
        match lng {
            None => problems.push("Valid longitude is required".to_string()),
            Some(v) if !(-180.0..=180.0).contains(&v) => {
                problems.push("Longitude must be between -180 and 180".to_string())
            }
            _ => {}
        }

        match (id, name, lat, lng) {
            (Some(id), Some(name), Some(lat), Some(lng)) if problems.is_empty() => Ok(Court {
                id,
                name,
                lat,
                lng,
                city: non_empty(raw.city),
                description: non_empty(raw.description),
                surface: non_empty(raw.surface),
                court_type: non_empty(raw.court_type),
                hours: non_empty(raw.hours),
                contact: non_empty(raw.contact),
                lighted: coerce_tri_state(raw.lighted.as_ref()),
                indoor: coerce_tri_state(raw.indoor.as_ref()),
                reservable: coerce_tri_state(raw.reservable.as_ref()),
            }),
            (id, ..) => Err(CourtValidationError { id, problems }),
        }
    }
}

/// Convert raw rows into courts, skipping (and logging) malformed ones.
pub fn courts_from_records(records: Vec<RawCourtRecord>) -> Vec<Court> {
    let total = records.len();
    let courts: Vec<Court> = records
        .into_iter()
        .filter_map(|raw| match Court::try_from(raw) {
            Ok(court) => Some(court),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed court record");
                None
            }
        })
        .collect();

    if courts.len() < total {
        tracing::warn!(
            total,
            skipped = total - courts.len(),
            "Some court records were skipped"
        );
    }
    courts
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    v.is_finite().then_some(v)
}

fn coerce_tri_state(value: Option<&Value>) -> TriState {
    match value {
        Some(Value::Bool(b)) => (*b).into(),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => TriState::Yes,
            "false" => TriState::No,
            _ => TriState::Unknown,
        },
        _ => TriState::Unknown,
    }
}
