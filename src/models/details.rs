// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Details panel content for a selected court.

use crate::models::court::{Court, TriState};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One labelled line of the details panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

/// What the details panel shows for a court.
///
/// Only attributes that are present end up in `fields`; nothing is ever
/// rendered as a placeholder for missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourtDetails {
    pub id: String,
    pub name: String,
    pub fields: Vec<DetailField>,
    /// Link for website contacts (`https://{contact}`)
    pub contact_url: Option<String>,
}

impl CourtDetails {
    pub fn from_court(court: &Court) -> Self {
        let mut fields = Vec::new();

        push_text(&mut fields, "City", court.city.as_deref());
        push_text(&mut fields, "Description", court.description.as_deref());

        let features = court.features();
        if features.len() > 1 {
            fields.push(DetailField {
                label: "Features".to_string(),
                value: features.join(", "),
            });
        }

        push_text(&mut fields, "Surface", court.surface.as_deref());
        push_text(&mut fields, "Type", court.court_type.as_deref());
        push_text(&mut fields, "Hours", court.hours.as_deref());
        push_text(&mut fields, "Contact", court.contact.as_deref());
        push_flag(&mut fields, "Lighted", court.lighted);
        push_flag(&mut fields, "Indoor", court.indoor);
        push_flag(&mut fields, "Reservable", court.reservable);

        Self {
            id: court.id.clone(),
            name: court.name.clone(),
            fields,
            contact_url: court.contact.as_deref().and_then(contact_url),
        }
    }

    /// Look up a field value by label.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

fn push_text(fields: &mut Vec<DetailField>, label: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        fields.push(DetailField {
            label: label.to_string(),
            value: value.to_string(),
        });
    }
}

fn push_flag(fields: &mut Vec<DetailField>, label: &str, value: TriState) {
    if let Some(known) = value.as_bool() {
        fields.push(DetailField {
            label: label.to_string(),
            value: if known { "Yes" } else { "No" }.to_string(),
        });
    }
}

/// Contacts are either a website domain or a phone number.
fn contact_url(contact: &str) -> Option<String> {
    let contact = contact.trim();
    let looks_like_phone = contact
        .chars()
        .all(|c| c.is_ascii_digit() || " +-().".contains(c));
    if contact.is_empty() || looks_like_phone {
        return None;
    }
    if contact.starts_with("http://") || contact.starts_with("https://") {
        Some(contact.to_string())
    } else {
        Some(format!("https://{}", contact))
    }
}
