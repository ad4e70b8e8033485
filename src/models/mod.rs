// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod court;
pub mod details;
pub mod filter;

pub use court::{Coordinates, Court, CourtValidationError, RawCourtRecord, TriState};
pub use details::CourtDetails;
pub use filter::{FilterParams, FilterSpec};
