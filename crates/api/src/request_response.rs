// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw strings exactly as clients send them. Parsing into
//! domain types happens in the handlers so that every failure can name the
//! offending field.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use stayline_domain::RawAvailabilityRecord;

/// API request for the legal check-in times of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInTimesRequest {
    /// IANA timezone of the listing. Defaults to the server's.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Calendar records as fetched from the availability backend.
    #[serde(default)]
    pub records: Vec<RawAvailabilityRecord>,
    /// The selected date.
    pub date: String,
    /// RFC 3339 instant to evaluate "now" at. Defaults to the current time.
    #[serde(default)]
    pub now: Option<String>,
}

/// A single legal check-in slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSlotInfo {
    /// Time of day, `HH:MM`.
    pub time: String,
    /// Whether the slot falls on the day after the selected date.
    pub next_day: bool,
}

/// API response listing legal check-in times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInTimesResponse {
    /// The normalized selected date.
    pub date: NaiveDate,
    /// Slots in chronological order.
    pub slots: Vec<CheckInSlotInfo>,
}

/// API request to resolve a stay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Check-in date.
    pub check_in_date: String,
    /// Check-in time, `HH:MM`. Defaults to 15:00.
    #[serde(default)]
    pub check_in_time: Option<String>,
    /// Check-out date.
    pub check_out_date: String,
    /// Hourly extension: 0, 6, 12 or 18.
    #[serde(default)]
    pub extension_hours: Option<u8>,
    /// IANA timezone used for the UTC instants. Defaults to the server's.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// A resolved stay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowInfo {
    /// Local check-in instant.
    pub check_in: NaiveDateTime,
    /// Local check-out instant, extension included.
    pub check_out: NaiveDateTime,
    /// Check-in as UTC.
    pub check_in_utc: DateTime<Utc>,
    /// Check-out as UTC.
    pub check_out_utc: DateTime<Utc>,
    /// Night count.
    pub nights: u32,
    /// Calendar dates from check-in through the day check-out falls on.
    pub occupied_dates: Vec<NaiveDate>,
}

/// API request to validate a stay selection against a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// IANA timezone of the listing. Defaults to the server's.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Calendar records as fetched from the availability backend.
    #[serde(default)]
    pub records: Vec<RawAvailabilityRecord>,
    /// Check-in date.
    #[serde(default)]
    pub check_in_date: Option<String>,
    /// Check-in time, `HH:MM`. Defaults to 15:00.
    #[serde(default)]
    pub check_in_time: Option<String>,
    /// Check-out date.
    #[serde(default)]
    pub check_out_date: Option<String>,
    /// Hourly extension: 0, 6, 12 or 18.
    #[serde(default)]
    pub extension_hours: Option<u8>,
    /// Minimum nights the listing enforces.
    #[serde(default)]
    pub min_nights: Option<u32>,
    /// RFC 3339 instant to evaluate "now" at. Defaults to the current time.
    #[serde(default)]
    pub now: Option<String>,
}

/// Why a selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionInfo {
    /// Stable machine-readable code, e.g. `date-conflict`.
    pub code: String,
    /// Message ready for display.
    pub message: String,
    /// Compact detail: required nights, cutoff or conflicting dates.
    pub detail: String,
    /// `base-range` or `extension-only` for date conflicts.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scope: Option<String>,
}

/// API response for a validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    /// Whether every booking rule passed.
    pub valid: bool,
    /// The resolved window when valid.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub window: Option<WindowInfo>,
    /// The rejection when invalid.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rejection: Option<RejectionInfo>,
}
