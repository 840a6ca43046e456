// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar index construction from remote availability records.
//!
//! The index is rebuilt from scratch on every availability fetch and is
//! read-only afterwards.
//!
//! ## Invariants
//!
//! - At most one `CalendarDay` per calendar date
//! - Dates are normalized in the listing's reference timezone before indexing
//! - A date with no record is available
//! - Malformed records are skipped (and logged), never fatal

use crate::calendar_date::{parse_calendar_date, parse_local_instant, parse_time_of_day};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Availability status of a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    /// Open for booking.
    #[default]
    Available,
    /// Reserved by another guest.
    Booked,
    /// Blocked by the host.
    Blocked,
    /// Under maintenance.
    Maintenance,
    /// Unavailable for any other reason.
    Unavailable,
}

impl AvailabilityStatus {
    /// Parses a backend status string, case-insensitively.
    ///
    /// Returns `None` for unknown values.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "booked" => Some(Self::Booked),
            "blocked" => Some(Self::Blocked),
            "maintenance" => Some(Self::Maintenance),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }

    /// Whether this status prevents a stay from covering the date.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        !matches!(self, Self::Available)
    }

    /// Ordering used when two records describe the same date.
    const fn severity(self) -> u8 {
        match self {
            Self::Available => 0,
            Self::Maintenance => 1,
            Self::Unavailable => 2,
            Self::Blocked => 3,
            Self::Booked => 4,
        }
    }
}

/// An hour range as sent by the backend (`"HH:MM"` strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHourRange {
    /// Range start.
    pub start: String,
    /// Range end (exclusive).
    pub end: String,
}

/// Maintenance details as sent by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawMaintenance {
    /// Instant after which the listing can be occupied again.
    #[serde(default)]
    pub available_after: Option<String>,
    /// Hours during which check-in is possible on the maintenance day.
    #[serde(default)]
    pub available_hours: Option<Vec<RawHourRange>>,
}

/// A per-date availability record exactly as returned by the availability service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAvailabilityRecord {
    /// Date or instant in any supported representation.
    pub date: String,
    /// Status string (`available`, `booked`, `blocked`, `maintenance`, `unavailable`).
    pub status: String,
    /// Optional maintenance details.
    #[serde(default)]
    pub maintenance: Option<RawMaintenance>,
    /// Optional explicit check-in hours for the date.
    #[serde(default)]
    pub available_hours: Option<Vec<RawHourRange>>,
}

impl RawAvailabilityRecord {
    /// Creates a record with only a date and status.
    #[must_use]
    pub fn new(date: &str, status: &str) -> Self {
        Self {
            date: date.to_string(),
            status: status.to_string(),
            maintenance: None,
            available_hours: None,
        }
    }
}

/// A parsed hour range. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    /// Range start.
    pub start: NaiveTime,
    /// Range end (exclusive). A value not after `start` wraps past midnight.
    pub end: NaiveTime,
}

impl HourRange {
    /// Creates a new hour range.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the range crosses midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }
}

/// Maintenance restriction for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceWindow {
    /// Wall-clock instant (listing timezone) after which the date is usable.
    pub available_after: NaiveDateTime,
    /// Optional explicit check-in hours.
    pub available_hours: Option<Vec<HourRange>>,
}

/// Normalized availability of a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Availability status.
    pub status: AvailabilityStatus,
    /// Maintenance cutoff, if any.
    pub maintenance_available_after: Option<NaiveDateTime>,
    /// Explicit check-in hours, if any.
    pub available_hours: Option<Vec<HourRange>>,
}

/// Read-only lookup of availability by calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarIndex {
    timezone: Tz,
    days: HashMap<NaiveDate, CalendarDay>,
    booked_dates: HashSet<NaiveDate>,
    maintenance_by_date: HashMap<NaiveDate, MaintenanceWindow>,
}

impl CalendarIndex {
    /// Creates an index with no records: every date is available.
    #[must_use]
    pub fn empty(timezone: Tz) -> Self {
        Self {
            timezone,
            days: HashMap::new(),
            booked_dates: HashSet::new(),
            maintenance_by_date: HashMap::new(),
        }
    }

    /// Builds the index from raw availability records.
    ///
    /// # Arguments
    ///
    /// * `records` - Records as returned by the availability service
    /// * `timezone` - The listing's reference timezone
    ///
    /// Records with malformed dates or unknown statuses never fail the build:
    /// a malformed date skips the record (the date stays available), an
    /// unknown status is read as available. Both are logged.
    #[must_use]
    pub fn build<'a, I>(records: I, timezone: Tz) -> Self
    where
        I: IntoIterator<Item = &'a RawAvailabilityRecord>,
    {
        let mut index: Self = Self::empty(timezone);
        for record in records {
            index.ingest(record);
        }
        index
    }

    fn ingest(&mut self, record: &RawAvailabilityRecord) {
        let date: NaiveDate = match parse_calendar_date(&record.date, self.timezone) {
            Ok(date) => date,
            Err(err) => {
                warn!(error = %err, status = %record.status, "Skipping availability record with malformed date");
                return;
            }
        };

        let status: AvailabilityStatus =
            AvailabilityStatus::parse(&record.status).unwrap_or_else(|| {
                warn!(%date, status = %record.status, "Unknown availability status, treating as available");
                AvailabilityStatus::Available
            });

        let maintenance: Option<MaintenanceWindow> = record
            .maintenance
            .as_ref()
            .and_then(|raw| self.parse_maintenance(date, raw));
        let available_hours: Option<Vec<HourRange>> = record
            .available_hours
            .as_deref()
            .and_then(|ranges| parse_hour_ranges(date, ranges));

        let day: &mut CalendarDay = self.days.entry(date).or_insert_with(|| CalendarDay {
            date,
            status,
            maintenance_available_after: None,
            available_hours: None,
        });

        if status.severity() > day.status.severity() {
            day.status = status;
        }
        if let Some(window) = &maintenance {
            day.maintenance_available_after = Some(window.available_after);
        }
        if available_hours.is_some() {
            day.available_hours = available_hours;
        }
        if day.status.is_blocking() {
            self.booked_dates.insert(date);
        }
        if let Some(window) = maintenance {
            self.maintenance_by_date.insert(date, window);
        }
    }

    fn parse_maintenance(&self, date: NaiveDate, raw: &RawMaintenance) -> Option<MaintenanceWindow> {
        let available_after: &str = raw.available_after.as_deref()?;
        match parse_local_instant(available_after, self.timezone) {
            Ok(available_after) => Some(MaintenanceWindow {
                available_after,
                available_hours: raw
                    .available_hours
                    .as_deref()
                    .and_then(|ranges| parse_hour_ranges(date, ranges)),
            }),
            Err(err) => {
                warn!(%date, error = %err, "Ignoring malformed maintenance cutoff");
                None
            }
        }
    }

    /// The listing's reference timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Number of indexed dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no dates are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Looks up the record for a date.
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.get(&date)
    }

    /// Status of a date; dates without a record are available.
    #[must_use]
    pub fn status(&self, date: NaiveDate) -> AvailabilityStatus {
        self.days
            .get(&date)
            .map_or(AvailabilityStatus::Available, |day| day.status)
    }

    /// Whether the date is in the booked set.
    #[must_use]
    pub fn is_booked(&self, date: NaiveDate) -> bool {
        self.booked_dates.contains(&date)
    }

    /// Booked dates in `from..=to`, ascending.
    #[must_use]
    pub fn booked_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .booked_dates
            .iter()
            .copied()
            .filter(|date| (from..=to).contains(date))
            .collect();
        dates.sort_unstable();
        dates
    }

    /// Maintenance restriction for a date, if any.
    #[must_use]
    pub fn maintenance(&self, date: NaiveDate) -> Option<&MaintenanceWindow> {
        self.maintenance_by_date.get(&date)
    }

    /// Explicit check-in hours for a date.
    ///
    /// Hours attached to a maintenance entry take precedence over the day's own.
    #[must_use]
    pub fn available_hours(&self, date: NaiveDate) -> Option<&[HourRange]> {
        self.maintenance_by_date
            .get(&date)
            .and_then(|window| window.available_hours.as_deref())
            .or_else(|| {
                self.days
                    .get(&date)
                    .and_then(|day| day.available_hours.as_deref())
            })
    }
}

fn parse_hour_ranges(date: NaiveDate, ranges: &[RawHourRange]) -> Option<Vec<HourRange>> {
    let parsed: Vec<HourRange> = ranges
        .iter()
        .filter_map(|range| {
            match (parse_time_of_day(&range.start), parse_time_of_day(&range.end)) {
                (Ok(start), Ok(end)) => Some(HourRange::new(start, end)),
                (Err(err), _) | (_, Err(err)) => {
                    warn!(%date, error = %err, "Ignoring malformed available-hours range");
                    None
                }
            }
        })
        .collect();
    if parsed.is_empty() { None } else { Some(parsed) }
}
