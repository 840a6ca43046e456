// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-date and instant normalization.
//!
//! Every conversion between raw strings, UTC instants and listing-local
//! calendar dates goes through this module. Nothing else in the workspace
//! performs timezone arithmetic.
//!
//! ## Invariants
//!
//! - Two values name the same calendar day iff their normalized dates are equal
//! - Instants are normalized in the listing's reference timezone, never in UTC
//! - Date-only and naive wall-clock strings are taken at face value
//! - Normalization is idempotent
//! - Local-to-UTC conversion is total: DST gaps shift forward, DST folds take
//!   the earlier instant

use crate::error::DomainError;
use chrono::{
    DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Timelike,
    Utc,
};
use chrono_tz::Tz;

/// Naive wall-clock formats accepted in addition to RFC 3339.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Longest DST jump we look back across when resolving a nonexistent local time.
const GAP_LOOKBACK_HOURS: i64 = 3;

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Normalizes a raw date or instant string to a calendar date in `tz`.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 instants, and naive wall-clock
/// date-times. Instants carrying an offset are shifted into `tz` before the
/// date is taken, so `2024-06-11T22:30:00Z` is June 12 in `Asia/Kolkata`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value matches none of the
/// accepted formats.
pub fn parse_calendar_date(raw: &str, tz: Tz) -> Result<NaiveDate, DomainError> {
    let trimmed: &str = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_local_instant(trimmed, tz).map(|local| local.date())
}

/// Parses a raw instant string into wall-clock time in `tz`.
///
/// A bare date is read as local midnight.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the value matches none of the
/// accepted formats.
pub fn parse_local_instant(raw: &str, tz: Tz) -> Result<NaiveDateTime, DomainError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDate {
            raw: raw.to_string(),
            reason: String::from("value is empty"),
        });
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&tz).naive_local());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(local) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(local);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|e| DomainError::InvalidDate {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeOfDay` if the value is not a valid time.
pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, DomainError> {
    let trimmed: &str = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| DomainError::InvalidTimeOfDay(raw.to_string()))
}

/// Returns the wall-clock time in `tz` at the instant `now`.
#[must_use]
pub fn local_now(now: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    now.with_timezone(&tz).naive_local()
}

/// Returns the calendar date in `tz` at the instant `now`.
#[must_use]
pub fn today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    local_now(now, tz).date()
}

/// Converts a wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Nonexistent
/// times (DST gap) are read with the offset in force before the gap, which
/// lands them just past the transition.
#[must_use]
pub fn to_utc(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    if let Some(resolved) = tz.from_local_datetime(&local).earliest() {
        return resolved.with_timezone(&Utc);
    }

    let before_gap: NaiveDateTime = local - TimeDelta::hours(GAP_LOOKBACK_HOURS);
    tz.from_local_datetime(&before_gap).earliest().map_or_else(
        || Utc.from_utc_datetime(&local),
        |anchor| {
            let offset_seconds: i32 = anchor.offset().fix().local_minus_utc();
            Utc.from_utc_datetime(&(local - TimeDelta::seconds(i64::from(offset_seconds))))
        },
    )
}

/// Rounds a wall-clock time up to the next whole hour.
///
/// Times already on the hour are returned unchanged.
#[must_use]
pub fn ceil_to_hour(local: NaiveDateTime) -> NaiveDateTime {
    let floored: NaiveDateTime =
        local.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(local.hour()));
    if floored == local {
        local
    } else {
        floored + TimeDelta::hours(1)
    }
}

/// Adds whole calendar days to a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {days} days to {date}"),
        })
}

/// Number of calendar days from `from` to `to`.
///
/// Negative when `to` is before `from`. Time of day never enters this count.
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}
