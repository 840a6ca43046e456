// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay-window resolution.
//!
//! Every stay lasts 23 hours per night plus the hourly extension, anchored to
//! the check-out calendar date rather than to elapsed nights × 24h.
//!
//! ## Example
//!
//! ```text
//! check-in  = 2024-06-10 16:00
//! check-out = 2024-06-12 (date)
//! extension = 6h
//!
//! raw check-out      = 2024-06-12 15:00   (check-in time − 1h)
//! extended check-out = 2024-06-12 21:00
//! nights             = 2
//! ```

use crate::calendar_date::{days_between, to_utc};
use crate::types::ExtensionHours;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Resolved check-in/check-out instants for a booking attempt.
///
/// Instants are wall-clock times in the listing's reference timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWindow {
    /// Check-in instant.
    pub check_in: NaiveDateTime,
    /// Check-out instant, extension included.
    pub check_out: NaiveDateTime,
    /// Night count from the calendar-day difference.
    pub nights: u32,
}

impl ResolvedWindow {
    /// Converts both instants to UTC for remote calls.
    #[must_use]
    pub fn to_utc(&self, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        (to_utc(self.check_in, tz), to_utc(self.check_out, tz))
    }

    /// Every calendar date the stay touches, from the check-in date through
    /// the date the check-out instant falls on.
    pub fn occupied_dates(&self) -> impl Iterator<Item = NaiveDate> {
        let last: NaiveDate = self.check_out.date();
        self.check_in
            .date()
            .iter_days()
            .take_while(move |date| *date <= last)
    }
}

/// Resolves the check-in and check-out instants for a stay.
///
/// # Arguments
///
/// * `check_in_date` - The check-in calendar date
/// * `check_in_time` - The check-in time of day
/// * `check_out_date` - The check-out calendar date
/// * `extension` - Hourly extension appended to the stay
///
/// # Returns
///
/// A `ResolvedWindow` where check-out falls on `check_out_date` one hour
/// before the check-in time of day, then shifted by the extension. Callers
/// must ensure `check_out_date >= check_in_date`; earlier dates resolve to
/// zero nights.
#[must_use]
pub fn resolve(
    check_in_date: NaiveDate,
    check_in_time: NaiveTime,
    check_out_date: NaiveDate,
    extension: ExtensionHours,
) -> ResolvedWindow {
    let check_in: NaiveDateTime = check_in_date.and_time(check_in_time);
    let check_out: NaiveDateTime = check_out_date.and_time(check_in_time) - TimeDelta::hours(1)
        + TimeDelta::hours(i64::from(extension.hours()));

    let nights: u32 =
        u32::try_from(days_between(check_in_date, check_out_date).max(0)).unwrap_or(u32::MAX);

    ResolvedWindow {
        check_in,
        check_out,
        nights,
    }
}
