// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Legal check-in time generation.
//!
//! ## Rules
//!
//! - Explicit available hours for the date are authoritative: the result is
//!   the union of whole hours inside them, regardless of the current time
//! - Otherwise slots run from the earliest legal hour through 23:00, then
//!   wrap to 00:00 through 05:00 of the following calendar day
//! - The earliest legal hour is 06:00, raised to the next whole hour after
//!   the current one when the date is today, and to the (rounded-up)
//!   maintenance cutoff when one exists

use crate::calendar::{CalendarIndex, HourRange};
use crate::calendar_date::{ceil_to_hour, local_now};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// First regular check-in hour of the day.
pub const EARLIEST_CHECK_IN_HOUR: u32 = 6;

/// Last wrap-around ("late night") check-in hour, on the following day.
pub const LATE_NIGHT_LAST_HOUR: u32 = 5;

/// A selectable check-in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInSlot {
    /// Whether the slot falls on the calendar day after the selected date.
    /// Callers must advance the check-in date when one of these is chosen.
    pub next_day: bool,
    /// Time of day.
    pub time: NaiveTime,
}

impl CheckInSlot {
    /// A slot on the selected date.
    #[must_use]
    pub const fn same_day(time: NaiveTime) -> Self {
        Self {
            next_day: false,
            time,
        }
    }

    /// A wrap-around slot on the following date.
    #[must_use]
    pub const fn following_day(time: NaiveTime) -> Self {
        Self {
            next_day: true,
            time,
        }
    }

    /// The wall-clock instant of this slot for a selected date.
    #[must_use]
    pub fn instant_on(&self, date: NaiveDate) -> NaiveDateTime {
        let anchor: NaiveDateTime = date.and_time(self.time);
        if self.next_day {
            anchor + TimeDelta::days(1)
        } else {
            anchor
        }
    }
}

/// Produces the legal check-in times for a date, in chronological order.
///
/// # Arguments
///
/// * `date` - The selected check-in date
/// * `index` - The listing's calendar index
/// * `now` - The current instant
#[must_use]
pub fn legal_check_in_times(
    date: NaiveDate,
    index: &CalendarIndex,
    now: DateTime<Utc>,
) -> Vec<CheckInSlot> {
    if let Some(ranges) = index.available_hours(date) {
        return hours_in_ranges(ranges);
    }

    let earliest: NaiveDateTime = earliest_check_in(date, index, now);

    let regular = (EARLIEST_CHECK_IN_HOUR..24).filter_map(hour).map(CheckInSlot::same_day);
    let late_night = (0..=LATE_NIGHT_LAST_HOUR)
        .filter_map(hour)
        .map(CheckInSlot::following_day);

    regular
        .chain(late_night)
        .filter(|slot| slot.instant_on(date) >= earliest)
        .collect()
}

/// Earliest instant a check-in on `date` may start, ignoring explicit hours.
fn earliest_check_in(date: NaiveDate, index: &CalendarIndex, now: DateTime<Utc>) -> NaiveDateTime {
    let mut earliest: NaiveDateTime = date.and_time(NaiveTime::MIN)
        + TimeDelta::hours(i64::from(EARLIEST_CHECK_IN_HOUR));

    let current: NaiveDateTime = local_now(now, index.timezone());
    if date == current.date() {
        let next_hour: NaiveDateTime =
            date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(current.hour()) + 1);
        earliest = earliest.max(next_hour);
    }

    if let Some(window) = index.maintenance(date) {
        earliest = earliest.max(ceil_to_hour(window.available_after));
    }

    earliest
}

/// Union of whole hours inside the ranges. Range ends are exclusive.
fn hours_in_ranges(ranges: &[HourRange]) -> Vec<CheckInSlot> {
    let mut slots: BTreeSet<CheckInSlot> = BTreeSet::new();

    for range in ranges {
        let first: u32 = first_whole_hour(range.start);
        if range.wraps_midnight() {
            for h in first..24 {
                slots.extend(hour(h).map(CheckInSlot::same_day));
            }
            for h in 0..24 {
                match hour(h) {
                    Some(time) if time < range.end => {
                        slots.insert(CheckInSlot::following_day(time));
                    }
                    _ => break,
                }
            }
        } else {
            for h in first..24 {
                match hour(h) {
                    Some(time) if time < range.end => {
                        slots.insert(CheckInSlot::same_day(time));
                    }
                    _ => break,
                }
            }
        }
    }

    slots.into_iter().collect()
}

/// The first whole hour at or after `time` (24 when none remains today).
fn first_whole_hour(time: NaiveTime) -> u32 {
    if time.minute() == 0 && time.second() == 0 && time.nanosecond() == 0 {
        time.hour()
    } else {
        time.hour() + 1
    }
}

fn hour(h: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, 0, 0)
}
