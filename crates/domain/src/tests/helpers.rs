// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CalendarIndex, RawAvailabilityRecord, RawMaintenance, Tz};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, min, 0).unwrap()
}

/// 2024-06-10 at 09:00 UTC, the reference "now" for most tests.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub fn create_index_with_booked(dates: &[&str]) -> CalendarIndex {
    let records: Vec<RawAvailabilityRecord> = dates
        .iter()
        .map(|date| RawAvailabilityRecord::new(date, "booked"))
        .collect();
    CalendarIndex::build(&records, Tz::UTC)
}

pub fn create_maintenance_record(date: &str, available_after: &str) -> RawAvailabilityRecord {
    let mut record: RawAvailabilityRecord = RawAvailabilityRecord::new(date, "maintenance");
    record.maintenance = Some(RawMaintenance {
        available_after: Some(available_after.to_string()),
        available_hours: None,
    });
    record
}
