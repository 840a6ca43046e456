// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};
use stayline_domain::{RawAvailabilityRecord, RawMaintenance};

use crate::ValidateRequest;

/// 2024-06-10 09:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub fn create_booked_records(dates: &[&str]) -> Vec<RawAvailabilityRecord> {
    dates
        .iter()
        .map(|date| RawAvailabilityRecord::new(date, "booked"))
        .collect()
}

pub fn create_maintenance_record(date: &str, available_after: &str) -> RawAvailabilityRecord {
    RawAvailabilityRecord {
        maintenance: Some(RawMaintenance {
            available_after: Some(available_after.to_string()),
            available_hours: None,
        }),
        ..RawAvailabilityRecord::new(date, "maintenance")
    }
}

pub fn create_valid_request(check_in: &str, check_out: &str) -> ValidateRequest {
    ValidateRequest {
        check_in_date: Some(check_in.to_string()),
        check_in_time: Some(String::from("16:00")),
        check_out_date: Some(check_out.to_string()),
        ..ValidateRequest::default()
    }
}
