// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
pub mod calendar_date;
mod error;
mod stay_window;
mod time_options;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{
    AvailabilityStatus, CalendarDay, CalendarIndex, HourRange, MaintenanceWindow,
    RawAvailabilityRecord, RawHourRange, RawMaintenance,
};
pub use error::DomainError;
pub use stay_window::{ResolvedWindow, resolve};
pub use time_options::{
    CheckInSlot, EARLIEST_CHECK_IN_HOUR, LATE_NIGHT_LAST_HOUR, legal_check_in_times,
};
pub use types::{DEFAULT_CHECK_IN_TIME, ExtensionHours, SelectionStep, StayPolicy, StaySelection};
pub use validation::{
    ConflictScope, Rejection, RejectionReason, ValidationOutcome, conflicting_dates, validate,
};

/// Re-exported so downstream crates name the same timezone type.
pub use chrono_tz::Tz;
