// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local availability validation of a stay selection.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. Both dates present
//! 2. Check-in not before today
//! 3. Check-out after check-in
//! 4. Minimum nights
//! 5. Maintenance cutoff on the check-in date
//! 6. No booked date between check-in and the (extended) check-out
//!
//! All date comparisons are on calendar dates in the listing's reference
//! timezone. Only the returned `ResolvedWindow` carries instants.

use crate::calendar::{AvailabilityStatus, CalendarIndex};
use crate::calendar_date::today;
use crate::stay_window::{ResolvedWindow, resolve};
use crate::types::{ExtensionHours, StayPolicy, StaySelection};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether a date conflict comes from the dates themselves or only from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictScope {
    /// At least one conflicting date lies inside the unextended stay.
    BaseRange,
    /// The unextended stay is clear; only the extension reaches a booked date.
    ExtensionOnly,
}

impl ConflictScope {
    /// Returns the kebab-case name of this scope.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BaseRange => "base-range",
            Self::ExtensionOnly => "extension-only",
        }
    }
}

/// Why a selection was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum RejectionReason {
    /// A check-in or check-out date is missing.
    MissingDates,
    /// The check-in date is before today.
    #[serde(rename = "checkin-in-past")]
    CheckInInPast {
        /// The requested check-in date.
        check_in_date: NaiveDate,
        /// Today in the listing's timezone.
        today: NaiveDate,
    },
    /// The check-out date is not after the check-in date.
    #[serde(rename = "checkout-before-checkin")]
    CheckOutBeforeCheckIn {
        /// The requested check-in date.
        check_in_date: NaiveDate,
        /// The requested check-out date.
        check_out_date: NaiveDate,
    },
    /// The stay is shorter than the listing allows.
    BelowMinimumNights {
        /// Nights the listing requires.
        required: u32,
        /// Nights selected.
        nights: u32,
    },
    /// The check-in is before the maintenance cutoff on that date.
    BeforeMaintenanceWindow {
        /// When the listing becomes available.
        available_after: NaiveDateTime,
        /// The requested check-in instant.
        requested: NaiveDateTime,
    },
    /// The stay covers booked dates.
    DateConflict {
        /// Whether the base range or only the extension conflicts.
        scope: ConflictScope,
        /// Every conflicting date, ascending.
        dates: Vec<NaiveDate>,
        /// The extension that was requested.
        extension: ExtensionHours,
    },
}

impl RejectionReason {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingDates => "missing-dates",
            Self::CheckInInPast { .. } => "checkin-in-past",
            Self::CheckOutBeforeCheckIn { .. } => "checkout-before-checkin",
            Self::BelowMinimumNights { .. } => "below-minimum-nights",
            Self::BeforeMaintenanceWindow { .. } => "before-maintenance-window",
            Self::DateConflict { .. } => "date-conflict",
        }
    }

    /// Compact machine-oriented detail: the required night count, the
    /// cutoff instant, or the conflicting dates.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::MissingDates => String::new(),
            Self::CheckInInPast { check_in_date, .. } => check_in_date.to_string(),
            Self::CheckOutBeforeCheckIn { check_out_date, .. } => check_out_date.to_string(),
            Self::BelowMinimumNights { required, .. } => required.to_string(),
            Self::BeforeMaintenanceWindow {
                available_after, ..
            } => available_after.format("%Y-%m-%dT%H:%M").to_string(),
            Self::DateConflict { dates, .. } => join_dates(dates),
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDates => write!(f, "Please select both check-in and check-out dates"),
            Self::CheckInInPast { check_in_date, .. } => {
                write!(f, "Check-in date {check_in_date} is in the past")
            }
            Self::CheckOutBeforeCheckIn {
                check_in_date,
                check_out_date,
            } => write!(
                f,
                "Check-out date {check_out_date} must be after check-in date {check_in_date}"
            ),
            Self::BelowMinimumNights { required, nights } => write!(
                f,
                "This listing requires a minimum stay of {required} {}; {nights} selected",
                plural_nights(*required)
            ),
            Self::BeforeMaintenanceWindow {
                available_after, ..
            } => write!(
                f,
                "Check-in is only available after {} due to maintenance",
                available_after.format("%b %-d, %Y at %-I:%M %p")
            ),
            Self::DateConflict {
                scope: ConflictScope::BaseRange,
                dates,
                ..
            } => write!(
                f,
                "Selected dates are unavailable: {}. Please choose different dates",
                join_dates(dates)
            ),
            Self::DateConflict {
                scope: ConflictScope::ExtensionOnly,
                dates,
                extension,
            } => write!(
                f,
                "The {extension} extension runs into unavailable dates: {}. Choose a shorter extension",
                join_dates(dates)
            ),
        }
    }
}

/// A typed rejection with a message ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Structured reason.
    pub reason: RejectionReason,
    /// Human-readable message.
    pub message: String,
}

impl Rejection {
    /// Creates a rejection whose message is derived from the reason.
    #[must_use]
    pub fn new(reason: RejectionReason) -> Self {
        let message: String = reason.to_string();
        Self { reason, message }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.reason.code()
    }

    /// Compact machine-oriented detail.
    #[must_use]
    pub fn detail(&self) -> String {
        self.reason.detail()
    }
}

/// Result of validating a selection. Never partially valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The selection is valid.
    Ok(ResolvedWindow),
    /// The selection violates a booking rule.
    Rejected(Rejection),
}

impl ValidationOutcome {
    /// Whether the selection is valid.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// The resolved window, if valid.
    #[must_use]
    pub const fn window(&self) -> Option<&ResolvedWindow> {
        match self {
            Self::Ok(window) => Some(window),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection, if invalid.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Ok(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    fn rejected(reason: RejectionReason) -> Self {
        debug!(code = reason.code(), detail = %reason.detail(), "Selection rejected");
        Self::Rejected(Rejection::new(reason))
    }
}

/// Validates a stay selection against the listing's calendar and policy.
///
/// This function is pure and deterministic; `now` is supplied by the caller.
///
/// # Arguments
///
/// * `selection` - The guest's selection (check-in date, time, extension)
/// * `check_out_date` - The check-out date being validated
/// * `index` - The listing's calendar index
/// * `policy` - Listing booking constraints
/// * `now` - The current instant
///
/// # Returns
///
/// * `ValidationOutcome::Ok` with the resolved window if every rule passes
/// * `ValidationOutcome::Rejected` with the first failing rule otherwise
#[must_use]
pub fn validate(
    selection: &StaySelection,
    check_out_date: Option<NaiveDate>,
    index: &CalendarIndex,
    policy: &StayPolicy,
    now: DateTime<Utc>,
) -> ValidationOutcome {
    // Rule: both dates must be chosen
    let (Some(check_in_date), Some(check_out_date)) = (selection.check_in_date, check_out_date)
    else {
        return ValidationOutcome::rejected(RejectionReason::MissingDates);
    };

    // Rule: no check-in before today
    let today: NaiveDate = today(now, index.timezone());
    if check_in_date < today {
        return ValidationOutcome::rejected(RejectionReason::CheckInInPast {
            check_in_date,
            today,
        });
    }

    // Rule: check-out strictly after check-in
    if check_out_date <= check_in_date {
        return ValidationOutcome::rejected(RejectionReason::CheckOutBeforeCheckIn {
            check_in_date,
            check_out_date,
        });
    }

    let window: ResolvedWindow = resolve(
        check_in_date,
        selection.check_in_time,
        check_out_date,
        selection.extension_hours,
    );

    // Rule: minimum nights
    if let Some(required) = policy.min_nights
        && window.nights < required
    {
        return ValidationOutcome::rejected(RejectionReason::BelowMinimumNights {
            required,
            nights: window.nights,
        });
    }

    // Rule: check-in not before the maintenance cutoff
    if let Some(maintenance) = index.maintenance(check_in_date)
        && window.check_in < maintenance.available_after
    {
        return ValidationOutcome::rejected(RejectionReason::BeforeMaintenanceWindow {
            available_after: maintenance.available_after,
            requested: window.check_in,
        });
    }

    // Rule: no booked date between check-in and the day the extended check-out falls on
    let conflicts: Vec<NaiveDate> = conflicting_dates(&window, index);

    if !conflicts.is_empty() {
        let scope: ConflictScope = if selection.extension_hours.is_extended() {
            let base_last_day: NaiveDate = resolve(
                check_in_date,
                selection.check_in_time,
                check_out_date,
                ExtensionHours::None,
            )
            .check_out
            .date();
            if conflicts.iter().any(|date| *date <= base_last_day) {
                ConflictScope::BaseRange
            } else {
                ConflictScope::ExtensionOnly
            }
        } else {
            ConflictScope::BaseRange
        };
        return ValidationOutcome::rejected(RejectionReason::DateConflict {
            scope,
            dates: conflicts,
            extension: selection.extension_hours,
        });
    }

    ValidationOutcome::Ok(window)
}

/// Booked dates the window touches, from the check-in date through the day
/// the check-out instant falls on, ascending.
///
/// A maintenance check-in day counts as booked unless the check-in starts at
/// or after its cutoff.
#[must_use]
pub fn conflicting_dates(window: &ResolvedWindow, index: &CalendarIndex) -> Vec<NaiveDate> {
    index
        .booked_between(window.check_in.date(), window.check_out.date())
        .into_iter()
        .filter(|date| !usable_maintenance_day(index, *date, window))
        .collect()
}

fn usable_maintenance_day(
    index: &CalendarIndex,
    date: NaiveDate,
    window: &ResolvedWindow,
) -> bool {
    date == window.check_in.date()
        && index.status(date) == AvailabilityStatus::Maintenance
        && index
            .maintenance(date)
            .is_some_and(|maintenance| window.check_in >= maintenance.available_after)
}

fn join_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

const fn plural_nights(count: u32) -> &'static str {
    if count == 1 { "night" } else { "nights" }
}
