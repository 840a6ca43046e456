// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Check-in time used when the guest has not picked one.
pub const DEFAULT_CHECK_IN_TIME: NaiveTime = match NaiveTime::from_hms_opt(15, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Hourly add-on appended to the standard 23-hour stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExtensionHours {
    /// No extension.
    #[default]
    None,
    /// Six extra hours.
    Six,
    /// Twelve extra hours.
    Twelve,
    /// Eighteen extra hours.
    Eighteen,
}

impl ExtensionHours {
    /// Number of extra hours.
    #[must_use]
    pub const fn hours(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Six => 6,
            Self::Twelve => 12,
            Self::Eighteen => 18,
        }
    }

    /// Whether any extension is applied.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<u8> for ExtensionHours {
    type Error = DomainError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        match hours {
            0 => Ok(Self::None),
            6 => Ok(Self::Six),
            12 => Ok(Self::Twelve),
            18 => Ok(Self::Eighteen),
            other => Err(DomainError::InvalidExtensionHours(other)),
        }
    }
}

impl From<ExtensionHours> for u8 {
    fn from(extension: ExtensionHours) -> Self {
        extension.hours()
    }
}

impl std::fmt::Display for ExtensionHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

/// Position in the date-selection flow.
///
/// Valid transitions are:
/// - `AwaitingCheckIn` → `AwaitingCheckOut`
/// - `AwaitingCheckOut` → `Complete`
/// - any state → `AwaitingCheckIn` (reset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStep {
    /// No dates chosen yet.
    #[default]
    AwaitingCheckIn,
    /// Check-in chosen, waiting for the check-out date.
    AwaitingCheckOut,
    /// Both dates chosen.
    Complete,
}

impl SelectionStep {
    /// Returns the kebab-case name of this step.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingCheckIn => "awaiting-checkin",
            Self::AwaitingCheckOut => "awaiting-checkout",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for SelectionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The guest's in-progress stay selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaySelection {
    /// Chosen check-in date.
    pub check_in_date: Option<NaiveDate>,
    /// Chosen check-in time of day.
    pub check_in_time: NaiveTime,
    /// Chosen (or auto-derived) check-out date.
    pub check_out_date: Option<NaiveDate>,
    /// Whether the guest picked the check-out date themselves.
    pub check_out_explicit: bool,
    /// Hourly extension.
    pub extension_hours: ExtensionHours,
    /// Number of guests.
    pub guests: u32,
    /// Where the guest is in the selection flow.
    pub selection_step: SelectionStep,
    /// Check-in date for which the check-out was last auto-derived.
    pub last_auto_adjusted_date: Option<NaiveDate>,
}

impl StaySelection {
    /// Creates an empty selection with the given default check-in time.
    #[must_use]
    pub const fn new(check_in_time: NaiveTime) -> Self {
        Self {
            check_in_date: None,
            check_in_time,
            check_out_date: None,
            check_out_explicit: false,
            extension_hours: ExtensionHours::None,
            guests: 1,
            selection_step: SelectionStep::AwaitingCheckIn,
            last_auto_adjusted_date: None,
        }
    }

    /// Creates a complete selection. Mostly useful for validation callers.
    #[must_use]
    pub const fn complete(
        check_in_date: NaiveDate,
        check_in_time: NaiveTime,
        check_out_date: NaiveDate,
        extension_hours: ExtensionHours,
    ) -> Self {
        Self {
            check_in_date: Some(check_in_date),
            check_in_time,
            check_out_date: Some(check_out_date),
            check_out_explicit: true,
            extension_hours,
            guests: 1,
            selection_step: SelectionStep::Complete,
            last_auto_adjusted_date: None,
        }
    }
}

impl Default for StaySelection {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_IN_TIME)
    }
}

/// Listing-level booking constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayPolicy {
    /// Minimum number of nights, if the listing enforces one.
    pub min_nights: Option<u32>,
}

impl StayPolicy {
    /// Creates a policy with a minimum night count.
    #[must_use]
    pub const fn with_min_nights(min_nights: u32) -> Self {
        Self {
            min_nights: Some(min_nights),
        }
    }
}
