// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while parsing or constructing domain values.
///
/// Booking rule violations are not errors: they are reported as
/// [`crate::ValidationOutcome::Rejected`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A calendar date or instant string could not be parsed.
    InvalidDate {
        /// The raw value that was rejected.
        raw: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A time-of-day string could not be parsed.
    InvalidTimeOfDay(String),
    /// Extension hours must be one of 0, 6, 12 or 18.
    InvalidExtensionHours(u8),
    /// The timezone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Guest count must be at least one.
    InvalidGuestCount(u32),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { raw, reason } => {
                write!(f, "Invalid date '{raw}': {reason}")
            }
            Self::InvalidTimeOfDay(raw) => {
                write!(f, "Invalid time of day '{raw}'. Expected HH:MM or HH:MM:SS")
            }
            Self::InvalidExtensionHours(hours) => {
                write!(
                    f,
                    "Invalid extension hours: {hours}. Must be one of 0, 6, 12 or 18"
                )
            }
            Self::InvalidTimezone(name) => write!(f, "Unknown timezone '{name}'"),
            Self::InvalidGuestCount(count) => {
                write!(f, "Invalid guest count: {count}. Must be at least 1")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
