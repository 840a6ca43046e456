// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::listing::ListingConfig;
use chrono::{NaiveDate, NaiveTime};
use stayline_domain::ExtensionHours;

/// A command represents guest or host intent as data only.
///
/// Commands are the only way to change the controller's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A date was picked on the calendar.
    SelectDate {
        /// The picked date.
        date: NaiveDate,
    },
    /// The check-out date was picked explicitly.
    SetCheckOutDate {
        /// The check-out date.
        date: NaiveDate,
    },
    /// A check-in time was picked from the legal slots.
    SetCheckInTime {
        /// Time of day.
        time: NaiveTime,
        /// Whether the slot belongs to the day after the selected date.
        next_day: bool,
    },
    /// The hourly extension changed.
    SetExtension {
        /// New extension.
        extension: ExtensionHours,
    },
    /// The guest count changed.
    SetGuests {
        /// Number of guests, at least one.
        guests: u32,
    },
    /// Clear the chosen dates and start over.
    Reset,
    /// Switch to another listing. The calendar must be loaded again.
    ChangeListing {
        /// The new listing.
        listing: ListingConfig,
    },
}
