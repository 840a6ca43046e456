// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::NaiveTime;
use stayline_domain::{DEFAULT_CHECK_IN_TIME, StayPolicy, Tz};

/// Months of calendar fetched ahead of today.
pub const AVAILABILITY_FETCH_MONTHS: u32 = 6;

/// Booking configuration of the listing the controller is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Listing identifier understood by the remote services.
    pub listing_id: String,
    /// Reference timezone for calendar dates and wall-clock times.
    pub timezone: Tz,
    /// Whether the listing is booked in hourly slots rather than nights.
    pub hourly_booking: bool,
    /// Booking constraints.
    pub policy: StayPolicy,
    /// Check-in time offered before the guest picks one.
    pub default_check_in_time: NaiveTime,
}

impl ListingConfig {
    /// Creates a nightly listing with no minimum stay and a 15:00 check-in.
    #[must_use]
    pub fn new(listing_id: &str, timezone: Tz) -> Self {
        Self {
            listing_id: listing_id.to_string(),
            timezone,
            hourly_booking: false,
            policy: StayPolicy::default(),
            default_check_in_time: DEFAULT_CHECK_IN_TIME,
        }
    }

    /// Marks the listing as hourly-bookable.
    #[must_use]
    pub const fn with_hourly_booking(mut self) -> Self {
        self.hourly_booking = true;
        self
    }

    /// Sets the booking policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: StayPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the default check-in time.
    #[must_use]
    pub const fn with_default_check_in_time(mut self, time: NaiveTime) -> Self {
        self.default_check_in_time = time;
        self
    }

    /// Nights to pre-fill when the check-out is derived automatically.
    #[must_use]
    pub fn auto_stay_nights(&self) -> u32 {
        self.policy.min_nights.unwrap_or(1).max(1)
    }
}
