// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::{AvailabilityDetail, ControllerEvent};
use crate::ports::{PricingBreakdown, ServiceError};
use chrono::{DateTime, NaiveDate, Utc};
use stayline_domain::{ExtensionHours, ResolvedWindow, Tz};

/// Identifies one availability check.
///
/// A ticket is only honored while the selection it was issued for is
/// unchanged. Any selection change makes outstanding tickets stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckTicket {
    generation: u64,
}

impl CheckTicket {
    pub(crate) const fn new(generation: u64) -> Self {
        Self { generation }
    }

    /// The selection generation this ticket was issued for.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Everything the remote check needs, detached from the controller so the
/// controller is not borrowed while the services are awaited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheck {
    /// Ticket to hand back on completion.
    pub ticket: CheckTicket,
    /// Listing identifier.
    pub listing_id: String,
    /// Listing reference timezone.
    pub timezone: Tz,
    /// Whether the listing is hourly-bookable.
    pub hourly_booking: bool,
    /// Locally validated window.
    pub window: ResolvedWindow,
    /// Number of guests.
    pub guests: u32,
    /// Hourly extension.
    pub extension: ExtensionHours,
}

/// Result of starting a check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckStart {
    /// Events emitted by local validation.
    pub events: Vec<ControllerEvent>,
    /// The remote work to run, or `None` when validation rejected the selection.
    pub pending: Option<PendingCheck>,
}

/// Availability as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityVerdict {
    /// The stay is free.
    Available,
    /// The stay collides with other bookings.
    Conflicts {
        /// Conflicting dates in the listing's timezone.
        dates: Vec<NaiveDate>,
        /// Suggested alternative start.
        next_available: Option<DateTime<Utc>>,
    },
    /// The service failed.
    Failed(ServiceError),
}

/// Everything the remote services answered for one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResponse {
    /// Availability answer.
    pub availability: AvailabilityVerdict,
    /// Pricing answer. Only present when the stay was available.
    pub pricing: Option<Result<PricingBreakdown, ServiceError>>,
}

/// Remote confirmation state of the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckState {
    /// Nothing confirmed.
    #[default]
    Idle,
    /// Waiting for the services.
    Checking {
        /// Ticket of the outstanding check.
        ticket: CheckTicket,
        /// Window being checked.
        window: ResolvedWindow,
    },
    /// Available and priced.
    Confirmed {
        /// The confirmed window.
        window: ResolvedWindow,
        /// Pricing, token included.
        pricing: PricingBreakdown,
    },
    /// The service reported conflicts.
    Unavailable {
        /// The refused window.
        window: ResolvedWindow,
        /// Conflicts reported.
        detail: AvailabilityDetail,
    },
    /// A remote call failed. Only an explicit new check retries.
    Failed {
        /// Failure description.
        message: String,
    },
}
