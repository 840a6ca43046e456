// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::PricingBreakdown;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use stayline_domain::{StaySelection, ValidationOutcome};

/// What the remote availability check concluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AvailabilityDetail {
    /// The stay is free.
    Confirmed,
    /// The service reported conflicts.
    #[serde(rename_all = "camelCase")]
    Conflicts {
        /// Conflicting dates, ascending.
        dates: Vec<NaiveDate>,
        /// The next slot the service would accept, if it suggested one.
        next_available: Option<DateTime<Utc>>,
    },
    /// The service could not be asked.
    RemoteFailure {
        /// Failure description.
        message: String,
    },
}

/// What the pricing service returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PricingOutcome {
    /// The stay was priced.
    Priced {
        /// The breakdown, token included.
        breakdown: PricingBreakdown,
    },
    /// Pricing failed.
    Failed {
        /// Failure description.
        message: String,
    },
}

/// Observable output of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControllerEvent {
    /// The selection changed.
    SelectionChanged {
        /// The selection after the change.
        selection: StaySelection,
    },
    /// The selection was validated locally.
    ValidationCompleted {
        /// Result of the local rules.
        outcome: ValidationOutcome,
    },
    /// The remote availability check finished.
    AvailabilityResult {
        /// Whether the stay is confirmed free.
        confirmed: bool,
        /// Conflicts or failure details.
        detail: AvailabilityDetail,
    },
    /// The remote pricing call finished.
    PricingResult {
        /// Priced breakdown or failure.
        outcome: PricingOutcome,
    },
}
