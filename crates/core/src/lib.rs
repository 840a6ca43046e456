// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-window controller.
//!
//! Owns the guest's date selection for one listing, validates it with the
//! domain rules and confirms it with the remote availability and pricing
//! services.

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

mod check;
mod command;
mod controller;
mod error;
mod event;
mod listing;
mod ports;
mod state;

#[cfg(test)]
mod tests;

pub use check::run_check;
pub use command::Command;
pub use controller::BookingWindowController;
pub use error::CoreError;
pub use event::{AvailabilityDetail, ControllerEvent, PricingOutcome};
pub use listing::{AVAILABILITY_FETCH_MONTHS, ListingConfig};
pub use ports::{
    AvailabilityService, BookingType, DailyConflict, NextAvailableSlot, PricingBreakdown,
    PricingRequest, PricingService, ServiceError, SlotConflicts, TimeSlotAvailability,
};
pub use state::{
    AvailabilityVerdict, CheckResponse, CheckStart, CheckState, CheckTicket, PendingCheck,
};
