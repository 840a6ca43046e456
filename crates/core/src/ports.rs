// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ports to the remote availability and pricing services.
//!
//! The controller only assembles requests and interprets responses. It never
//! computes a price and treats the returned pricing token as opaque.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stayline_domain::{ExtensionHours, RawAvailabilityRecord};

/// Failure talking to a remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service could not be reached or returned an error status.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    /// The service answered with something the client cannot interpret.
    #[error("Invalid response from service: {0}")]
    InvalidResponse(String),
}

/// How a listing is priced and reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    /// Whole nights.
    Nightly,
    /// Hourly slots.
    Hourly,
}

/// A single conflicting date reported by the slot check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConflict {
    /// The conflicting date, in any supported representation.
    pub date: String,
}

/// Conflicts reported by the slot check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SlotConflicts {
    /// Dates that collide with the requested slot.
    #[serde(default)]
    pub daily_conflicts: Vec<DailyConflict>,
}

/// The next slot the service would accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAvailableSlot {
    /// Start of the slot.
    pub start: DateTime<Utc>,
}

/// Response of the hourly slot availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotAvailability {
    /// Whether the requested slot is free.
    pub available: bool,
    /// Conflicts, when not available.
    #[serde(default)]
    pub conflicts: Option<SlotConflicts>,
    /// Suggested alternative, when not available.
    #[serde(default)]
    pub next_available_slot: Option<NextAvailableSlot>,
}

/// Request sent to the pricing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Listing identifier.
    pub listing_id: String,
    /// Check-in instant.
    pub check_in_date: DateTime<Utc>,
    /// Check-out instant, extension included.
    pub check_out_date: DateTime<Utc>,
    /// Number of guests.
    pub guests: u32,
    /// Hourly extension.
    pub hourly_extension: ExtensionHours,
    /// Nightly or hourly booking.
    pub booking_type: BookingType,
}

/// Price breakdown returned by the pricing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingBreakdown {
    /// Nights the service priced.
    pub nights: u32,
    /// Nightly rate × nights.
    pub base_amount: f64,
    /// Service fee.
    pub service_fee: f64,
    /// Cleaning fee.
    pub cleaning_fee: f64,
    /// Refundable security deposit.
    pub security_deposit: f64,
    /// Surcharge for guests above the included count.
    pub extra_guest_cost: f64,
    /// Platform fee.
    pub platform_fee: f64,
    /// Goods and services tax.
    pub gst: f64,
    /// Amount due.
    pub total_amount: f64,
    /// Amount before taxes and fees.
    pub subtotal: f64,
    /// Discount applied.
    pub discount_amount: f64,
    /// Opaque integrity token to submit with the booking.
    pub pricing_token: String,
}

/// Remote availability service.
#[async_trait]
pub trait AvailabilityService: Send + Sync {
    /// Fetches per-date availability records for `from..=to`.
    async fn get_availability(
        &self,
        listing_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawAvailabilityRecord>, ServiceError>;

    /// Checks an exact slot for listings with hourly granularity.
    async fn check_time_slot_availability(
        &self,
        listing_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        extension: ExtensionHours,
    ) -> Result<TimeSlotAvailability, ServiceError>;
}

/// Remote pricing service.
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Prices a validated stay.
    async fn calculate_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingBreakdown, ServiceError>;
}
