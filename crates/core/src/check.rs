// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Remote confirmation of a locally validated stay.
//!
//! Availability is asked first. Pricing is only requested when the stay is
//! available. Nothing here retries.

use crate::ports::{
    AvailabilityService, BookingType, PricingBreakdown, PricingRequest, PricingService,
    ServiceError, TimeSlotAvailability,
};
use crate::state::{AvailabilityVerdict, CheckResponse, PendingCheck};
use chrono::{DateTime, NaiveDate, Utc};
use stayline_domain::calendar_date::parse_calendar_date;
use stayline_domain::{CalendarIndex, RawAvailabilityRecord, conflicting_dates};
use tracing::{info, warn};

/// Runs the remote half of an availability check.
///
/// # Arguments
///
/// * `pending` - The check produced by `begin_availability_check`
/// * `availability` - The availability service
/// * `pricing` - The pricing service
///
/// # Returns
///
/// The combined response, to be handed to `complete_availability_check`
/// together with `pending.ticket`.
pub async fn run_check<A, P>(pending: &PendingCheck, availability: &A, pricing: &P) -> CheckResponse
where
    A: AvailabilityService + ?Sized,
    P: PricingService + ?Sized,
{
    let (check_in, check_out): (DateTime<Utc>, DateTime<Utc>) =
        pending.window.to_utc(pending.timezone);

    let verdict: AvailabilityVerdict = if pending.hourly_booking {
        check_slot(pending, availability, check_in, check_out).await
    } else {
        check_nights(pending, availability).await
    };

    match &verdict {
        AvailabilityVerdict::Available => {
            info!(listing = %pending.listing_id, %check_in, %check_out, "Stay available");
        }
        AvailabilityVerdict::Conflicts { dates, .. } => {
            info!(
                listing = %pending.listing_id,
                conflicts = dates.len(),
                "Stay unavailable"
            );
        }
        AvailabilityVerdict::Failed(err) => {
            warn!(listing = %pending.listing_id, error = %err, "Availability check failed");
        }
    }

    if verdict != AvailabilityVerdict::Available {
        return CheckResponse {
            availability: verdict,
            pricing: None,
        };
    }

    let request: PricingRequest = PricingRequest {
        listing_id: pending.listing_id.clone(),
        check_in_date: check_in,
        check_out_date: check_out,
        guests: pending.guests,
        hourly_extension: pending.extension,
        booking_type: if pending.hourly_booking {
            BookingType::Hourly
        } else {
            BookingType::Nightly
        },
    };
    let priced: Result<PricingBreakdown, ServiceError> = pricing.calculate_pricing(&request).await;
    match &priced {
        Ok(breakdown) => info!(
            listing = %pending.listing_id,
            nights = breakdown.nights,
            total = breakdown.total_amount,
            "Stay priced"
        ),
        Err(err) => warn!(listing = %pending.listing_id, error = %err, "Pricing failed"),
    }

    CheckResponse {
        availability: verdict,
        pricing: Some(priced),
    }
}

async fn check_slot<A>(
    pending: &PendingCheck,
    availability: &A,
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
) -> AvailabilityVerdict
where
    A: AvailabilityService + ?Sized,
{
    let slot: TimeSlotAvailability = match availability
        .check_time_slot_availability(&pending.listing_id, check_in, check_out, pending.extension)
        .await
    {
        Ok(slot) => slot,
        Err(err) => return AvailabilityVerdict::Failed(err),
    };

    if slot.available {
        return AvailabilityVerdict::Available;
    }

    let mut dates: Vec<NaiveDate> = slot
        .conflicts
        .map(|conflicts| conflicts.daily_conflicts)
        .unwrap_or_default()
        .iter()
        .filter_map(
            |conflict| match parse_calendar_date(&conflict.date, pending.timezone) {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!(error = %err, "Skipping malformed conflict date");
                    None
                }
            },
        )
        .collect();
    dates.sort_unstable();
    dates.dedup();

    AvailabilityVerdict::Conflicts {
        dates,
        next_available: slot.next_available_slot.map(|next| next.start),
    }
}

async fn check_nights<A>(pending: &PendingCheck, availability: &A) -> AvailabilityVerdict
where
    A: AvailabilityService + ?Sized,
{
    let from: NaiveDate = pending.window.check_in.date();
    let to: NaiveDate = pending.window.check_out.date();

    let records: Vec<RawAvailabilityRecord> = match availability
        .get_availability(&pending.listing_id, from, to)
        .await
    {
        Ok(records) => records,
        Err(err) => return AvailabilityVerdict::Failed(err),
    };

    let index: CalendarIndex = CalendarIndex::build(&records, pending.timezone);
    let dates: Vec<NaiveDate> = conflicting_dates(&pending.window, &index);
    if dates.is_empty() {
        AvailabilityVerdict::Available
    } else {
        AvailabilityVerdict::Conflicts {
            dates,
            next_available: None,
        }
    }
}
