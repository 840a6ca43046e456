// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AvailabilityService, BookingWindowController, Command, ListingConfig, PricingBreakdown,
    PricingRequest, PricingService, ServiceError, TimeSlotAvailability,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use stayline_domain::{ExtensionHours, RawAvailabilityRecord, Tz};
use std::sync::Mutex;

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

pub fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

/// 2024-06-10 09:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub fn create_test_listing() -> ListingConfig {
    ListingConfig::new("listing-42", Tz::UTC)
}

pub fn create_controller_with_stay(check_in: &str, check_out: &str) -> BookingWindowController {
    let mut controller: BookingWindowController = BookingWindowController::new(create_test_listing());
    controller
        .apply(Command::SelectDate {
            date: date(check_in),
        })
        .unwrap();
    controller
        .apply(Command::SelectDate {
            date: date(check_out),
        })
        .unwrap();
    controller
}

pub fn create_test_breakdown() -> PricingBreakdown {
    PricingBreakdown {
        nights: 2,
        base_amount: 200.0,
        service_fee: 20.0,
        cleaning_fee: 15.0,
        security_deposit: 50.0,
        extra_guest_cost: 0.0,
        platform_fee: 5.0,
        gst: 21.6,
        total_amount: 311.6,
        subtotal: 240.0,
        discount_amount: 0.0,
        pricing_token: String::from("tok-abc"),
    }
}

/// A recorded call to the fake availability service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityCall {
    Calendar {
        listing_id: String,
        from: NaiveDate,
        to: NaiveDate,
    },
    Slot {
        listing_id: String,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        extension: ExtensionHours,
    },
}

/// In-memory availability service that records its calls.
pub struct FakeAvailability {
    pub records: Vec<RawAvailabilityRecord>,
    pub slot: TimeSlotAvailability,
    pub failure: Option<ServiceError>,
    pub calls: Mutex<Vec<AvailabilityCall>>,
}

impl FakeAvailability {
    pub fn open() -> Self {
        Self {
            records: Vec::new(),
            slot: TimeSlotAvailability {
                available: true,
                conflicts: None,
                next_available_slot: None,
            },
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<RawAvailabilityRecord>) -> Self {
        Self {
            records,
            ..Self::open()
        }
    }

    pub fn with_slot(slot: TimeSlotAvailability) -> Self {
        Self {
            slot,
            ..Self::open()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(ServiceError::Unavailable(message.to_string())),
            ..Self::open()
        }
    }

    pub fn calls(&self) -> Vec<AvailabilityCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvailabilityService for FakeAvailability {
    async fn get_availability(
        &self,
        listing_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawAvailabilityRecord>, ServiceError> {
        self.calls.lock().unwrap().push(AvailabilityCall::Calendar {
            listing_id: listing_id.to_string(),
            from,
            to,
        });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.records.clone()),
        }
    }

    async fn check_time_slot_availability(
        &self,
        listing_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        extension: ExtensionHours,
    ) -> Result<TimeSlotAvailability, ServiceError> {
        self.calls.lock().unwrap().push(AvailabilityCall::Slot {
            listing_id: listing_id.to_string(),
            check_in,
            check_out,
            extension,
        });
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.slot.clone()),
        }
    }
}

/// In-memory pricing service that records its requests.
pub struct FakePricing {
    pub result: Result<PricingBreakdown, ServiceError>,
    pub requests: Mutex<Vec<PricingRequest>>,
}

impl FakePricing {
    pub fn priced() -> Self {
        Self {
            result: Ok(create_test_breakdown()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(ServiceError::InvalidResponse(message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<PricingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PricingService for FakePricing {
    async fn calculate_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingBreakdown, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}
