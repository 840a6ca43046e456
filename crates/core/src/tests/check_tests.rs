// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    AvailabilityCall, FakeAvailability, FakePricing, create_controller_with_stay,
    create_test_listing, date, test_now,
};
use crate::{
    AvailabilityDetail, BookingType, BookingWindowController, CheckResponse, CheckStart,
    CheckState, Command, ControllerEvent, CoreError, DailyConflict, ListingConfig,
    NextAvailableSlot, PendingCheck, PricingOutcome, PricingRequest, ServiceError, SlotConflicts,
    TimeSlotAvailability, run_check,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use stayline_domain::calendar_date::parse_timezone;
use stayline_domain::{
    CalendarIndex, ExtensionHours, RawAvailabilityRecord, RawMaintenance, Tz,
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[tokio::test]
async fn test_nightly_stay_is_confirmed_and_priced() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], ControllerEvent::ValidationCompleted { .. }));
    assert_eq!(
        events[1],
        ControllerEvent::AvailabilityResult {
            confirmed: true,
            detail: AvailabilityDetail::Confirmed,
        }
    );
    assert!(matches!(
        events[2],
        ControllerEvent::PricingResult {
            outcome: PricingOutcome::Priced { .. }
        }
    ));
    assert!(controller.can_book());
    assert_eq!(
        controller.confirmed_pricing().map(|p| p.pricing_token.as_str()),
        Some("tok-abc")
    );

    assert_eq!(
        availability.calls(),
        vec![AvailabilityCall::Calendar {
            listing_id: String::from("listing-42"),
            from: date("2024-06-12"),
            to: date("2024-06-14"),
        }]
    );
    assert_eq!(
        pricing.requests(),
        vec![PricingRequest {
            listing_id: String::from("listing-42"),
            check_in_date: utc(2024, 6, 12, 15, 0),
            check_out_date: utc(2024, 6, 14, 14, 0),
            guests: 1,
            hourly_extension: ExtensionHours::None,
            booking_type: BookingType::Nightly,
        }]
    );
}

#[tokio::test]
async fn test_local_rejection_never_reaches_services() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let records: Vec<RawAvailabilityRecord> =
        vec![RawAvailabilityRecord::new("2024-06-13", "booked")];
    controller.set_calendar(CalendarIndex::build(&records, Tz::UTC));
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    let ControllerEvent::ValidationCompleted { outcome } = &events[0] else {
        panic!("expected ValidationCompleted, got {events:?}");
    };
    assert_eq!(outcome.rejection().unwrap().code(), "date-conflict");
    assert!(availability.calls().is_empty());
    assert!(pricing.requests().is_empty());
    assert!(!controller.can_book());
}

#[tokio::test]
async fn test_remote_conflict_skips_pricing() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability =
        FakeAvailability::with_records(vec![RawAvailabilityRecord::new("2024-06-13", "blocked")]);
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(
        events.last(),
        Some(&ControllerEvent::AvailabilityResult {
            confirmed: false,
            detail: AvailabilityDetail::Conflicts {
                dates: vec![date("2024-06-13")],
                next_available: None,
            },
        })
    );
    assert!(pricing.requests().is_empty());
    assert!(matches!(
        controller.check_state(),
        CheckState::Unavailable { .. }
    ));
}

fn maintenance_record(date: &str, available_after: &str) -> RawAvailabilityRecord {
    let mut record: RawAvailabilityRecord = RawAvailabilityRecord::new(date, "maintenance");
    record.maintenance = Some(RawMaintenance {
        available_after: Some(available_after.to_string()),
        available_hours: None,
    });
    record
}

#[tokio::test]
async fn test_remote_maintenance_cutoff_after_check_in_conflicts() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::with_records(vec![maintenance_record(
        "2024-06-12",
        "2024-06-12T18:00:00",
    )]);
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(
        events.last(),
        Some(&ControllerEvent::AvailabilityResult {
            confirmed: false,
            detail: AvailabilityDetail::Conflicts {
                dates: vec![date("2024-06-12")],
                next_available: None,
            },
        })
    );
    assert!(pricing.requests().is_empty());
    assert!(!controller.can_book());
}

#[tokio::test]
async fn test_remote_maintenance_cutoff_before_check_in_is_usable() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::with_records(vec![maintenance_record(
        "2024-06-12",
        "2024-06-12T13:00:00",
    )]);
    let pricing: FakePricing = FakePricing::priced();

    controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert!(controller.can_book());
    assert_eq!(pricing.requests().len(), 1);
}

#[tokio::test]
async fn test_availability_failure_is_reported_without_pricing() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::failing("timeout");
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(
        events.last(),
        Some(&ControllerEvent::AvailabilityResult {
            confirmed: false,
            detail: AvailabilityDetail::RemoteFailure {
                message: String::from("Service unavailable: timeout"),
            },
        })
    );
    assert!(pricing.requests().is_empty());
    assert_eq!(
        controller.check_state(),
        &CheckState::Failed {
            message: String::from("Service unavailable: timeout")
        }
    );
}

#[tokio::test]
async fn test_pricing_failure_leaves_selection_unbookable() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::failing("missing rate");

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(
        events[2],
        ControllerEvent::PricingResult {
            outcome: PricingOutcome::Failed {
                message: String::from("Invalid response from service: missing rate"),
            },
        }
    );
    assert!(!controller.can_book());
    assert!(controller.confirmed_pricing().is_none());
}

#[tokio::test]
async fn test_hourly_listing_uses_slot_check_in_utc() {
    let kolkata: Tz = parse_timezone("Asia/Kolkata").unwrap();
    let listing: ListingConfig = ListingConfig::new("listing-42", kolkata).with_hourly_booking();
    let mut controller: BookingWindowController = BookingWindowController::new(listing);
    controller
        .apply(Command::SelectDate {
            date: date("2024-06-12"),
        })
        .unwrap();
    controller
        .apply(Command::SetExtension {
            extension: ExtensionHours::Six,
        })
        .unwrap();
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();

    controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    // 15:00 IST is 09:30 UTC; check-out is 14:00 IST + 6h on 2024-06-13
    assert_eq!(
        availability.calls(),
        vec![AvailabilityCall::Slot {
            listing_id: String::from("listing-42"),
            check_in: utc(2024, 6, 12, 9, 30),
            check_out: utc(2024, 6, 13, 14, 30),
            extension: ExtensionHours::Six,
        }]
    );
    let requests: Vec<PricingRequest> = pricing.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].booking_type, BookingType::Hourly);
    assert_eq!(requests[0].hourly_extension, ExtensionHours::Six);
    assert!(controller.can_book());
}

#[tokio::test]
async fn test_slot_conflicts_are_normalized() {
    let listing: ListingConfig = create_test_listing().with_hourly_booking();
    let mut controller: BookingWindowController = BookingWindowController::new(listing);
    controller
        .apply(Command::SelectDate {
            date: date("2024-06-12"),
        })
        .unwrap();
    let availability: FakeAvailability = FakeAvailability::with_slot(TimeSlotAvailability {
        available: false,
        conflicts: Some(SlotConflicts {
            daily_conflicts: vec![
                DailyConflict {
                    date: String::from("2024-06-13T00:00:00Z"),
                },
                DailyConflict {
                    date: String::from("not-a-date"),
                },
                DailyConflict {
                    date: String::from("2024-06-13"),
                },
            ],
        }),
        next_available_slot: Some(NextAvailableSlot {
            start: utc(2024, 6, 14, 15, 0),
        }),
    });
    let pricing: FakePricing = FakePricing::priced();

    let events: Vec<ControllerEvent> = controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();

    assert_eq!(
        events.last(),
        Some(&ControllerEvent::AvailabilityResult {
            confirmed: false,
            detail: AvailabilityDetail::Conflicts {
                dates: vec![date("2024-06-13")],
                next_available: Some(utc(2024, 6, 14, 15, 0)),
            },
        })
    );
    assert!(pricing.requests().is_empty());
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();

    let start: CheckStart = controller.begin_availability_check(test_now()).unwrap();
    let pending: PendingCheck = start.pending.unwrap();

    // The guest changes the party size while the services are working
    controller.apply(Command::SetGuests { guests: 3 }).unwrap();

    let response: CheckResponse = run_check(&pending, &availability, &pricing).await;
    let events: Vec<ControllerEvent> = controller.complete_availability_check(pending.ticket, response);

    assert!(events.is_empty());
    assert!(!controller.can_book());
    assert_eq!(controller.check_state(), &CheckState::Idle);
}

#[tokio::test]
async fn test_fresh_check_after_stale_one_succeeds() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();

    let stale: PendingCheck = controller
        .begin_availability_check(test_now())
        .unwrap()
        .pending
        .unwrap();
    controller
        .apply(Command::SetExtension {
            extension: ExtensionHours::Six,
        })
        .unwrap();
    let fresh: PendingCheck = controller
        .begin_availability_check(test_now())
        .unwrap()
        .pending
        .unwrap();
    assert_ne!(stale.ticket, fresh.ticket);

    let stale_response: CheckResponse = run_check(&stale, &availability, &pricing).await;
    assert!(
        controller
            .complete_availability_check(stale.ticket, stale_response)
            .is_empty()
    );
    assert!(matches!(
        controller.check_state(),
        CheckState::Checking { .. }
    ));

    let fresh_response: CheckResponse = run_check(&fresh, &availability, &pricing).await;
    let events: Vec<ControllerEvent> =
        controller.complete_availability_check(fresh.ticket, fresh_response);

    assert_eq!(events.len(), 2);
    assert!(controller.can_book());
}

#[tokio::test]
async fn test_selection_change_invalidates_confirmation() {
    let mut controller: BookingWindowController =
        create_controller_with_stay("2024-06-12", "2024-06-14");
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();
    controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();
    assert!(controller.can_book());

    controller
        .apply(Command::SetExtension {
            extension: ExtensionHours::Twelve,
        })
        .unwrap();

    assert!(!controller.can_book());
    assert!(controller.confirmed_pricing().is_none());
}

#[tokio::test]
async fn test_failed_check_out_derivation_still_invalidates_confirmation() {
    let listing: ListingConfig = create_test_listing().with_hourly_booking();
    let mut controller: BookingWindowController = BookingWindowController::new(listing);
    controller
        .apply(Command::SelectDate {
            date: date("2024-06-12"),
        })
        .unwrap();
    let availability: FakeAvailability = FakeAvailability::open();
    let pricing: FakePricing = FakePricing::priced();
    controller
        .request_availability_check(&availability, &pricing, test_now())
        .await
        .unwrap();
    assert!(controller.can_book());

    let result = controller.apply(Command::SelectDate {
        date: NaiveDate::MAX,
    });

    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
    assert_eq!(controller.selection().check_in_date, Some(NaiveDate::MAX));
    assert!(!controller.can_book());
    assert!(controller.confirmed_pricing().is_none());
    assert_eq!(controller.check_state(), &CheckState::Idle);
}

#[tokio::test]
async fn test_load_calendar_fetches_six_months_from_today() {
    let mut controller: BookingWindowController = BookingWindowController::new(create_test_listing());
    let availability: FakeAvailability = FakeAvailability::with_records(vec![
        RawAvailabilityRecord::new("2024-06-20", "booked"),
        RawAvailabilityRecord::new("garbage", "booked"),
    ]);

    let days: usize = controller
        .load_calendar(&availability, test_now())
        .await
        .unwrap();

    assert_eq!(days, 1);
    assert!(controller.calendar().is_booked(date("2024-06-20")));
    assert_eq!(
        availability.calls(),
        vec![AvailabilityCall::Calendar {
            listing_id: String::from("listing-42"),
            from: date("2024-06-10"),
            to: date("2024-12-10"),
        }]
    );
}

#[tokio::test]
async fn test_load_calendar_failure_keeps_previous_calendar() {
    let mut controller: BookingWindowController = BookingWindowController::new(create_test_listing());
    let records: Vec<RawAvailabilityRecord> =
        vec![RawAvailabilityRecord::new("2024-06-20", "booked")];
    controller.set_calendar(CalendarIndex::build(&records, Tz::UTC));
    let availability: FakeAvailability = FakeAvailability::failing("down");

    let result: Result<usize, ServiceError> =
        controller.load_calendar(&availability, test_now()).await;

    assert_eq!(
        result,
        Err(ServiceError::Unavailable(String::from("down")))
    );
    assert!(controller.calendar().is_booked(date("2024-06-20")));
}

#[test]
fn test_controller_events_serialize_with_type_tag() {
    let event: ControllerEvent = ControllerEvent::AvailabilityResult {
        confirmed: false,
        detail: AvailabilityDetail::Conflicts {
            dates: vec![date("2024-06-13")],
            next_available: None,
        },
    };

    let json: serde_json::Value = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "availabilityResult");
    assert_eq!(json["confirmed"], false);
    assert_eq!(json["detail"]["kind"], "conflicts");
    assert_eq!(json["detail"]["dates"][0], "2024-06-13");
    assert!(json["detail"]["nextAvailable"].is_null());
}
