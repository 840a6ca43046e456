// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::check::run_check;
use crate::command::Command;
use crate::error::CoreError;
use crate::event::{AvailabilityDetail, ControllerEvent, PricingOutcome};
use crate::listing::{AVAILABILITY_FETCH_MONTHS, ListingConfig};
use crate::ports::{AvailabilityService, PricingBreakdown, PricingService, ServiceError};
use crate::state::{
    AvailabilityVerdict, CheckResponse, CheckStart, CheckState, CheckTicket, PendingCheck,
};
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use stayline_domain::calendar_date::{add_days, today};
use stayline_domain::{
    CalendarIndex, CheckInSlot, DomainError, RawAvailabilityRecord, ResolvedWindow,
    SelectionStep, StaySelection, ValidationOutcome, legal_check_in_times, validate,
};
use tracing::{debug, info};

/// Owns a guest's stay selection for one listing and mediates between the
/// local rules and the remote services.
///
/// The selection moves `awaiting-checkin → awaiting-checkout → complete`
/// and can be reset from any step. Every selection change invalidates a
/// confirmed or outstanding availability check.
#[derive(Debug, Clone)]
pub struct BookingWindowController {
    listing: ListingConfig,
    index: CalendarIndex,
    selection: StaySelection,
    validation: Option<ValidationOutcome>,
    check: CheckState,
    generation: u64,
}

impl BookingWindowController {
    /// Creates a controller with an empty calendar.
    #[must_use]
    pub fn new(listing: ListingConfig) -> Self {
        let index: CalendarIndex = CalendarIndex::empty(listing.timezone);
        let selection: StaySelection = StaySelection::new(listing.default_check_in_time);
        Self {
            listing,
            index,
            selection,
            validation: None,
            check: CheckState::Idle,
            generation: 0,
        }
    }

    /// The listing being booked.
    #[must_use]
    pub const fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &StaySelection {
        &self.selection
    }

    /// The calendar the selection is checked against.
    #[must_use]
    pub const fn calendar(&self) -> &CalendarIndex {
        &self.index
    }

    /// The last local validation of the current selection, if any.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationOutcome> {
        self.validation.as_ref()
    }

    /// Remote confirmation state.
    #[must_use]
    pub const fn check_state(&self) -> &CheckState {
        &self.check
    }

    /// Whether the current selection holds a fresh confirmation and price.
    #[must_use]
    pub const fn can_book(&self) -> bool {
        matches!(self.check, CheckState::Confirmed { .. })
    }

    /// Pricing of the confirmed selection, token included.
    #[must_use]
    pub const fn confirmed_pricing(&self) -> Option<&PricingBreakdown> {
        match &self.check {
            CheckState::Confirmed { pricing, .. } => Some(pricing),
            _ => None,
        }
    }

    /// Legal check-in slots for the selected check-in date.
    ///
    /// Empty until a check-in date is chosen.
    #[must_use]
    pub fn check_in_times(&self, now: DateTime<Utc>) -> Vec<CheckInSlot> {
        self.selection
            .check_in_date
            .map(|date| legal_check_in_times(date, &self.index, now))
            .unwrap_or_default()
    }

    /// Validates the current selection without touching the services.
    #[must_use]
    pub fn validate(&self, now: DateTime<Utc>) -> ValidationOutcome {
        validate(
            &self.selection,
            self.selection.check_out_date,
            &self.index,
            &self.listing.policy,
            now,
        )
    }

    /// Replaces the calendar. Confirmation is invalidated because
    /// availability may have changed.
    pub fn set_calendar(&mut self, index: CalendarIndex) {
        self.index = index;
        self.invalidate();
    }

    /// Fetches the listing's calendar from today through
    /// `AVAILABILITY_FETCH_MONTHS` ahead and rebuilds the index.
    ///
    /// # Returns
    ///
    /// The number of calendar days indexed.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; the previous calendar is kept.
    pub async fn load_calendar<A>(
        &mut self,
        service: &A,
        now: DateTime<Utc>,
    ) -> Result<usize, ServiceError>
    where
        A: AvailabilityService + ?Sized,
    {
        let from: NaiveDate = today(now, self.listing.timezone);
        let to: NaiveDate = from
            .checked_add_months(Months::new(AVAILABILITY_FETCH_MONTHS))
            .unwrap_or(NaiveDate::MAX);

        let records: Vec<RawAvailabilityRecord> = service
            .get_availability(&self.listing.listing_id, from, to)
            .await?;
        let index: CalendarIndex = CalendarIndex::build(&records, self.listing.timezone);
        info!(
            listing = %self.listing.listing_id,
            records = records.len(),
            days = index.len(),
            "Calendar loaded"
        );
        let days: usize = index.len();
        self.set_calendar(index);
        Ok(days)
    }

    /// Applies a command to the selection.
    ///
    /// # Returns
    ///
    /// The events emitted. Empty when the command changed nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The guest count is zero
    /// - A check-out or next-day time is chosen before any check-in date
    /// - Advancing the check-in date overflows
    /// - Deriving the check-out of an hourly listing overflows, in which case
    ///   the new check-in is kept and any earlier check result is dropped
    pub fn apply(&mut self, command: Command) -> Result<Vec<ControllerEvent>, CoreError> {
        let before: StaySelection = self.selection.clone();
        let mut listing_changed: bool = false;

        match command {
            Command::SelectDate { date } => self.select_date(date),
            Command::SetCheckOutDate { date } => {
                if self.selection.check_in_date.is_none() {
                    return Err(CoreError::NotReady {
                        step: self.selection.selection_step,
                    });
                }
                self.selection.check_out_date = Some(date);
                self.selection.check_out_explicit = true;
                self.selection.selection_step = SelectionStep::Complete;
            }
            Command::SetCheckInTime { time, next_day } => self.set_check_in_time(time, next_day)?,
            Command::SetExtension { extension } => {
                self.selection.extension_hours = extension;
            }
            Command::SetGuests { guests } => {
                if guests == 0 {
                    return Err(CoreError::DomainViolation(DomainError::InvalidGuestCount(
                        guests,
                    )));
                }
                self.selection.guests = guests;
            }
            Command::Reset => {
                self.selection = StaySelection {
                    check_in_date: None,
                    check_out_date: None,
                    check_out_explicit: false,
                    selection_step: SelectionStep::AwaitingCheckIn,
                    last_auto_adjusted_date: None,
                    ..self.selection.clone()
                };
            }
            Command::ChangeListing { listing } => {
                let guests: u32 = self.selection.guests;
                self.index = CalendarIndex::empty(listing.timezone);
                self.selection = StaySelection {
                    guests,
                    ..StaySelection::new(listing.default_check_in_time)
                };
                debug!(listing = %listing.listing_id, "Listing changed");
                self.listing = listing;
                listing_changed = true;
            }
        }

        if let Err(err) = self.auto_adjust() {
            self.invalidate();
            return Err(err);
        }

        if self.selection == before && !listing_changed {
            return Ok(Vec::new());
        }

        debug!(
            step = %self.selection.selection_step,
            check_in = ?self.selection.check_in_date,
            check_out = ?self.selection.check_out_date,
            "Selection changed"
        );
        self.invalidate();
        Ok(vec![ControllerEvent::SelectionChanged {
            selection: self.selection.clone(),
        }])
    }

    /// Validates the selection and, when valid, prepares the remote check.
    ///
    /// A rejected selection never reaches the services: `pending` is `None`
    /// and the events carry the rejection.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A check is already outstanding
    /// - The selection is not complete
    pub fn begin_availability_check(&mut self, now: DateTime<Utc>) -> Result<CheckStart, CoreError> {
        if matches!(self.check, CheckState::Checking { .. }) {
            return Err(CoreError::CheckInProgress);
        }
        if self.selection.selection_step != SelectionStep::Complete {
            return Err(CoreError::NotReady {
                step: self.selection.selection_step,
            });
        }

        let outcome: ValidationOutcome = self.validate(now);
        self.validation = Some(outcome.clone());
        let events: Vec<ControllerEvent> = vec![ControllerEvent::ValidationCompleted {
            outcome: outcome.clone(),
        }];

        let ValidationOutcome::Ok(window) = outcome else {
            self.check = CheckState::Idle;
            return Ok(CheckStart {
                events,
                pending: None,
            });
        };

        self.generation += 1;
        let ticket: CheckTicket = CheckTicket::new(self.generation);
        self.check = CheckState::Checking { ticket, window };

        Ok(CheckStart {
            events,
            pending: Some(PendingCheck {
                ticket,
                listing_id: self.listing.listing_id.clone(),
                timezone: self.listing.timezone,
                hourly_booking: self.listing.hourly_booking,
                window,
                guests: self.selection.guests,
                extension: self.selection.extension_hours,
            }),
        })
    }

    /// Records the answer to a check started with `begin_availability_check`.
    ///
    /// Answers for a ticket that is no longer current are discarded and emit
    /// nothing.
    pub fn complete_availability_check(
        &mut self,
        ticket: CheckTicket,
        response: CheckResponse,
    ) -> Vec<ControllerEvent> {
        let window: ResolvedWindow = match &self.check {
            CheckState::Checking {
                ticket: current,
                window,
            } if *current == ticket => *window,
            _ => {
                debug!(
                    generation = ticket.generation(),
                    current = self.generation,
                    "Discarding stale availability response"
                );
                return Vec::new();
            }
        };

        match response.availability {
            AvailabilityVerdict::Available => {
                let mut events: Vec<ControllerEvent> = vec![ControllerEvent::AvailabilityResult {
                    confirmed: true,
                    detail: AvailabilityDetail::Confirmed,
                }];
                match response.pricing {
                    Some(Ok(pricing)) => {
                        events.push(ControllerEvent::PricingResult {
                            outcome: PricingOutcome::Priced {
                                breakdown: pricing.clone(),
                            },
                        });
                        self.check = CheckState::Confirmed { window, pricing };
                    }
                    Some(Err(err)) => {
                        let message: String = err.to_string();
                        events.push(ControllerEvent::PricingResult {
                            outcome: PricingOutcome::Failed {
                                message: message.clone(),
                            },
                        });
                        self.check = CheckState::Failed { message };
                    }
                    None => {
                        let message: String = String::from("Pricing was not requested");
                        events.push(ControllerEvent::PricingResult {
                            outcome: PricingOutcome::Failed {
                                message: message.clone(),
                            },
                        });
                        self.check = CheckState::Failed { message };
                    }
                }
                events
            }
            AvailabilityVerdict::Conflicts {
                dates,
                next_available,
            } => {
                let detail: AvailabilityDetail = AvailabilityDetail::Conflicts {
                    dates,
                    next_available,
                };
                self.check = CheckState::Unavailable {
                    window,
                    detail: detail.clone(),
                };
                vec![ControllerEvent::AvailabilityResult {
                    confirmed: false,
                    detail,
                }]
            }
            AvailabilityVerdict::Failed(err) => {
                let message: String = err.to_string();
                self.check = CheckState::Failed {
                    message: message.clone(),
                };
                vec![ControllerEvent::AvailabilityResult {
                    confirmed: false,
                    detail: AvailabilityDetail::RemoteFailure { message },
                }]
            }
        }
    }

    /// Validates, asks the services and records the answer in one call.
    ///
    /// Hosts that keep accepting commands while the services are awaited
    /// should use the three-step form instead.
    ///
    /// # Errors
    ///
    /// Same as `begin_availability_check`.
    pub async fn request_availability_check<A, P>(
        &mut self,
        availability: &A,
        pricing: &P,
        now: DateTime<Utc>,
    ) -> Result<Vec<ControllerEvent>, CoreError>
    where
        A: AvailabilityService + ?Sized,
        P: PricingService + ?Sized,
    {
        let CheckStart {
            mut events,
            pending,
        } = self.begin_availability_check(now)?;

        if let Some(pending) = pending {
            let response: CheckResponse = run_check(&pending, availability, pricing).await;
            events.extend(self.complete_availability_check(pending.ticket, response));
        }
        Ok(events)
    }

    fn select_date(&mut self, date: NaiveDate) {
        let selection: &mut StaySelection = &mut self.selection;
        match (selection.selection_step, selection.check_in_date) {
            (SelectionStep::AwaitingCheckOut, Some(check_in)) if date == check_in => {}
            (SelectionStep::AwaitingCheckOut, Some(check_in)) if date > check_in => {
                selection.check_out_date = Some(date);
                selection.check_out_explicit = true;
                selection.selection_step = SelectionStep::Complete;
            }
            _ => {
                selection.check_in_date = Some(date);
                selection.check_out_date = None;
                selection.check_out_explicit = false;
                selection.selection_step = SelectionStep::AwaitingCheckOut;
            }
        }
    }

    fn set_check_in_time(
        &mut self,
        time: NaiveTime,
        next_day: bool,
    ) -> Result<(), CoreError> {
        if !next_day {
            self.selection.check_in_time = time;
            return Ok(());
        }

        let Some(check_in) = self.selection.check_in_date else {
            return Err(CoreError::NotReady {
                step: self.selection.selection_step,
            });
        };
        let advanced: NaiveDate = add_days(check_in, 1)?;

        self.selection.check_in_time = time;
        self.selection.check_in_date = Some(advanced);
        if self
            .selection
            .check_out_date
            .is_some_and(|check_out| check_out <= advanced)
        {
            self.selection.check_out_date = None;
            self.selection.check_out_explicit = false;
            self.selection.selection_step = SelectionStep::AwaitingCheckOut;
        }
        Ok(())
    }

    /// Derives the check-out for hourly listings once per check-in date.
    fn auto_adjust(&mut self) -> Result<(), CoreError> {
        if !self.listing.hourly_booking || self.selection.check_out_explicit {
            return Ok(());
        }
        let Some(check_in) = self.selection.check_in_date else {
            return Ok(());
        };
        if self.selection.last_auto_adjusted_date == Some(check_in) {
            return Ok(());
        }

        let check_out: NaiveDate = add_days(check_in, u64::from(self.listing.auto_stay_nights()))?;
        debug!(%check_in, %check_out, "Check-out derived for hourly listing");
        self.selection.check_out_date = Some(check_out);
        self.selection.last_auto_adjusted_date = Some(check_in);
        self.selection.selection_step = SelectionStep::Complete;
        Ok(())
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.validation = None;
        self.check = CheckState::Idle;
    }
}
