// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, invalid_field};
use crate::request_response::{
    CheckInSlotInfo, CheckInTimesRequest, CheckInTimesResponse, RejectionInfo, ResolveRequest,
    ValidateRequest, ValidateResponse, WindowInfo,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use stayline_domain::calendar_date::{parse_calendar_date, parse_time_of_day, parse_timezone};
use stayline_domain::{
    CalendarIndex, CheckInSlot, DEFAULT_CHECK_IN_TIME, ExtensionHours, Rejection,
    RejectionReason, ResolvedWindow, SelectionStep, StayPolicy, StaySelection, Tz,
    ValidationOutcome, legal_check_in_times, resolve, validate,
};
use tracing::debug;

/// Lists the legal check-in times for a date.
///
/// # Arguments
///
/// * `request` - The date, calendar records and optional timezone and clock
/// * `default_timezone` - Timezone used when the request names none
/// * `now` - Current instant, used when the request carries no `now`
///
/// # Errors
///
/// Returns an error if:
/// - The timezone, date or `now` cannot be parsed
pub fn check_in_times(
    request: &CheckInTimesRequest,
    default_timezone: Tz,
    now: DateTime<Utc>,
) -> Result<CheckInTimesResponse, ApiError> {
    let tz: Tz = request_timezone(request.timezone.as_deref(), default_timezone)?;
    let now: DateTime<Utc> = request_now(request.now.as_deref(), now)?;
    let date: NaiveDate = parse_calendar_date(&request.date, tz).map_err(invalid_field("date"))?;

    let index: CalendarIndex = CalendarIndex::build(&request.records, tz);
    let slots: Vec<CheckInSlot> = legal_check_in_times(date, &index, now);
    debug!(%date, slots = slots.len(), "Computed check-in times");

    Ok(CheckInTimesResponse {
        date,
        slots: slots
            .iter()
            .map(|slot| CheckInSlotInfo {
                time: slot.time.format("%H:%M").to_string(),
                next_day: slot.next_day,
            })
            .collect(),
    })
}

/// Resolves the check-in and check-out instants of a stay.
///
/// # Errors
///
/// Returns an error if:
/// - Any field cannot be parsed
/// - The check-out date is before the check-in date
pub fn resolve_stay(
    request: &ResolveRequest,
    default_timezone: Tz,
) -> Result<WindowInfo, ApiError> {
    let tz: Tz = request_timezone(request.timezone.as_deref(), default_timezone)?;
    let check_in_date: NaiveDate =
        parse_calendar_date(&request.check_in_date, tz).map_err(invalid_field("checkInDate"))?;
    let check_out_date: NaiveDate =
        parse_calendar_date(&request.check_out_date, tz).map_err(invalid_field("checkOutDate"))?;
    let check_in_time: NaiveTime = request_time(request.check_in_time.as_deref())?;
    let extension: ExtensionHours = request_extension(request.extension_hours)?;

    if check_out_date < check_in_date {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("checkout_not_before_checkin"),
            message: format!(
                "Check-out date {check_out_date} is before check-in date {check_in_date}"
            ),
        });
    }

    let window: ResolvedWindow = resolve(check_in_date, check_in_time, check_out_date, extension);
    Ok(window_info(&window, tz))
}

/// Validates a stay selection against the supplied calendar.
///
/// Rule violations are reported in the response, not as errors.
///
/// # Errors
///
/// Returns an error if:
/// - Any field cannot be parsed
pub fn validate_stay(
    request: &ValidateRequest,
    default_timezone: Tz,
    now: DateTime<Utc>,
) -> Result<ValidateResponse, ApiError> {
    let tz: Tz = request_timezone(request.timezone.as_deref(), default_timezone)?;
    let now: DateTime<Utc> = request_now(request.now.as_deref(), now)?;
    let check_in_date: Option<NaiveDate> = request
        .check_in_date
        .as_deref()
        .map(|raw| parse_calendar_date(raw, tz))
        .transpose()
        .map_err(invalid_field("checkInDate"))?;
    let check_out_date: Option<NaiveDate> = request
        .check_out_date
        .as_deref()
        .map(|raw| parse_calendar_date(raw, tz))
        .transpose()
        .map_err(invalid_field("checkOutDate"))?;
    let check_in_time: NaiveTime = request_time(request.check_in_time.as_deref())?;
    let extension: ExtensionHours = request_extension(request.extension_hours)?;

    let selection: StaySelection = StaySelection {
        check_in_date,
        check_in_time,
        check_out_date,
        check_out_explicit: check_out_date.is_some(),
        extension_hours: extension,
        selection_step: match (check_in_date, check_out_date) {
            (Some(_), Some(_)) => SelectionStep::Complete,
            (Some(_), None) => SelectionStep::AwaitingCheckOut,
            _ => SelectionStep::AwaitingCheckIn,
        },
        ..StaySelection::default()
    };
    let policy: StayPolicy = StayPolicy {
        min_nights: request.min_nights,
    };
    let index: CalendarIndex = CalendarIndex::build(&request.records, tz);

    let response: ValidateResponse =
        match validate(&selection, check_out_date, &index, &policy, now) {
            ValidationOutcome::Ok(window) => ValidateResponse {
                valid: true,
                window: Some(window_info(&window, tz)),
                rejection: None,
            },
            ValidationOutcome::Rejected(rejection) => ValidateResponse {
                valid: false,
                window: None,
                rejection: Some(rejection_info(&rejection)),
            },
        };
    Ok(response)
}

fn request_timezone(raw: Option<&str>, default_timezone: Tz) -> Result<Tz, ApiError> {
    raw.map_or(Ok(default_timezone), |name| {
        parse_timezone(name).map_err(invalid_field("timezone"))
    })
}

fn request_now(raw: Option<&str>, now: DateTime<Utc>) -> Result<DateTime<Utc>, ApiError> {
    let Some(raw) = raw else {
        return Ok(now);
    };
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| ApiError::InvalidInput {
            field: String::from("now"),
            message: format!("Invalid instant '{raw}': {err}"),
        })
}

fn request_time(raw: Option<&str>) -> Result<NaiveTime, ApiError> {
    raw.map_or(Ok(DEFAULT_CHECK_IN_TIME), |raw| {
        parse_time_of_day(raw).map_err(invalid_field("checkInTime"))
    })
}

fn request_extension(raw: Option<u8>) -> Result<ExtensionHours, ApiError> {
    raw.map_or(Ok(ExtensionHours::None), |hours| {
        ExtensionHours::try_from(hours).map_err(invalid_field("extensionHours"))
    })
}

fn window_info(window: &ResolvedWindow, tz: Tz) -> WindowInfo {
    let (check_in_utc, check_out_utc): (DateTime<Utc>, DateTime<Utc>) = window.to_utc(tz);
    WindowInfo {
        check_in: window.check_in,
        check_out: window.check_out,
        check_in_utc,
        check_out_utc,
        nights: window.nights,
        occupied_dates: window.occupied_dates().collect(),
    }
}

fn rejection_info(rejection: &Rejection) -> RejectionInfo {
    let scope: Option<String> = match &rejection.reason {
        RejectionReason::DateConflict { scope, .. } => Some(scope.as_str().to_string()),
        _ => None,
    };
    RejectionInfo {
        code: rejection.code().to_string(),
        message: rejection.message.clone(),
        detail: rejection.detail(),
        scope,
    }
}
