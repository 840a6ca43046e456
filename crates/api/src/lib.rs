// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use handlers::{check_in_times, resolve_stay, validate_stay};
pub use request_response::{
    CheckInSlotInfo, CheckInTimesRequest, CheckInTimesResponse, RejectionInfo, ResolveRequest,
    ValidateRequest, ValidateResponse, WindowInfo,
};
