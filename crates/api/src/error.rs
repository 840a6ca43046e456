// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use stayline_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
/// Booking rule rejections are not errors; they are successful responses
/// with `valid: false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
}

/// Attributes a domain parsing error to a specific request field.
pub fn invalid_field(field: &str) -> impl FnOnce(DomainError) -> ApiError + '_ {
    move |err: DomainError| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}
