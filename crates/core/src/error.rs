// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use stayline_domain::{DomainError, SelectionStep};

/// Errors that can occur while applying commands to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The operation needs a later selection step.
    NotReady {
        /// The step the selection is currently in.
        step: SelectionStep,
    },
    /// An availability check is already outstanding.
    CheckInProgress,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotReady { step } => {
                write!(f, "Selection is not ready: currently {step}")
            }
            Self::CheckInProgress => write!(f, "An availability check is already in progress"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
