//! Schedule calculation error types.

use loan_core::types::DateError;
use thiserror::Error;

/// Errors that can occur while validating loan terms or computing a schedule.
///
/// Every variant is detected before any amortization arithmetic runs; a
/// failed computation never yields a partial schedule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Loan terms are malformed or out of range.
    #[error("Invalid loan terms: {reason}")]
    InvalidTerms {
        /// Which constraint was violated.
        reason: String,
    },

    /// Repayment method tag is not recognised.
    #[error("Unsupported repayment method: '{tag}'")]
    UnsupportedMethod {
        /// The tag as supplied by the caller.
        tag: String,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Due date arithmetic overflow.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_terms(reason: impl Into<String>) -> Self {
        ScheduleError::InvalidTerms {
            reason: reason.into(),
        }
    }
}

impl From<DateError> for ScheduleError {
    fn from(err: DateError) -> Self {
        ScheduleError::DateOverflow {
            reason: err.to_string(),
        }
    }
}
