//! Approval error types.

use thiserror::Error;

/// Errors raised by the affordability check.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApprovalError {
    /// Monthly income is negative or not finite.
    #[error("Invalid monthly income: {income}")]
    InvalidIncome {
        /// The supplied income.
        income: f64,
    },

    /// Income share is outside (0, 1].
    #[error("Invalid income share: {share}, must be in (0, 1]")]
    InvalidIncomeShare {
        /// The supplied share.
        share: f64,
    },
}
