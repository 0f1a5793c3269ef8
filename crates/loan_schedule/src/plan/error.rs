//! Repayment plan error types.

use loan_core::types::Date;
use thiserror::Error;

/// Errors raised while posting payments against a repayment plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlanError {
    /// Payment amount is zero, negative or not finite.
    #[error("Invalid payment amount: {amount}")]
    InvalidAmount {
        /// The offered amount.
        amount: f64,
    },

    /// Every installment is already paid.
    #[error("No installment is due: the plan is settled")]
    NothingDue,

    /// Payment does not cover the installment due.
    #[error("Payment {offered} does not cover installment {period} due {due_date}: {due} owed")]
    Underpayment {
        /// Installment the payment was applied to.
        period: u32,
        /// Its due date.
        due_date: Date,
        /// Amount owed, rounded to the currency's minor unit.
        due: f64,
        /// Amount offered, rounded to the currency's minor unit.
        offered: f64,
    },
}
