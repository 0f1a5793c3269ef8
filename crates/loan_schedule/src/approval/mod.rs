//! Loan approval checks over computed schedules.
//!
//! An application is affordable when a share of the applicant's monthly
//! income (two thirds by default) covers the schedule's first installment.
//! The first installment is the level payment of an equal-installment loan,
//! the highest payment of an equal-principal loan and the whole repayment of
//! a short-term loan, so the check reads the same schedule used for display
//! and payment posting.

mod affordability;
mod error;

pub use affordability::{
    assess_affordability, Affordability, AffordabilityPolicy, ApprovalDecision,
    DEFAULT_INCOME_SHARE,
};
pub use error::ApprovalError;
