//! Repayment plan tracking.
//!
//! A [`RepaymentPlan`] follows a computed schedule through its life: the
//! overdue sweep, payment posting against the earliest open installment and
//! the position summary shown to borrowers and servicing staff. Storage and
//! notification of the plan belong to the caller.

mod error;
mod installment;
mod tracker;

pub use error::PlanError;
pub use installment::{Installment, InstallmentStatus};
pub use tracker::{PlanSummary, PostedPayment, RepaymentPlan};
