//! Repayment schedule calculation.
//!
//! This module provides:
//! - [`LoanTerms`]: Validated loan inputs (principal, term, rate, method, start date)
//! - [`RepaymentMethod`]: Equal installment, equal principal or single installment
//! - [`ScheduleCalculator`]: Pure `LoanTerms → Schedule` computation
//! - [`Schedule`] / [`ScheduleEntry`]: The resulting period-by-period plan
//! - [`RoundedSchedule`]: Display view rounded to a currency's minor unit
//!
//! # Examples
//!
//! ```
//! use loan_schedule::schedules::{LoanTerms, RepaymentMethod, ScheduleCalculator, Term};
//! use loan_core::types::{Currency, Date};
//!
//! let terms = LoanTerms::builder()
//!     .principal(10_000.0)
//!     .term(Term::Days(180))
//!     .annual_rate_percent(12.0)
//!     .method(RepaymentMethod::EqualInstallment)
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let schedule = ScheduleCalculator::compute(&terms).unwrap();
//! let view = schedule.rounded(Currency::CNY);
//!
//! assert_eq!(view.entries.len(), 6);
//! assert_eq!(view.entries[0].payment_amount, 1725.48);
//! assert_eq!(view.entries[5].remaining_principal, 0.0);
//! ```

mod calculator;
mod entry;
mod error;
mod method;
mod schedule;
mod terms;

pub use calculator::{
    compute_schedule, equal_installment_payment, equal_principal_total_interest,
    ScheduleCalculator,
};
pub use entry::ScheduleEntry;
pub use error::ScheduleError;
pub use method::RepaymentMethod;
pub use schedule::{RoundedEntry, RoundedSchedule, Schedule};
pub use terms::{
    standard_days_to_months, LoanTerms, LoanTermsBuilder, ResolvedTerm, Term, TermMapping,
    SHORT_TERM_MAX_DAYS,
};
