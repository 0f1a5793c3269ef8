//! Income-based affordability check.

use std::fmt;

use super::error::ApprovalError;
use crate::schedules::Schedule;

/// Share of monthly income that may go to a single installment.
pub const DEFAULT_INCOME_SHARE: f64 = 2.0 / 3.0;

/// Outcome of an affordability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ApprovalDecision {
    /// The installment fits within the income share.
    Approved,
    /// The installment exceeds the income share.
    Rejected,
}

impl ApprovalDecision {
    /// Whether the application was approved.
    #[inline]
    pub fn is_approved(&self) -> bool {
        matches!(self, ApprovalDecision::Approved)
    }
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApprovalDecision::Approved => "approved",
            ApprovalDecision::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Result of checking a schedule against an applicant's income.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Affordability {
    /// Approved or rejected.
    pub decision: ApprovalDecision,
    /// First installment of the schedule, at full precision.
    pub required_payment: f64,
    /// Income share available for the installment.
    pub payment_capacity: f64,
}

/// Affordability rule: reject when `income * share < first installment`.
///
/// # Examples
///
/// ```
/// use loan_schedule::approval::{AffordabilityPolicy, ApprovalDecision};
/// use loan_schedule::schedules::compute_schedule;
/// use loan_core::types::Date;
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let schedule = compute_schedule(10_000.0, 180, 12.0, "equal-installment", start).unwrap();
///
/// let policy = AffordabilityPolicy::default();
/// assert_eq!(policy.assess(&schedule, 3_000.0).unwrap().decision, ApprovalDecision::Approved);
/// assert_eq!(policy.assess(&schedule, 2_000.0).unwrap().decision, ApprovalDecision::Rejected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityPolicy {
    income_share: f64,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            income_share: DEFAULT_INCOME_SHARE,
        }
    }
}

impl AffordabilityPolicy {
    /// Creates a policy allowing `income_share` of monthly income per installment.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidIncomeShare`] unless `0 < income_share <= 1`.
    pub fn new(income_share: f64) -> Result<Self, ApprovalError> {
        if !(income_share > 0.0 && income_share <= 1.0) {
            return Err(ApprovalError::InvalidIncomeShare {
                share: income_share,
            });
        }
        Ok(Self { income_share })
    }

    /// Returns the income share.
    #[inline]
    pub fn income_share(&self) -> f64 {
        self.income_share
    }

    /// Checks the schedule's first installment against `monthly_income`.
    ///
    /// An installment exactly equal to the capacity is approved.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidIncome`] for a negative or non-finite income.
    pub fn assess(
        &self,
        schedule: &Schedule,
        monthly_income: f64,
    ) -> Result<Affordability, ApprovalError> {
        if !monthly_income.is_finite() || monthly_income < 0.0 {
            return Err(ApprovalError::InvalidIncome {
                income: monthly_income,
            });
        }

        let required_payment = schedule.first().payment_amount();
        let payment_capacity = monthly_income * self.income_share;
        let decision = if payment_capacity < required_payment {
            ApprovalDecision::Rejected
        } else {
            ApprovalDecision::Approved
        };

        Ok(Affordability {
            decision,
            required_payment,
            payment_capacity,
        })
    }
}

/// Checks a schedule with the default two-thirds income share.
pub fn assess_affordability(
    schedule: &Schedule,
    monthly_income: f64,
) -> Result<Affordability, ApprovalError> {
    AffordabilityPolicy::default().assess(schedule, monthly_income)
}
