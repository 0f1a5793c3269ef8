//! Repayment plan: a schedule tracked through overdue sweeps and payments.

use loan_core::types::{Currency, Date};

use super::error::PlanError;
use super::installment::{Installment, InstallmentStatus};
use crate::schedules::Schedule;

/// Receipt for a posted payment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PostedPayment {
    /// Installment the payment settled.
    pub period: u32,
    /// Its due date.
    pub due_date: Date,
    /// Amount that was due.
    pub amount_due: f64,
    /// Amount paid.
    pub paid_amount: f64,
    /// Date of payment.
    pub paid_on: Date,
    /// Whether the installment was overdue when paid.
    pub was_overdue: bool,
    /// Plan outstanding balance after the payment.
    pub outstanding_after: f64,
    /// Later installments settled because the payment cleared the balance.
    pub settled_ahead: usize,
}

/// Snapshot of a plan's position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanSummary {
    /// Currency of the amounts.
    pub currency: Currency,
    /// Original principal.
    pub total_principal: f64,
    /// Total of all scheduled payments.
    pub total_payment: f64,
    /// Amount still owed.
    pub outstanding: f64,
    /// Due date of the earliest open installment.
    pub next_payment_date: Option<Date>,
    /// Amount of the earliest open installment, zero when settled.
    pub next_payment_amount: f64,
    /// Sum of overdue installment amounts.
    pub overdue_amount: f64,
    /// Number of paid installments.
    pub paid_installments: usize,
    /// Number of installments.
    pub total_installments: usize,
}

/// A repayment schedule with per-installment payment state.
///
/// # Examples
///
/// ```
/// use loan_schedule::plan::{InstallmentStatus, RepaymentPlan};
/// use loan_schedule::schedules::compute_schedule;
/// use loan_core::types::{Currency, Date};
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let schedule = compute_schedule(3_000.0, 90, 12.0, "equal-principal", start).unwrap();
/// let mut plan = RepaymentPlan::from_schedule(&schedule, Currency::CNY);
///
/// plan.post_payment(1_030.0, Date::from_ymd(2024, 2, 10).unwrap()).unwrap();
/// assert_eq!(plan.mark_overdue(Date::from_ymd(2024, 3, 20).unwrap()), 1);
///
/// let summary = plan.summary();
/// assert_eq!(summary.paid_installments, 1);
/// assert_eq!(plan.installments()[1].status(), InstallmentStatus::Overdue);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RepaymentPlan {
    currency: Currency,
    installments: Vec<Installment>,
    total_principal: f64,
    total_payment: f64,
    outstanding: f64,
}

impl RepaymentPlan {
    /// Creates a plan with every installment due and nothing paid.
    pub fn from_schedule(schedule: &Schedule, currency: Currency) -> Self {
        Self {
            currency,
            installments: schedule
                .iter()
                .copied()
                .map(Installment::from_entry)
                .collect(),
            total_principal: schedule.principal(),
            total_payment: schedule.total_payment(),
            outstanding: schedule.total_payment(),
        }
    }

    /// Returns the installments in due-date order.
    #[inline]
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Returns the plan currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the amount still owed.
    #[inline]
    pub fn outstanding(&self) -> f64 {
        self.outstanding
    }

    /// Whether every installment has been paid.
    pub fn is_settled(&self) -> bool {
        self.installments.iter().all(|i| !i.status.is_open())
    }

    /// Marks every due installment whose due date is before `as_of` overdue.
    ///
    /// Returns the number of installments that changed. Running the sweep
    /// again for the same date changes nothing.
    pub fn mark_overdue(&mut self, as_of: Date) -> usize {
        let mut changed = 0;
        for installment in &mut self.installments {
            if installment.status == InstallmentStatus::Due && installment.due_date() < as_of {
                installment.status = InstallmentStatus::Overdue;
                changed += 1;
            }
        }
        changed
    }

    /// Applies a payment to the earliest open installment.
    ///
    /// Amounts are compared after rounding both to the currency's minor
    /// unit; paying more than due is accepted and the surplus reduces the
    /// outstanding balance. Once the balance reaches zero every remaining
    /// open installment is marked paid on the same date, with no paid
    /// amount of its own, and the plan is settled.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidAmount`] for a non-positive or non-finite amount
    /// - [`PlanError::NothingDue`] when the plan is settled
    /// - [`PlanError::Underpayment`] when the amount does not cover the installment
    pub fn post_payment(&mut self, amount: f64, paid_on: Date) -> Result<PostedPayment, PlanError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PlanError::InvalidAmount { amount });
        }

        let currency = self.currency;
        let installment = self
            .installments
            .iter_mut()
            .find(|i| i.status.is_open())
            .ok_or(PlanError::NothingDue)?;

        let due = currency.round(installment.amount_due());
        let offered = currency.round(amount);
        if offered < due {
            return Err(PlanError::Underpayment {
                period: installment.period(),
                due_date: installment.due_date(),
                due,
                offered,
            });
        }

        let was_overdue = installment.status == InstallmentStatus::Overdue;
        installment.status = InstallmentStatus::Paid;
        installment.paid_amount = Some(amount);
        installment.paid_on = Some(paid_on);
        let entry = installment.entry;

        self.outstanding = (self.outstanding - amount).max(0.0);
        let mut settled_ahead = 0;
        if currency.round(self.outstanding) <= 0.0 {
            for later in self.installments.iter_mut().filter(|i| i.status.is_open()) {
                later.status = InstallmentStatus::Paid;
                later.paid_on = Some(paid_on);
                settled_ahead += 1;
            }
        }
        if self.is_settled() {
            self.outstanding = 0.0;
        }

        Ok(PostedPayment {
            period: entry.period(),
            due_date: entry.due_date(),
            amount_due: entry.payment_amount(),
            paid_amount: amount,
            paid_on,
            was_overdue,
            outstanding_after: self.outstanding,
            settled_ahead,
        })
    }

    /// Returns the earliest open installment.
    pub fn next_open(&self) -> Option<&Installment> {
        self.installments.iter().find(|i| i.status.is_open())
    }

    /// Summarises the plan position.
    pub fn summary(&self) -> PlanSummary {
        let next = self.next_open();
        let overdue_amount = self
            .installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Overdue)
            .map(|i| i.amount_due())
            .sum();
        let paid_installments = self
            .installments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .count();

        PlanSummary {
            currency: self.currency,
            total_principal: self.total_principal,
            total_payment: self.total_payment,
            outstanding: self.outstanding,
            next_payment_date: next.map(|i| i.due_date()),
            next_payment_amount: next.map_or(0.0, |i| i.amount_due()),
            overdue_amount,
            paid_installments,
            total_installments: self.installments.len(),
        }
    }
}
