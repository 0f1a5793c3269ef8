//! Installment state within a repayment plan.

use std::fmt;

use loan_core::types::Date;

use crate::schedules::ScheduleEntry;

/// Lifecycle of a single installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InstallmentStatus {
    /// Not yet paid and not past its due date.
    Due,
    /// Not paid by its due date.
    Overdue,
    /// Settled.
    Paid,
}

impl InstallmentStatus {
    /// Whether the installment still expects a payment.
    #[inline]
    pub fn is_open(&self) -> bool {
        !matches!(self, InstallmentStatus::Paid)
    }
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallmentStatus::Due => "due",
            InstallmentStatus::Overdue => "overdue",
            InstallmentStatus::Paid => "paid",
        };
        f.write_str(s)
    }
}

/// One schedule entry tracked through payment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Installment {
    pub(crate) entry: ScheduleEntry,
    pub(crate) status: InstallmentStatus,
    pub(crate) paid_amount: Option<f64>,
    pub(crate) paid_on: Option<Date>,
}

impl Installment {
    pub(crate) fn from_entry(entry: ScheduleEntry) -> Self {
        Self {
            entry,
            status: InstallmentStatus::Due,
            paid_amount: None,
            paid_on: None,
        }
    }

    /// Returns the 1-based period number.
    #[inline]
    pub fn period(&self) -> u32 {
        self.entry.period()
    }

    /// Returns the due date.
    #[inline]
    pub fn due_date(&self) -> Date {
        self.entry.due_date()
    }

    /// Returns the amount due at full precision.
    #[inline]
    pub fn amount_due(&self) -> f64 {
        self.entry.payment_amount()
    }

    /// Returns the underlying schedule entry.
    #[inline]
    pub fn entry(&self) -> &ScheduleEntry {
        &self.entry
    }

    /// Returns the current status.
    #[inline]
    pub fn status(&self) -> InstallmentStatus {
        self.status
    }

    /// Returns the amount paid against this installment.
    ///
    /// `None` while open, and for installments settled by an earlier
    /// payment that cleared the plan balance.
    #[inline]
    pub fn paid_amount(&self) -> Option<f64> {
        self.paid_amount
    }

    /// Returns the payment date, once paid.
    #[inline]
    pub fn paid_on(&self) -> Option<Date> {
        self.paid_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_open() {
        assert!(InstallmentStatus::Due.is_open());
        assert!(InstallmentStatus::Overdue.is_open());
        assert!(!InstallmentStatus::Paid.is_open());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(InstallmentStatus::Overdue.to_string(), "overdue");
    }

    #[test]
    fn test_from_entry_starts_due() {
        let entry = ScheduleEntry::new(
            1,
            Date::from_ymd(2024, 2, 15).unwrap(),
            500.0,
            5.0,
            500.0,
        );
        let installment = Installment::from_entry(entry);
        assert_eq!(installment.status(), InstallmentStatus::Due);
        assert_eq!(installment.amount_due(), 505.0);
        assert!(installment.paid_amount().is_none());
        assert!(installment.paid_on().is_none());
    }
}
