//! Schedule entry definition.

use loan_core::types::Date;

/// One installment of a repayment schedule.
///
/// Amounts are kept at full precision; use
/// [`Schedule::rounded`](super::Schedule::rounded) for display.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::ScheduleEntry;
/// use loan_core::types::Date;
///
/// let entry = ScheduleEntry::new(
///     1,
///     Date::from_ymd(2024, 2, 15).unwrap(),
///     1_625.48,
///     100.0,
///     8_374.52,
/// );
///
/// assert!((entry.payment_amount() - 1_725.48).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleEntry {
    /// 1-based installment number.
    period: u32,
    /// Date the installment falls due.
    due_date: Date,
    /// Principal plus interest.
    payment_amount: f64,
    /// Principal repaid by this installment.
    principal_component: f64,
    /// Interest charged by this installment.
    interest_component: f64,
    /// Principal still owed after this installment.
    remaining_principal: f64,
}

impl ScheduleEntry {
    /// Creates an entry; the payment is the sum of its components.
    #[inline]
    pub fn new(
        period: u32,
        due_date: Date,
        principal_component: f64,
        interest_component: f64,
        remaining_principal: f64,
    ) -> Self {
        Self {
            period,
            due_date,
            payment_amount: principal_component + interest_component,
            principal_component,
            interest_component,
            remaining_principal,
        }
    }

    /// Returns the 1-based installment number.
    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Returns the due date.
    #[inline]
    pub fn due_date(&self) -> Date {
        self.due_date
    }

    /// Returns the total amount due.
    #[inline]
    pub fn payment_amount(&self) -> f64 {
        self.payment_amount
    }

    /// Returns the principal share of the payment.
    #[inline]
    pub fn principal_component(&self) -> f64 {
        self.principal_component
    }

    /// Returns the interest share of the payment.
    #[inline]
    pub fn interest_component(&self) -> f64 {
        self.interest_component
    }

    /// Returns the principal outstanding after this installment.
    #[inline]
    pub fn remaining_principal(&self) -> f64 {
        self.remaining_principal
    }

    /// Whether this installment clears the loan.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.remaining_principal == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(remaining: f64) -> ScheduleEntry {
        ScheduleEntry::new(
            3,
            Date::from_ymd(2024, 4, 15).unwrap(),
            1_666.666_666_7,
            66.666_666_7,
            remaining,
        )
    }

    #[test]
    fn test_payment_is_sum_of_components() {
        let e = entry(5_000.0);
        assert_relative_eq!(
            e.payment_amount(),
            e.principal_component() + e.interest_component()
        );
    }

    #[test]
    fn test_accessors() {
        let e = entry(5_000.0);
        assert_eq!(e.period(), 3);
        assert_eq!(e.due_date(), Date::from_ymd(2024, 4, 15).unwrap());
        assert_relative_eq!(e.remaining_principal(), 5_000.0);
        assert!(!e.is_final());
        assert!(entry(0.0).is_final());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(entry(0.0)).unwrap();
        assert_eq!(json["dueDate"], "2024-04-15");
        assert!(json.get("paymentAmount").is_some());
        assert!(json.get("remainingPrincipal").is_some());
    }
}
