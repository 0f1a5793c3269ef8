//! Schedule and rounded schedule views.

use loan_core::types::{Currency, Date};

use super::entry::ScheduleEntry;
use super::method::RepaymentMethod;
use super::terms::TermMapping;

/// A complete repayment schedule, period 1..N in chronological order.
///
/// Totals are sums over the entries, so `total_payment` equals
/// `total_principal + total_interest` up to floating-point addition.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::{compute_schedule, RepaymentMethod};
/// use loan_core::types::Date;
///
/// let schedule = compute_schedule(
///     10_000.0,
///     180,
///     12.0,
///     "equal-installment",
///     Date::from_ymd(2024, 1, 15).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(schedule.len(), 6);
/// assert_eq!(schedule.method(), RepaymentMethod::EqualInstallment);
/// assert_eq!(schedule.last().remaining_principal(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    method: RepaymentMethod,
    term_mapping: TermMapping,
    principal: f64,
    total_principal: f64,
    total_interest: f64,
    total_payment: f64,
}

impl Schedule {
    /// Assembles a schedule from non-empty entries and derives the totals.
    pub(crate) fn new(
        entries: Vec<ScheduleEntry>,
        method: RepaymentMethod,
        term_mapping: TermMapping,
        principal: f64,
    ) -> Self {
        debug_assert!(!entries.is_empty(), "schedule must have at least one entry");

        let total_principal = entries.iter().map(|e| e.principal_component()).sum();
        let total_interest = entries.iter().map(|e| e.interest_component()).sum();
        let total_payment = entries.iter().map(|e| e.payment_amount()).sum();

        Self {
            entries,
            method,
            term_mapping,
            principal,
            total_principal,
            total_interest,
            total_payment,
        }
    }

    /// Returns the entries.
    #[inline]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Returns the number of installments.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the schedule is empty. Computed schedules never are.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter()
    }

    /// Returns the first installment.
    #[inline]
    pub fn first(&self) -> &ScheduleEntry {
        &self.entries[0]
    }

    /// Returns the final installment.
    #[inline]
    pub fn last(&self) -> &ScheduleEntry {
        &self.entries[self.entries.len() - 1]
    }

    /// Returns the effective repayment method.
    #[inline]
    pub fn method(&self) -> RepaymentMethod {
        self.method
    }

    /// Returns how the loan term was interpreted.
    #[inline]
    pub fn term_mapping(&self) -> TermMapping {
        self.term_mapping
    }

    /// Returns the original principal.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Returns the sum of principal components.
    #[inline]
    pub fn total_principal(&self) -> f64 {
        self.total_principal
    }

    /// Returns the sum of interest components.
    #[inline]
    pub fn total_interest(&self) -> f64 {
        self.total_interest
    }

    /// Returns the sum of all payments.
    #[inline]
    pub fn total_payment(&self) -> f64 {
        self.total_payment
    }

    /// Returns the due date of the final installment.
    #[inline]
    pub fn maturity_date(&self) -> Date {
        self.last().due_date()
    }

    /// Returns the installment with the given 1-based period number.
    pub fn entry_for_period(&self, period: u32) -> Option<&ScheduleEntry> {
        let index = usize::try_from(period).ok()?.checked_sub(1)?;
        self.entries.get(index)
    }

    /// Returns the first installment falling due on or after `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_schedule::schedules::compute_schedule;
    /// use loan_core::types::Date;
    ///
    /// let schedule = compute_schedule(
    ///     6_000.0, 180, 12.0, "equal-principal",
    ///     Date::from_ymd(2024, 1, 15).unwrap(),
    /// ).unwrap();
    ///
    /// let next = schedule.next_due_on_or_after(Date::from_ymd(2024, 3, 1).unwrap());
    /// assert_eq!(next.unwrap().period(), 2);
    /// assert!(schedule.next_due_on_or_after(Date::from_ymd(2025, 1, 1).unwrap()).is_none());
    /// ```
    pub fn next_due_on_or_after(&self, date: Date) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.due_date() >= date)
    }

    /// Returns a view with every amount rounded to the currency's minor unit.
    ///
    /// This is the only place amounts are rounded. Each field is rounded on
    /// its own, so the rounded entries need not sum to the rounded totals:
    /// 10 000 over six months, equal principal, shows six principal
    /// components of 1 666.67 (10 000.02) against a total of 10 000.00.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_schedule::schedules::compute_schedule;
    /// use loan_core::types::{Currency, Date};
    ///
    /// let schedule = compute_schedule(
    ///     10_000.0, 180, 12.0, "equal-principal",
    ///     Date::from_ymd(2024, 1, 15).unwrap(),
    /// ).unwrap();
    /// let rounded = schedule.rounded(Currency::CNY);
    ///
    /// let summed: f64 = rounded.entries.iter().map(|e| e.principal_component).sum();
    /// assert!((summed - 10_000.02).abs() < 1e-6);
    /// assert_eq!(rounded.total_principal, 10_000.0);
    /// ```
    pub fn rounded(&self, currency: Currency) -> RoundedSchedule {
        let entries = self
            .entries
            .iter()
            .map(|e| RoundedEntry {
                period: e.period(),
                due_date: e.due_date(),
                payment_amount: currency.round(e.payment_amount()),
                principal_component: currency.round(e.principal_component()),
                interest_component: currency.round(e.interest_component()),
                remaining_principal: currency.round(e.remaining_principal()),
            })
            .collect();

        RoundedSchedule {
            currency,
            method: self.method,
            term_mapping: self.term_mapping,
            entries,
            total_payment: currency.round(self.total_payment),
            total_principal: currency.round(self.total_principal),
            total_interest: currency.round(self.total_interest),
        }
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A schedule entry with amounts rounded for display or transport.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoundedEntry {
    /// 1-based installment number.
    pub period: u32,
    /// Due date.
    pub due_date: Date,
    /// Total amount due.
    pub payment_amount: f64,
    /// Principal share.
    pub principal_component: f64,
    /// Interest share.
    pub interest_component: f64,
    /// Principal outstanding afterwards.
    pub remaining_principal: f64,
}

/// A schedule with amounts rounded to a currency's minor unit.
///
/// Totals are rounded from the full-precision totals, not summed from the
/// rounded entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoundedSchedule {
    /// Currency used for rounding.
    pub currency: Currency,
    /// Effective repayment method.
    pub method: RepaymentMethod,
    /// How the loan term was interpreted.
    pub term_mapping: TermMapping,
    /// Rounded entries.
    pub entries: Vec<RoundedEntry>,
    /// Rounded total of all payments.
    pub total_payment: f64,
    /// Rounded total principal.
    pub total_principal: f64,
    /// Rounded total interest.
    pub total_interest: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn two_period_schedule() -> Schedule {
        let entries = vec![
            ScheduleEntry::new(1, d(2024, 2, 15), 500.0, 10.0, 500.0),
            ScheduleEntry::new(2, d(2024, 3, 15), 500.0, 5.0, 0.0),
        ];
        Schedule::new(
            entries,
            RepaymentMethod::EqualPrincipal,
            TermMapping::Months,
            1_000.0,
        )
    }

    #[test]
    fn test_totals() {
        let schedule = two_period_schedule();
        assert_relative_eq!(schedule.total_principal(), 1_000.0);
        assert_relative_eq!(schedule.total_interest(), 15.0);
        assert_relative_eq!(schedule.total_payment(), 1_015.0);
        assert_relative_eq!(schedule.principal(), 1_000.0);
    }

    #[test]
    fn test_accessors() {
        let schedule = two_period_schedule();
        assert_eq!(schedule.len(), 2);
        assert!(!schedule.is_empty());
        assert_eq!(schedule.first().period(), 1);
        assert_eq!(schedule.last().period(), 2);
        assert_eq!(schedule.maturity_date(), d(2024, 3, 15));
        assert_eq!(schedule.method(), RepaymentMethod::EqualPrincipal);
        assert_eq!(schedule.term_mapping(), TermMapping::Months);
        assert_eq!(schedule.iter().count(), 2);
        assert_eq!((&schedule).into_iter().count(), 2);
    }

    #[test]
    fn test_entry_for_period() {
        let schedule = two_period_schedule();
        assert_eq!(schedule.entry_for_period(2).unwrap().due_date(), d(2024, 3, 15));
        assert!(schedule.entry_for_period(0).is_none());
        assert!(schedule.entry_for_period(3).is_none());
    }

    #[test]
    fn test_next_due_on_or_after() {
        let schedule = two_period_schedule();
        assert_eq!(schedule.next_due_on_or_after(d(2024, 1, 1)).unwrap().period(), 1);
        assert_eq!(schedule.next_due_on_or_after(d(2024, 2, 15)).unwrap().period(), 1);
        assert_eq!(schedule.next_due_on_or_after(d(2024, 2, 16)).unwrap().period(), 2);
        assert!(schedule.next_due_on_or_after(d(2024, 3, 16)).is_none());
    }

    #[test]
    fn test_rounded() {
        let entries = vec![ScheduleEntry::new(
            1,
            d(2024, 1, 30),
            5_000.0,
            36.986_301_369_863,
            0.0,
        )];
        let schedule = Schedule::new(
            entries,
            RepaymentMethod::ShortTermSingleInstallment,
            TermMapping::ShortTermDays,
            5_000.0,
        );

        let rounded = schedule.rounded(Currency::CNY);
        assert_eq!(rounded.entries[0].interest_component, 36.99);
        assert_eq!(rounded.entries[0].payment_amount, 5_036.99);
        assert_eq!(rounded.total_payment, 5_036.99);
        assert_eq!(rounded.currency, Currency::CNY);

        let rounded = schedule.rounded(Currency::JPY);
        assert_eq!(rounded.total_interest, 37.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_rounded_serialises_camel_case() {
        let json = serde_json::to_value(two_period_schedule().rounded(Currency::CNY)).unwrap();
        assert_eq!(json["method"], "equal-principal");
        assert_eq!(json["termMapping"], "months");
        assert_eq!(json["entries"][1]["dueDate"], "2024-03-15");
        assert_eq!(json["totalPayment"], 1015.0);
    }
}
