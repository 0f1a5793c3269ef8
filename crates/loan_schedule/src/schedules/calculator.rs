//! Repayment schedule calculator.
//!
//! One implementation serves every caller: schedule previews, persisted
//! repayment plans and payment validation all go through
//! [`ScheduleCalculator::compute`].

use loan_core::types::Date;

use super::entry::ScheduleEntry;
use super::error::ScheduleError;
use super::method::RepaymentMethod;
use super::schedule::Schedule;
use super::terms::{LoanTerms, Term};

/// Stateless repayment schedule calculator.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::{LoanTerms, RepaymentMethod, ScheduleCalculator, Term};
/// use loan_core::types::Date;
///
/// let terms = LoanTerms::new(
///     10_000.0,
///     Term::Months(6),
///     12.0,
///     RepaymentMethod::EqualPrincipal,
///     Date::from_ymd(2024, 1, 15).unwrap(),
/// )
/// .unwrap();
///
/// let schedule = ScheduleCalculator::compute(&terms).unwrap();
/// assert_eq!(schedule.len(), 6);
/// assert!((schedule.first().interest_component() - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleCalculator;

impl ScheduleCalculator {
    /// Computes the repayment schedule for validated loan terms.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateOverflow`] if a due date cannot be
    /// represented. Term validation has already happened in [`LoanTerms::new`].
    pub fn compute(terms: &LoanTerms) -> Result<Schedule, ScheduleError> {
        let resolved = terms.resolve()?;
        let principal = terms.principal();
        let start = terms.start_date();

        let entries = match resolved.method {
            RepaymentMethod::ShortTermSingleInstallment => {
                let days = resolved.accrual_days.unwrap_or(resolved.periods);
                single_installment(principal, terms.daily_rate(), days, start)?
            }
            RepaymentMethod::EqualPrincipal => {
                equal_principal(principal, terms.monthly_rate(), resolved.periods, start)?
            }
            RepaymentMethod::EqualInstallment => {
                equal_installment(principal, terms.monthly_rate(), resolved.periods, start)?
            }
        };

        Ok(Schedule::new(
            entries,
            resolved.method,
            resolved.mapping,
            principal,
        ))
    }
}

/// Computes a schedule from raw loan-record fields.
///
/// The method tag is parsed first, so an unknown tag is reported as
/// [`ScheduleError::UnsupportedMethod`] even when the term would force a
/// single installment. A blank tag selects equal installment.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::{compute_schedule, ScheduleError};
/// use loan_core::types::Date;
///
/// let start = Date::from_ymd(2024, 3, 1).unwrap();
///
/// let schedule = compute_schedule(5_000.0, 15, 18.0, "equal-principal", start).unwrap();
/// assert_eq!(schedule.len(), 1);
/// assert!((schedule.total_interest() - 36.99).abs() < 0.005);
///
/// let err = compute_schedule(5_000.0, 15, 18.0, "balloon", start).unwrap_err();
/// assert!(matches!(err, ScheduleError::UnsupportedMethod { .. }));
/// ```
pub fn compute_schedule(
    principal: f64,
    term_days: u32,
    annual_rate_percent: f64,
    method: &str,
    start_date: Date,
) -> Result<Schedule, ScheduleError> {
    let method = RepaymentMethod::from_tag_or_default(method)?;
    let terms = LoanTerms::new(
        principal,
        Term::Days(term_days),
        annual_rate_percent,
        method,
        start_date,
    )?;
    ScheduleCalculator::compute(&terms)
}

/// Level payment of an amortizing loan.
///
/// `principal * r * (1+r)^n / ((1+r)^n - 1)`, or `principal / n` when the
/// monthly rate is zero. Evaluated as `principal * r / (1 - (1+r)^-n)` with
/// `ln_1p`/`exp_m1` so very small rates do not lose precision.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::equal_installment_payment;
///
/// let payment = equal_installment_payment(10_000.0, 6, 0.01);
/// assert!((payment - 1_725.48).abs() < 0.005);
/// assert_eq!(equal_installment_payment(1_000.0, 10, 0.0), 100.0);
/// ```
pub fn equal_installment_payment(principal: f64, months: u32, monthly_rate: f64) -> f64 {
    let n = f64::from(months);
    if monthly_rate == 0.0 {
        return principal / n;
    }
    let discount = -(-n * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / discount
}

/// Closed-form total interest of an equal-principal loan.
///
/// `(n + 1) * principal * r / 2`; agrees with the summed schedule interest.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::equal_principal_total_interest;
///
/// assert!((equal_principal_total_interest(10_000.0, 6, 0.01) - 350.0).abs() < 1e-9);
/// ```
pub fn equal_principal_total_interest(principal: f64, months: u32, monthly_rate: f64) -> f64 {
    (f64::from(months) + 1.0) * principal * monthly_rate / 2.0
}

fn single_installment(
    principal: f64,
    daily_rate: f64,
    days: u32,
    start: Date,
) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    let interest = principal * daily_rate * f64::from(days);
    let due = start.add_days(days)?;
    Ok(vec![ScheduleEntry::new(1, due, principal, interest, 0.0)])
}

fn equal_principal(
    principal: f64,
    monthly_rate: f64,
    months: u32,
    start: Date,
) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    // The final due date bounds the period count before anything is allocated.
    start.add_months(months)?;

    let monthly_principal = principal / f64::from(months);
    let mut entries = Vec::with_capacity(months as usize);

    for i in 1..=months {
        let paid_before = f64::from(i - 1) * monthly_principal;
        let interest = (principal - paid_before) * monthly_rate;

        // Final period takes whatever principal is left so the balance closes at zero.
        let (principal_part, remaining) = if i == months {
            (principal - paid_before, 0.0)
        } else {
            (
                monthly_principal,
                (principal - paid_before - monthly_principal).max(0.0),
            )
        };

        let due = start.add_months(i)?;
        entries.push(ScheduleEntry::new(i, due, principal_part, interest, remaining));
    }

    Ok(entries)
}

fn equal_installment(
    principal: f64,
    monthly_rate: f64,
    months: u32,
    start: Date,
) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    start.add_months(months)?;

    let payment = equal_installment_payment(principal, months, monthly_rate);
    let mut remaining = principal;
    let mut entries = Vec::with_capacity(months as usize);

    for i in 1..=months {
        let interest = remaining * monthly_rate;
        let principal_part = if i == months {
            remaining
        } else {
            payment - interest
        };
        remaining = if i == months {
            0.0
        } else {
            (remaining - principal_part).max(0.0)
        };

        let due = start.add_months(i)?;
        entries.push(ScheduleEntry::new(i, due, principal_part, interest, remaining));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::TermMapping;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn compute(principal: f64, term: Term, rate: f64, method: RepaymentMethod) -> Schedule {
        let terms = LoanTerms::new(principal, term, rate, method, d(2024, 1, 15)).unwrap();
        ScheduleCalculator::compute(&terms).unwrap()
    }

    #[test]
    fn test_equal_installment_reference_loan() {
        let s = compute(10_000.0, Term::Days(180), 12.0, RepaymentMethod::EqualInstallment);

        assert_eq!(s.len(), 6);
        assert_eq!(s.term_mapping(), TermMapping::StandardDays);
        assert_abs_diff_eq!(s.first().payment_amount(), 1_725.48, epsilon = 0.005);
        assert_abs_diff_eq!(s.first().interest_component(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.first().principal_component(), 1_625.48, epsilon = 0.005);
        assert_eq!(s.last().remaining_principal(), 0.0);
        assert_abs_diff_eq!(s.total_principal(), 10_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_equal_installment_level_payment() {
        let s = compute(10_000.0, Term::Months(12), 12.0, RepaymentMethod::EqualInstallment);
        let level = equal_installment_payment(10_000.0, 12, 0.01);
        for entry in s.iter() {
            assert_abs_diff_eq!(entry.payment_amount(), level, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_equal_installment_zero_rate() {
        let s = compute(1_000.0, Term::Months(10), 0.0, RepaymentMethod::EqualInstallment);
        assert_eq!(s.len(), 10);
        for entry in s.iter() {
            assert_eq!(entry.payment_amount(), 100.0);
            assert_eq!(entry.interest_component(), 0.0);
        }
        assert_eq!(s.total_interest(), 0.0);
        assert_eq!(s.last().remaining_principal(), 0.0);
    }

    #[test]
    fn test_equal_principal_reference_loan() {
        let s = compute(10_000.0, Term::Days(180), 12.0, RepaymentMethod::EqualPrincipal);

        assert_eq!(s.len(), 6);
        assert_abs_diff_eq!(s.first().principal_component(), 1_666.67, epsilon = 0.005);
        assert_abs_diff_eq!(s.first().interest_component(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.first().payment_amount(), 1_766.67, epsilon = 0.005);
        assert_eq!(s.entry_for_period(6).unwrap().remaining_principal(), 0.0);

        // Payments decline as the balance shrinks
        let payments: Vec<f64> = s.iter().map(|e| e.payment_amount()).collect();
        assert!(payments.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_equal_principal_closed_form_agrees() {
        let s = compute(10_000.0, Term::Months(6), 12.0, RepaymentMethod::EqualPrincipal);
        assert_relative_eq!(
            s.total_interest(),
            equal_principal_total_interest(10_000.0, 6, 0.01),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(s.total_interest(), 350.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_principal_absorbs_residual() {
        let s = compute(1_000.0, Term::Months(3), 6.0, RepaymentMethod::EqualPrincipal);
        let sum: f64 = s.iter().map(|e| e.principal_component()).sum();
        assert_abs_diff_eq!(sum, 1_000.0, epsilon = 1e-9);
        assert_eq!(s.last().remaining_principal(), 0.0);
    }

    #[test]
    fn test_short_term_single_installment() {
        let s = compute(5_000.0, Term::Days(15), 18.0, RepaymentMethod::EqualInstallment);

        assert_eq!(s.len(), 1);
        assert_eq!(s.method(), RepaymentMethod::ShortTermSingleInstallment);
        let entry = s.first();
        assert_abs_diff_eq!(entry.interest_component(), 36.99, epsilon = 0.005);
        assert_abs_diff_eq!(entry.payment_amount(), 5_036.99, epsilon = 0.005);
        assert_eq!(entry.principal_component(), 5_000.0);
        assert_eq!(entry.remaining_principal(), 0.0);
        assert_eq!(entry.due_date(), d(2024, 1, 30));
    }

    #[test]
    fn test_short_term_ignores_requested_method() {
        for method in [
            RepaymentMethod::EqualInstallment,
            RepaymentMethod::EqualPrincipal,
        ] {
            let s = compute(8_000.0, Term::Days(20), 12.0, method);
            assert_eq!(s.len(), 1);
            assert_eq!(s.method(), RepaymentMethod::ShortTermSingleInstallment);
        }
    }

    #[test]
    fn test_explicit_single_installment_over_month_term() {
        let s = compute(
            10_000.0,
            Term::Months(1),
            36.5,
            RepaymentMethod::ShortTermSingleInstallment,
        );
        // 2024-01-15 → 2024-02-15 is 31 days at 0.1% a day
        assert_eq!(s.first().due_date(), d(2024, 2, 15));
        assert_abs_diff_eq!(s.total_interest(), 310.0, epsilon = 1e-9);
    }

    #[test]
    fn test_due_dates_clamp_from_start() {
        let terms = LoanTerms::new(
            1_200.0,
            Term::Months(3),
            12.0,
            RepaymentMethod::EqualPrincipal,
            d(2024, 1, 31),
        )
        .unwrap();
        let s = ScheduleCalculator::compute(&terms).unwrap();
        let dates: Vec<Date> = s.iter().map(|e| e.due_date()).collect();
        assert_eq!(dates, vec![d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]);
    }

    #[test]
    fn test_compute_schedule_matches_typed_entry() {
        let from_tag =
            compute_schedule(10_000.0, 365, 9.6, "equal-installment", d(2024, 1, 15)).unwrap();
        let typed = compute(10_000.0, Term::Days(365), 9.6, RepaymentMethod::EqualInstallment);
        assert_eq!(from_tag, typed);
    }

    #[test]
    fn test_compute_schedule_blank_method_defaults() {
        let s = compute_schedule(3_000.0, 90, 12.0, "", d(2024, 1, 15)).unwrap();
        assert_eq!(s.method(), RepaymentMethod::EqualInstallment);
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_compute_schedule_invalid_terms() {
        let start = d(2024, 1, 15);
        for (principal, days, rate) in [(0.0, 180, 12.0), (1_000.0, 0, 12.0), (1_000.0, 180, -1.0)] {
            let result = compute_schedule(principal, days, rate, "equal-installment", start);
            assert!(
                matches!(result, Err(ScheduleError::InvalidTerms { .. })),
                "({}, {}, {}) should be invalid",
                principal,
                days,
                rate
            );
        }
    }

    #[test]
    fn test_unrepresentable_term_is_date_overflow() {
        let start = d(2024, 1, 15);
        for method in ["equal-installment", "equal-principal", "short-term"] {
            let result = compute_schedule(1_000.0, u32::MAX, 12.0, method, start);
            assert!(
                matches!(result, Err(ScheduleError::DateOverflow { .. })),
                "{} over u32::MAX days should overflow, got {:?}",
                method,
                result.map(|s| s.len())
            );
        }

        let terms = LoanTerms::new(
            1_000.0,
            Term::Months(u32::MAX),
            12.0,
            RepaymentMethod::EqualPrincipal,
            start,
        )
        .unwrap();
        assert!(matches!(
            ScheduleCalculator::compute(&terms),
            Err(ScheduleError::DateOverflow { .. })
        ));
    }

    #[test]
    fn test_unsupported_method_checked_before_terms() {
        let result = compute_schedule(0.0, 15, 12.0, "interest-only", d(2024, 1, 15));
        assert_eq!(
            result,
            Err(ScheduleError::UnsupportedMethod {
                tag: "interest-only".to_string()
            })
        );
    }

    #[test]
    fn test_deterministic() {
        let a = compute(7_777.0, Term::Months(24), 7.7, RepaymentMethod::EqualInstallment);
        let b = compute(7_777.0, Term::Months(24), 7.7, RepaymentMethod::EqualInstallment);
        assert_eq!(a, b);
    }
}
