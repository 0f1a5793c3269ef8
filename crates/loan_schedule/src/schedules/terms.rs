//! Loan terms and term resolution.
//!
//! Loan terms arrive from the loan record as a principal, a term, an annual
//! rate in percent, a requested repayment method and a start date. Before
//! any arithmetic runs the term is resolved into a period count and an
//! effective method:
//!
//! 1. A term of 31 days or less always becomes a single installment.
//! 2. Standard day terms map to months: 90 → 3, 180 → 6, 365 → 12.
//! 3. Any other day term is read as a month count ([`TermMapping::DaysAsMonths`]).

use std::fmt;

use loan_core::types::Date;

use super::error::ScheduleError;
use super::method::RepaymentMethod;

/// Longest term, in days, that is repaid as a single installment.
pub const SHORT_TERM_MAX_DAYS: u32 = 31;

/// Maps a standard day term to its month count.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::standard_days_to_months;
///
/// assert_eq!(standard_days_to_months(180), Some(6));
/// assert_eq!(standard_days_to_months(120), None);
/// ```
#[inline]
pub fn standard_days_to_months(days: u32) -> Option<u32> {
    match days {
        90 => Some(3),
        180 => Some(6),
        365 => Some(12),
        _ => None,
    }
}

/// Loan term as recorded on the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Term {
    /// Term expressed in days.
    Days(u32),
    /// Term expressed in months. Never triggers the short-term policy.
    Months(u32),
}

impl Term {
    /// Returns the raw term value regardless of unit.
    #[inline]
    pub fn value(&self) -> u32 {
        match self {
            Term::Days(n) | Term::Months(n) => *n,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Days(n) => write!(f, "{} days", n),
            Term::Months(n) => write!(f, "{} months", n),
        }
    }
}

/// How a [`Term`] was interpreted when resolving the period count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TermMapping {
    /// Day term of at most 31 days, forced to a single installment.
    ShortTermDays,
    /// Day term of 90, 180 or 365 days mapped to 3, 6 or 12 months.
    StandardDays,
    /// Non-standard day term whose value was taken as a month count.
    ///
    /// Callers should surface this: the loan record may have meant days.
    DaysAsMonths,
    /// Month term used as-is.
    Months,
    /// Single installment explicitly requested over a longer term.
    SingleInstallment,
}

impl TermMapping {
    /// Whether the interpretation is ambiguous and should be flagged.
    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, TermMapping::DaysAsMonths)
    }
}

/// Outcome of term resolution: what the calculator will actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTerm {
    /// Effective repayment method after the short-term policy.
    pub method: RepaymentMethod,
    /// Number of installments.
    pub periods: u32,
    /// Days of simple interest accrual, for single-installment loans.
    pub accrual_days: Option<u32>,
    /// How the term was interpreted.
    pub mapping: TermMapping,
}

/// Validated, immutable loan terms.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::{LoanTerms, RepaymentMethod, Term};
/// use loan_core::types::Date;
///
/// let terms = LoanTerms::new(
///     10_000.0,
///     Term::Days(180),
///     12.0,
///     RepaymentMethod::EqualInstallment,
///     Date::from_ymd(2024, 1, 15).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(terms.resolve().unwrap().periods, 6);
/// assert!((terms.monthly_rate() - 0.01).abs() < 1e-12);
///
/// assert!(LoanTerms::new(
///     0.0,
///     Term::Days(180),
///     12.0,
///     RepaymentMethod::EqualInstallment,
///     Date::from_ymd(2024, 1, 15).unwrap(),
/// )
/// .is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LoanTerms {
    principal: f64,
    term: Term,
    annual_rate_percent: f64,
    method: RepaymentMethod,
    start_date: Date,
}

impl LoanTerms {
    /// Creates validated loan terms.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTerms`] if:
    /// - the principal is not a positive finite amount
    /// - the term is zero
    /// - the annual rate is negative or not finite
    pub fn new(
        principal: f64,
        term: Term,
        annual_rate_percent: f64,
        method: RepaymentMethod,
        start_date: Date,
    ) -> Result<Self, ScheduleError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(ScheduleError::invalid_terms(format!(
                "principal must be positive, got {}",
                principal
            )));
        }
        if term.value() == 0 {
            return Err(ScheduleError::invalid_terms(format!(
                "term must be positive, got {}",
                term
            )));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(ScheduleError::invalid_terms(format!(
                "annual interest rate must be non-negative, got {}%",
                annual_rate_percent
            )));
        }

        Ok(Self {
            principal,
            term,
            annual_rate_percent,
            method,
            start_date,
        })
    }

    /// Returns a builder for loan terms.
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// Returns the principal.
    #[inline]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Returns the term as recorded.
    #[inline]
    pub fn term(&self) -> Term {
        self.term
    }

    /// Returns the annual interest rate in percent.
    #[inline]
    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    /// Returns the requested repayment method.
    #[inline]
    pub fn method(&self) -> RepaymentMethod {
        self.method
    }

    /// Returns the start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Annual rate as a fraction (12% → 0.12).
    #[inline]
    pub fn annual_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0
    }

    /// Monthly rate, `annual_rate / 12`.
    #[inline]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate() / 12.0
    }

    /// Daily rate, `annual_rate / 365`.
    #[inline]
    pub fn daily_rate(&self) -> f64 {
        self.annual_rate() / 365.0
    }

    /// Resolves the term into a period count and effective method.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DateOverflow`] only when a single installment
    /// is requested over a month term whose end date cannot be represented.
    pub fn resolve(&self) -> Result<ResolvedTerm, ScheduleError> {
        let single = |accrual_days: u32, mapping: TermMapping| ResolvedTerm {
            method: RepaymentMethod::ShortTermSingleInstallment,
            periods: 1,
            accrual_days: Some(accrual_days),
            mapping,
        };

        let resolved = match (self.term, self.method) {
            (Term::Days(days), _) if days <= SHORT_TERM_MAX_DAYS => {
                single(days, TermMapping::ShortTermDays)
            }
            (Term::Days(days), RepaymentMethod::ShortTermSingleInstallment) => {
                single(days, TermMapping::SingleInstallment)
            }
            (Term::Months(months), RepaymentMethod::ShortTermSingleInstallment) => {
                let end = self.start_date.add_months(months)?;
                let days = u32::try_from(end - self.start_date).map_err(|_| {
                    ScheduleError::DateOverflow {
                        reason: format!("{} months from {} exceeds the day range", months, self.start_date),
                    }
                })?;
                single(days, TermMapping::SingleInstallment)
            }
            (Term::Days(days), method) => match standard_days_to_months(days) {
                Some(months) => ResolvedTerm {
                    method,
                    periods: months,
                    accrual_days: None,
                    mapping: TermMapping::StandardDays,
                },
                None => ResolvedTerm {
                    method,
                    periods: days,
                    accrual_days: None,
                    mapping: TermMapping::DaysAsMonths,
                },
            },
            (Term::Months(months), method) => ResolvedTerm {
                method,
                periods: months,
                accrual_days: None,
                mapping: TermMapping::Months,
            },
        };

        Ok(resolved)
    }
}

/// Builder for [`LoanTerms`].
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::{LoanTerms, RepaymentMethod, Term};
/// use loan_core::types::Date;
///
/// let terms = LoanTerms::builder()
///     .principal(5_000.0)
///     .term(Term::Days(15))
///     .annual_rate_percent(18.0)
///     .start(Date::from_ymd(2024, 3, 1).unwrap())
///     .build()
///     .unwrap();
///
/// // Method defaults to equal installment
/// assert_eq!(terms.method(), RepaymentMethod::EqualInstallment);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoanTermsBuilder {
    principal: Option<f64>,
    term: Option<Term>,
    annual_rate_percent: Option<f64>,
    method: RepaymentMethod,
    start_date: Option<Date>,
}

impl LoanTermsBuilder {
    /// Creates a new builder with the default repayment method.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the principal.
    pub fn principal(mut self, principal: f64) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the term.
    pub fn term(mut self, term: Term) -> Self {
        self.term = Some(term);
        self
    }

    /// Sets the annual interest rate in percent.
    pub fn annual_rate_percent(mut self, rate: f64) -> Self {
        self.annual_rate_percent = Some(rate);
        self
    }

    /// Sets the requested repayment method.
    pub fn method(mut self, method: RepaymentMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the start date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Builds and validates the loan terms.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::MissingField`] if a required field is unset,
    /// otherwise any error of [`LoanTerms::new`].
    pub fn build(self) -> Result<LoanTerms, ScheduleError> {
        let principal = self
            .principal
            .ok_or(ScheduleError::MissingField { field: "principal" })?;
        let term = self.term.ok_or(ScheduleError::MissingField { field: "term" })?;
        let rate = self.annual_rate_percent.ok_or(ScheduleError::MissingField {
            field: "annual_rate_percent",
        })?;
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;

        LoanTerms::new(principal, term, rate, self.method, start)
    }
}
