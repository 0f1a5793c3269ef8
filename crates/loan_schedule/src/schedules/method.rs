//! Repayment method enumeration.

use std::fmt;
use std::str::FromStr;

use super::error::ScheduleError;

/// How a loan is paid back over its term.
///
/// # Examples
///
/// ```
/// use loan_schedule::schedules::RepaymentMethod;
///
/// let method: RepaymentMethod = "equal-principal".parse().unwrap();
/// assert_eq!(method, RepaymentMethod::EqualPrincipal);
/// assert_eq!(method.tag(), "equal-principal");
/// assert_eq!(RepaymentMethod::default(), RepaymentMethod::EqualInstallment);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RepaymentMethod {
    /// Constant total payment per period; the principal share grows over time.
    #[default]
    EqualInstallment,
    /// Constant principal per period; the payment declines with the interest.
    EqualPrincipal,
    /// Principal and simple daily interest repaid in one installment.
    ///
    /// Selected automatically for terms of 31 days or less.
    #[cfg_attr(feature = "serde", serde(rename = "short-term"))]
    ShortTermSingleInstallment,
}

impl RepaymentMethod {
    /// Returns the canonical kebab-case tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_schedule::schedules::RepaymentMethod;
    ///
    /// assert_eq!(RepaymentMethod::EqualInstallment.tag(), "equal-installment");
    /// assert_eq!(RepaymentMethod::ShortTermSingleInstallment.tag(), "short-term");
    /// ```
    #[inline]
    pub fn tag(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualInstallment => "equal-installment",
            RepaymentMethod::EqualPrincipal => "equal-principal",
            RepaymentMethod::ShortTermSingleInstallment => "short-term",
        }
    }

    /// Returns the human-readable name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            RepaymentMethod::EqualInstallment => "Equal Installment",
            RepaymentMethod::EqualPrincipal => "Equal Principal",
            RepaymentMethod::ShortTermSingleInstallment => "Short-Term Single Installment",
        }
    }

    /// Parses a method tag, treating a blank tag as the default method.
    ///
    /// Loan records written before the repayment method was captured carry
    /// no tag; they are equal-installment loans.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_schedule::schedules::RepaymentMethod;
    ///
    /// assert_eq!(
    ///     RepaymentMethod::from_tag_or_default("  ").unwrap(),
    ///     RepaymentMethod::EqualInstallment
    /// );
    /// assert!(RepaymentMethod::from_tag_or_default("balloon").is_err());
    /// ```
    pub fn from_tag_or_default(tag: &str) -> Result<Self, ScheduleError> {
        if tag.trim().is_empty() {
            Ok(RepaymentMethod::default())
        } else {
            tag.parse()
        }
    }
}

impl fmt::Display for RepaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for RepaymentMethod {
    type Err = ScheduleError;

    /// Parses a repayment method tag (case-insensitive).
    ///
    /// Supported formats (`-`, `_` and spaces are ignored):
    /// - EqualInstallment: "equal-installment", "installment"
    /// - EqualPrincipal: "equal-principal", "principal"
    /// - ShortTermSingleInstallment: "short-term", "single-installment", "bullet"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "equalinstallment" | "installment" => Ok(RepaymentMethod::EqualInstallment),
            "equalprincipal" | "principal" => Ok(RepaymentMethod::EqualPrincipal),
            "shortterm" | "shorttermsingleinstallment" | "singleinstallment" | "bullet" => {
                Ok(RepaymentMethod::ShortTermSingleInstallment)
            }
            _ => Err(ScheduleError::UnsupportedMethod { tag: s.to_string() }),
        }
    }
}
