//! Currency types for loan amounts.
//!
//! This module provides ISO 4217 currency codes with minor-unit precision.
//! Schedule arithmetic runs at full `f64` precision; rounding to the
//! currency's minor unit happens only when amounts are formatted for output
//! or compared against an amount offered by a borrower.
//!
//! # Examples
//!
//! ```
//! use loan_core::types::currency::Currency;
//!
//! let cny = Currency::CNY;
//! assert_eq!(cny.code(), "CNY");
//! assert_eq!(cny.decimal_places(), 2);
//! assert_eq!(cny.minor_unit(), 0.01);
//!
//! let jpy = Currency::JPY;
//! assert_eq!(jpy.decimal_places(), 0);  // Yen has no decimal places
//! assert_eq!(jpy.round(1725.5), 1726.0);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency codes with decimal precision metadata.
///
/// # Variants
/// - `CNY`: Chinese Yuan Renminbi (2 decimal places)
/// - `USD`: United States Dollar (2 decimal places)
/// - `EUR`: Euro (2 decimal places)
/// - `GBP`: British Pound Sterling (2 decimal places)
/// - `JPY`: Japanese Yen (0 decimal places)
///
/// # Examples
///
/// ```
/// use loan_core::types::currency::Currency;
///
/// // Parse from string (case-insensitive)
/// let eur: Currency = "eur".parse().unwrap();
/// assert_eq!(eur, Currency::EUR);
///
/// // Default currency of the loan book
/// assert_eq!(Currency::default(), Currency::CNY);
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Chinese Yuan Renminbi
    ///
    /// ISO 4217 code: CNY
    /// Standard decimal places: 2
    #[default]
    CNY,

    /// United States Dollar
    ///
    /// ISO 4217 code: USD
    /// Standard decimal places: 2
    USD,

    /// Euro
    ///
    /// ISO 4217 code: EUR
    /// Standard decimal places: 2
    EUR,

    /// British Pound Sterling
    ///
    /// ISO 4217 code: GBP
    /// Standard decimal places: 2
    GBP,

    /// Japanese Yen
    ///
    /// ISO 4217 code: JPY
    /// Standard decimal places: 0 (no minor units)
    JPY,
}

impl Currency {
    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CNY => "CNY",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Returns the standard number of decimal places for this currency.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::CNY => 2,
            Currency::USD => 2,
            Currency::EUR => 2,
            Currency::GBP => 2,
            Currency::JPY => 0,
        }
    }

    /// Returns the value of one minor unit (0.01 for CNY, 1.0 for JPY).
    ///
    /// This is the reconciliation tolerance for schedule totals.
    pub fn minor_unit(&self) -> f64 {
        10f64.powi(-i32::from(self.decimal_places()))
    }

    /// Rounds an amount to this currency's minor unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.round(36.986301), 36.99);
    /// assert_eq!(Currency::USD.round(-0.001), 0.0);
    /// ```
    pub fn round(&self, amount: f64) -> f64 {
        round_to(amount, self.decimal_places())
    }

    /// Formats an amount with exactly this currency's decimal places.
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::CNY.format_amount(100.0), "100.00");
    /// assert_eq!(Currency::JPY.format_amount(5036.986), "5037");
    /// ```
    pub fn format_amount(&self, amount: f64) -> String {
        format!(
            "{:.*}",
            usize::from(self.decimal_places()),
            self.round(amount)
        )
    }
}

/// Rounds `value` half away from zero to `decimals` decimal places.
///
/// Negative zero is normalised to `0.0` so rounded residues never print as
/// `-0.00`.
///
/// # Examples
///
/// ```
/// use loan_core::types::round_to;
///
/// assert_eq!(round_to(1666.666_666, 2), 1666.67);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive).
    ///
    /// `RMB` is accepted as an alias of `CNY`.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        match s.trim().to_uppercase().as_str() {
            "CNY" | "RMB" => Ok(Currency::CNY),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL: [Currency; 5] = [
        Currency::CNY,
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
    ];

    #[test]
    fn test_currency_decimal_places() {
        assert_eq!(Currency::CNY.decimal_places(), 2);
        assert_eq!(Currency::USD.decimal_places(), 2);
        assert_eq!(Currency::JPY.decimal_places(), 0);
    }

    #[test]
    fn test_minor_unit() {
        assert_relative_eq!(Currency::CNY.minor_unit(), 0.01);
        assert_relative_eq!(Currency::JPY.minor_unit(), 1.0);
    }

    #[test]
    fn test_round() {
        assert_eq!(Currency::CNY.round(1725.4837), 1725.48);
        assert_eq!(Currency::CNY.round(1666.665_000_1), 1666.67);
        assert_eq!(Currency::JPY.round(99.4), 99.0);
    }

    #[test]
    fn test_round_to_normalises_negative_zero() {
        let r = round_to(-0.000_000_1, 2);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(Currency::CNY.format_amount(10000.0), "10000.00");
        assert_eq!(Currency::USD.format_amount(36.986_301), "36.99");
        assert_eq!(Currency::USD.format_amount(-0.000_01), "0.00");
        assert_eq!(Currency::JPY.format_amount(12.5), "13");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("cny".parse::<Currency>().unwrap(), Currency::CNY);
        assert_eq!("RMB".parse::<Currency>().unwrap(), Currency::CNY);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_currency_from_str_unknown() {
        match "XYZ".parse::<Currency>() {
            Err(CurrencyError::UnknownCurrency(code)) => assert_eq!(code, "XYZ"),
            other => panic!("Expected UnknownCurrency error, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_roundtrip() {
        for currency in ALL {
            let parsed: Currency = currency.code().parse().unwrap();
            assert_eq!(currency, parsed);
            assert_eq!(format!("{}", currency), currency.code());
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_currency_serde() {
        let json = serde_json::to_string(&Currency::CNY).unwrap();
        assert_eq!(json, "\"CNY\"");
        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::JPY);
    }
}
