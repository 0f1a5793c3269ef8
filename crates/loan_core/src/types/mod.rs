//! Calendar, currency, and error types.
//!
//! This module provides:
//! - `time`: `Date` wrapper with calendar-aware day and month arithmetic
//! - `currency`: ISO 4217 currency codes with minor-unit precision and output rounding
//! - `error`: Structured error types for date and currency operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`Currency`], [`round_to`] from `currency`
//! - [`DateError`], [`CurrencyError`] from `error`

pub mod currency;
pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use currency::{round_to, Currency};
pub use error::{CurrencyError, DateError};
pub use time::Date;
