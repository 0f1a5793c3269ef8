//! # loan_core: Foundation Types for Loan Schedule Calculation
//!
//! ## Core Layer Role
//!
//! loan_core is the bottom layer of the workspace, providing:
//! - Calendar types: `Date` with day and month arithmetic (`types::time`)
//! - Currency types: `Currency` with minor-unit precision (`types::currency`)
//! - Error types: `DateError`, `CurrencyError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! The core layer has no dependencies on other workspace crates, with minimal
//! external dependencies:
//! - chrono: Calendar arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use loan_core::types::{Currency, Date};
//!
//! // Month arithmetic clamps to the last valid day of the target month
//! let start = Date::from_ymd(2024, 1, 31).unwrap();
//! assert_eq!(start.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
//!
//! // Output rounding follows the currency's minor unit
//! let cny = Currency::CNY;
//! assert_eq!(cny.round(1725.4837), 1725.48);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date and Currency

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
