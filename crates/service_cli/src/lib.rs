//! Loan Schedule CLI library
//!
//! Command implementations, configuration and output rendering behind the
//! `loan-schedule` binary.
//!
//! # Commands
//!
//! - `loan-schedule preview` - Print the repayment schedule of one loan, with an optional affordability check
//! - `loan-schedule batch --input <file>` - Schedule a CSV file of loans in parallel
//! - `loan-schedule plan` - Replay payments against a loan and report its position
//! - `loan-schedule check` - Verify configuration and reference loans

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{CliConfig, ConfigError};
pub use error::{CliError, Result};
pub use output::OutputFormat;
