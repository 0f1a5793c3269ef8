//! Error types for the loan schedule CLI.

use thiserror::Error;

use crate::config::ConfigError;
use loan_core::types::DateError;
use loan_schedule::approval::ApprovalError;
use loan_schedule::plan::PlanError;
use loan_schedule::schedules::ScheduleError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Loan terms rejected by the calculator
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Payment rejected by the repayment plan
    #[error("Repayment plan error: {0}")]
    Plan(#[from] PlanError),

    /// Affordability check rejected its inputs
    #[error("Approval error: {0}")]
    Approval(#[from] ApprovalError),

    /// Malformed date argument
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
