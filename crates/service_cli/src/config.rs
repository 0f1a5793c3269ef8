//! CLI configuration management.
//!
//! Handles loading of configuration from TOML files with environment
//! variable override support.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::output::OutputFormat;
use loan_core::types::Currency;
use loan_schedule::approval::{AffordabilityPolicy, DEFAULT_INCOME_SHARE};
use loan_schedule::schedules::RepaymentMethod;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "loan.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const MAX_BATCH_LIMIT: usize = 10_000_000;

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Currency used for rounding and payment tolerance
    pub currency: Currency,

    /// Method tag used when a loan does not name one
    pub default_method: String,

    /// Log level
    pub log_level: String,

    /// Output format for schedules and summaries
    pub output_format: OutputFormat,

    /// Maximum number of loans accepted by a batch run
    pub max_batch_size: usize,

    /// Share of monthly income one installment may take for approval
    pub approval_income_share: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: Currency::CNY,
            default_method: RepaymentMethod::default().tag().to_string(),
            log_level: "info".to_string(),
            output_format: OutputFormat::Table,
            max_batch_size: 100_000,
            approval_income_share: DEFAULT_INCOME_SHARE,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    ///
    /// Unparseable values are reported by [`CliConfig::validate`] rather
    /// than silently ignored.
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(currency) = lookup("LOAN_CURRENCY") {
            match currency.parse() {
                Ok(c) => self.currency = c,
                Err(e) => errors.push(format!("LOAN_CURRENCY: {}", e)),
            }
        }

        if let Some(method) = lookup("LOAN_DEFAULT_METHOD") {
            self.default_method = method;
        }

        if let Some(log_level) = lookup("LOAN_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("LOAN_OUTPUT_FORMAT") {
            match format.parse() {
                Ok(f) => self.output_format = f,
                Err(e) => errors.push(format!("LOAN_OUTPUT_FORMAT: {}", e)),
            }
        }

        if let Some(size) = lookup("LOAN_MAX_BATCH_SIZE") {
            match size.parse() {
                Ok(n) => self.max_batch_size = n,
                Err(_) => errors.push(format!("LOAN_MAX_BATCH_SIZE: '{}' is not a number", size)),
            }
        }

        if let Some(share) = lookup("LOAN_APPROVAL_INCOME_SHARE") {
            match share.parse() {
                Ok(v) => self.approval_income_share = v,
                Err(_) => errors.push(format!(
                    "LOAN_APPROVAL_INCOME_SHARE: '{}' is not a number",
                    share
                )),
            }
        }

        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = RepaymentMethod::from_tag_or_default(&self.default_method) {
            errors.push(format!("Invalid default_method: {}", e));
        }

        if self.max_batch_size == 0 {
            errors.push("max_batch_size must be greater than 0".to_string());
        }
        if self.max_batch_size > MAX_BATCH_LIMIT {
            errors.push(format!(
                "max_batch_size {} exceeds maximum allowed ({})",
                self.max_batch_size, MAX_BATCH_LIMIT
            ));
        }

        if let Err(e) = AffordabilityPolicy::new(self.approval_income_share) {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configured affordability policy
    pub fn affordability_policy(&self) -> AffordabilityPolicy {
        AffordabilityPolicy::new(self.approval_income_share).unwrap_or_default()
    }

    /// Returns the configured default repayment method
    pub fn default_method(&self) -> RepaymentMethod {
        RepaymentMethod::from_tag_or_default(&self.default_method).unwrap_or_default()
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
