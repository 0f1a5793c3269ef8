//! Preview command implementation
//!
//! Computes and prints the repayment schedule of a single loan, optionally
//! checking it against the applicant's monthly income.

use std::io::Write;

use tracing::info;

use loan_schedule::schedules::ScheduleCalculator;

use super::{open_output, warn_if_ambiguous, LoanArgs};
use crate::config::CliConfig;
use crate::output::{write_affordability, write_schedule, OutputFormat};
use crate::Result;

/// Run the preview command
pub fn run(
    loan: &LoanArgs,
    income: Option<f64>,
    config: &CliConfig,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let terms = loan.loan_terms(config.default_method())?;
    info!(
        "Previewing {} over {} at {}% ({})",
        config.currency.format_amount(terms.principal()),
        terms.term(),
        terms.annual_rate_percent(),
        terms.method()
    );

    let schedule = ScheduleCalculator::compute(&terms)?;
    warn_if_ambiguous("loan", &schedule);
    if schedule.method() != terms.method() {
        info!("Short term: repaid as {}", schedule.method().name());
    }

    let policy = config.affordability_policy();
    let affordability = income
        .map(|income| policy.assess(&schedule, income))
        .transpose()?;

    let mut out = open_output(output)?;
    write_schedule(&mut out, &schedule.rounded(config.currency), format)?;

    if let Some(affordability) = &affordability {
        info!(
            "Affordability: {} (first installment {}, capacity {})",
            affordability.decision,
            config.currency.format_amount(affordability.required_payment),
            config.currency.format_amount(affordability.payment_capacity)
        );
        if format == OutputFormat::Table {
            write_affordability(&mut out, affordability, config.currency)?;
        }
    }
    out.flush()?;

    info!("Preview complete: {} installments", schedule.len());
    Ok(())
}
