//! Plan command implementation
//!
//! Tracks a loan's repayment plan through a sequence of payments and
//! reports its position as of a date.

use std::io::Write;

use tracing::{debug, info};

use loan_core::types::{Currency, Date};
use loan_schedule::plan::RepaymentPlan;
use loan_schedule::schedules::{LoanTerms, ScheduleCalculator};

use super::{open_output, parse_date_or_today, warn_if_ambiguous, LoanArgs};
use crate::config::CliConfig;
use crate::output::{write_plan, OutputFormat};
use crate::{CliError, Result};

/// Parses a payment given as `AMOUNT@YYYY-MM-DD`.
pub fn parse_payment(payment: &str) -> Result<(f64, Date)> {
    let (amount, date) = payment.split_once('@').ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "Payment '{}' must be given as AMOUNT@YYYY-MM-DD",
            payment
        ))
    })?;
    let amount: f64 = amount.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!("Payment amount '{}' is not a number", amount))
    })?;
    Ok((amount, Date::parse(date)?))
}

/// Builds a plan and replays payments against it in date order.
///
/// Before each payment the plan is swept for installments overdue on the
/// payment date; a final sweep runs as of `as_of`.
pub fn build_plan(
    terms: &LoanTerms,
    currency: Currency,
    payments: &[(f64, Date)],
    as_of: Date,
) -> Result<RepaymentPlan> {
    let schedule = ScheduleCalculator::compute(terms)?;
    warn_if_ambiguous("loan", &schedule);
    let mut plan = RepaymentPlan::from_schedule(&schedule, currency);

    let mut ordered = payments.to_vec();
    ordered.sort_by_key(|&(_, date)| date);

    for (amount, paid_on) in ordered {
        let swept = plan.mark_overdue(paid_on);
        if swept > 0 {
            debug!("{} installment(s) overdue as of {}", swept, paid_on);
        }
        let receipt = plan.post_payment(amount, paid_on)?;
        info!(
            "Posted {} on {} to installment {}{}; outstanding {}",
            currency.format_amount(receipt.paid_amount),
            receipt.paid_on,
            receipt.period,
            if receipt.was_overdue { " (overdue)" } else { "" },
            currency.format_amount(receipt.outstanding_after)
        );
        if receipt.settled_ahead > 0 {
            info!(
                "Balance cleared: {} later installment(s) settled",
                receipt.settled_ahead
            );
        }
    }

    plan.mark_overdue(as_of);
    Ok(plan)
}

/// Run the plan command
pub fn run(
    loan: &LoanArgs,
    payments: &[String],
    as_of: Option<&str>,
    config: &CliConfig,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let terms = loan.loan_terms(config.default_method())?;
    let payments = payments
        .iter()
        .map(|p| parse_payment(p))
        .collect::<Result<Vec<_>>>()?;
    let as_of = parse_date_or_today(as_of)?;
    info!("Replaying {} payment(s), position as of {}", payments.len(), as_of);

    let plan = build_plan(&terms, config.currency, &payments, as_of)?;

    let mut out = open_output(output)?;
    write_plan(&mut out, &plan, format)?;
    out.flush()?;

    if plan.is_settled() {
        info!("Loan settled");
    }
    Ok(())
}
