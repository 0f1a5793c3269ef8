//! Batch command implementation
//!
//! Computes schedules for a CSV file of loan records in parallel and
//! writes one result row per loan. Records carrying a monthly income are
//! also checked for affordability. Loans that fail validation are reported
//! in their row rather than aborting the run.

use std::io::{Read, Write};
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use loan_core::types::{Currency, Date};
use loan_schedule::approval::AffordabilityPolicy;
use loan_schedule::schedules::{compute_schedule, RepaymentMethod};

use super::open_output;
use crate::config::CliConfig;
use crate::output::{write_batch, BatchResult, OutputFormat};
use crate::{CliError, Result};

/// One loan record from the batch input file.
///
/// Header: `loan_id,principal,term_days,rate_percent,method,start_date`,
/// with an optional trailing `income` column. `method` may be left empty to
/// use the configured default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanRecord {
    /// Loan identifier
    pub loan_id: String,
    /// Principal amount
    pub principal: f64,
    /// Term in days
    pub term_days: u32,
    /// Annual rate in percent
    pub rate_percent: f64,
    /// Repayment method tag
    #[serde(default)]
    pub method: Option<String>,
    /// Disbursement date (YYYY-MM-DD)
    pub start_date: String,
    /// Applicant's monthly income, for the affordability check
    #[serde(default)]
    pub income: Option<f64>,
}

/// A parsed input row: the record or the reason it could not be read.
pub type RecordRow = std::result::Result<LoanRecord, BatchResult>;

/// Reads loan records from CSV.
///
/// Malformed rows are returned as failed results keyed by their row number.
pub fn read_records<R: Read>(input: R) -> Result<Vec<RecordRow>> {
    let mut reader = csv::Reader::from_reader(input);
    let rows = reader
        .deserialize::<LoanRecord>()
        .enumerate()
        .map(|(i, row)| row.map_err(|e| BatchResult::failed(format!("row {}", i + 1), e)))
        .collect();
    Ok(rows)
}

fn schedule_record(
    record: &LoanRecord,
    currency: Currency,
    default_method: RepaymentMethod,
    policy: &AffordabilityPolicy,
) -> BatchResult {
    let method = record
        .method
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default_method.tag());

    let result = Date::parse(&record.start_date)
        .map_err(|e| e.to_string())
        .and_then(|start| {
            compute_schedule(
                record.principal,
                record.term_days,
                record.rate_percent,
                method,
                start,
            )
            .map_err(|e| e.to_string())
        });

    let schedule = match result {
        Ok(schedule) => schedule,
        Err(e) => return BatchResult::failed(&record.loan_id, e),
    };
    let scheduled = BatchResult::scheduled(&record.loan_id, &schedule.rounded(currency));

    match record.income {
        None => scheduled,
        Some(income) => match policy.assess(&schedule, income) {
            Ok(affordability) => scheduled.with_affordability(&affordability),
            Err(e) => BatchResult::failed(&record.loan_id, e),
        },
    }
}

/// Computes schedules for every row in parallel, preserving input order.
pub fn schedule_rows(
    rows: &[RecordRow],
    currency: Currency,
    default_method: RepaymentMethod,
    policy: &AffordabilityPolicy,
) -> Vec<BatchResult> {
    rows.par_iter()
        .map(|row| match row {
            Ok(record) => schedule_record(record, currency, default_method, policy),
            Err(failed) => failed.clone(),
        })
        .collect()
}

/// Run the batch command
pub fn run(
    input: &str,
    config: &CliConfig,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    info!("Starting batch run...");
    info!("  Input: {}", input);
    info!("  Output format: {}", format);

    let path = Path::new(input);
    if !path.exists() {
        return Err(CliError::FileNotFound(input.to_string()));
    }

    let rows = read_records(std::fs::File::open(path)?)?;
    if rows.len() > config.max_batch_size {
        return Err(CliError::InvalidArgument(format!(
            "Batch of {} loans exceeds max_batch_size ({})",
            rows.len(),
            config.max_batch_size
        )));
    }

    let results = schedule_rows(
        &rows,
        config.currency,
        config.default_method(),
        &config.affordability_policy(),
    );

    for result in &results {
        if result.ambiguous_term {
            warn!(
                "{}: non-standard day term read as {} months",
                result.loan_id,
                result.installments.unwrap_or(0)
            );
        }
        if let Some(error) = &result.error {
            warn!("{}: {}", result.loan_id, error);
        }
    }

    let mut out = open_output(output)?;
    write_batch(&mut out, &results, config.currency, format)?;
    out.flush()?;

    let failed = results.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Batch complete: {} scheduled, {} failed",
        results.len() - failed,
        failed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const INPUT: &str = "\
loan_id,principal,term_days,rate_percent,method,start_date
L001,10000,180,12,equal-installment,2024-01-15
L002,10000,180,12,,2024-01-15
L003,5000,15,18,equal-principal,2024-03-01
L004,5000,24,6,equal-principal,2024-01-31
L005,5000,90,6,balloon,2024-01-31
L006,not-a-number,90,6,equal-principal,2024-01-31
L007,5000,90,6,equal-principal,2024-02-30
";

    fn run_rows(default_method: RepaymentMethod) -> Vec<BatchResult> {
        let rows = read_records(INPUT.as_bytes()).unwrap();
        schedule_rows(
            &rows,
            Currency::CNY,
            default_method,
            &AffordabilityPolicy::default(),
        )
    }

    #[test]
    fn test_batch_preserves_order() {
        let results = run_rows(RepaymentMethod::EqualInstallment);
        let ids: Vec<&str> = results.iter().map(|r| r.loan_id.as_str()).collect();
        assert_eq!(ids, vec!["L001", "L002", "L003", "L004", "L005", "row 6", "L007"]);
    }

    #[test]
    fn test_batch_results() {
        let results = run_rows(RepaymentMethod::EqualInstallment);

        assert_eq!(results[0].installments, Some(6));
        assert_abs_diff_eq!(results[0].first_payment.unwrap(), 1_725.48, epsilon = 1e-9);
        assert_abs_diff_eq!(results[0].total_interest.unwrap(), 352.90, epsilon = 1e-9);

        assert_eq!(results[2].method.as_deref(), Some("short-term"));
        assert_eq!(results[2].installments, Some(1));
        assert_eq!(results[2].maturity_date.as_deref(), Some("2024-03-16"));

        assert!(results[3].ambiguous_term);
        assert_eq!(results[3].installments, Some(24));

        assert!(results[4].error.as_deref().unwrap().contains("balloon"));
        assert!(!results[5].is_ok());
        assert!(!results[6].is_ok());
    }

    #[test]
    fn test_batch_unrepresentable_term_fails_row() {
        let input = "\
loan_id,principal,term_days,rate_percent,method,start_date
BIG,1000,4294967295,12,equal-installment,2024-01-15
OK,1000,90,12,equal-principal,2024-01-15
";
        let rows = read_records(input.as_bytes()).unwrap();
        let results = schedule_rows(
            &rows,
            Currency::CNY,
            RepaymentMethod::default(),
            &AffordabilityPolicy::default(),
        );
        assert!(results[0].error.as_deref().unwrap().contains("overflow"));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_batch_income_column() {
        let input = "\
loan_id,principal,term_days,rate_percent,method,start_date,income
RICH,10000,180,12,equal-installment,2024-01-15,3000
POOR,10000,180,12,equal-installment,2024-01-15,2500
NONE,10000,180,12,equal-installment,2024-01-15,
BAD,10000,180,12,equal-installment,2024-01-15,-5
";
        let rows = read_records(input.as_bytes()).unwrap();
        let results = schedule_rows(
            &rows,
            Currency::CNY,
            RepaymentMethod::default(),
            &AffordabilityPolicy::default(),
        );
        assert_eq!(results[0].approved, Some(true));
        assert_eq!(results[1].approved, Some(false));
        assert_eq!(results[2].approved, None);
        assert!(results[2].is_ok());
        assert!(results[3].error.as_deref().unwrap().contains("income"));
    }

    #[test]
    fn test_batch_blank_method_uses_default() {
        let results = run_rows(RepaymentMethod::EqualPrincipal);
        assert_eq!(results[1].method.as_deref(), Some("equal-principal"));
        assert_abs_diff_eq!(results[1].total_interest.unwrap(), 350.0, epsilon = 1e-9);
        assert_eq!(results[0].method.as_deref(), Some("equal-installment"));
    }
}
