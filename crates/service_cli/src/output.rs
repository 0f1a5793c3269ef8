//! Rendering of schedules, plan summaries and batch results.
//!
//! Every renderer writes to an `impl Write` so commands can target stdout
//! or a file and tests can capture output in memory.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use loan_core::types::Currency;
use loan_schedule::approval::Affordability;
use loan_schedule::plan::{PlanSummary, RepaymentPlan};
use loan_schedule::schedules::RoundedSchedule;

use crate::Result;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawing table for terminals
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(s)
    }
}

/// Renders a rounded schedule.
pub fn write_schedule<W: Write>(
    out: &mut W,
    schedule: &RoundedSchedule,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, schedule)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for entry in &schedule.entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => write_schedule_table(out, schedule)?,
    }
    Ok(())
}

fn write_schedule_table<W: Write>(out: &mut W, schedule: &RoundedSchedule) -> Result<()> {
    let currency = schedule.currency;
    let amount = |v: f64| currency.format_amount(v);

    writeln!(
        out,
        "Method: {}  Currency: {}  Installments: {}",
        schedule.method.name(),
        currency,
        schedule.entries.len()
    )?;
    writeln!(out, "┌────────┬────────────┬──────────────┬──────────────┬──────────────┬──────────────┐")?;
    writeln!(out, "│ Period │ Due Date   │ Payment      │ Principal    │ Interest     │ Remaining    │")?;
    writeln!(out, "├────────┼────────────┼──────────────┼──────────────┼──────────────┼──────────────┤")?;
    for entry in &schedule.entries {
        writeln!(
            out,
            "│ {:>6} │ {} │ {:>12} │ {:>12} │ {:>12} │ {:>12} │",
            entry.period,
            entry.due_date,
            amount(entry.payment_amount),
            amount(entry.principal_component),
            amount(entry.interest_component),
            amount(entry.remaining_principal),
        )?;
    }
    writeln!(out, "├────────┴────────────┼──────────────┼──────────────┼──────────────┼──────────────┤")?;
    writeln!(
        out,
        "│ Total               │ {:>12} │ {:>12} │ {:>12} │              │",
        amount(schedule.total_payment),
        amount(schedule.total_principal),
        amount(schedule.total_interest),
    )?;
    writeln!(out, "└─────────────────────┴──────────────┴──────────────┴──────────────┴──────────────┘")?;
    Ok(())
}

/// JSON document written by the plan command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanReport<'a> {
    summary: &'a PlanSummary,
    plan: &'a RepaymentPlan,
}

/// Row written by the plan command in CSV format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InstallmentRow {
    period: u32,
    due_date: String,
    amount_due: f64,
    status: String,
    paid_amount: Option<f64>,
    paid_on: Option<String>,
}

/// Renders a repayment plan with its summary.
pub fn write_plan<W: Write>(out: &mut W, plan: &RepaymentPlan, format: OutputFormat) -> Result<()> {
    let summary = plan.summary();
    let currency = plan.currency();

    match format {
        OutputFormat::Json => {
            let report = PlanReport {
                summary: &summary,
                plan,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for installment in plan.installments() {
                writer.serialize(InstallmentRow {
                    period: installment.period(),
                    due_date: installment.due_date().to_string(),
                    amount_due: currency.round(installment.amount_due()),
                    status: installment.status().to_string(),
                    paid_amount: installment.paid_amount().map(|a| currency.round(a)),
                    paid_on: installment.paid_on().map(|d| d.to_string()),
                })?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "┌────────┬────────────┬──────────────┬──────────┬────────────┐")?;
            writeln!(out, "│ Period │ Due Date   │ Amount Due   │ Status   │ Paid On    │")?;
            writeln!(out, "├────────┼────────────┼──────────────┼──────────┼────────────┤")?;
            for installment in plan.installments() {
                let paid_on = installment
                    .paid_on()
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                writeln!(
                    out,
                    "│ {:>6} │ {} │ {:>12} │ {:<8} │ {:<10} │",
                    installment.period(),
                    installment.due_date(),
                    currency.format_amount(installment.amount_due()),
                    installment.status().to_string(),
                    paid_on,
                )?;
            }
            writeln!(out, "└────────┴────────────┴──────────────┴──────────┴────────────┘")?;
            write_summary_lines(out, &summary)?;
        }
    }
    Ok(())
}

fn write_summary_lines<W: Write>(out: &mut W, summary: &PlanSummary) -> Result<()> {
    let c = summary.currency;
    writeln!(out, "Total principal:   {}", c.format_amount(summary.total_principal))?;
    writeln!(out, "Total payment:     {}", c.format_amount(summary.total_payment))?;
    writeln!(out, "Outstanding:       {}", c.format_amount(summary.outstanding))?;
    writeln!(out, "Overdue:           {}", c.format_amount(summary.overdue_amount))?;
    match summary.next_payment_date {
        Some(date) => writeln!(
            out,
            "Next payment:      {} on {}",
            c.format_amount(summary.next_payment_amount),
            date
        )?,
        None => writeln!(out, "Next payment:      none (settled)")?,
    }
    writeln!(
        out,
        "Paid installments: {}/{}",
        summary.paid_installments, summary.total_installments
    )?;
    Ok(())
}

/// Outcome of one loan in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Loan identifier from the input record
    pub loan_id: String,
    /// Effective repayment method tag, when the schedule was computed
    pub method: Option<String>,
    /// Number of installments
    pub installments: Option<usize>,
    /// Level or first payment
    pub first_payment: Option<f64>,
    /// Total of all payments
    pub total_payment: Option<f64>,
    /// Total interest
    pub total_interest: Option<f64>,
    /// Maturity date
    pub maturity_date: Option<String>,
    /// Whether the term was read ambiguously
    pub ambiguous_term: bool,
    /// Error message for rejected loans
    pub error: Option<String>,
    /// Affordability outcome, when an income was supplied
    pub approved: Option<bool>,
}

impl BatchResult {
    /// Creates a result for a loan that could not be scheduled.
    pub fn failed(loan_id: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            loan_id: loan_id.into(),
            method: None,
            installments: None,
            first_payment: None,
            total_payment: None,
            total_interest: None,
            maturity_date: None,
            ambiguous_term: false,
            error: Some(error.to_string()),
            approved: None,
        }
    }

    /// Creates a result from a computed schedule.
    pub fn scheduled(loan_id: impl Into<String>, schedule: &RoundedSchedule) -> Self {
        Self {
            loan_id: loan_id.into(),
            method: Some(schedule.method.tag().to_string()),
            installments: Some(schedule.entries.len()),
            first_payment: schedule.entries.first().map(|e| e.payment_amount),
            total_payment: Some(schedule.total_payment),
            total_interest: Some(schedule.total_interest),
            maturity_date: schedule.entries.last().map(|e| e.due_date.to_string()),
            ambiguous_term: schedule.term_mapping.is_ambiguous(),
            error: None,
            approved: None,
        }
    }

    /// Records the affordability outcome.
    pub fn with_affordability(mut self, affordability: &Affordability) -> Self {
        self.approved = Some(affordability.decision.is_approved());
        self
    }

    /// Whether the loan was scheduled.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Writes an affordability outcome as a single line.
pub fn write_affordability<W: Write>(
    out: &mut W,
    affordability: &Affordability,
    currency: Currency,
) -> Result<()> {
    writeln!(
        out,
        "Affordability: {} (first installment {}, income capacity {})",
        affordability.decision,
        currency.format_amount(affordability.required_payment),
        currency.format_amount(affordability.payment_capacity),
    )?;
    Ok(())
}

/// Renders batch results.
pub fn write_batch<W: Write>(
    out: &mut W,
    results: &[BatchResult],
    currency: Currency,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for result in results {
                writer.serialize(result)?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            let amount = |v: Option<f64>| v.map_or_else(String::new, |a| currency.format_amount(a));
            let approval = |v: Option<bool>| match v {
                Some(true) => "approved",
                Some(false) => "rejected",
                None => "-",
            };
            writeln!(out, "┌──────────────┬───────────────────┬──────┬──────────────┬──────────────┬──────────┐")?;
            writeln!(out, "│ Loan ID      │ Method            │ N    │ Total        │ Interest     │ Approval │")?;
            writeln!(out, "├──────────────┼───────────────────┼──────┼──────────────┼──────────────┼──────────┤")?;
            for r in results {
                match &r.error {
                    Some(error) => writeln!(out, "│ {:<12} │ error: {}", r.loan_id, error)?,
                    None => writeln!(
                        out,
                        "│ {:<12} │ {:<17} │ {:>4} │ {:>12} │ {:>12} │ {:<8} │",
                        r.loan_id,
                        r.method.as_deref().unwrap_or(""),
                        r.installments.unwrap_or(0),
                        amount(r.total_payment),
                        amount(r.total_interest),
                        approval(r.approved),
                    )?,
                }
            }
            writeln!(out, "└──────────────┴───────────────────┴──────┴──────────────┴──────────────┴──────────┘")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_core::types::Date;
    use loan_schedule::schedules::compute_schedule;

    fn schedule() -> RoundedSchedule {
        let start = Date::from_ymd(2024, 1, 15).unwrap();
        compute_schedule(10_000.0, 180, 12.0, "equal-installment", start)
            .unwrap()
            .rounded(Currency::CNY)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" csv ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "table");
    }

    #[test]
    fn test_schedule_table() {
        let text = render(|out| write_schedule(out, &schedule(), OutputFormat::Table));
        assert!(text.contains("Method: Equal Installment"));
        assert!(text.contains("2024-02-15"));
        assert!(text.contains("1725.48"));
        assert!(text.contains("352.90"));
    }

    #[test]
    fn test_schedule_csv() {
        let text = render(|out| write_schedule(out, &schedule(), OutputFormat::Csv));
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "period,dueDate,paymentAmount,principalComponent,interestComponent,remainingPrincipal"
        );
        assert_eq!(lines.count(), 6);
    }

    #[test]
    fn test_schedule_json() {
        let text = render(|out| write_schedule(out, &schedule(), OutputFormat::Json));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["method"], "equal-installment");
        assert_eq!(value["entries"].as_array().unwrap().len(), 6);
        assert_eq!(value["entries"][0]["dueDate"], "2024-02-15");
    }

    #[test]
    fn test_plan_table_includes_summary() {
        let start = Date::from_ymd(2024, 1, 15).unwrap();
        let s = compute_schedule(3_000.0, 90, 12.0, "equal-principal", start).unwrap();
        let mut plan = RepaymentPlan::from_schedule(&s, Currency::CNY);
        plan.post_payment(1_030.0, Date::from_ymd(2024, 2, 10).unwrap())
            .unwrap();

        let text = render(|out| write_plan(out, &plan, OutputFormat::Table));
        assert!(text.contains("paid"));
        assert!(text.contains("Paid installments: 1/3"));
    }

    #[test]
    fn test_affordability_line() {
        let start = Date::from_ymd(2024, 1, 15).unwrap();
        let s = compute_schedule(10_000.0, 180, 12.0, "equal-installment", start).unwrap();
        let result = loan_schedule::approval::assess_affordability(&s, 2_500.0).unwrap();

        let text = render(|out| write_affordability(out, &result, Currency::CNY));
        assert_eq!(
            text,
            "Affordability: rejected (first installment 1725.48, income capacity 1666.67)\n"
        );

        let row = BatchResult::scheduled("L1", &s.rounded(Currency::CNY)).with_affordability(&result);
        assert_eq!(row.approved, Some(false));
    }

    #[test]
    fn test_batch_csv_reports_errors() {
        let results = vec![
            BatchResult::scheduled("L1", &schedule()),
            BatchResult::failed("L2", "Unsupported repayment method: balloon"),
        ];
        let text = render(|out| write_batch(out, &results, Currency::CNY, OutputFormat::Csv));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("L1,equal-installment,6,"));
        assert!(lines[2].contains("balloon"));
        assert!(results[0].is_ok());
        assert!(!results[1].is_ok());
    }
}
