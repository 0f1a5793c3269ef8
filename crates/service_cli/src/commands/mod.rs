//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Loan terms shared by
//! the single-loan commands are parsed by [`LoanArgs`].

pub mod batch;
pub mod check;
pub mod plan;
pub mod preview;

use std::fs::File;
use std::io::{self, BufWriter, Write};

use clap::Args;
use tracing::warn;

use loan_core::types::Date;
use loan_schedule::schedules::{LoanTerms, RepaymentMethod, Schedule, Term};

use crate::Result;

/// Terms of a single loan given on the command line.
#[derive(Debug, Clone, Args)]
pub struct LoanArgs {
    /// Principal amount
    #[arg(short, long)]
    pub principal: f64,

    /// Loan term, in days unless --months is given
    #[arg(short, long)]
    pub term: u32,

    /// Read the term as a number of months
    #[arg(long)]
    pub months: bool,

    /// Annual interest rate in percent (e.g. 12 for 12%)
    #[arg(short, long)]
    pub rate: f64,

    /// Repayment method (equal-installment, equal-principal, short-term)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Disbursement date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub start: Option<String>,
}

impl LoanArgs {
    /// Returns the term with its unit.
    pub fn term(&self) -> Term {
        if self.months {
            Term::Months(self.term)
        } else {
            Term::Days(self.term)
        }
    }

    /// Builds validated loan terms, using `default_method` when no method
    /// was given.
    pub fn loan_terms(&self, default_method: RepaymentMethod) -> Result<LoanTerms> {
        let method = match self.method.as_deref() {
            Some(tag) if !tag.trim().is_empty() => tag.parse::<RepaymentMethod>()?,
            _ => default_method,
        };
        let start = parse_date_or_today(self.start.as_deref())?;

        Ok(LoanTerms::builder()
            .principal(self.principal)
            .term(self.term())
            .annual_rate_percent(self.rate)
            .method(method)
            .start(start)
            .build()?)
    }
}

/// Parses an ISO date, or returns today when absent.
pub fn parse_date_or_today(date: Option<&str>) -> Result<Date> {
    match date {
        Some(s) => Ok(Date::parse(s)?),
        None => Ok(Date::today()),
    }
}

/// Opens the output destination: a file when a path is given, else stdout.
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => Ok(Box::new(BufWriter::new(File::create(p)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Logs a warning when the loan term was read ambiguously.
pub fn warn_if_ambiguous(loan: &str, schedule: &Schedule) {
    if schedule.term_mapping().is_ambiguous() {
        warn!(
            "{}: non-standard day term read as {} months",
            loan,
            schedule.len()
        );
    }
}
