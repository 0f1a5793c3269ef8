//! Loan Schedule CLI - Command Line Operations for Loan Repayment Schedules
//!
//! This is the operational entry point for the loan schedule engine.
//!
//! # Commands
//!
//! - `loan-schedule preview [--income <amount>]` - Print one loan's schedule, optionally checked for affordability
//! - `loan-schedule batch --input <file>` - Schedule a CSV file of loans
//! - `loan-schedule plan --pay <AMOUNT@DATE>` - Track payments against a loan
//! - `loan-schedule check` - Check configuration and reference loans

use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use service_cli::commands::{self, LoanArgs};
use service_cli::config::{CliConfig, DEFAULT_CONFIG_FILE};
use service_cli::{OutputFormat, Result};

/// Loan repayment schedule CLI
#[derive(Parser)]
#[command(name = "loan-schedule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the repayment schedule of a single loan
    Preview {
        #[command(flatten)]
        loan: LoanArgs,

        /// Applicant's monthly income, checks the loan for affordability
        #[arg(long)]
        income: Option<f64>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compute schedules for a CSV file of loans
    Batch {
        /// Path to loan records (CSV)
        #[arg(short, long)]
        input: String,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Replay payments against a loan and report its position
    Plan {
        #[command(flatten)]
        loan: LoanArgs,

        /// Payment as AMOUNT@YYYY-MM-DD, may be repeated
        #[arg(long = "pay")]
        payments: Vec<String>,

        /// Position date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Output file, defaults to stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check configuration and reference loans
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_with_env_and_validate(Path::new(&cli.config))?;

    // Initialise tracing; RUST_LOG takes precedence over the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Preview {
            loan,
            income,
            format,
            output,
        } => commands::preview::run(
            &loan,
            income,
            &config,
            format.unwrap_or(config.output_format),
            output.as_deref(),
        ),
        Commands::Batch {
            input,
            format,
            output,
        } => commands::batch::run(
            &input,
            &config,
            format.unwrap_or(config.output_format),
            output.as_deref(),
        ),
        Commands::Plan {
            loan,
            payments,
            as_of,
            format,
            output,
        } => commands::plan::run(
            &loan,
            &payments,
            as_of.as_deref(),
            &config,
            format.unwrap_or(config.output_format),
            output.as_deref(),
        ),
        Commands::Check => commands::check::run(&config, &cli.config),
    }
}
