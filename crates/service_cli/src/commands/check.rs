//! Check command implementation
//!
//! Prints the effective configuration and verifies the calculator against
//! reference loans.

use tracing::info;

use loan_core::types::{Currency, Date};
use loan_schedule::schedules::{compute_schedule, RepaymentMethod};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Reference loan and the rounded figures it must produce.
struct ReferenceLoan {
    method: RepaymentMethod,
    term_days: u32,
    first_payment: f64,
    total_interest: f64,
}

/// 10 000 at 12% from 2024-01-15.
const REFERENCE_LOANS: [ReferenceLoan; 3] = [
    ReferenceLoan {
        method: RepaymentMethod::EqualInstallment,
        term_days: 180,
        first_payment: 1_725.48,
        total_interest: 352.90,
    },
    ReferenceLoan {
        method: RepaymentMethod::EqualPrincipal,
        term_days: 180,
        first_payment: 1_766.67,
        total_interest: 350.00,
    },
    ReferenceLoan {
        method: RepaymentMethod::EqualInstallment,
        term_days: 30,
        first_payment: 10_098.63,
        total_interest: 98.63,
    },
];

/// Recomputes the reference loans, returning the number checked.
pub fn verify_reference_loans() -> Result<usize> {
    let start = Date::from_ymd(2024, 1, 15)?;

    for reference in &REFERENCE_LOANS {
        let schedule = compute_schedule(
            10_000.0,
            reference.term_days,
            12.0,
            reference.method.tag(),
            start,
        )?
        .rounded(Currency::CNY);

        let first = schedule.entries.first().map_or(0.0, |e| e.payment_amount);
        if first != reference.first_payment || schedule.total_interest != reference.total_interest {
            return Err(CliError::InvalidArgument(format!(
                "{} over {} days: expected payment {} and interest {}, got {} and {}",
                reference.method,
                reference.term_days,
                reference.first_payment,
                reference.total_interest,
                first,
                schedule.total_interest
            )));
        }
    }

    Ok(REFERENCE_LOANS.len())
}

/// Run the check command
pub fn run(config: &CliConfig, config_path: &str) -> Result<()> {
    info!("Checking configuration...");

    println!("Loan Schedule v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Configuration ({}):", config_path);
    println!("  currency:        {}", config.currency);
    println!("  default_method:  {}", config.default_method());
    println!("  log_level:       {}", config.log_level);
    println!("  output_format:   {}", config.output_format);
    println!("  max_batch_size:  {}", config.max_batch_size);
    println!();

    let checked = verify_reference_loans()?;
    println!("  ✓ {} reference loans reproduced", checked);

    info!("Check complete");
    Ok(())
}
