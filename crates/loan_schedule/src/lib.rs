//! # loan_schedule: Repayment Schedule Engine
//!
//! ## Schedule Layer Role
//!
//! loan_schedule is the single source of truth for loan amortization:
//! - Schedule calculation from loan terms (`schedules`)
//! - Repayment plan tracking: overdue sweep, payment posting, summaries (`plan`)
//! - Income-based affordability check for loan applications (`approval`)
//!
//! Every function is pure over its inputs. No wall-clock time is read; the
//! start date and "as of" dates are always supplied by the caller, so the
//! calculator may be called concurrently without synchronisation.
//!
//! ## Usage Examples
//!
//! ```rust
//! use loan_schedule::schedules::compute_schedule;
//! use loan_core::types::Date;
//!
//! let schedule = compute_schedule(
//!     10_000.0,
//!     180,
//!     12.0,
//!     "equal-principal",
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//! )
//! .unwrap();
//!
//! assert_eq!(schedule.len(), 6);
//! assert!((schedule.total_principal() - 10_000.0).abs() < 0.01);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for schedules, rounded views and plan summaries

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod approval;
pub mod plan;
pub mod schedules;
