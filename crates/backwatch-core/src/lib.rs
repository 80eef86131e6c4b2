//! Core library for the Backwatch backup plan monitor.
//!
//! This crate turns the plan records returned by a backup-management API's
//! monitoring endpoint into a single alert message. It performs no I/O of
//! its own beyond reading a settings file; fetching records and delivering
//! the message belong to the caller.
//!
//! # Pipeline
//!
//! ```text
//! RawPlan ──▶ normalize ──▶ classify ──┬──▶ bad plans ───────────┐
//!                                      └──▶ good plans ──▶ warn ──┴──▶ Report
//! ```
//!
//! - [`reference`]: status and plan type code tables
//! - [`normalize`]: typed [`Plan`]s with last-run age in hours
//! - [`classify`]: good/bad partition under a [`Policy`]
//! - [`warnings`]: good backups with suspicious file counts
//! - [`report`]: the rendered alert
//!
//! [`Monitor`] runs all stages in one call.
//!
//! # Quick Start
//!
//! ```rust
//! use backwatch_core::{models::parse_records, MonitorBuilder};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let records = parse_records(
//!     r#"[{"CompanyName": "Acme", "ComputerName": "FS01", "PlanName": "Nightly",
//!          "PlanType": 1, "Status": 2, "LastStart": "2024-03-08T22:00:00",
//!          "FilesScanned": 10, "FilesToBackup": 0, "FilesCopied": 0, "FilesFailed": 0}]"#,
//! )?;
//!
//! let monitor = MonitorBuilder::new()
//!     .ignore_plan_types([13])
//!     .with_overdue_threshold(24)
//!     .with_evaluation_time(Some("2024-03-10T12:00:00Z".parse()?))
//!     .build()?;
//!
//! let evaluation = monitor.evaluate(&records)?;
//! assert_eq!(evaluation.classification.bad_plans.len(), 1);
//! println!("{}", evaluation.report);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod monitor;
pub mod normalize;
pub mod reference;
pub mod report;
pub mod warnings;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use classify::{classify, Classification, Policy, Verdict};
pub use config::Settings;
pub use error::{MonitorError, Result};
pub use models::{Plan, RawPlan};
pub use monitor::{Evaluation, Monitor, MonitorBuilder};
pub use normalize::{Normalizer, REFERENCE_TIME_ZONE};
pub use reference::{status_info, type_info, PlanStatus, PlanType};
pub use report::Report;
pub use warnings::{detect_warnings, WarningReason};
