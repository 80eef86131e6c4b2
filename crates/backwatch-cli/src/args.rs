use std::path::PathBuf;

use clap::Parser;
use jiff::Timestamp;

/// Backup plan health monitor
///
/// Fetches the status of every backup and restore plan from the backup
/// API's monitoring endpoint, classifies each plan against the configured
/// policy, and sends a single alert summarizing failed plans and backups
/// that succeeded with suspicious file counts.
#[derive(Parser, Debug)]
#[command(version, about, name = "backwatch")]
pub struct Args {
    /// Path to the YAML settings file. Defaults to backwatch/settings.yml in
    /// the XDG config directories
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Read plan records from a JSON file ("-" for stdin) instead of the API
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Print the alert instead of sending it to Telegram
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output and use plain text
    #[arg(long)]
    pub no_color: bool,

    /// Plan type code to ignore, in addition to the settings file's list
    #[arg(long = "ignore-type", value_name = "CODE")]
    pub ignore_types: Vec<i64>,

    /// Hours within which a bad, non-restore plan is not alerted on
    #[arg(long, value_name = "HOURS")]
    pub overdue_threshold: Option<i64>,

    /// Evaluate plan ages against this instant (RFC 3339) instead of now
    #[arg(long, value_name = "TIMESTAMP")]
    pub evaluated_at: Option<Timestamp>,
}
