//! Backwatch CLI Application
//!
//! Runs one evaluation pass: load settings, fetch plan records, classify,
//! compose the alert and deliver it.

mod api;
mod args;
mod notify;
mod renderer;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use api::BackupApiClient;
use args::Args;
use backwatch_core::{models::parse_records, MonitorBuilder, RawPlan, Settings};
use clap::Parser;
use log::info;
use notify::{Notifier, TelegramNotifier, TerminalNotifier};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        settings,
        input,
        dry_run,
        no_color,
        ignore_types,
        overdue_threshold,
        evaluated_at,
    } = Args::parse();

    let settings =
        Settings::load_or_default(settings.as_deref()).context("Failed to load settings")?;

    let mut policy = settings.policy();
    policy.ignored_plan_types.extend(ignore_types);
    if let Some(hours) = overdue_threshold {
        policy.overdue_threshold_hours = hours;
    }

    let monitor = MonitorBuilder::new()
        .with_policy(policy)
        .with_evaluation_time(evaluated_at)
        .build()
        .context("Failed to initialize monitor")?;

    let policy = monitor.policy();
    info!(
        "Backwatch started: evaluating at {}, ignoring plan types {:?}, overdue after {}h",
        monitor.evaluated_at(),
        policy.ignored_plan_types,
        policy.overdue_threshold_hours
    );

    let records = match input {
        Some(path) => read_records(&path)?,
        None => {
            let api = settings
                .api
                .as_ref()
                .context("No `api` section in settings; pass --input to read records from a file")?;
            BackupApiClient::fetch_plans(api).await?
        }
    };

    let evaluation = monitor
        .evaluate(&records)
        .context("Failed to evaluate plans")?;
    if !evaluation.report.has_findings() {
        info!("no failed plans and no warnings");
    }
    let message = evaluation.report.to_string();

    let notifier: Box<dyn Notifier> = if dry_run {
        Box::new(TerminalNotifier::new(TerminalRenderer::new(!no_color)))
    } else {
        let telegram = settings
            .telegram
            .as_ref()
            .context("No `telegram` section in settings; pass --dry-run to print the alert")?;
        Box::new(TelegramNotifier::new(telegram)?)
    };

    info!("delivering alert via {}", notifier.name());
    notifier.send(&message).await
}

/// Read raw plan records from a JSON file, or stdin for `-`.
fn read_records(path: &Path) -> Result<Vec<RawPlan>> {
    let json = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read plan records from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan records from {}", path.display()))?
    };

    parse_records(&json).context("Invalid plan records")
}
