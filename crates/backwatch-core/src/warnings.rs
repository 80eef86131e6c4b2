//! Soft warnings for backups that report success but look incomplete.
//!
//! Only good plans of a backup type are inspected. Flagging a plan does not
//! move it out of the good set.

use std::fmt;

use log::debug;

use crate::{error::Result, models::Plan};

/// Why a good backup plan is still worth a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningReason {
    /// Fewer files were copied than were selected for backup
    IncompleteCopy,
    /// At least one file failed
    FailedFiles,
    /// The run scanned no files at all
    NothingScanned,
}

impl fmt::Display for WarningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WarningReason::IncompleteCopy => "incomplete copy",
            WarningReason::FailedFiles => "failed files",
            WarningReason::NothingScanned => "nothing scanned",
        };
        write!(f, "{text}")
    }
}

/// File-counter conditions that hold for this plan, regardless of its type.
pub fn warning_reasons(plan: &Plan) -> Vec<WarningReason> {
    let mut reasons = Vec::new();
    if plan.files_to_backup > plan.files_copied {
        reasons.push(WarningReason::IncompleteCopy);
    }
    if plan.files_failed > 0 {
        reasons.push(WarningReason::FailedFiles);
    }
    if plan.files_scanned == 0 {
        reasons.push(WarningReason::NothingScanned);
    }
    reasons
}

/// Comma-separated reason list for log lines.
pub fn describe_reasons(reasons: &[WarningReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Select the backup plans among `good_plans` that deserve a warning,
/// preserving order.
///
/// # Errors
///
/// Returns `MonitorError::UnknownReferenceCode` if a plan's type code is
/// unregistered. Plans that came out of [`crate::classify`] never hit this.
pub fn detect_warnings(good_plans: &[Plan]) -> Result<Vec<&Plan>> {
    let mut flagged = Vec::new();
    for plan in good_plans {
        if !plan.plan_type()?.is_backup() {
            continue;
        }
        let reasons = warning_reasons(plan);
        if !reasons.is_empty() {
            debug!(
                "warning for '{}' on {}: {}",
                plan.plan_name,
                plan.computer,
                describe_reasons(&reasons)
            );
            flagged.push(plan);
        }
    }
    Ok(flagged)
}
