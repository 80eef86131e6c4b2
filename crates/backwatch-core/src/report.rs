//! Alert text composition.
//!
//! [`Report::compose`] resolves every reference code up front, so the
//! [`Display`](fmt::Display) impl is pure formatting. Output is the
//! Markdown dialect chat notifiers accept: `*bold*` and `[text](url)`.

use std::fmt;

use serde::Serialize;

use crate::{classify::Classification, error::Result, models::Plan};

const RULE_WIDTH: usize = 40;

/// One failed plan block.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedPlanEntry {
    pub company: String,
    pub computer: String,
    pub plan_name: String,
    /// Last run as reported, e.g. `2024-03-10 @ 07:00:00`
    pub last_run: String,
    pub age_hours: i64,
    pub plan_type: &'static str,
    pub status: &'static str,
    pub report_url: Option<String>,
}

impl FailedPlanEntry {
    fn from_plan(plan: &Plan) -> Result<Self> {
        Ok(Self {
            company: plan.company.clone(),
            computer: plan.computer.clone(),
            plan_name: plan.plan_name.clone(),
            last_run: plan.last_run_text.clone(),
            age_hours: plan.last_run_age_hours,
            plan_type: plan.plan_type()?.as_str(),
            status: plan.status()?.as_str(),
            report_url: plan.report_url.clone(),
        })
    }
}

impl fmt::Display for FailedPlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Company Name: {}", escape_markdown(&self.company))?;
        writeln!(f, "Computer Name: {}", escape_markdown(&self.computer))?;
        writeln!(f, "Plan Name: {}", escape_markdown(&self.plan_name))?;
        writeln!(
            f,
            "Last Run: {} ({} hours ago)",
            self.last_run, self.age_hours
        )?;
        writeln!(f, "Plan Type: {}", self.plan_type)?;
        writeln!(f, "Plan Status: {}", self.status)?;
        if let Some(url) = &self.report_url {
            writeln!(f, "Report: [View]({url})")?;
        }
        Ok(())
    }
}

/// One warned backup block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WarningEntry {
    pub company: String,
    pub computer: String,
    pub files_scanned: i64,
    pub files_to_backup: i64,
    pub files_copied: i64,
    pub files_failed: i64,
}

impl From<&Plan> for WarningEntry {
    fn from(plan: &Plan) -> Self {
        Self {
            company: plan.company.clone(),
            computer: plan.computer.clone(),
            files_scanned: plan.files_scanned,
            files_to_backup: plan.files_to_backup,
            files_copied: plan.files_copied,
            files_failed: plan.files_failed,
        }
    }
}

impl fmt::Display for WarningEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({})",
            escape_markdown(&self.computer),
            escape_markdown(&self.company)
        )?;
        writeln!(f, "   - {} files scanned", self.files_scanned)?;
        writeln!(f, "   - {} files to backup", self.files_to_backup)?;
        writeln!(f, "   - {} files copied", self.files_copied)?;
        writeln!(f, "   - {} files failed", self.files_failed)
    }
}

/// The complete alert: summary counts, failed plans and warned backups.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Report {
    pub good_count: usize,
    pub bad_count: usize,
    pub failed: Vec<FailedPlanEntry>,
    pub warnings: Vec<WarningEntry>,
}

impl Report {
    /// Build a report from a classification and its warned subset.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownReferenceCode` if a failed plan carries
    /// an unregistered code.
    pub fn compose(classification: &Classification, warnings: &[&Plan]) -> Result<Self> {
        let failed = classification
            .bad_plans
            .iter()
            .map(FailedPlanEntry::from_plan)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            good_count: classification.good_plans.len(),
            bad_count: classification.bad_plans.len(),
            failed,
            warnings: warnings.iter().map(|plan| WarningEntry::from(*plan)).collect(),
        })
    }

    /// Whether there is anything beyond the summary worth reading.
    pub fn has_findings(&self) -> bool {
        !self.failed.is_empty() || !self.warnings.is_empty()
    }
}

/// Backslash-escape the characters legacy chat Markdown reads as markup, so
/// names like `File_Server` arrive verbatim.
fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn section_header(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    write!(f, "*.:: {title} ::.*\n{}", "-".repeat(RULE_WIDTH))
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section_header(f, "SUMMARY")?;
        writeln!(f)?;
        writeln!(f, "There are {} plans in good standing", self.good_count)?;
        writeln!(f, "There are {} plans in BAD standing.", self.bad_count)?;

        writeln!(f)?;
        section_header(f, "FAILED PLANS")?;
        for entry in &self.failed {
            write!(f, "\n{entry}")?;
        }

        writeln!(f)?;
        section_header(f, "WARNING BACKUPS")?;
        for entry in &self.warnings {
            write!(f, "\n{entry}")?;
        }

        Ok(())
    }
}
