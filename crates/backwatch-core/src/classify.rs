//! Health classification of normalized plans.
//!
//! Each plan gets exactly one [`Verdict`] from a pure function of its
//! resolved status, resolved type, age and the [`Policy`]. Partitioning is
//! then a single ordered pass over the verdicts.
//!
//! # Rules
//!
//! 1. A plan whose type code is in the ignored set is dropped. This is
//!    checked before any reference lookup, so an ignored plan never fails on
//!    an unknown code.
//! 2. A plan with a healthy status is good.
//! 3. A plan with a bad status is still good if it is not a restore and its
//!    last run is younger than the overdue threshold. Restores with a bad
//!    status are always bad.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::Plan};

/// Default number of hours a bad, non-restore plan may stay quiet.
pub const DEFAULT_OVERDUE_THRESHOLD_HOURS: i64 = 24;

/// Classification policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Policy {
    /// Plan type codes excluded from classification and reporting
    pub ignored_plan_types: BTreeSet<i64>,

    /// Bad non-restore plans younger than this are treated as good
    pub overdue_threshold_hours: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            ignored_plan_types: BTreeSet::new(),
            overdue_threshold_hours: DEFAULT_OVERDUE_THRESHOLD_HOURS,
        }
    }
}

/// Outcome of classifying a single plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Type is ignored by policy; the plan is dropped from every output
    Ignored,
    /// Plan is in good standing
    Good,
    /// Plan is alert-worthy
    Bad,
}

impl Policy {
    /// Whether plans of this type code are dropped.
    pub fn ignores(&self, plan_type_code: i64) -> bool {
        self.ignored_plan_types.contains(&plan_type_code)
    }

    /// Decide the verdict for one plan.
    ///
    /// Both reference codes of a non-ignored plan are resolved, so every plan
    /// that ends up good or bad is known to have valid codes.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownReferenceCode` if a non-ignored plan has
    /// an unregistered status or type code.
    pub fn verdict(&self, plan: &Plan) -> Result<Verdict> {
        if self.ignores(plan.plan_type_code) {
            return Ok(Verdict::Ignored);
        }

        let status = plan.status()?;
        let plan_type = plan.plan_type()?;

        if !status.is_bad() {
            return Ok(Verdict::Good);
        }

        // Negative ages (last run in the future) pass the comparison as-is.
        let recent = plan.last_run_age_hours < self.overdue_threshold_hours;
        if recent && !plan_type.is_restore() {
            Ok(Verdict::Good)
        } else {
            Ok(Verdict::Bad)
        }
    }
}

/// Plans partitioned by verdict, each side in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub good_plans: Vec<Plan>,
    pub bad_plans: Vec<Plan>,
    /// Number of plans dropped because their type is ignored
    pub ignored: usize,
}

/// Partition plans into good and bad standing.
///
/// # Errors
///
/// Returns the first `MonitorError::UnknownReferenceCode` hit; no partial
/// classification is returned.
pub fn classify(plans: Vec<Plan>, policy: &Policy) -> Result<Classification> {
    let mut classification = Classification::default();

    for plan in plans {
        let verdict = policy.verdict(&plan)?;
        debug!(
            "{} / {} / {}: {:?}",
            plan.company, plan.computer, plan.plan_name, verdict
        );
        match verdict {
            Verdict::Ignored => classification.ignored += 1,
            Verdict::Good => classification.good_plans.push(plan),
            Verdict::Bad => classification.bad_plans.push(plan),
        }
    }

    Ok(classification)
}
