//! One evaluation pass over a batch of raw plan records.

use jiff::Timestamp;
use log::info;

use crate::{
    classify::{classify, Classification, Policy},
    error::Result,
    models::{Plan, RawPlan},
    normalize::Normalizer,
    report::Report,
    warnings::detect_warnings,
};

/// Runs the normalize, classify, warn and compose stages with a fixed policy
/// and evaluation instant.
#[derive(Debug, Clone)]
pub struct Monitor {
    policy: Policy,
    normalizer: Normalizer,
}

/// Everything an evaluation pass produced.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub evaluated_at: Timestamp,
    pub classification: Classification,
    /// Good backup plans flagged with a soft warning, in order. These also
    /// remain in `classification.good_plans`.
    pub warned_plans: Vec<Plan>,
    pub report: Report,
}

impl Monitor {
    /// The policy this monitor classifies with.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// The instant plan ages are measured against.
    pub fn evaluated_at(&self) -> Timestamp {
        self.normalizer.evaluated_at()
    }

    /// Evaluate a batch of raw records.
    ///
    /// Any failure aborts the whole pass; no partial report is produced.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::MalformedRecord` for an unparseable record and
    /// `MonitorError::UnknownReferenceCode` for an unregistered code on a
    /// plan that is not ignored.
    pub fn evaluate(&self, raw: &[RawPlan]) -> Result<Evaluation> {
        let plans = self.normalizer.normalize_all(raw)?;
        let classification = classify(plans, &self.policy)?;

        let warned = detect_warnings(&classification.good_plans)?;
        let report = Report::compose(&classification, &warned)?;
        let warned_plans: Vec<Plan> = warned.into_iter().cloned().collect();

        info!(
            "evaluated {} plans: {} good, {} bad, {} ignored, {} warnings",
            raw.len(),
            report.good_count,
            report.bad_count,
            classification.ignored,
            report.warnings.len()
        );

        Ok(Evaluation {
            evaluated_at: self.evaluated_at(),
            classification,
            warned_plans,
            report,
        })
    }
}

/// Builder for creating and configuring Monitor instances.
#[derive(Debug, Clone, Default)]
pub struct MonitorBuilder {
    policy: Policy,
    evaluated_at: Option<Timestamp>,
}

impl MonitorBuilder {
    /// Creates a new builder with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds plan type codes to the ignored set.
    pub fn ignore_plan_types<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.policy.ignored_plan_types.extend(codes);
        self
    }

    /// Sets the overdue threshold in hours.
    pub fn with_overdue_threshold(mut self, hours: i64) -> Self {
        self.policy.overdue_threshold_hours = hours;
        self
    }

    /// Pins the evaluation instant. Defaults to the time `build` is called.
    pub fn with_evaluation_time(mut self, evaluated_at: Option<Timestamp>) -> Self {
        if let Some(evaluated_at) = evaluated_at {
            self.evaluated_at = Some(evaluated_at);
        }
        self
    }

    /// Builds the configured monitor.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Configuration` if the reference time zone is
    /// unavailable.
    pub fn build(self) -> Result<Monitor> {
        let evaluated_at = self.evaluated_at.unwrap_or_else(Timestamp::now);
        Ok(Monitor {
            policy: self.policy,
            normalizer: Normalizer::new(evaluated_at)?,
        })
    }
}
