//! Conversion of raw API records into normalized [`Plan`]s.
//!
//! Normalization is a pure transform. The only field validated here is the
//! last-run timestamp; reference codes are checked later by the classifier.

use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
use log::debug;
use serde_json::Value;

use crate::{
    error::{ConfigResultExt, MonitorError, Result},
    models::{Plan, RawPlan},
};

/// Zone the backup API reports local timestamps in, regardless of where the
/// process runs.
pub const REFERENCE_TIME_ZONE: &str = "America/Chicago";

/// Normalizes raw records relative to a fixed evaluation instant.
#[derive(Debug, Clone)]
pub struct Normalizer {
    zone: TimeZone,
    evaluated_at: Timestamp,
}

impl Normalizer {
    /// Create a normalizer for the reference zone.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::Configuration` if the time zone database has no
    /// entry for the reference zone.
    pub fn new(evaluated_at: Timestamp) -> Result<Self> {
        let zone = TimeZone::get(REFERENCE_TIME_ZONE)
            .config_context("Failed to load reference time zone")?;
        Ok(Self { zone, evaluated_at })
    }

    /// The instant ages are measured against.
    pub fn evaluated_at(&self) -> Timestamp {
        self.evaluated_at
    }

    /// Normalize a single record. `index` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::MalformedRecord` if `LastStart` is missing or
    /// cannot be parsed as a local date-time.
    pub fn normalize(&self, index: usize, raw: &RawPlan) -> Result<Plan> {
        let malformed = || MonitorError::malformed(index, raw.plan_name.as_str());

        let last_start = raw
            .last_start
            .as_deref()
            .ok_or_else(|| malformed().with_reason("missing LastStart"))?;
        let last_start = last_start.trim();
        let last_run_local: DateTime = last_start.parse().map_err(|e| {
            malformed().with_reason(format!("invalid LastStart '{last_start}': {e}"))
        })?;
        let last_run_at = last_run_local
            .to_zoned(self.zone.clone())
            .map_err(|e| {
                malformed().with_reason(format!("LastStart '{last_start}' out of range: {e}"))
            })?
            .timestamp();

        let last_run_age_hours = self.evaluated_at.duration_since(last_run_at).as_hours();

        debug!(
            "normalized '{}' on {}: last run {} ({}h ago)",
            raw.plan_name, raw.computer_name, last_run_local, last_run_age_hours
        );

        Ok(Plan {
            company: raw.company_name.clone(),
            computer: raw.computer_name.clone(),
            plan_name: raw.plan_name.clone(),
            plan_type_code: coerce_int(&raw.plan_type),
            status_code: coerce_int(&raw.status),
            last_run_local,
            last_run_text: display_last_start(last_start),
            last_run_at,
            last_run_age_hours,
            report_url: raw.detailed_report_link.clone(),
            files_scanned: coerce_int(&raw.files_scanned),
            files_to_backup: coerce_int(&raw.files_to_backup),
            files_copied: coerce_int(&raw.files_copied),
            files_failed: coerce_int(&raw.files_failed),
        })
    }

    /// Normalize every record in order, failing on the first malformed one.
    ///
    /// # Errors
    ///
    /// Returns the first `MonitorError::MalformedRecord` encountered.
    pub fn normalize_all(&self, raw: &[RawPlan]) -> Result<Vec<Plan>> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| self.normalize(index, record))
            .collect()
    }
}

/// `2024-03-10T07:00:00.417` becomes `2024-03-10 @ 07:00:00`. Whatever
/// precision the API sent is kept, so `2024-03-10T07:00` stays minute-only.
fn display_last_start(last_start: &str) -> String {
    let whole_seconds = last_start.split('.').next().unwrap_or(last_start);
    whole_seconds.replacen('T', " @ ", 1)
}

/// Coerce a loosely typed JSON value to an integer.
///
/// Integers pass through, floats truncate toward zero, strings yield their
/// leading signed digit run (`"12 files"` is 12). Anything else is 0.
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
