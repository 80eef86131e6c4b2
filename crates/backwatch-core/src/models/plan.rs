//! Normalized plan record.

use jiff::{civil::DateTime, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    reference::{status_info, type_info, PlanStatus, PlanType},
};

/// A plan record with typed fields, ready for classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub company: String,

    pub computer: String,

    pub plan_name: String,

    /// Plan type code, resolved against [`PlanType`] during classification
    pub plan_type_code: i64,

    /// Status code, resolved against [`PlanStatus`] during classification
    pub status_code: i64,

    /// Last run start as reported, in the reference zone's local time
    pub last_run_local: DateTime,

    /// Last run start for display: the API text with fractional seconds
    /// dropped and the date/time `T` written as ` @ `
    pub last_run_text: String,

    /// Last run start as an absolute instant
    pub last_run_at: Timestamp,

    /// Whole hours between the evaluation instant and `last_run_at`.
    ///
    /// Not clamped: a last run in the future gives a negative age.
    pub last_run_age_hours: i64,

    pub report_url: Option<String>,

    pub files_scanned: i64,

    pub files_to_backup: i64,

    pub files_copied: i64,

    pub files_failed: i64,
}

impl Plan {
    /// Resolve this plan's status code.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownReferenceCode` for an unregistered code.
    pub fn status(&self) -> Result<PlanStatus> {
        status_info(self.status_code)
    }

    /// Resolve this plan's type code.
    ///
    /// # Errors
    ///
    /// Returns `MonitorError::UnknownReferenceCode` for an unregistered code.
    pub fn plan_type(&self) -> Result<PlanType> {
        type_info(self.plan_type_code)
    }
}
