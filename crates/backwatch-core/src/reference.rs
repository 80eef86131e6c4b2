//! Reference tables for plan status and plan type codes.
//!
//! The backup API reports both as bare integers. These enumerations are the
//! only place the codes are given meaning: display text for reports and the
//! policy flags the classifier and warning detector branch on.
//!
//! Lookups are total only over the known codes. An unregistered code is an
//! [`MonitorError::UnknownReferenceCode`], never a silent default.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};

/// Last-run status of a plan as reported by the backup API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlanStatus {
    Success,
    Overdue,
    Error,
    Running,
    Unknown,
    Interrupted,
    UnexpectedlyClosed,
    Warning,
}

impl PlanStatus {
    /// Every status in code order.
    pub const ALL: [PlanStatus; 8] = [
        PlanStatus::Success,
        PlanStatus::Overdue,
        PlanStatus::Error,
        PlanStatus::Running,
        PlanStatus::Unknown,
        PlanStatus::Interrupted,
        PlanStatus::UnexpectedlyClosed,
        PlanStatus::Warning,
    ];

    /// Numeric code used by the backup API.
    pub fn code(&self) -> i64 {
        match self {
            PlanStatus::Success => 0,
            PlanStatus::Overdue => 1,
            PlanStatus::Error => 2,
            PlanStatus::Running => 3,
            PlanStatus::Unknown => 4,
            PlanStatus::Interrupted => 5,
            PlanStatus::UnexpectedlyClosed => 6,
            PlanStatus::Warning => 7,
        }
    }

    /// Display text used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Success => "Success",
            PlanStatus::Overdue => "Overdue",
            PlanStatus::Error => "Error",
            PlanStatus::Running => "Running",
            PlanStatus::Unknown => "Unknown",
            PlanStatus::Interrupted => "Interrupted",
            PlanStatus::UnexpectedlyClosed => "UnexpectedlyClosed",
            PlanStatus::Warning => "Warning",
        }
    }

    /// Whether this status is alert-worthy.
    ///
    /// Only `Success` and `Running` are considered healthy. Note that the
    /// API's own `Warning` status counts as bad here.
    pub fn is_bad(&self) -> bool {
        !matches!(self, PlanStatus::Success | PlanStatus::Running)
    }
}

impl TryFrom<i64> for PlanStatus {
    type Error = MonitorError;

    fn try_from(code: i64) -> Result<Self> {
        PlanStatus::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| MonitorError::unknown_status(code))
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of job a plan runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlanType {
    NotApplicable,
    Backup,
    Restore,
    BackupFiles,
    RestoreFiles,
    VmBackup,
    VmRestore,
    SqlBackup,
    SqlRestore,
    ExchangeBackup,
    ExchangeRestore,
    BmssBackup,
    BmssRestore,
    ConsistencyCheck,
    Ec2Backup,
    Ec2Restore,
    HyperVBackup,
    HyperVRestore,
}

impl PlanType {
    /// Every plan type in code order.
    pub const ALL: [PlanType; 18] = [
        PlanType::NotApplicable,
        PlanType::Backup,
        PlanType::Restore,
        PlanType::BackupFiles,
        PlanType::RestoreFiles,
        PlanType::VmBackup,
        PlanType::VmRestore,
        PlanType::SqlBackup,
        PlanType::SqlRestore,
        PlanType::ExchangeBackup,
        PlanType::ExchangeRestore,
        PlanType::BmssBackup,
        PlanType::BmssRestore,
        PlanType::ConsistencyCheck,
        PlanType::Ec2Backup,
        PlanType::Ec2Restore,
        PlanType::HyperVBackup,
        PlanType::HyperVRestore,
    ];

    /// Numeric code used by the backup API.
    pub fn code(&self) -> i64 {
        match self {
            PlanType::NotApplicable => 0,
            PlanType::Backup => 1,
            PlanType::Restore => 2,
            PlanType::BackupFiles => 3,
            PlanType::RestoreFiles => 4,
            PlanType::VmBackup => 5,
            PlanType::VmRestore => 6,
            PlanType::SqlBackup => 7,
            PlanType::SqlRestore => 8,
            PlanType::ExchangeBackup => 9,
            PlanType::ExchangeRestore => 10,
            PlanType::BmssBackup => 11,
            PlanType::BmssRestore => 12,
            PlanType::ConsistencyCheck => 13,
            PlanType::Ec2Backup => 14,
            PlanType::Ec2Restore => 15,
            PlanType::HyperVBackup => 16,
            PlanType::HyperVRestore => 17,
        }
    }

    /// Display text used in reports, spelled as the backup API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::NotApplicable => "NA",
            PlanType::Backup => "Backup",
            PlanType::Restore => "Restore",
            PlanType::BackupFiles => "BackupFiles",
            PlanType::RestoreFiles => "RestoreFiles",
            PlanType::VmBackup => "VMBackup",
            PlanType::VmRestore => "VMRestore",
            PlanType::SqlBackup => "SQLBackup",
            PlanType::SqlRestore => "SQLResore",
            PlanType::ExchangeBackup => "ExchangeBackup",
            PlanType::ExchangeRestore => "ExchangeRestore",
            PlanType::BmssBackup => "BMSSBackup",
            PlanType::BmssRestore => "BMSSRestore",
            PlanType::ConsistencyCheck => "ConsistencyCheck",
            PlanType::Ec2Backup => "EC2Backup",
            PlanType::Ec2Restore => "EC2Restore",
            PlanType::HyperVBackup => "HyperVBackup",
            PlanType::HyperVRestore => "HyperVRestore",
        }
    }

    /// Whether this is a restore job.
    pub fn is_restore(&self) -> bool {
        matches!(
            self,
            PlanType::Restore
                | PlanType::RestoreFiles
                | PlanType::VmRestore
                | PlanType::SqlRestore
                | PlanType::ExchangeRestore
                | PlanType::BmssRestore
                | PlanType::Ec2Restore
                | PlanType::HyperVRestore
        )
    }

    /// Whether this is a backup job.
    ///
    /// `NotApplicable` and `ConsistencyCheck` are neither backup nor restore.
    pub fn is_backup(&self) -> bool {
        matches!(
            self,
            PlanType::Backup
                | PlanType::BackupFiles
                | PlanType::VmBackup
                | PlanType::SqlBackup
                | PlanType::ExchangeBackup
                | PlanType::BmssBackup
                | PlanType::Ec2Backup
                | PlanType::HyperVBackup
        )
    }
}

impl TryFrom<i64> for PlanType {
    type Error = MonitorError;

    fn try_from(code: i64) -> Result<Self> {
        PlanType::ALL
            .into_iter()
            .find(|plan_type| plan_type.code() == code)
            .ok_or_else(|| MonitorError::unknown_plan_type(code))
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a status code against the status table.
///
/// # Errors
///
/// Returns `MonitorError::UnknownReferenceCode` for codes outside 0..=7.
pub fn status_info(code: i64) -> Result<PlanStatus> {
    PlanStatus::try_from(code)
}

/// Resolve a plan type code against the plan type table.
///
/// # Errors
///
/// Returns `MonitorError::UnknownReferenceCode` for codes outside 0..=17.
pub fn type_info(code: i64) -> Result<PlanType> {
    PlanType::try_from(code)
}
