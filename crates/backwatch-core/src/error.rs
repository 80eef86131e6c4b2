//! Error types for the monitoring library.

use std::path::PathBuf;

use thiserror::Error;

/// Which reference table a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceTable {
    /// Plan status codes
    Status,
    /// Plan type codes
    PlanType,
}

impl ReferenceTable {
    /// Human-readable table name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceTable::Status => "plan status",
            ReferenceTable::PlanType => "plan type",
        }
    }
}

/// Comprehensive error type for all monitoring operations.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// A raw plan record could not be normalized
    #[error("Malformed plan record #{index} ('{plan}'): {reason}")]
    MalformedRecord {
        index: usize,
        plan: String,
        reason: String,
    },
    /// A plan carries a code with no entry in the reference tables
    #[error("Unknown {} code {code}", .table.as_str())]
    UnknownReferenceCode { table: ReferenceTable, code: i64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating malformed record errors.
pub struct MalformedRecordBuilder {
    index: usize,
    plan: String,
}

impl MalformedRecordBuilder {
    /// Create a new builder for the record at `index`.
    pub fn new(index: usize, plan: impl Into<String>) -> Self {
        Self {
            index,
            plan: plan.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> MonitorError {
        MonitorError::MalformedRecord {
            index: self.index,
            plan: self.plan,
            reason: reason.into(),
        }
    }
}

impl MonitorError {
    /// Creates a builder for malformed record errors.
    pub fn malformed(index: usize, plan: impl Into<String>) -> MalformedRecordBuilder {
        MalformedRecordBuilder::new(index, plan)
    }

    /// Creates an unknown status code error.
    pub fn unknown_status(code: i64) -> Self {
        MonitorError::UnknownReferenceCode {
            table: ReferenceTable::Status,
            code,
        }
    }

    /// Creates an unknown plan type code error.
    pub fn unknown_plan_type(code: i64) -> Self {
        MonitorError::UnknownReferenceCode {
            table: ReferenceTable::PlanType,
            code,
        }
    }
}

/// Specialized extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map any error into a configuration error with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| MonitorError::Configuration {
            message: format!("{}: {}", message, e),
        })
    }
}

/// Result type alias for monitoring operations
pub type Result<T> = std::result::Result<T, MonitorError>;
