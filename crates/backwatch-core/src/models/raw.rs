//! Raw plan records as returned by the monitoring endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One plan record from the backup API.
///
/// String fields tolerate `null`. Codes and file counters are kept as raw
/// JSON values; the normalizer coerces them to integers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct RawPlan {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub computer_name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub plan_name: String,

    #[serde(default)]
    pub plan_type: Value,

    /// Local start time of the last run, e.g. `2024-03-09T22:00:05.123`
    #[serde(default)]
    pub last_start: Option<String>,

    #[serde(default)]
    pub detailed_report_link: Option<String>,

    #[serde(default)]
    pub status: Value,

    #[serde(default)]
    pub files_scanned: Value,

    #[serde(default)]
    pub files_to_backup: Value,

    #[serde(default)]
    pub files_copied: Value,

    #[serde(default)]
    pub files_failed: Value,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse the monitoring endpoint's JSON array of plan records.
///
/// # Errors
///
/// Returns `MonitorError::Serialization` if the body is not a JSON array of
/// objects.
pub fn parse_records(json: &str) -> Result<Vec<RawPlan>> {
    Ok(serde_json::from_str(json)?)
}
