use backwatch_core::{MonitorBuilder, RawPlan};
use jiff::Timestamp;
use serde_json::{json, Value};

/// Evaluation instant used by every test: 2024-03-10 12:00 CDT.
pub fn evaluation_time() -> Timestamp {
    "2024-03-10T17:00:00Z".parse().expect("valid timestamp")
}

/// Builder preconfigured with the fixed evaluation instant.
pub fn monitor_builder() -> MonitorBuilder {
    MonitorBuilder::new().with_evaluation_time(Some(evaluation_time()))
}

/// An API record with clean file counters.
///
/// `last_start` is local America/Chicago time as the API reports it.
pub fn record(name: &str, plan_type: i64, status: i64, last_start: &str) -> Value {
    json!({
        "CompanyName": "Acme",
        "ComputerName": format!("{name}-PC"),
        "PlanName": name,
        "PlanType": plan_type,
        "LastStart": last_start,
        "DetailedReportLink": null,
        "Status": status,
        "FilesScanned": 100,
        "FilesToBackup": 10,
        "FilesCopied": 10,
        "FilesFailed": 0
    })
}

pub fn raw_plans(records: Vec<Value>) -> Vec<RawPlan> {
    serde_json::from_value(Value::Array(records)).expect("valid records")
}
