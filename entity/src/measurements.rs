use crate::status::MeasurementType;
use crate::{timestamp, Id, Reading, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A computed aggregate of execution accuracy, quality and efficiency.
/// Read-only from the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Id,
    pub user_id: Id,
    #[serde(default)]
    pub measurement_type: MeasurementType,
    pub measurement_date: NaiveDate,
    #[serde(default)]
    pub reference_id: Option<Id>,
    #[serde(default)]
    pub execution_accuracy: Reading,
    #[serde(default)]
    pub time_deviation: Reading,
    #[serde(default)]
    pub quality_compliance: Reading,
    #[serde(default)]
    pub process_efficiency: Reading,
    #[serde(default)]
    pub raw_data: Option<RawMetrics>,
    #[serde(default)]
    pub analysis_summary: Option<String>,
    #[serde(default)]
    pub issues_detected: Option<Vec<Issue>>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

impl Measurement {
    pub fn completed_steps(&self) -> u32 {
        self.raw_data
            .as_ref()
            .and_then(|raw| raw.completed_steps)
            .unwrap_or(0)
    }

    pub fn total_steps(&self) -> u32 {
        self.raw_data
            .as_ref()
            .and_then(|raw| raw.total_steps)
            .unwrap_or(0)
    }
}

/// The inputs a measurement was computed from. Keys beyond the step counts are
/// kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMetrics {
    #[serde(default)]
    pub total_steps: Option<u32>,
    #[serde(default)]
    pub completed_steps: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A quality issue detected in a day's logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: String,
    #[serde(default)]
    pub log_id: Option<Id>,
    #[serde(default)]
    pub step_id: Option<Id>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the issues endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuesReport {
    pub date: NaiveDate,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub count: usize,
}
