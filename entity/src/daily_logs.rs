use crate::status::{DeviationType, ExecutionStatus};
use crate::{timestamp, Id, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One step's actual execution on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Id,
    pub step_id: Id,
    pub user_id: Id,
    pub execution_date: NaiveDate,
    #[serde(default, with = "timestamp::option")]
    pub planned_start: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub actual_start: Option<Timestamp>,
    #[serde(default, with = "timestamp::option")]
    pub actual_end: Option<Timestamp>,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default)]
    pub actual_execution: Option<String>,
    #[serde(default)]
    pub output_produced: Option<String>,
    /// Between 0.0 and 1.0.
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub quality_notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub deviations: Vec<Deviation>,
}

/// A recorded gap between planned and actual execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub id: Id,
    pub daily_log_id: Id,
    pub deviation_type: DeviationType,
    pub description: String,
    #[serde(default)]
    pub impact_level: Option<f64>,
    #[serde(default)]
    pub root_cause: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDailyLog {
    pub step_id: Id,
    pub execution_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<Timestamp>,
}

/// Body of the start endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogStart {
    pub actual_start: Timestamp,
}

/// Body of the complete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogCompletion {
    pub actual_end: Timestamp,
    pub actual_execution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_produced: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_start: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_end: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_execution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_produced: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeviation {
    pub deviation_type: DeviationType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
}
