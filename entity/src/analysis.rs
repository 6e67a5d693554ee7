//! Payloads of the analysis endpoints.
//!
//! The AI-backed endpoints have no fixed contract on the client side. Fields
//! observed in practice are decoded as optionals and every other key is kept
//! in `extra`, so nothing the backend sends is lost.

use crate::measurements::Issue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of the auto-design endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoDesignResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub processes_created: Option<usize>,
    #[serde(default)]
    pub processes: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the full AI analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub metrics: Option<Value>,
    #[serde(default)]
    pub issues_detected: Vec<Issue>,
    #[serde(default)]
    pub quality_report: Option<Value>,
    #[serde(default)]
    pub control_recommendations: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the control analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementAnalysis {
    pub date: NaiveDate,
    #[serde(default)]
    pub suggestions: Vec<Value>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiHealth {
    #[serde(default)]
    pub configured: bool,
    #[serde(default)]
    pub model: Option<String>,
}
