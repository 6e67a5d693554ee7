use crate::status::{ImprovementStatus, ImprovementType};
use crate::{timestamp, Id, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A suggested change to a goal, process or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub id: Id,
    pub user_id: Id,
    /// `goal`, `process` or `step`.
    pub target_type: String,
    pub target_id: Id,
    pub improvement_type: ImprovementType,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub status: ImprovementStatus,
    #[serde(default)]
    pub expected_time_savings: Option<f64>,
    #[serde(default)]
    pub expected_quality_improvement: Option<f64>,
    #[serde(default)]
    pub expected_effort_reduction: Option<f64>,
    /// Free-form evidence that triggered the suggestion.
    #[serde(default)]
    pub trigger_data: Option<Value>,
    #[serde(default, with = "timestamp::option")]
    pub implemented_at: Option<Timestamp>,
    #[serde(default)]
    pub implementation_notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

impl Improvement {
    pub fn is_proposed(&self) -> bool {
        self.status == ImprovementStatus::Proposed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ImprovementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_notes: Option<String>,
}

impl ImprovementUpdate {
    pub fn status(status: ImprovementStatus) -> Self {
        Self {
            status: Some(status),
            implementation_notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_improvement_decodes() {
        let improvement: Improvement = serde_json::from_value(json!({
            "id": "i1",
            "user_id": "u1",
            "target_type": "step",
            "target_id": "s1",
            "improvement_type": "merge",
            "title": "Merge warmups",
            "description": "Two warmup steps overlap",
            "status": "proposed",
            "expected_time_savings": 10.0,
            "trigger_data": { "log_ids": ["l1", "l2"] },
            "created_at": "2025-01-01T00:00:00+00:00"
        }))
        .unwrap();

        assert!(improvement.is_proposed());
        assert_eq!(improvement.improvement_type, ImprovementType::Merge);
        assert!(improvement.trigger_data.is_some());
    }

    #[test]
    fn test_update_serializes_only_status() {
        let body = serde_json::to_value(ImprovementUpdate::status(ImprovementStatus::Rejected))
            .unwrap();
        assert_eq!(body, json!({ "status": "rejected" }));
    }
}
