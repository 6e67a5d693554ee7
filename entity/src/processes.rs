use crate::status::{ProcessStatus, StepFrequency};
use crate::{timestamp, Id, Timestamp};
use serde::{Deserialize, Serialize};

/// An ordered decomposition of a goal into repeatable steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub id: Id,
    #[serde(default)]
    pub goal_id: Option<Id>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub sequence_order: i32,
    #[serde(default)]
    pub status: ProcessStatus,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub steps: Vec<ProcessStep>,
}

impl Process {
    /// Steps sorted by `sequence_order`. Ties keep the order the backend sent.
    pub fn ordered_steps(&self) -> Vec<&ProcessStep> {
        let mut steps: Vec<&ProcessStep> = self.steps.iter().collect();
        steps.sort_by_key(|step| step.sequence_order);
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub id: Id,
    pub process_id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub action_verb: Option<String>,
    #[serde(default)]
    pub sequence_order: i32,
    #[serde(default)]
    pub frequency: StepFrequency,
    #[serde(default)]
    pub estimated_duration_minutes: Option<u32>,
    #[serde(default)]
    pub quality_criteria: Option<String>,
    #[serde(default)]
    pub expected_output: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

fn default_active() -> bool {
    true
}

/// Payload for creating a process under a goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProcess {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default)]
    pub sequence_order: i32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub steps: Vec<NewProcessStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProcessStep {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_verb: Option<String>,
    #[serde(default)]
    pub sequence_order: i32,
    #[serde(default)]
    pub frequency: StepFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_criteria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn step(id: &str, order: i32) -> serde_json::Value {
        json!({
            "id": id,
            "process_id": "p1",
            "name": format!("step {id}"),
            "sequence_order": order,
            "created_at": "2025-01-01T00:00:00+00:00"
        })
    }

    #[test]
    fn test_ordered_steps_sorts_by_sequence_order() {
        let process: Process = serde_json::from_value(json!({
            "id": "p1",
            "goal_id": "g1",
            "name": "Morning routine",
            "status": "active",
            "created_at": "2025-01-01T00:00:00+00:00",
            "steps": [step("c", 3), step("a", 1), step("b", 2)]
        }))
        .unwrap();

        let names: Vec<&str> = process
            .ordered_steps()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_step_defaults() {
        let step: ProcessStep = serde_json::from_value(step("a", 0)).unwrap();
        assert!(step.is_active);
        assert_eq!(step.frequency, StepFrequency::Daily);
    }
}
