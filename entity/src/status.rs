//! Status and classification enums.
//!
//! Every enum carries an `Unknown` variant so that a value introduced by a
//! newer backend decodes instead of failing the whole response.

use serde::{Deserialize, Serialize};

/// Lifecycle of a goal. Transitions are decided by the backend.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Draft,
    Active,
    InProgress,
    Completed,
    Paused,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Draft => "draft",
            GoalStatus::Active => "active",
            GoalStatus::InProgress => "in_progress",
            GoalStatus::Completed => "completed",
            GoalStatus::Paused => "paused",
            GoalStatus::Cancelled => "cancelled",
            GoalStatus::Unknown => "unknown",
        }
    }

    /// Goals the user is currently working on.
    pub fn is_underway(&self) -> bool {
        matches!(self, GoalStatus::Active | GoalStatus::InProgress)
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Time,
    Effort,
    Money,
    Tool,
    #[default]
    Other,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Time => write!(fmt, "time"),
            ResourceType::Effort => write!(fmt, "effort"),
            ResourceType::Money => write!(fmt, "money"),
            ResourceType::Tool => write!(fmt, "tool"),
            ResourceType::Other => write!(fmt, "other"),
            ResourceType::Unknown => write!(fmt, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    #[default]
    Draft,
    Active,
    Completed,
    Paused,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessStatus::Draft => write!(fmt, "draft"),
            ProcessStatus::Active => write!(fmt, "active"),
            ProcessStatus::Completed => write!(fmt, "completed"),
            ProcessStatus::Paused => write!(fmt, "paused"),
            ProcessStatus::Unknown => write!(fmt, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepFrequency {
    Once,
    #[default]
    Daily,
    Weekly,
    Custom,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for StepFrequency {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepFrequency::Once => write!(fmt, "once"),
            StepFrequency::Daily => write!(fmt, "daily"),
            StepFrequency::Weekly => write!(fmt, "weekly"),
            StepFrequency::Custom => write!(fmt, "custom"),
            StepFrequency::Unknown => write!(fmt, "unknown"),
        }
    }
}

/// Execution state of a daily log: pending → in_progress → completed,
/// skipped or blocked.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Skipped,
    Blocked,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Pending => write!(fmt, "pending"),
            ExecutionStatus::InProgress => write!(fmt, "in_progress"),
            ExecutionStatus::Completed => write!(fmt, "completed"),
            ExecutionStatus::Skipped => write!(fmt, "skipped"),
            ExecutionStatus::Blocked => write!(fmt, "blocked"),
            ExecutionStatus::Unknown => write!(fmt, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationType {
    Time,
    Quality,
    Process,
    Skip,
    External,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DeviationType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviationType::Time => write!(fmt, "time"),
            DeviationType::Quality => write!(fmt, "quality"),
            DeviationType::Process => write!(fmt, "process"),
            DeviationType::Skip => write!(fmt, "skip"),
            DeviationType::External => write!(fmt, "external"),
            DeviationType::Unknown => write!(fmt, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    #[default]
    Daily,
    Weekly,
    Process,
    Goal,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for MeasurementType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeasurementType::Daily => write!(fmt, "daily"),
            MeasurementType::Weekly => write!(fmt, "weekly"),
            MeasurementType::Process => write!(fmt, "process"),
            MeasurementType::Goal => write!(fmt, "goal"),
            MeasurementType::Unknown => write!(fmt, "unknown"),
        }
    }
}

/// Kind of change an improvement proposes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    Simplify,
    Remove,
    Reorder,
    Merge,
    Split,
    Replace,
    Automate,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ImprovementType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImprovementType::Simplify => write!(fmt, "simplify"),
            ImprovementType::Remove => write!(fmt, "remove"),
            ImprovementType::Reorder => write!(fmt, "reorder"),
            ImprovementType::Merge => write!(fmt, "merge"),
            ImprovementType::Split => write!(fmt, "split"),
            ImprovementType::Replace => write!(fmt, "replace"),
            ImprovementType::Automate => write!(fmt, "automate"),
            ImprovementType::Unknown => write!(fmt, "unknown"),
        }
    }
}

/// Review state of an improvement: proposed → approved → implemented, or
/// proposed → rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementStatus {
    #[default]
    Proposed,
    Approved,
    Implemented,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl ImprovementStatus {
    /// Whether the client may request a move from `self` to `next`.
    pub fn can_transition_to(&self, next: ImprovementStatus) -> bool {
        matches!(
            (self, next),
            (ImprovementStatus::Proposed, ImprovementStatus::Approved)
                | (ImprovementStatus::Proposed, ImprovementStatus::Rejected)
                | (ImprovementStatus::Approved, ImprovementStatus::Implemented)
        )
    }
}

impl std::fmt::Display for ImprovementStatus {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImprovementStatus::Proposed => write!(fmt, "proposed"),
            ImprovementStatus::Approved => write!(fmt, "approved"),
            ImprovementStatus::Implemented => write!(fmt, "implemented"),
            ImprovementStatus::Rejected => write!(fmt, "rejected"),
            ImprovementStatus::Unknown => write!(fmt, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_status_wire_names() {
        let status: GoalStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(status, GoalStatus::InProgress);
        assert_eq!(
            serde_json::to_string(&GoalStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
    }

    #[test]
    fn test_unrecognized_status_decodes_to_unknown() {
        let status: GoalStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, GoalStatus::Unknown);
        let kind: ImprovementType = serde_json::from_str(r#""outsource""#).unwrap();
        assert_eq!(kind, ImprovementType::Unknown);
    }

    #[test]
    fn test_underway_goals() {
        assert!(GoalStatus::Active.is_underway());
        assert!(GoalStatus::InProgress.is_underway());
        assert!(!GoalStatus::Draft.is_underway());
        assert!(!GoalStatus::Completed.is_underway());
    }

    #[test]
    fn test_improvement_transitions() {
        use ImprovementStatus::*;
        assert!(Proposed.can_transition_to(Approved));
        assert!(Proposed.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Implemented));

        assert!(!Proposed.can_transition_to(Implemented));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Implemented.can_transition_to(Proposed));
        assert!(!Unknown.can_transition_to(Approved));
    }
}
