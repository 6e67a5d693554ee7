//! The dashboard: active goals, the day's metrics and pending improvements.

use api_client::ApiClient;
use chrono::NaiveDate;
use entity::goals::Goal;
use entity::improvements::Improvement;
use entity::measurements::Measurement;
use entity::Reading;
use log::*;

use crate::error::Error;
use crate::load_state::LoadState;
use crate::progress::{ProgressBar, Tone};

/// At most this many active goals are listed.
pub const ACTIVE_GOALS_SHOWN: usize = 5;
/// At most this many pending improvements are listed.
pub const PENDING_IMPROVEMENTS_SHOWN: usize = 3;
/// Improvement descriptions are cut to this many characters.
pub const EXCERPT_CHARS: usize = 100;
/// A time deviation ratio above this is flagged.
pub const TIME_DEVIATION_WARNING: f64 = 1.2;

/// One headline figure.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    /// `"86%"`, or `"--"` when the backend has no figure.
    pub value: String,
    pub subtitle: &'static str,
    pub tone: Tone,
}

impl MetricCard {
    fn new(title: &'static str, reading: Reading, subtitle: &'static str, tone: Tone) -> Self {
        Self {
            title,
            value: reading.to_string(),
            subtitle,
            tone,
        }
    }
}

/// Everything the dashboard shows for one date.
///
/// The three fetches are issued together and each keeps its own outcome, so a
/// failed metrics call still leaves goals and improvements on screen.
#[derive(Debug)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub goals: Result<Vec<Goal>, Error>,
    pub metrics: Result<Measurement, Error>,
    pub improvements: Result<Vec<Improvement>, Error>,
}

impl Dashboard {
    pub async fn load(client: &ApiClient, date: NaiveDate) -> Self {
        debug!("Loading dashboard for {date}");
        // The wrappers must outlive the joined futures that borrow them.
        let (goals_api, measurements_api, control_api) =
            (client.goals(), client.measurements(), client.control());
        let (goals, metrics, improvements) = tokio::join!(
            goals_api.list(),
            measurements_api.get_daily(date),
            control_api.list_improvements(),
        );

        let dashboard = Self {
            date,
            goals: goals.map_err(Error::from),
            metrics: metrics.map_err(Error::from),
            improvements: improvements.map_err(Error::from),
        };
        for (call, err) in dashboard.failures() {
            warn!("Dashboard {call} request failed: {err}");
        }
        dashboard
    }

    /// The calls that failed, by name.
    pub fn failures(&self) -> Vec<(&'static str, &Error)> {
        [
            ("goals", self.goals.as_ref().err()),
            ("metrics", self.metrics.as_ref().err()),
            ("improvements", self.improvements.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(call, err)| err.map(|err| (call, err)))
        .collect()
    }

    /// Goals that are active or in progress, in backend order.
    pub fn active_goals(&self) -> LoadState<Vec<&Goal>> {
        let goals = match &self.goals {
            Ok(goals) => active_goals(goals),
            Err(_) => Vec::new(),
        };
        LoadState::from_items(goals)
    }

    /// Improvements still awaiting a decision.
    pub fn pending_improvements(&self) -> LoadState<Vec<&Improvement>> {
        let improvements = match &self.improvements {
            Ok(improvements) => pending_improvements(improvements),
            Err(_) => Vec::new(),
        };
        LoadState::from_items(improvements)
    }

    pub fn metric_cards(&self) -> [MetricCard; 4] {
        metric_cards(self.metrics.as_ref().ok())
    }

    /// Completed and total steps for the day. Zero when unknown.
    pub fn step_counts(&self) -> (u32, u32) {
        match &self.metrics {
            Ok(metrics) => (metrics.completed_steps(), metrics.total_steps()),
            Err(_) => (0, 0),
        }
    }

    /// The day's execution accuracy as a bar.
    pub fn progress(&self) -> ProgressBar {
        let percent = self
            .metrics
            .as_ref()
            .ok()
            .and_then(|metrics| metrics.execution_accuracy.as_percent())
            .unwrap_or(0.0);
        ProgressBar::new(percent).with_tone(Tone::Green).hide_value()
    }
}

pub fn active_goals(goals: &[Goal]) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|goal| goal.status.is_underway())
        .take(ACTIVE_GOALS_SHOWN)
        .collect()
}

pub fn pending_improvements(improvements: &[Improvement]) -> Vec<&Improvement> {
    improvements
        .iter()
        .filter(|improvement| improvement.is_proposed())
        .take(PENDING_IMPROVEMENTS_SHOWN)
        .collect()
}

pub fn metric_cards(metrics: Option<&Measurement>) -> [MetricCard; 4] {
    let reading = |pick: fn(&Measurement) -> Reading| metrics.map(pick).unwrap_or_default();
    let time_deviation = reading(|m| m.time_deviation);
    let time_tone = match time_deviation.value() {
        Some(ratio) if ratio > TIME_DEVIATION_WARNING => Tone::Yellow,
        _ => Tone::Blue,
    };

    [
        MetricCard::new(
            "Execution Accuracy",
            reading(|m| m.execution_accuracy),
            "Planned vs Actual",
            Tone::Blue,
        ),
        MetricCard::new(
            "Quality Compliance",
            reading(|m| m.quality_compliance),
            "Meeting quality criteria",
            Tone::Green,
        ),
        MetricCard::new(
            "Time Deviation",
            time_deviation,
            "Ratio to planned time",
            time_tone,
        ),
        MetricCard::new(
            "Process Efficiency",
            reading(|m| m.process_efficiency),
            "Output / Effort ratio",
            Tone::Green,
        ),
    ]
}

/// First `EXCERPT_CHARS` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
