use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use service::config::Config;
use std::fmt::Display;

#[derive(Parser)]
#[command(name = "igams")]
#[command(about = "Goals, processes and daily execution tracking")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    /// Date to work on (YYYY-MM-DD). Defaults to today.
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long, env = "IGAMS_EMAIL")]
        email: String,
        #[arg(long, env = "IGAMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, env = "IGAMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show who is signed in
    Whoami,
    /// Active goals, the day's metrics and pending improvements
    Dashboard,
    /// Manage goals
    #[command(subcommand)]
    Goals(GoalsCommand),
    /// Processes of a goal
    #[command(subcommand)]
    Processes(ProcessesCommand),
    /// Daily execution logs
    #[command(subcommand)]
    Logs(LogsCommand),
    /// Daily measurements and detected issues
    #[command(subcommand)]
    Metrics(MetricsCommand),
    /// Review suggested improvements
    #[command(subcommand)]
    Improvements(ImprovementsCommand),
    /// AI analysis
    #[command(subcommand)]
    Ai(AiCommand),
}

#[derive(Subcommand)]
pub enum GoalsCommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        /// Why the goal matters
        #[arg(long)]
        purpose: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        target_date: Option<NaiveDate>,
    },
    /// Delete a goal after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Mark a goal active
    Activate { id: String },
    /// Let the backend's AI design processes for a goal
    AutoDesign { id: String },
    /// Attach a resource to a goal
    AddResource {
        goal_id: String,
        /// time, effort, money, tool or other
        #[arg(long = "type", value_parser = parse_wire::<entity::status::ResourceType>)]
        resource_type: entity::status::ResourceType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProcessesCommand {
    /// Processes of a goal
    List {
        #[arg(long)]
        goal: String,
    },
    /// One process as a step flow
    Show {
        id: String,
        /// Step to mark as current
        #[arg(long)]
        current_step: Option<String>,
    },
    Create {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        purpose: Option<String>,
        /// Step names, in order
        #[arg(long = "step")]
        steps: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum LogsCommand {
    /// Logs of the selected date
    List,
    /// Log a step for the selected date
    Create { step_id: String },
    /// Mark a log started now
    Start { id: String },
    /// Mark a log completed now
    Complete {
        id: String,
        /// What was actually done
        #[arg(long)]
        execution: String,
        #[arg(long)]
        output: Option<String>,
        /// Between 0 and 1
        #[arg(long)]
        quality: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a deviation on a log
    Deviate {
        id: String,
        /// time, quality, process, skip or external
        #[arg(long = "type", value_parser = parse_wire::<entity::status::DeviationType>)]
        deviation_type: entity::status::DeviationType,
        #[arg(long)]
        description: String,
        #[arg(long)]
        root_cause: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Metrics of the selected date
    Show,
    /// Compute and store the selected date's metrics
    Compute,
    /// Quality issues detected on the selected date
    Issues,
    /// Metrics between two dates
    Range {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
}

#[derive(Subcommand)]
pub enum ImprovementsCommand {
    List,
    Approve { id: String },
    Reject { id: String },
    Implement {
        id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Ask the backend for new suggestions for the selected date
    Analyze,
}

#[derive(Subcommand)]
pub enum AiCommand {
    /// Full AI analysis of the selected date
    Analyze,
    /// Whether the backend has AI configured
    Health,
}

/// Parses a wire name such as `in_progress` into a status enum, rejecting
/// names that would only decode to its catch-all variant.
fn parse_wire<T: DeserializeOwned + Display>(value: &str) -> Result<T, String> {
    let parsed: T = serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|e| e.to_string())?;
    if parsed.to_string() == "unknown" {
        Err(format!("unrecognized value `{value}`"))
    } else {
        Ok(parsed)
    }
}
