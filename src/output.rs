use colored::*;
use domain::control::Improvement;
use domain::daily_logs::DailyLog;
use domain::dashboard::{excerpt, Dashboard, MetricCard};
use domain::goals::Goal;
use domain::measurements::{IssuesReport, Measurement};
use domain::processes::{flow, Process, StepMarker};
use domain::progress::{ProgressBar, Tone};
use domain::status::{ExecutionStatus, GoalStatus, ImprovementStatus};
use domain::LoadState;

const BAR_WIDTH: usize = 30;

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn heading(title: &str) {
    println!("\n{}", title.bright_white().bold());
}

fn toned(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Blue => text.blue(),
        Tone::Green => text.green(),
        Tone::Yellow => text.yellow(),
        Tone::Red => text.red(),
    }
}

pub fn progress_bar(bar: &ProgressBar) -> String {
    let filled = bar.filled_cells(BAR_WIDTH);
    let cells = format!(
        "{}{}",
        toned(&"█".repeat(filled), bar.tone),
        "░".repeat(BAR_WIDTH - filled).dimmed()
    );
    let label = bar
        .label
        .as_deref()
        .map(|label| format!("{label} "))
        .unwrap_or_default();
    if bar.show_value {
        format!("{label}{cells} {}", bar.value_label())
    } else {
        format!("{label}{cells}")
    }
}

fn goal_badge(status: GoalStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        GoalStatus::Active | GoalStatus::Completed => text.green(),
        GoalStatus::InProgress => text.yellow(),
        GoalStatus::Cancelled => text.red(),
        _ => text.blue(),
    }
}

fn improvement_badge(status: ImprovementStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        ImprovementStatus::Proposed => text.yellow(),
        ImprovementStatus::Approved => text.blue(),
        ImprovementStatus::Implemented => text.green(),
        ImprovementStatus::Rejected => text.red(),
        ImprovementStatus::Unknown => text.dimmed(),
    }
}

fn execution_badge(status: ExecutionStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        ExecutionStatus::Completed => text.green(),
        ExecutionStatus::InProgress => text.blue(),
        ExecutionStatus::Blocked => text.red(),
        ExecutionStatus::Skipped => text.yellow(),
        _ => text.dimmed(),
    }
}

fn metric_card(card: &MetricCard) {
    println!(
        "  {:<20} {:>6}  {}",
        card.title,
        toned(&card.value, card.tone).bold(),
        card.subtitle.dimmed()
    );
}

pub fn print_dashboard(dashboard: &Dashboard) {
    heading(&format!("Dashboard for {}", dashboard.date));
    println!(
        "{}",
        "Focus on process quality, not just task completion".dimmed()
    );

    heading("Key Metrics");
    for card in dashboard.metric_cards().iter() {
        metric_card(card);
    }

    heading("Active Goals");
    match dashboard.active_goals() {
        LoadState::Populated(goals) => {
            for goal in goals {
                println!("  {} [{}]", goal.title.bold(), goal_badge(goal.status));
                println!("    {}", goal.purpose.dimmed());
            }
        }
        _ => println!("  {}", "No active goals. Create one with `igams goals create`.".dimmed()),
    }

    heading("Process Improvements");
    match dashboard.pending_improvements() {
        LoadState::Populated(improvements) => {
            for improvement in improvements {
                println!("  {} {}", "!".yellow(), improvement.title);
                println!("    {}", excerpt(&improvement.description).dimmed());
            }
        }
        _ => {
            println!("  {}", "No pending improvements".dimmed());
            println!("  {}", "Your processes are running well".dimmed());
        }
    }

    heading("Today's Summary");
    let (completed, total) = dashboard.step_counts();
    println!("  Steps completed  {completed} / {total}");
    println!("  {}", progress_bar(&dashboard.progress()));

    for (call, err) in dashboard.failures() {
        failure(&format!("Could not load {call}: {}", err.user_message()));
    }
}

pub fn print_goals(goals: &LoadState<Vec<Goal>>) {
    heading("Goals");
    match goals {
        LoadState::Loading => println!("  Loading..."),
        LoadState::Empty => println!("  {}", "No goals yet".dimmed()),
        LoadState::Populated(goals) => {
            for goal in goals {
                println!(
                    "  {} {} [{}]",
                    goal.id.dimmed(),
                    goal.title.bold(),
                    goal_badge(goal.status)
                );
                println!("    Why: {}", goal.purpose);
                if let Some(description) = &goal.description {
                    println!("    {}", description.dimmed());
                }
                if let Some(target) = goal.target_date {
                    println!("    Target: {}", target.date_naive());
                }
                for resource in &goal.resources {
                    let amount = match (resource.quantity, &resource.unit) {
                        (Some(quantity), Some(unit)) => format!(" ({quantity} {unit})"),
                        (Some(quantity), None) => format!(" ({quantity})"),
                        _ => String::new(),
                    };
                    println!("    - {} {}{}", resource.resource_type, resource.name, amount);
                }
            }
        }
    }
}

pub fn print_processes(processes: &LoadState<Vec<Process>>) {
    heading("Processes");
    match processes {
        LoadState::Loading => println!("  Loading..."),
        LoadState::Empty => println!("  {}", "No processes for this goal".dimmed()),
        LoadState::Populated(processes) => {
            for process in processes {
                print_process(process, None);
            }
        }
    }
}

pub fn print_process(process: &Process, current_step_id: Option<&str>) {
    println!(
        "\n  {} {} [{}]",
        process.id.dimmed(),
        process.name.bold(),
        process.status
    );
    if let Some(purpose) = &process.purpose {
        println!("    {}", purpose.dimmed());
    }
    for (step, marker) in flow(process, current_step_id) {
        let icon = match marker {
            StepMarker::Current => "◔".blue(),
            StepMarker::Inactive => "!".dimmed(),
            StepMarker::Pending => "○".normal(),
        };
        let duration = step
            .estimated_duration_minutes
            .map(|minutes| format!(" ~{minutes} min"))
            .unwrap_or_default();
        let name = if marker == StepMarker::Inactive {
            step.name.dimmed()
        } else {
            step.name.normal()
        };
        println!("    {icon} {name}{} {}", duration.dimmed(), step.id.dimmed());
    }
}

pub fn print_logs(logs: &LoadState<Vec<DailyLog>>) {
    heading("Daily Logs");
    match logs {
        LoadState::Loading => println!("  Loading..."),
        LoadState::Empty => println!("  {}", "Nothing logged for this date".dimmed()),
        LoadState::Populated(logs) => {
            for log in logs {
                println!(
                    "  {} step {} [{}]",
                    log.id.dimmed(),
                    log.step_id,
                    execution_badge(log.status)
                );
                if let Some(execution) = &log.actual_execution {
                    println!("    {}", execution);
                }
                if let Some(score) = log.quality_score {
                    println!("    Quality {:.0}%", score * 100.0);
                }
                for deviation in &log.deviations {
                    println!(
                        "    {} {}: {}",
                        "!".yellow(),
                        deviation.deviation_type,
                        deviation.description
                    );
                }
            }
        }
    }
}

pub fn print_measurement(measurement: &Measurement) {
    heading(&format!("Metrics for {}", measurement.measurement_date));
    for card in domain::dashboard::metric_cards(Some(measurement)).iter() {
        metric_card(card);
    }
    println!(
        "  Steps completed  {} / {}",
        measurement.completed_steps(),
        measurement.total_steps()
    );
    if let Some(summary) = &measurement.analysis_summary {
        println!("  {}", summary.dimmed());
    }
}

pub fn print_issues(report: &IssuesReport) {
    heading(&format!("Issues on {} ({})", report.date, report.count));
    if report.issues.is_empty() {
        println!("  {}", "No issues detected".dimmed());
    }
    for issue in &report.issues {
        let description = issue.description.as_deref().unwrap_or("");
        println!("  {} {} {}", "!".yellow(), issue.issue_type.bold(), description);
    }
}

pub fn print_improvements(improvements: &LoadState<Vec<Improvement>>) {
    heading("Improvements");
    match improvements {
        LoadState::Loading => println!("  Loading..."),
        LoadState::Empty => println!("  {}", "No improvements suggested".dimmed()),
        LoadState::Populated(improvements) => {
            for improvement in improvements {
                print_improvement(improvement);
            }
        }
    }
}

fn print_improvement(improvement: &Improvement) {
    println!(
        "\n  {} {} [{}] {}",
        improvement.id.dimmed(),
        improvement.title.bold(),
        improvement_badge(improvement.status),
        improvement.improvement_type.to_string().dimmed()
    );
    println!("    {}", improvement.description);
    if let Some(rationale) = &improvement.rationale {
        println!("    Reason: {}", rationale.italic());
    }

    let mut impact = Vec::new();
    if let Some(minutes) = improvement.expected_time_savings {
        impact.push(format!("Save {minutes} min").blue().to_string());
    }
    if let Some(quality) = improvement.expected_quality_improvement {
        impact.push(format!("+{:.0}% quality", quality * 100.0).green().to_string());
    }
    if let Some(effort) = improvement.expected_effort_reduction {
        impact.push(format!("-{:.0}% effort", effort * 100.0).yellow().to_string());
    }
    if !impact.is_empty() {
        println!("    {}", impact.join("  "));
    }

    match improvement.status {
        ImprovementStatus::Proposed => println!(
            "    {}",
            format!(
                "igams improvements approve {0} | igams improvements reject {0}",
                improvement.id
            )
            .dimmed()
        ),
        ImprovementStatus::Approved => println!(
            "    {}",
            format!("igams improvements implement {}", improvement.id).dimmed()
        ),
        _ => {}
    }
}

pub fn print_json(title: &str, value: &impl serde::Serialize) {
    heading(title);
    match serde_json::to_string_pretty(value) {
        Ok(pretty) => println!("{}", pretty.dimmed()),
        Err(e) => failure(&format!("Could not render response: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_has_fixed_width() {
        colored::control::set_override(false);
        let rendered = progress_bar(&ProgressBar::new(150.0));
        assert_eq!(rendered, format!("{} 100%", "█".repeat(BAR_WIDTH)));

        let rendered = progress_bar(&ProgressBar::new(-10.0).hide_value());
        assert_eq!(rendered, "░".repeat(BAR_WIDTH));
    }
}
