use anyhow::Context as _;
use api_client::ApiClient;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use log::*;
use secrecy::SecretString;
use service::{config, logging::Logger};
use std::sync::Arc;
use store::{AppStore, AuthStore, FileStorage, Storage};

use domain::control::ControlPage;
use domain::daily_logs::{LogCompletion, NewDeviation};
use domain::dashboard::Dashboard;
use domain::error::Error;
use domain::goals::{
    AutoDesignResult, GoalForm, GoalsPage, NewResource, AUTO_DESIGN_FAILURE, AUTO_DESIGN_SUCCESS,
};
use domain::operations::OperationsPage;
use domain::processes::{NewProcess, NewProcessStep, ProcessesPage};
use domain::session::Session;

mod cli;
mod output;
mod prompt;

use cli::{
    AiCommand, Cli, Command, GoalsCommand, ImprovementsCommand, LogsCommand, MetricsCommand,
    ProcessesCommand,
};

const NOT_SIGNED_IN: &str = "Not signed in. Run `igams login` first.";

/// Everything a command needs, built once at start-up.
struct Context {
    client: ApiClient,
    auth: AuthStore,
    app: AppStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();
    Logger::init_logger(&cli.config);

    let data_dir = cli.config.data_dir();
    let storage: Arc<dyn Storage> = Arc::new(
        FileStorage::open(&data_dir)
            .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?,
    );
    let auth = AuthStore::load(storage.clone()).context("Failed to restore the session")?;
    let app = AppStore::new();
    if let Some(date) = cli.date {
        app.set_selected_date(date);
    }
    let client = ApiClient::new(&cli.config, storage).context("Failed to build the API client")?;
    debug!("Using API at {}", client.base_url());

    let ctx = Context { client, auth, app };

    let needs_auth = !matches!(
        cli.command,
        Command::Login { .. } | Command::Register { .. } | Command::Logout
    );
    if needs_auth && !ctx.auth.is_authenticated() {
        anyhow::bail!(NOT_SIGNED_IN);
    }

    match run(&ctx, cli.command).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_cancelled() => {
            println!("{}", e.user_message());
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            output::failure(&e.user_message());
            if e.is_unauthenticated() {
                output::failure("Your session may have expired. Run `igams login` again.");
            }
            std::process::exit(1);
        }
    }
}

async fn run(ctx: &Context, command: Command) -> Result<(), Error> {
    match command {
        Command::Login { email, password } => {
            let password = SecretString::new(password);
            let user = Session::new(&ctx.client, &ctx.auth)
                .login(&email, &password)
                .await?;
            output::success(&format!("Signed in as {} <{}>", user.full_name, user.email));
        }
        Command::Register {
            email,
            full_name,
            password,
        } => {
            let password = SecretString::new(password);
            let user = Session::new(&ctx.client, &ctx.auth)
                .register(&email, &password, &full_name)
                .await?;
            output::success(&format!("Registered and signed in as {}", user.email));
        }
        Command::Logout => {
            Session::new(&ctx.client, &ctx.auth).logout()?;
            output::success("Signed out");
        }
        Command::Whoami => match Session::new(&ctx.client, &ctx.auth).current_user() {
            Some(user) => println!("{} <{}>", user.full_name, user.email),
            None => println!("{NOT_SIGNED_IN}"),
        },
        Command::Dashboard => {
            let dashboard = Dashboard::load(&ctx.client, ctx.app.selected_date()).await;
            output::print_dashboard(&dashboard);
        }
        Command::Goals(command) => goals(ctx, command).await?,
        Command::Processes(command) => processes(ctx, command).await?,
        Command::Logs(command) => logs(ctx, command).await?,
        Command::Metrics(command) => metrics(ctx, command).await?,
        Command::Improvements(command) => improvements(ctx, command).await?,
        Command::Ai(command) => ai(ctx, command).await?,
    }
    Ok(())
}

async fn goals(ctx: &Context, command: GoalsCommand) -> Result<(), Error> {
    let mut page = GoalsPage::new(&ctx.client);
    match command {
        GoalsCommand::List => {
            page.refresh().await?;
        }
        GoalsCommand::Create {
            title,
            purpose,
            description,
            target_date,
        } => {
            let form = GoalForm {
                title,
                purpose,
                description,
                target_date,
            };
            let goal = page.create(&form).await?;
            output::success(&format!("Created goal {}", goal.id));
        }
        GoalsCommand::Delete { id, yes } => {
            if yes {
                page.delete(&id, &|_: &str| true).await?;
            } else {
                page.delete(&id, &prompt::StdinConfirm).await?;
            }
            output::success(&format!("Deleted goal {id}"));
        }
        GoalsCommand::Activate { id } => {
            let goal = page.activate(&id).await?;
            output::success(&format!("{} is now {}", goal.title, goal.status));
        }
        GoalsCommand::AutoDesign { id } => {
            return report_auto_design(page.auto_design(&id).await);
        }
        GoalsCommand::AddResource {
            goal_id,
            resource_type,
            name,
            quantity,
            unit,
        } => {
            let resource = NewResource {
                resource_type,
                name,
                description: None,
                quantity,
                unit,
            };
            let resource = page.add_resource(&goal_id, &resource).await?;
            output::success(&format!("Added {} to goal {goal_id}", resource.name));
        }
    }
    output::print_goals(page.goals());
    Ok(())
}

// Auto-design shows its own banner either way; a failure still fails the command.
fn report_auto_design(result: Result<AutoDesignResult, Error>) -> Result<(), Error> {
    match result {
        Ok(result) => {
            output::success(AUTO_DESIGN_SUCCESS);
            if let Some(created) = result.processes_created {
                println!("  {created} process(es) created");
            }
            Ok(())
        }
        Err(e) => {
            warn!("Auto-design failed: {e}");
            output::failure(AUTO_DESIGN_FAILURE);
            Err(e)
        }
    }
}

async fn processes(ctx: &Context, command: ProcessesCommand) -> Result<(), Error> {
    let mut page = ProcessesPage::new(&ctx.client);
    match command {
        ProcessesCommand::List { goal } => {
            select_goal(ctx, &goal).await?;
            page.load(selected_goal_id(ctx).as_deref()).await?;
            output::print_processes(page.processes());
        }
        ProcessesCommand::Show { id, current_step } => {
            let process = page.get(&id).await?;
            output::print_process(&process, current_step.as_deref());
        }
        ProcessesCommand::Create {
            goal,
            name,
            purpose,
            steps,
        } => {
            select_goal(ctx, &goal).await?;
            page.load(selected_goal_id(ctx).as_deref()).await?;
            let process = NewProcess {
                name,
                purpose,
                steps: steps
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| NewProcessStep {
                        name,
                        sequence_order: i as i32 + 1,
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            };
            let created = page.create(&process).await?;
            output::success(&format!("Created process {}", created.id));
            output::print_processes(page.processes());
        }
    }
    Ok(())
}

// Mirrors picking a goal on the goals page before opening its processes.
async fn select_goal(ctx: &Context, goal_id: &str) -> Result<(), Error> {
    let goal = ctx.client.goals().get(goal_id).await?;
    debug!("Selected goal {}", goal.title);
    ctx.app.set_selected_goal(Some(goal));
    Ok(())
}

fn selected_goal_id(ctx: &Context) -> Option<String> {
    ctx.app.selected_goal().map(|goal| goal.id)
}

async fn logs(ctx: &Context, command: LogsCommand) -> Result<(), Error> {
    let mut page = OperationsPage::new(&ctx.client, ctx.app.selected_date());
    match command {
        LogsCommand::List => page.refresh().await?,
        LogsCommand::Create { step_id } => {
            let log = page.create(&step_id).await?;
            output::success(&format!("Logged step {step_id} as {}", log.id));
        }
        LogsCommand::Start { id } => {
            page.start(&id).await?;
            output::success(&format!("Started {id}"));
        }
        LogsCommand::Complete {
            id,
            execution,
            output: produced,
            quality,
            notes,
        } => {
            let completion = LogCompletion {
                actual_end: Utc::now().fixed_offset(),
                actual_execution: execution,
                output_produced: produced,
                quality_score: quality,
                quality_notes: notes,
            };
            page.complete(&id, &completion).await?;
            output::success(&format!("Completed {id}"));
        }
        LogsCommand::Deviate {
            id,
            deviation_type,
            description,
            root_cause,
        } => {
            let deviation = NewDeviation {
                deviation_type,
                description,
                impact_level: None,
                root_cause,
            };
            page.add_deviation(&id, &deviation).await?;
            output::success(&format!("Recorded a {deviation_type} deviation on {id}"));
        }
    }
    output::print_logs(page.logs());
    Ok(())
}

async fn metrics(ctx: &Context, command: MetricsCommand) -> Result<(), Error> {
    let date = ctx.app.selected_date();
    let api = ctx.client.measurements();
    match command {
        MetricsCommand::Show => output::print_measurement(&api.get_daily(date).await?),
        MetricsCommand::Compute => {
            let measurement = api.create_daily(date).await?;
            output::success(&format!("Computed metrics for {date}"));
            output::print_measurement(&measurement);
        }
        MetricsCommand::Issues => output::print_issues(&api.get_issues(date).await?),
        MetricsCommand::Range { from, to } => {
            check_range(from, to)?;
            let measurements = api.list_range(from, to).await?;
            if measurements.is_empty() {
                println!("No metrics between {from} and {to}");
            }
            for measurement in &measurements {
                output::print_measurement(measurement);
            }
        }
    }
    Ok(())
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), Error> {
    if from > to {
        return Err(Error::validation("The start date must not be after the end date"));
    }
    Ok(())
}

async fn improvements(ctx: &Context, command: ImprovementsCommand) -> Result<(), Error> {
    let mut page = ControlPage::new(&ctx.client);
    page.refresh().await?;
    match command {
        ImprovementsCommand::List => {}
        ImprovementsCommand::Approve { id } => {
            let improvement = page.approve(&id).await?;
            output::success(&format!("Approved {}", improvement.title));
        }
        ImprovementsCommand::Reject { id } => {
            let improvement = page.reject(&id).await?;
            output::success(&format!("Rejected {}", improvement.title));
        }
        ImprovementsCommand::Implement { id, notes } => {
            let improvement = page.implement(&id, notes).await?;
            output::success(&format!("Implemented {}", improvement.title));
        }
        ImprovementsCommand::Analyze => {
            let analysis = page.analyze(ctx.app.selected_date()).await?;
            output::success(&format!(
                "{} suggestion(s) for {}",
                analysis.count, analysis.date
            ));
            if let Some(note) = &analysis.note {
                println!("  {note}");
            }
        }
    }
    output::print_improvements(page.improvements());
    Ok(())
}

async fn ai(ctx: &Context, command: AiCommand) -> Result<(), Error> {
    match command {
        AiCommand::Analyze => {
            let date = ctx.app.selected_date();
            let analysis = ctx.client.ai().full_analysis(date).await?;
            output::print_json(&format!("AI analysis for {date}"), &analysis);
        }
        AiCommand::Health => {
            let health = ctx.client.ai().health().await?;
            if health.configured {
                let model = health.model.as_deref().unwrap_or("unknown model");
                output::success(&format!("AI is configured ({model})"));
            } else {
                output::failure("AI is not configured on the backend");
            }
        }
    }
    Ok(())
}
