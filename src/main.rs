//! Command-line client for a remote task store.
//!
//! ```bash
//! tasksync --api-url http://localhost:8000 list
//! tasksync add "Write report" --deadline 2026-09-01
//! tasksync edit 0192c7a4 --status completed
//! tasksync rm 0192c7a4
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tasksync::config::{CliArgs, ClientConfig, Command};
use tasksync::create::CreateSession;
use tasksync::edit::EditSession;
use tasksync::gateway::http::HttpGateway;
use tasksync::model::{Task, TaskForm, TaskId};
use tasksync::notify::{ChannelNotifier, Notice};
use tasksync::store::TaskStore;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing with the resolved log level; logs go to stderr so
    // stdout stays clean for the task list.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(api_url = %config.api_url, "starting tasksync");

    let gateway = match HttpGateway::new(&config.api_url, config.request_timeout) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (notifier, mut notices) = ChannelNotifier::new(config.notice_buffer);
    let notifier = Arc::new(notifier);

    run(args.command.unwrap_or(Command::List), &gateway, &notifier).await;

    // Drain the notices the run produced; any failure decides the exit code.
    let mut exit = ExitCode::SUCCESS;
    while let Ok(notice) = notices.try_recv() {
        match notice {
            Notice::Success(message) => println!("{message}"),
            Notice::Failure(message) => {
                eprintln!("error: {message}");
                exit = ExitCode::FAILURE;
            }
        }
    }
    exit
}

async fn run(command: Command, gateway: &Arc<HttpGateway>, notifier: &Arc<ChannelNotifier>) {
    let store = Arc::new(TaskStore::new(Arc::clone(gateway), Arc::clone(notifier)));
    match command {
        Command::List => {
            store.refresh().await;
            print!("{}", render_tasks(&store.tasks()));
        }
        Command::Add {
            name,
            description,
            status,
            deadline,
        } => {
            let create = CreateSession::new(Arc::clone(gateway), Arc::clone(notifier));
            create.set_form(TaskForm {
                name,
                description: description.unwrap_or_default(),
                status,
                deadline: deadline.unwrap_or_default(),
            });
            create.submit().await;
        }
        Command::Edit {
            id,
            name,
            description,
            status,
            deadline,
        } => {
            let id = TaskId::new(id);
            let edit = EditSession::new(Arc::clone(gateway), Arc::clone(notifier), store);
            edit.start_edit(&id).await;
            let Some(mut form) = edit.form() else {
                return;
            };
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(deadline) = deadline {
                form.deadline = deadline;
            }
            edit.commit_edit(&id, &form).await;
        }
        Command::Rm { id } => {
            store.delete(&TaskId::new(id)).await;
        }
    }
}

/// Render the task list as aligned columns, one row per task.
/// Column width is counted in characters, not bytes.
fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_owned();
    }
    let name_width = tasks
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .map_or(4, |w| w.max(4));
    let mut lines = vec![format!(
        "{:<name_width$}  {:<11}  {:<10}  ID",
        "NAME", "STATUS", "DEADLINE"
    )];
    for task in tasks {
        let deadline = task
            .deadline
            .map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string());
        lines.push(format!(
            "{:<name_width$}  {:<11}  {:<10}  {}",
            task.name,
            task.status.label(),
            deadline,
            task.id
        ));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
