//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and the task
//! library, then walks the user from a free-text request to a step-by-step guide.
//!
//! A request is first offered to the LLM planner when one is configured
//! (`STEP_GUIDE_LLM_URL` and `STEP_GUIDE_LLM_MODEL`); otherwise, or when the
//! planner is unavailable, it is matched against the local task library.

mod agents;
mod cli;
mod config;
mod constants;
mod core;
mod errors;
mod llm;
mod modules;
mod ui;
mod utils;

use crate::agents::ActionAgent;
use crate::config::{resolve_tasks_file, LlmSettings};
use crate::core::{Session, TaskLibrary};
use crate::llm::PlanProvider;
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing::{debug, error};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables
/// 4. Load the task library and build the session
/// 5. Resolve the request and run the guide
#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "Application error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: cli::Cli) -> errors::Result<()> {
    let tasks_file = resolve_tasks_file(cli.tasks_file.as_deref());
    let library = TaskLibrary::load(&tasks_file)?;

    if cli.list {
        for (id, task) in library.iter() {
            println!("{:<16} {} ({} steps)", id.bold(), task.title, task.step_count());
        }
        return Ok(());
    }

    let planner = if cli.no_llm {
        PlanProvider::disabled()
    } else {
        PlanProvider::from_settings(&LlmSettings::from_env())
    };

    let session = Session::new(library, planner, ActionAgent::system());
    let task = ui::prompt_for_task(&session, cli.request, !cli.no_llm).await?;

    let mut sequencer = session.start(task);
    ui::run_guide(&session, &mut sequencer)
}
