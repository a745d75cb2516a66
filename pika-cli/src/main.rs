use anyhow::Result;
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod assignments_cmd;
mod clock;
mod config;
mod dashboard;
mod focus_cmd;
mod grades_cmd;
mod import_cmd;
mod llm;
mod logging;
mod notify_cmd;
mod plan_cmd;
mod state;

use crate::clock::{parse_now, resolve_now};

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PIKA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "pika",
    version,
    long_version = LONG_VERSION,
    about = "Student dashboard: assignments, grade projection and a weekly study plan"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the assignment list
    Assignments {
        #[command(subcommand)]
        command: assignments_cmd::AssignmentsCommand,
    },

    /// Import assignments from a syllabus (PDF, DOCX or text)
    Import(import_cmd::ImportArgs),

    /// Print the 7-day study plan
    Plan {
        /// Plan as if it were this moment (YYYY-MM-DDTHH:MM)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Export the 7-day plan as an iCalendar file
    ExportIcs {
        /// Output path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Weighted grade projection
    Grades {
        /// Target course grade in percent
        #[arg(long, default_value_t = grades_cmd::DEFAULT_GOAL)]
        goal: f64,

        /// Print the projection as JSON
        #[arg(long)]
        json: bool,
    },

    /// Countdowns, grade and today's sessions at a glance
    Dashboard {
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Focus windows and session length
    Focus {
        #[command(subcommand)]
        command: focus_cmd::FocusCommand,
    },

    /// Deadline notifications (simulated)
    Notify {
        #[command(subcommand)]
        command: notify_cmd::NotifyCommand,
    },

    /// Manage ~/.pika/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    logging::init_logging(&cfg.logging.filter)?;
    tracing::debug!(version = LONG_VERSION, "starting");

    let store = state::Store::open()?;

    match cli.command {
        Command::Assignments { command } => assignments_cmd::run(&store, command)?,
        Command::Import(args) => import_cmd::run(&store, &cfg.llm, args).await?,
        Command::Plan { now } => plan_cmd::run_plan(&store, resolve_now(now))?,
        Command::ExportIcs { out, now } => {
            plan_cmd::run_export(&store, resolve_now(now), out.as_deref())?
        }
        Command::Grades { goal, json } => grades_cmd::run(&store, goal, json)?,
        Command::Dashboard { now } => dashboard::run(&store, resolve_now(now))?,
        Command::Focus { command } => focus_cmd::run(&store, command)?,
        Command::Notify { command } => notify_cmd::run(&store, command)?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
