use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;
use pika_core::{Assignment, AssignmentKind, check_score};

use crate::clock::{parse_due, parse_now, resolve_now};
use crate::state::{Store, find_index};

#[derive(Subcommand, Debug)]
pub enum AssignmentsCommand {
    /// List assignments, closest deadline first
    List,

    /// Add an assignment
    Add {
        #[arg(long)]
        name: String,

        /// exam | homework | project
        #[arg(long = "type")]
        kind: AssignmentKind,

        /// Due date, YYYY-MM-DD
        #[arg(long, value_parser = parse_due)]
        due: NaiveDate,

        /// Percentage points of the final grade
        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        /// Estimated effort (defaults by type: exam 6, homework 2, project 10)
        #[arg(long)]
        hours: Option<f64>,

        /// Score 0-100 if already graded
        #[arg(long)]
        score: Option<f64>,

        #[arg(long, value_parser = parse_now, hide = true)]
        now: Option<NaiveDateTime>,
    },

    /// Remove an assignment by id (or unique id prefix)
    Remove { id: String },

    /// Record a score, or clear it with --clear
    Score {
        id: String,

        #[arg(required_unless_present = "clear")]
        score: Option<f64>,

        #[arg(long, conflicts_with = "score")]
        clear: bool,
    },
}

pub fn run(store: &Store, cmd: AssignmentsCommand) -> Result<()> {
    match cmd {
        AssignmentsCommand::List => list(store),
        AssignmentsCommand::Add {
            name,
            kind,
            due,
            weight,
            hours,
            score,
            now,
        } => {
            let score = score.map(check_score).transpose()?;
            let a = Assignment::create(name, kind, due, resolve_now(now))?
                .with_weight(weight.max(0.0))
                .with_hours(hours.unwrap_or(kind.default_hours()).max(0.0))
                .with_score(score);

            let mut all = store.load_assignments()?;
            println!("Added {} ({})", a.name, short_id(&a.id));
            tracing::info!(id = %a.id, "assignment added");
            all.push(a);
            store.save_assignments(&all)
        }
        AssignmentsCommand::Remove { id } => {
            let mut all = store.load_assignments()?;
            let i = find_index(&all, &id)?;
            let removed = all.remove(i);
            store.save_assignments(&all)?;
            println!("Removed {}", removed.name);
            Ok(())
        }
        AssignmentsCommand::Score { id, score, clear } => {
            let mut all = store.load_assignments()?;
            let i = find_index(&all, &id)?;
            let score = if clear {
                None
            } else {
                Some(check_score(score.context("score required")?)?)
            };
            all[i].score = score;
            let name = all[i].name.clone();
            store.save_assignments(&all)?;
            match score {
                Some(s) => println!("{name}: score {s}"),
                None => println!("{name}: score cleared"),
            }
            Ok(())
        }
    }
}

fn list(store: &Store) -> Result<()> {
    let mut all = store.load_assignments()?;
    if all.is_empty() {
        println!("No assignments. Add one with `pika assignments add` or `pika import`.");
        return Ok(());
    }
    all.sort_by_key(|a| a.due_date);

    println!(
        "{:<8}  {:<10}  {:<8}  {:>6}  {:>6}  {:>5}  NAME",
        "ID", "DUE", "TYPE", "WEIGHT", "SCORE", "HOURS"
    );
    for a in &all {
        println!("{}", format_row(a));
    }
    Ok(())
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn format_row(a: &Assignment) -> String {
    let score = a
        .score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<8}  {:<10}  {:<8}  {:>5.1}%  {:>6}  {:>5.1}  {}",
        short_id(&a.id),
        a.due_date,
        a.kind.as_str(),
        a.weight,
        score,
        a.estimated_hours,
        a.name
    )
}
