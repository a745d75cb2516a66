use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use pika_core::time::start_of_day;
use pika_core::{
    Assignment, DayPlan, EventKind, PlanStats, PlannedEvent, build_weekly_plan, plan_to_ics,
    scheduled_minutes,
};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::state::Store;

pub fn run_plan(store: &Store, now: NaiveDateTime) -> Result<()> {
    let assignments = store.load_assignments()?;
    let settings = store.load_settings()?;
    let plan = build_weekly_plan(&assignments, &settings, now);
    print!("{}", render_plan(&plan, &assignments, now));
    Ok(())
}

pub fn run_export(store: &Store, now: NaiveDateTime, out: Option<&Path>) -> Result<()> {
    let assignments = store.load_assignments()?;
    let settings = store.load_settings()?;
    let plan = build_weekly_plan(&assignments, &settings, now);
    let ics = plan_to_ics(&plan, now);

    match out {
        Some(path) => {
            fs::write(path, &ics).with_context(|| format!("write {}", path.display()))?;
            let stats = PlanStats::from_plan(&plan);
            eprintln!(
                "Wrote {} ({} sessions, {} deadlines)",
                path.display(),
                stats.study_sessions,
                stats.due_markers
            );
        }
        None => print!("{ics}"),
    }
    Ok(())
}

fn event_line(e: &PlannedEvent) -> String {
    let span = format!("{}-{}", e.start.format("%H:%M"), e.end.format("%H:%M"));
    match e.kind {
        EventKind::Study => format!("  {span}  Study: {} ({} min)", e.title, e.minutes),
        EventKind::Due => format!("  {span}  Due: {}", e.title),
    }
}

/// Assignments that could not get all their effort into the week, with the
/// missing minutes.
pub fn shortfalls<'a>(
    plan: &[DayPlan],
    assignments: &'a [Assignment],
    now: NaiveDateTime,
) -> Vec<(&'a Assignment, i64)> {
    let horizon_start = start_of_day(now);
    assignments
        .iter()
        .filter(|a| a.due_instant() >= horizon_start)
        .filter_map(|a| {
            let missing = a.effort_minutes() - scheduled_minutes(plan, &a.id);
            (missing > 0).then_some((a, missing))
        })
        .collect()
}

pub fn render_plan(plan: &[DayPlan], assignments: &[Assignment], now: NaiveDateTime) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Study plan from {}\n", now.format("%a %Y-%m-%d %H:%M"));

    for day in plan {
        let _ = writeln!(s, "{}", day.date.format("%a %Y-%m-%d"));
        if day.events.is_empty() {
            let _ = writeln!(s, "  (nothing planned)");
        }
        for e in &day.events {
            let _ = writeln!(s, "{}", event_line(e));
        }
        if day.overflow_minutes > 0 {
            let _ = writeln!(s, "  ! {} min could not be scheduled", day.overflow_minutes);
        }
    }

    let stats = PlanStats::from_plan(plan);
    let _ = writeln!(
        s,
        "\n{} sessions, {} min of study, {} deadlines, {} min unscheduled",
        stats.study_sessions, stats.study_minutes, stats.due_markers, stats.overflow_minutes
    );

    let short = shortfalls(plan, assignments, now);
    if !short.is_empty() {
        let _ = writeln!(s, "\nNeeds more focus time:");
        for (a, missing) in short {
            let _ = writeln!(s, "- {} ({} due {}): {missing} min short", a.name, a.kind, a.due_date);
        }
        let _ = writeln!(s, "Add windows with `pika focus set` or lengthen sessions.");
    }
    s
}
