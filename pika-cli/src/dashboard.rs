use anyhow::Result;
use chrono::NaiveDateTime;
use pika_core::{
    Assignment, EventKind, PlannerSettings, Urgency, build_weekly_plan, countdown_board,
    project_grades,
};
use std::fmt::Write as _;

use crate::grades_cmd::DEFAULT_GOAL;
use crate::state::Store;

pub fn run(store: &Store, now: NaiveDateTime) -> Result<()> {
    let assignments = store.load_assignments()?;
    let settings = store.load_settings()?;
    print!("{}", render_dashboard(&assignments, &settings, now));
    Ok(())
}

fn urgency_label(u: Urgency) -> &'static str {
    match u {
        Urgency::Red => "IMMEDIATE",
        Urgency::Yellow => "UPCOMING",
        Urgency::Green => "SAFE",
    }
}

pub fn render_dashboard(
    assignments: &[Assignment],
    settings: &PlannerSettings,
    now: NaiveDateTime,
) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "# Pika dashboard, {}\n", now.format("%a %Y-%m-%d %H:%M"));

    let board = countdown_board(assignments, now);
    let _ = writeln!(s, "## Deadlines");
    if board.is_empty() {
        let _ = writeln!(s, "  nothing tracked yet");
    }
    for card in &board {
        let status = if card.overdue { "OVERDUE" } else { urgency_label(card.urgency) };
        let progress = card
            .progress
            .map(|p| format!("  {:>3.0}% elapsed", p * 100.0))
            .unwrap_or_default();
        let _ = writeln!(
            s,
            "  {:<9}  {:>9}  {}  {}{progress}",
            status,
            card.remaining,
            card.due.format("%Y-%m-%d"),
            card.name
        );
    }

    let projection = project_grades(assignments, DEFAULT_GOAL);
    let current = projection
        .current
        .map(|c| format!("{:.1}%", c))
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        s,
        "\n## Grade\n  current {current}, needed for {}%: {}",
        DEFAULT_GOAL,
        projection.needed_average()
    );

    let plan = build_weekly_plan(assignments, settings, now);
    let _ = writeln!(s, "\n## Today");
    let today: Vec<_> = plan
        .first()
        .map(|d| d.events.iter().filter(|e| e.kind == EventKind::Study).collect())
        .unwrap_or_default();
    if today.is_empty() {
        let _ = writeln!(s, "  no study sessions planned");
    }
    for e in today {
        let _ = writeln!(
            s,
            "  {}-{}  {}",
            e.start.format("%H:%M"),
            e.end.format("%H:%M"),
            e.title
        );
    }
    s
}
