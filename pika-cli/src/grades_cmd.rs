use anyhow::Result;
use pika_core::grades::round1;
use pika_core::{Assignment, GradeProjection, project_grades, summarize_by_kind};
use std::fmt::Write as _;

use crate::state::Store;

pub const DEFAULT_GOAL: f64 = 90.0;

pub fn run(store: &Store, goal: f64, json: bool) -> Result<()> {
    let assignments = store.load_assignments()?;
    let projection = project_grades(&assignments, goal);
    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print!("{}", render_grades(&assignments, &projection));
    }
    Ok(())
}

fn pct(v: Option<f64>) -> String {
    v.map(|v| format!("{}%", round1(v)))
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_grades(assignments: &[Assignment], p: &GradeProjection) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Goal:            {}%", round1(p.goal));
    let _ = writeln!(s, "Current average: {}", pct(p.current));
    let _ = writeln!(
        s,
        "Weight graded:   {} of {} ({} remaining)",
        round1(p.done_weight),
        round1(p.total_weight),
        round1(p.remaining_weight)
    );
    let _ = writeln!(s, "Needed on rest:  {}", p.needed_average());

    let _ = writeln!(s, "\nBy type:");
    for row in summarize_by_kind(assignments) {
        let _ = writeln!(
            s,
            "  {:<8}  {:>2} items  {:>6} graded weight  avg {}",
            row.kind.as_str(),
            row.count,
            round1(row.done_weight),
            pct(row.average)
        );
    }
    s
}
