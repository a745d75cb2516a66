//! Local syllabus parser (no LLM).
//!
//! Two line shapes are recognised:
//!
//!   Calculus Homework 4 | homework | 5% | 2026-01-13 | 3
//!   CS Project Milestone | project | 20% | 2026-01-17 | 10
//!   Biology Exam 1 | exam | 25% | 2026-01-22 | 6 | 88
//!
//! and the looser
//!
//!   Biology Exam 1 (25%) - due 2026-02-05 - 6h
//!
//! Anything else is skipped.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use pika_core::{Assignment, AssignmentKind, new_id};
use regex::Regex;

pub const SYLLABUS_EXAMPLE: &str = "Calculus Homework 4 | homework | 5% | 2026-01-13 | 3
CS Project Milestone | project | 20% | 2026-01-17 | 10
Biology Exam 1 | exam | 25% | 2026-01-22 | 6 | 88";

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})-(\d{2})-(\d{2})\b").expect("static regex"));

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(\.\d+)?").expect("static regex"));

static PAREN_PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*%)\)").expect("static regex"));

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+(?:\.\d+)?)\s*%").expect("static regex"));

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*h(?:ours?)?\b").expect("static regex"));

static PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.*?\)\s*").expect("static regex"));

static DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+-\s+").expect("static regex"));

/// Guess the assignment type from free text.
fn parse_kind(raw: &str) -> Option<AssignmentKind> {
    let r = raw.trim().to_lowercase();
    if r.starts_with("exam") || r.contains("midterm") || r.contains("final") {
        return Some(AssignmentKind::Exam);
    }
    if r.starts_with("hw") || r.contains("homework") || r.contains("problem set") {
        return Some(AssignmentKind::Homework);
    }
    if r.contains("project") || r.contains("milestone") || r.contains("capstone") {
        return Some(AssignmentKind::Project);
    }
    if r.contains("exam") {
        return Some(AssignmentKind::Exam);
    }
    None
}

fn find_iso_date(raw: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE_RE.captures(raw)?;
    let y: i32 = caps[1].parse().ok()?;
    let m: u32 = caps[2].parse().ok()?;
    let d: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

fn pick_number(raw: &str) -> Option<f64> {
    NUMBER_RE.find(raw)?.as_str().parse().ok()
}

fn build(
    name: &str,
    kind: AssignmentKind,
    weight: f64,
    due: NaiveDate,
    hours: f64,
    score: Option<f64>,
    now: NaiveDateTime,
) -> Assignment {
    Assignment::new(new_id(), name, kind, due)
        .with_weight(weight.max(0.0))
        .with_hours(hours.max(0.0))
        .with_score(score.map(|s| s.clamp(0.0, 100.0)))
        .with_created_at(now)
}

/// `Name | type | weight% | YYYY-MM-DD | hours [| score]`
fn parse_pipe_line(line: &str, now: NaiveDateTime) -> Option<Assignment> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    let name = parts.first().filter(|n| !n.is_empty())?;
    let kind = parse_kind(parts.get(1)?)?;
    let weight = pick_number(parts.get(2)?)?;
    let due = find_iso_date(parts.get(3)?)?;
    let hours = pick_number(parts.get(4)?)?;
    let score = parts.get(5).and_then(|s| pick_number(s));

    Some(build(name, kind, weight, due, hours, score, now))
}

/// `Biology Exam 1 (25%) - due 2026-02-05 - 6h`
fn parse_loose_line(line: &str, now: NaiveDateTime) -> Option<Assignment> {
    let weight = PAREN_PERCENT_RE
        .captures(line)
        .and_then(|c| pick_number(&c[1]))
        .or_else(|| PERCENT_RE.captures(line).and_then(|c| pick_number(&c[1])))?;
    let due = find_iso_date(line)?;
    let hours = HOURS_RE.captures(line).and_then(|c| pick_number(&c[1]))?;
    let kind = parse_kind(line).unwrap_or(AssignmentKind::Homework);

    let name = PARENS_RE.replace_all(line, " ");
    let name = DASH_RE.replace_all(&name, " - ");
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    Some(build(name, kind, weight, due, hours, None, now))
}

/// Parse syllabus text line by line. Returns an empty list when nothing
/// matched, so the caller can suggest the expected format.
pub fn parse_syllabus_text(text: &str, now: NaiveDateTime) -> Vec<Assignment> {
    let mut out = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains('|') {
            if let Some(a) = parse_pipe_line(line, now) {
                out.push(a);
                continue;
            }
        }
        match parse_loose_line(line, now) {
            Some(a) => out.push(a),
            None => tracing::debug!(line, "syllabus line not recognised"),
        }
    }

    out
}
