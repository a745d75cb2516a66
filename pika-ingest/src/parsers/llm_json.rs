//! Validation of LLM replies.
//!
//! The model is asked for a bare JSON array (see `prompt.rs`) but replies
//! are often wrapped in prose or code fences. We cut out the array, check
//! every item against `RawLlmAssignment`, then normalise the values into
//! core `Assignment`s. Any violation rejects the whole reply.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use pika_core::time::{due_instant, parse_date_only};
use pika_core::{Assignment, new_id};
use regex::Regex;
use serde_json::Value;

use crate::error::IngestError;
use crate::types::RawLlmAssignment;

static MDY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<m>\d{1,2})[/-](?P<d>\d{1,2})(?:[/-](?P<y>\d{2,4}))?\b")
        .expect("static regex")
});

static MONTH_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<mon>[A-Za-z]{3,9})\s+(?P<d>\d{1,2})(?:\s*,?\s*(?P<y>\d{4}))?\b")
        .expect("static regex")
});

/// Trimmed text if it already is an array, else the span from the first `[`
/// to the last `]`, else the trimmed text unchanged.
pub fn extract_json_candidate(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return trimmed;
    }
    match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if end > start => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse the model's text reply into assignments.
pub fn parse_llm_assignments(
    raw_text: &str,
    now: NaiveDateTime,
) -> Result<Vec<Assignment>, IngestError> {
    let value: Value = serde_json::from_str(extract_json_candidate(raw_text))?;
    normalize_llm_assignments(value, now)
}

/// Validate an already-decoded JSON value and convert it.
pub fn normalize_llm_assignments(
    value: Value,
    now: NaiveDateTime,
) -> Result<Vec<Assignment>, IngestError> {
    let Value::Array(items) = value else {
        return Err(IngestError::NotAnArray);
    };
    if items.is_empty() {
        return Err(IngestError::Empty);
    }

    let raw = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let a: RawLlmAssignment =
                serde_json::from_value(item).map_err(|e| IngestError::Schema {
                    index,
                    message: e.to_string(),
                })?;
            check_item(index, &a)?;
            Ok(a)
        })
        .collect::<Result<Vec<_>, IngestError>>()?;

    let out = raw
        .into_iter()
        .enumerate()
        .map(|(index, a)| into_assignment(index, a, now))
        .collect::<Result<Vec<_>, IngestError>>()?;

    tracing::debug!(count = out.len(), "accepted LLM assignments");
    Ok(out)
}

fn check_item(index: usize, a: &RawLlmAssignment) -> Result<(), IngestError> {
    let field = |field: &'static str, reason: &str| IngestError::Field {
        index,
        field,
        reason: reason.to_string(),
    };

    if a.name.trim().is_empty() {
        return Err(field("name", "must not be empty"));
    }
    if let Some(score) = a.score {
        if !(0.0..=100.0).contains(&score) {
            return Err(field("score", "must be between 0 and 100 or null"));
        }
    }
    if a.due_date.trim().is_empty() {
        return Err(field("due_date", "must not be empty"));
    }
    Ok(())
}

fn into_assignment(
    index: usize,
    a: RawLlmAssignment,
    now: NaiveDateTime,
) -> Result<Assignment, IngestError> {
    let due = coerce_due_date(&a.due_date, now)
        .map_err(|source| IngestError::Date { index, source })?;

    let hours = if a.estimated_hours == 0.0 || a.estimated_hours.is_nan() {
        a.kind.default_hours()
    } else {
        a.estimated_hours
    };

    Ok(Assignment::new(new_id(), a.name.trim(), a.kind, due)
        .with_weight(a.weight.clamp(0.0, 100.0))
        .with_score(a.score.map(|s| s.clamp(0.0, 100.0)))
        .with_hours(hours.max(0.0))
        .with_created_at(now))
}

/// Turn whatever date text the model produced into a calendar date.
///
/// Accepts `YYYY-MM-DD`, `MM/DD[/YY[YY]]` and `Mon DD[, YYYY]`. Anything
/// else (including "TBD") becomes today. A year-less date takes the current
/// year unless that puts it more than 30 days in the past.
pub fn coerce_due_date(raw: &str, now: NaiveDateTime) -> Result<NaiveDate, pika_core::Error> {
    let trimmed = raw.trim();
    if let Ok(date) = parse_date_only(trimmed) {
        return Ok(date);
    }

    let invalid = |reason: &str| pika_core::Error::InvalidDate {
        input: raw.to_string(),
        reason: reason.to_string(),
    };

    if let Some(caps) = MDY_RE.captures(trimmed) {
        let month: u32 = caps["m"].parse().map_err(|_| invalid("bad month"))?;
        let day: u32 = caps["d"].parse().map_err(|_| invalid("bad day"))?;
        let year = match caps.name("y") {
            Some(y) => {
                let y: i32 = y.as_str().parse().map_err(|_| invalid("bad year"))?;
                if y < 100 { y + 2000 } else { y }
            }
            None => infer_year(month, day, now),
        };
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("no such calendar date"));
    }

    if let Some(caps) = MONTH_NAME_RE.captures(trimmed) {
        let Some(month) = month_from_name(&caps["mon"]) else {
            return Ok(now.date());
        };
        let day: u32 = caps["d"].parse().map_err(|_| invalid("bad day"))?;
        let year = match caps.name("y") {
            Some(y) => y.as_str().parse().map_err(|_| invalid("bad year"))?,
            None => infer_year(month, day, now),
        };
        return NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| invalid("no such calendar date"));
    }

    tracing::debug!(raw, "unrecognised due date, using today");
    Ok(now.date())
}

fn infer_year(month: u32, day: u32, now: NaiveDateTime) -> i32 {
    let year = now.year();
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) if due_instant(date) - now < -Duration::days(30) => year + 1,
        _ => year,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
