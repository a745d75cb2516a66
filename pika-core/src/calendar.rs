//! iCalendar export of a weekly plan.
//!
//! Times are floating local time (`YYYYMMDDTHHMMSS`, no `Z`, no TZID) so
//! calendar apps place them on the importing user's wall clock.

use chrono::NaiveDateTime;

use crate::planner::{DayPlan, EventKind, PlannedEvent};

const PRODID: &str = "-//Pika//Student Dashboard//EN";
const UID_DOMAIN: &str = "pika.local";

/// Longest physical line, CRLF excluded.
const MAX_LINE_OCTETS: usize = 75;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub summary: String,
    pub description: String,
}

impl CalendarEvent {
    pub fn from_planned(e: &PlannedEvent) -> Self {
        let (summary, description) = match e.kind {
            EventKind::Study => (
                format!("Study: {}", e.title),
                format!("Pika study session ({} min).", e.minutes),
            ),
            EventKind::Due => (format!("Due: {}", e.title), "Pika deadline marker.".to_string()),
        };
        Self {
            uid: event_uid(e),
            start: e.start,
            end: e.end,
            summary,
            description,
        }
    }
}

/// Stable per event: the same plan always yields the same UIDs.
pub fn event_uid(e: &PlannedEvent) -> String {
    format!(
        "{}_{}_{}@{}",
        e.assignment_id,
        e.kind.as_str(),
        e.start.and_utc().timestamp_millis(),
        UID_DOMAIN
    )
}

pub fn plan_to_events(days: &[DayPlan]) -> Vec<CalendarEvent> {
    days.iter()
        .flat_map(|d| d.events.iter())
        .map(CalendarEvent::from_planned)
        .collect()
}

/// Render a whole week. `dtstamp` is the export time and the only value that
/// changes between two exports of the same plan.
pub fn plan_to_ics(days: &[DayPlan], dtstamp: NaiveDateTime) -> String {
    events_to_ics(&plan_to_events(days), dtstamp)
}

pub fn events_to_ics(events: &[CalendarEvent], dtstamp: NaiveDateTime) -> String {
    let stamp = format_local(dtstamp);
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for e in events {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", escape_ics(&e.uid)));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("DTSTART:{}", format_local(e.start)));
        lines.push(format!("DTEND:{}", format_local(e.end)));
        lines.push(format!("SUMMARY:{}", escape_ics(&e.summary)));
        lines.push(format!("DESCRIPTION:{}", escape_ics(&e.description)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    lines.push(String::new());
    lines.iter().map(|l| fold_line(l)).collect::<Vec<_>>().join("\r\n")
}

/// Fold a content line at 75 octets; each continuation starts with a space.
/// Multi-byte characters are never split.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / 24);
    let mut used = 0;
    for ch in line.chars() {
        if used + ch.len_utf8() > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            used = 1;
        }
        out.push(ch);
        used += ch.len_utf8();
    }
    out
}

fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

pub fn escape_ics(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
