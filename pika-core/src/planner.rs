//! Weekly study planner: greedy earliest-deadline-first placement of study
//! sessions into focus-window slots over a 7-day horizon.
//!
//! Deterministic and pure: same assignments, settings and `now` always give
//! the same plan.

use std::collections::VecDeque;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::focus::normalize_windows;
use crate::settings::PlannerSettings;
use crate::slots::{Slot, generate_slots};
use crate::time::{add_days, at_minute, start_of_day, weekday_index};

pub const HORIZON_DAYS: usize = 7;

/// Length of a due marker, ending at 23:59 on the due day.
pub const DUE_MARKER_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Study,
    Due,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Due => "due",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedEvent {
    pub kind: EventKind,
    pub assignment_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub events: Vec<PlannedEvent>,
    pub overflow_minutes: i64,
}

impl DayPlan {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            events: Vec::new(),
            overflow_minutes: 0,
        }
    }

    pub fn study_events(&self) -> impl Iterator<Item = &PlannedEvent> {
        self.events.iter().filter(|e| e.kind == EventKind::Study)
    }

    pub fn study_minutes(&self) -> i64 {
        self.study_events().map(|e| e.minutes).sum()
    }
}

/// Build the 7-day plan starting at local midnight of `now`. Slots that start
/// before `now` are never offered.
pub fn build_weekly_plan(
    assignments: &[Assignment],
    settings: &PlannerSettings,
    now: NaiveDateTime,
) -> Vec<DayPlan> {
    let horizon_start = start_of_day(now);
    let horizon_end = add_days(horizon_start, HORIZON_DAYS as i64);
    let session = settings.session_minutes();

    let mut days: Vec<DayPlan> = (0..HORIZON_DAYS)
        .map(|i| DayPlan::empty(add_days(horizon_start, i as i64).date()))
        .collect();

    let mut free: Vec<VecDeque<Slot>> = days
        .iter()
        .map(|d| {
            let windows = normalize_windows(settings.windows_for(weekday_index(d.date)));
            generate_slots(d.date, &windows, session)
                .into_iter()
                .filter(|s| s.start >= now)
                .collect()
        })
        .collect();

    // Earliest deadline first; the stable sort keeps input order on ties.
    let mut order: Vec<&Assignment> = assignments.iter().collect();
    order.sort_by_key(|a| a.due_instant());

    for a in &order {
        let due = a.due_instant();
        let mut remaining = a.effort_minutes();

        if remaining <= 0 {
            tracing::debug!(id = %a.id, "no effort to schedule");
            continue;
        }
        if due < horizon_start {
            tracing::debug!(id = %a.id, due = %a.due_date, "already overdue, not scheduled");
            continue;
        }

        remaining = place_assignment(a, due, remaining, &mut days, &mut free);

        if remaining > 0 {
            let idx = overflow_day_index(due, horizon_start);
            days[idx].overflow_minutes += remaining;
            tracing::debug!(
                id = %a.id,
                minutes = remaining,
                day = idx,
                "effort does not fit before due date"
            );
        }
    }

    for a in &order {
        let due = a.due_instant();
        if due < horizon_start || due >= horizon_end {
            continue;
        }
        let idx = day_offset(due, horizon_start);
        days[idx].events.push(due_marker(a));
    }

    for d in &mut days {
        d.events.sort_by_key(|e| e.start);
    }

    days
}

/// Walk the days in order, consuming slots until the effort runs out or the
/// due instant is reached. Returns what could not be placed.
fn place_assignment(
    a: &Assignment,
    due: NaiveDateTime,
    mut remaining: i64,
    days: &mut [DayPlan],
    free: &mut [VecDeque<Slot>],
) -> i64 {
    'days: for (day, slots) in days.iter_mut().zip(free.iter_mut()) {
        if remaining <= 0 || day.date > a.due_date {
            break;
        }

        while remaining > 0 {
            let Some(slot) = slots.front().copied() else {
                break;
            };
            if slot.start >= due {
                break 'days;
            }
            slots.pop_front();

            let used = slot.minutes().min(remaining);
            let end = slot.start + Duration::minutes(used);
            day.events.push(PlannedEvent {
                kind: EventKind::Study,
                assignment_id: a.id.clone(),
                title: a.name.clone(),
                start: slot.start,
                end,
                minutes: used,
            });
            remaining -= used;

            if used < slot.minutes() {
                // The fragment goes back for later assignments only.
                slots.push_front(Slot {
                    start: end,
                    end: slot.end,
                });
                break;
            }
        }
    }

    remaining
}

fn due_marker(a: &Assignment) -> PlannedEvent {
    let end = at_minute(a.due_date, 23 * 60 + 59);
    PlannedEvent {
        kind: EventKind::Due,
        assignment_id: a.id.clone(),
        title: a.name.clone(),
        start: end - Duration::minutes(DUE_MARKER_MINUTES),
        end,
        minutes: DUE_MARKER_MINUTES,
    }
}

/// Whole days between the horizon start and `at`, never negative.
fn day_offset(at: NaiveDateTime, horizon_start: NaiveDateTime) -> usize {
    let ms = (at - horizon_start).num_milliseconds();
    ms.div_euclid(Duration::days(1).num_milliseconds()).max(0) as usize
}

fn overflow_day_index(due: NaiveDateTime, horizon_start: NaiveDateTime) -> usize {
    day_offset(due, horizon_start).min(HORIZON_DAYS - 1)
}

/// Minutes of study placed for one assignment across the plan.
pub fn scheduled_minutes(days: &[DayPlan], assignment_id: &str) -> i64 {
    days.iter()
        .flat_map(|d| d.study_events())
        .filter(|e| e.assignment_id == assignment_id)
        .map(|e| e.minutes)
        .sum()
}

pub fn total_overflow(days: &[DayPlan]) -> i64 {
    days.iter().map(|d| d.overflow_minutes).sum()
}

/// Headline numbers for a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub study_sessions: usize,
    pub study_minutes: i64,
    pub due_markers: usize,
    pub overflow_minutes: i64,
}

impl PlanStats {
    pub fn from_plan(days: &[DayPlan]) -> Self {
        let mut stats = Self::default();
        for d in days {
            for e in &d.events {
                match e.kind {
                    EventKind::Study => {
                        stats.study_sessions += 1;
                        stats.study_minutes += e.minutes;
                    }
                    EventKind::Due => stats.due_markers += 1,
                }
            }
            stats.overflow_minutes += d.overflow_minutes;
        }
        stats
    }
}
