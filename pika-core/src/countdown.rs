//! Countdown board: assignments ordered by closest deadline with a live
//! `D:HH:MM` countdown and an urgency colour.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::assignment::Assignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Red,
    Yellow,
    Green,
}

impl Urgency {
    /// Under a day is red, under three days yellow.
    pub fn from_remaining(remaining: Duration) -> Self {
        if remaining < Duration::days(1) {
            Self::Red
        } else if remaining < Duration::days(3) {
            Self::Yellow
        } else {
            Self::Green
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountdownCard {
    pub assignment_id: String,
    pub name: String,
    pub due: NaiveDateTime,
    pub remaining: String,
    pub overdue: bool,
    pub urgency: Urgency,
    /// Elapsed share of the time between creation and the deadline.
    pub progress: Option<f64>,
}

/// `D:HH:MM`; negative durations show as `0:00:00`.
pub fn format_dhm(remaining: Duration) -> String {
    let total_minutes = remaining.num_minutes().max(0);
    let minutes = total_minutes % 60;
    let total_hours = total_minutes / 60;
    let hours = total_hours % 24;
    let days = total_hours / 24;
    format!("{days}:{hours:02}:{minutes:02}")
}

fn progress(a: &Assignment, now: NaiveDateTime) -> Option<f64> {
    let created = a.created_at?;
    let span = (a.due_instant() - created).num_milliseconds().max(1) as f64;
    let elapsed = (now - created).num_milliseconds() as f64;
    Some((elapsed / span).clamp(0.0, 1.0))
}

pub fn countdown_board(assignments: &[Assignment], now: NaiveDateTime) -> Vec<CountdownCard> {
    let mut sorted: Vec<&Assignment> = assignments.iter().collect();
    sorted.sort_by_key(|a| a.due_instant());

    sorted
        .into_iter()
        .map(|a| {
            let due = a.due_instant();
            let remaining = due - now;
            CountdownCard {
                assignment_id: a.id.clone(),
                name: a.name.clone(),
                due,
                remaining: format_dhm(remaining),
                overdue: remaining <= Duration::zero(),
                urgency: Urgency::from_remaining(remaining),
                progress: progress(a, now),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentKind;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 16)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn due_in(id: &str, days: i64) -> Assignment {
        Assignment::new(id, id, AssignmentKind::Homework, now().date() + Duration::days(days))
    }

    #[test]
    fn format_dhm_splits_units() {
        assert_eq!(format_dhm(Duration::minutes(0)), "0:00:00");
        assert_eq!(format_dhm(Duration::minutes(61)), "0:01:01");
        assert_eq!(
            format_dhm(Duration::days(2) + Duration::hours(3) + Duration::minutes(4)),
            "2:03:04"
        );
        assert_eq!(format_dhm(Duration::hours(-5)), "0:00:00");
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(Urgency::from_remaining(Duration::hours(23)), Urgency::Red);
        assert_eq!(Urgency::from_remaining(Duration::hours(-1)), Urgency::Red);
        assert_eq!(Urgency::from_remaining(Duration::hours(30)), Urgency::Yellow);
        assert_eq!(Urgency::from_remaining(Duration::days(3)), Urgency::Green);
    }

    #[test]
    fn board_is_sorted_by_deadline() {
        let board = countdown_board(&[due_in("c", 5), due_in("a", 0), due_in("b", 2)], now());
        let ids: Vec<_> = board.iter().map(|c| c.assignment_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(board[0].urgency, Urgency::Red);
        // Due today at 23:59:59.999, now is noon.
        assert_eq!(board[0].remaining, "0:11:59");
        assert!(!board[0].overdue);
    }

    #[test]
    fn overdue_cards_are_flagged() {
        let board = countdown_board(&[due_in("late", -2)], now());
        assert!(board[0].overdue);
        assert_eq!(board[0].remaining, "0:00:00");
    }

    #[test]
    fn progress_tracks_elapsed_share() {
        let created = now() - Duration::hours(12);
        // due end of tomorrow: 36h from now, span 48h
        let a = due_in("p", 1).with_created_at(created);
        let p = countdown_board(&[a], now())[0].progress.unwrap();
        assert!((p - 0.25).abs() < 0.01, "progress {p}");
        assert_eq!(countdown_board(&[due_in("q", 1)], now())[0].progress, None);
    }
}
