//! Weighted grade projection over the assignment list.

use serde::Serialize;

use crate::assignment::{Assignment, AssignmentKind};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeProjection {
    pub goal: f64,
    pub total_weight: f64,
    pub done_weight: f64,
    pub remaining_weight: f64,
    /// Sum of `weight * score` over graded work.
    pub points: f64,
    /// Weighted average so far, `None` until something is graded.
    pub current: Option<f64>,
    /// Average needed on ungraded work to reach `goal`.
    pub needed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum NeededAverage {
    AllScored,
    Unknown,
    Impossible(f64),
    Guaranteed(f64),
    Needed(f64),
}

impl std::fmt::Display for NeededAverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllScored => write!(f, "All assignments are scored."),
            Self::Unknown => write!(f, "-"),
            Self::Impossible(_) => write!(f, "Not possible (needs > 100%)."),
            Self::Guaranteed(_) => write!(f, "Goal already guaranteed."),
            Self::Needed(v) => write!(f, "{}%", round1(*v)),
        }
    }
}

impl GradeProjection {
    pub fn needed_average(&self) -> NeededAverage {
        match self.needed {
            None if self.remaining_weight == 0.0 => NeededAverage::AllScored,
            None => NeededAverage::Unknown,
            Some(v) if v > 100.0 => NeededAverage::Impossible(v),
            Some(v) if v < 0.0 => NeededAverage::Guaranteed(v),
            Some(v) => NeededAverage::Needed(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindSummary {
    pub kind: AssignmentKind,
    pub count: usize,
    pub done_weight: f64,
    pub average: Option<f64>,
}

fn weight_of(a: &Assignment) -> f64 {
    if a.weight.is_finite() { a.weight } else { 0.0 }
}

/// Project the course grade for a goal percentage (clamped to 0-100).
pub fn project_grades(assignments: &[Assignment], goal: f64) -> GradeProjection {
    let goal = goal.clamp(0.0, 100.0);
    let total_weight: f64 = assignments.iter().map(weight_of).sum();

    let (done_weight, points) = graded_totals(assignments.iter());
    let current = (done_weight > 0.0).then(|| points / done_weight);

    let remaining_weight = (total_weight - done_weight).max(0.0);
    let needed = (remaining_weight > 0.0).then(|| (goal * total_weight - points) / remaining_weight);

    GradeProjection {
        goal,
        total_weight,
        done_weight,
        remaining_weight,
        points,
        current,
        needed,
    }
}

/// Per-type averages, always in exam/homework/project order.
pub fn summarize_by_kind(assignments: &[Assignment]) -> Vec<KindSummary> {
    AssignmentKind::ALL
        .iter()
        .map(|&kind| {
            let group = assignments.iter().filter(|a| a.kind == kind);
            let count = group.clone().count();
            let (done_weight, points) = graded_totals(group);
            KindSummary {
                kind,
                count,
                done_weight,
                average: (done_weight > 0.0).then(|| points / done_weight),
            }
        })
        .collect()
}

fn graded_totals<'a>(items: impl Iterator<Item = &'a Assignment>) -> (f64, f64) {
    items
        .filter_map(|a| a.score.map(|s| (weight_of(a), s)))
        .fold((0.0, 0.0), |(w, p), (weight, score)| (w + weight, p + weight * score))
}

pub fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn a(kind: AssignmentKind, weight: f64, score: Option<f64>) -> Assignment {
        let d = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        Assignment::new("x", "X", kind, d)
            .with_weight(weight)
            .with_score(score)
    }

    #[test]
    fn current_is_weighted_average_of_graded() {
        let list = [
            a(AssignmentKind::Exam, 25.0, Some(88.0)),
            a(AssignmentKind::Homework, 5.0, Some(100.0)),
            a(AssignmentKind::Project, 20.0, None),
        ];
        let p = project_grades(&list, 90.0);
        assert_eq!(p.total_weight, 50.0);
        assert_eq!(p.done_weight, 30.0);
        assert_eq!(p.remaining_weight, 20.0);
        assert!((p.current.unwrap() - 90.0).abs() < 1e-9);
        // (90*50 - 2700) / 20 = 90
        assert!((p.needed.unwrap() - 90.0).abs() < 1e-9);
        assert_eq!(p.needed_average(), NeededAverage::Needed(90.0));
    }

    #[test]
    fn nothing_graded_has_no_current() {
        let p = project_grades(&[a(AssignmentKind::Exam, 40.0, None)], 80.0);
        assert_eq!(p.current, None);
        assert_eq!(p.needed, Some(80.0));
    }

    #[test]
    fn classifications() {
        let all = project_grades(&[a(AssignmentKind::Exam, 40.0, Some(70.0))], 90.0);
        assert_eq!(all.needed_average(), NeededAverage::AllScored);

        let hard = project_grades(
            &[a(AssignmentKind::Exam, 90.0, Some(50.0)), a(AssignmentKind::Homework, 10.0, None)],
            95.0,
        );
        assert!(matches!(hard.needed_average(), NeededAverage::Impossible(_)));

        let easy = project_grades(
            &[a(AssignmentKind::Exam, 90.0, Some(100.0)), a(AssignmentKind::Homework, 10.0, None)],
            50.0,
        );
        assert!(matches!(easy.needed_average(), NeededAverage::Guaranteed(_)));

        assert_eq!(project_grades(&[], 90.0).needed_average(), NeededAverage::AllScored);
    }

    #[test]
    fn goal_is_clamped() {
        assert_eq!(project_grades(&[], 150.0).goal, 100.0);
        assert_eq!(project_grades(&[], -5.0).goal, 0.0);
    }

    #[test]
    fn by_kind_groups_in_fixed_order() {
        let list = [
            a(AssignmentKind::Homework, 5.0, Some(80.0)),
            a(AssignmentKind::Homework, 5.0, Some(100.0)),
            a(AssignmentKind::Exam, 25.0, None),
        ];
        let rows = summarize_by_kind(&list);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, AssignmentKind::Exam);
        assert_eq!(rows[0].average, None);
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].average, Some(90.0));
        assert_eq!(rows[2].count, 0);
    }

    #[test]
    fn needed_display() {
        assert_eq!(NeededAverage::Needed(87.46).to_string(), "87.5%");
        assert_eq!(
            NeededAverage::Impossible(120.0).to_string(),
            "Not possible (needs > 100%)."
        );
    }
}
