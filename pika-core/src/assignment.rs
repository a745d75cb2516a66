//! Assignment model shared by every view.
//!
//! Storage lives in the CLI; the core only ever reads a snapshot.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::due_instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Exam,
    Homework,
    Project,
}

impl AssignmentKind {
    pub const ALL: [AssignmentKind; 3] = [Self::Exam, Self::Homework, Self::Project];

    /// Effort guess when a syllabus gives none.
    pub fn default_hours(self) -> f64 {
        match self {
            Self::Exam => 6.0,
            Self::Project => 10.0,
            Self::Homework => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exam => "exam",
            Self::Homework => "homework",
            Self::Project => "project",
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exam" => Ok(Self::Exam),
            "homework" | "hw" => Ok(Self::Homework),
            "project" => Ok(Self::Project),
            other => Err(format!("unknown assignment type '{other}' (exam|homework|project)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: AssignmentKind,

    /// Percentage points of the final grade.
    pub weight: f64,

    /// 0-100; `None` while ungraded.
    #[serde(default)]
    pub score: Option<f64>,

    pub due_date: NaiveDate,

    /// Remaining effort in hours.
    pub estimated_hours: f64,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: AssignmentKind,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            created_at: None,
            name: name.into(),
            kind,
            weight: 0.0,
            score: None,
            due_date,
            estimated_hours: kind.default_hours(),
        }
    }

    /// New record with a fresh random id, stamped with `created_at`.
    pub fn create(
        name: impl Into<String>,
        kind: AssignmentKind,
        due_date: NaiveDate,
        created_at: NaiveDateTime,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidName);
        }
        let mut a = Self::new(new_id(), name.trim(), kind, due_date);
        a.created_at = Some(created_at);
        Ok(a)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    pub fn with_created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn due_instant(&self) -> NaiveDateTime {
        due_instant(self.due_date)
    }

    /// Effort to place, rounded to whole minutes. Negative effort counts as none.
    pub fn effort_minutes(&self) -> i64 {
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return 0;
        }
        (self.estimated_hours * 60.0).round() as i64
    }

    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validate a score typed by a user before it is stored.
pub fn check_score(score: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&score) {
        return Err(Error::InvalidScore(score));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn serde_uses_type_key_and_iso_dates() {
        let a = Assignment::new("a1", "Biology Exam 1", AssignmentKind::Exam, date("2026-01-22"))
            .with_weight(25.0)
            .with_score(Some(88.0));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["type"], "exam");
        assert_eq!(json["due_date"], "2026-01-22");
        assert_eq!(json["score"], 88.0);
        assert!(json.get("created_at").is_none());

        let back: Assignment = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn malformed_due_date_fails_deserialization() {
        let raw = r#"{"id":"x","name":"HW","type":"homework","weight":5,"score":null,
                      "due_date":"next friday","estimated_hours":2}"#;
        assert!(serde_json::from_str::<Assignment>(raw).is_err());
    }

    #[test]
    fn effort_minutes_rounds_and_floors() {
        let d = date("2026-01-22");
        let a = Assignment::new("a", "A", AssignmentKind::Homework, d);
        assert_eq!(a.clone().with_hours(1.5).effort_minutes(), 90);
        assert_eq!(a.clone().with_hours(0.3333).effort_minutes(), 20);
        assert_eq!(a.clone().with_hours(0.0).effort_minutes(), 0);
        assert_eq!(a.with_hours(-2.0).effort_minutes(), 0);
    }

    #[test]
    fn create_rejects_blank_names() {
        let d = date("2026-01-22");
        let now = d.and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(
            Assignment::create("   ", AssignmentKind::Exam, d, now),
            Err(Error::InvalidName)
        );
        let a = Assignment::create(" Essay ", AssignmentKind::Project, d, now).unwrap();
        assert_eq!(a.name, "Essay");
        assert_eq!(a.created_at, Some(now));
        assert!(!a.id.is_empty());
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("HW".parse::<AssignmentKind>(), Ok(AssignmentKind::Homework));
        assert_eq!(" Exam ".parse::<AssignmentKind>(), Ok(AssignmentKind::Exam));
        assert!("quiz".parse::<AssignmentKind>().is_err());
    }

    #[test]
    fn check_score_bounds() {
        assert_eq!(check_score(100.0), Ok(100.0));
        assert_eq!(check_score(-1.0), Err(Error::InvalidScore(-1.0)));
    }
}
