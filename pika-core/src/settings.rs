//! Planner settings: session length and recurring weekly focus windows.
//!
//! Values are replaced, never edited in place: every setter consumes `self`
//! and hands back a new `PlannerSettings`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MIN_SESSION_MINUTES: u32 = 15;
pub const MAX_SESSION_MINUTES: u32 = 240;
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// A raw focus window as typed by the user, `"HH:MM"` 24h clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusWindow {
    pub start: String,
    pub end: String,
}

impl FocusWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse `"18:00-20:00"`. Only splits; the times are validated later by
    /// the normalizer.
    pub fn parse_range(s: &str) -> Option<Self> {
        let (start, end) = s.split_once('-')?;
        Some(Self::new(start.trim(), end.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSettings {
    session_minutes: u32,

    /// Weekday (0 = Sunday .. 6 = Saturday) to its windows.
    #[serde(default)]
    focus_windows: BTreeMap<u8, Vec<FocusWindow>>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        let weekday = vec![FocusWindow::new("18:00", "21:00")];
        let weekend = vec![FocusWindow::new("10:00", "12:00")];

        let mut focus_windows = BTreeMap::new();
        focus_windows.insert(0, weekend.clone());
        for day in 1..=5 {
            focus_windows.insert(day, weekday.clone());
        }
        focus_windows.insert(6, weekend);

        Self {
            session_minutes: DEFAULT_SESSION_MINUTES,
            focus_windows,
        }
    }
}

impl PlannerSettings {
    /// Settings with no focus windows at all.
    pub fn empty(session_minutes: u32) -> Self {
        Self {
            session_minutes: clamp_session(session_minutes),
            focus_windows: BTreeMap::new(),
        }
    }

    /// Session length, clamped into `[15, 240]` even if the stored value
    /// was written by hand.
    pub fn session_minutes(&self) -> u32 {
        clamp_session(self.session_minutes)
    }

    pub fn windows_for(&self, weekday: u8) -> &[FocusWindow] {
        self.focus_windows
            .get(&weekday)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn focus_windows(&self) -> &BTreeMap<u8, Vec<FocusWindow>> {
        &self.focus_windows
    }

    pub fn with_session_minutes(self, minutes: u32) -> Self {
        Self {
            session_minutes: clamp_session(minutes),
            ..self
        }
    }

    /// Replace one weekday's windows. Weekdays outside 0-6 are ignored.
    pub fn with_windows(self, weekday: u8, windows: Vec<FocusWindow>) -> Self {
        if weekday > 6 {
            return self;
        }
        let mut focus_windows = self.focus_windows;
        if windows.is_empty() {
            focus_windows.remove(&weekday);
        } else {
            focus_windows.insert(weekday, windows);
        }
        Self {
            focus_windows,
            ..self
        }
    }

    /// Same windows on several weekdays.
    pub fn with_windows_on(self, weekdays: &[u8], windows: &[FocusWindow]) -> Self {
        weekdays
            .iter()
            .fold(self, |acc, &d| acc.with_windows(d, windows.to_vec()))
    }
}

fn clamp_session(minutes: u32) -> u32 {
    minutes.clamp(MIN_SESSION_MINUTES, MAX_SESSION_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_minutes_are_clamped() {
        assert_eq!(PlannerSettings::empty(5).session_minutes(), 15);
        assert_eq!(PlannerSettings::empty(600).session_minutes(), 240);
        let s = PlannerSettings::default().with_session_minutes(45);
        assert_eq!(s.session_minutes(), 45);
    }

    #[test]
    fn hand_edited_session_is_clamped_on_read() {
        let raw = r#"{"sessionMinutes": 1000, "focusWindows": {}}"#;
        let s: PlannerSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(s.session_minutes(), 240);
    }

    #[test]
    fn with_windows_returns_new_value() {
        let base = PlannerSettings::empty(60);
        let next = base
            .clone()
            .with_windows(3, vec![FocusWindow::new("09:00", "10:00")]);
        assert!(base.windows_for(3).is_empty());
        assert_eq!(next.windows_for(3).len(), 1);

        let cleared = next.with_windows(3, vec![]);
        assert!(cleared.focus_windows().is_empty());
    }

    #[test]
    fn out_of_range_weekday_is_ignored() {
        let s = PlannerSettings::empty(60).with_windows(9, vec![FocusWindow::new("09:00", "10:00")]);
        assert!(s.focus_windows().is_empty());
    }

    #[test]
    fn default_covers_every_weekday() {
        let s = PlannerSettings::default();
        for d in 0..7u8 {
            assert!(!s.windows_for(d).is_empty(), "weekday {d} has no windows");
        }
    }

    #[test]
    fn json_keys_are_weekday_numbers() {
        let s = PlannerSettings::empty(60).with_windows(1, vec![FocusWindow::new("18:00", "20:00")]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["sessionMinutes"], 60);
        assert_eq!(json["focusWindows"]["1"][0]["start"], "18:00");
        let back: PlannerSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn parse_range_splits_on_dash() {
        assert_eq!(
            FocusWindow::parse_range("18:00 - 20:30"),
            Some(FocusWindow::new("18:00", "20:30"))
        );
        assert_eq!(FocusWindow::parse_range("18:00"), None);
    }
}
