//! Slot generator: cut a day's focus windows into fixed-length sessions.

use chrono::{NaiveDate, NaiveDateTime};

use crate::focus::MinuteWindow;
use crate::time::at_minute;

/// A bookable interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn overlaps(&self, other: &Slot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Consecutive `session_minutes` slots inside each window, earliest first.
/// A trailing piece shorter than a session is not offered.
pub fn generate_slots(date: NaiveDate, windows: &[MinuteWindow], session_minutes: u32) -> Vec<Slot> {
    let mut slots = Vec::new();
    if session_minutes == 0 {
        return slots;
    }

    for w in windows {
        let mut t = w.start_min;
        while t + session_minutes <= w.end_min {
            slots.push(Slot {
                start: at_minute(date, t),
                end: at_minute(date, t + session_minutes),
            });
            t += session_minutes;
        }
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
    }

    fn mw(s: u32, e: u32) -> MinuteWindow {
        MinuteWindow {
            start_min: s,
            end_min: e,
        }
    }

    #[test]
    fn two_hour_window_yields_two_hour_slots() {
        let slots = generate_slots(day(), &[mw(18 * 60, 20 * 60)], 60);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start.hour(), 18);
        assert_eq!(slots[1].start.hour(), 19);
        assert!(slots.iter().all(|s| s.minutes() == 60));
    }

    #[test]
    fn trailing_remainder_is_discarded() {
        let slots = generate_slots(day(), &[mw(9 * 60, 10 * 60)], 45);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start, at_minute(day(), 540));
        assert_eq!(slots[0].end, at_minute(day(), 585));
    }

    #[test]
    fn window_shorter_than_session_yields_nothing() {
        assert!(generate_slots(day(), &[mw(600, 630)], 60).is_empty());
    }

    #[test]
    fn slots_follow_window_order_and_never_overlap() {
        let slots = generate_slots(day(), &[mw(420, 540), mw(1080, 1230)], 30);
        assert_eq!(slots.len(), 4 + 5);
        for pair in slots.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn last_slot_may_end_at_window_end() {
        let slots = generate_slots(day(), &[mw(1380, 1439)], 15);
        // 23:00, 23:15, 23:30 fit; 23:45 would end at 24:00.
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].end, at_minute(day(), 1425));
    }
}
