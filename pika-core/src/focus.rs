//! Focus-window normalizer.
//!
//! Turns one weekday's raw `{start, end}` strings into a sorted, disjoint list
//! of minute-of-day intervals. Bad input is dropped, not reported.

use serde::{Deserialize, Serialize};

use crate::settings::FocusWindow;
use crate::time::parse_clock;

/// `[start_min, end_min)` in minutes past local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MinuteWindow {
    pub start_min: u32,
    pub end_min: u32,
}

impl MinuteWindow {
    pub fn len(&self) -> u32 {
        self.end_min - self.start_min
    }

    pub fn is_empty(&self) -> bool {
        self.end_min <= self.start_min
    }
}

/// Parse a single raw window, `None` if either end is unparsable or the
/// interval is empty/inverted.
pub fn parse_window(raw: &FocusWindow) -> Option<MinuteWindow> {
    let start_min = parse_clock(&raw.start)?;
    let end_min = parse_clock(&raw.end)?;
    if end_min <= start_min {
        return None;
    }
    Some(MinuteWindow { start_min, end_min })
}

/// Parse, drop invalid, sort, and merge overlapping or touching windows.
pub fn normalize_windows(raw: &[FocusWindow]) -> Vec<MinuteWindow> {
    let mut parsed: Vec<MinuteWindow> = raw
        .iter()
        .filter_map(|w| {
            let parsed = parse_window(w);
            if parsed.is_none() {
                tracing::debug!(start = %w.start, end = %w.end, "dropping invalid focus window");
            }
            parsed
        })
        .collect();

    parsed.sort_by_key(|w| (w.start_min, w.end_min));
    merge_sorted(parsed)
}

/// Merge already-sorted windows. Adjacent windows (`next.start == cur.end`)
/// are merged too.
pub fn merge_sorted(sorted: Vec<MinuteWindow>) -> Vec<MinuteWindow> {
    let mut merged: Vec<MinuteWindow> = Vec::with_capacity(sorted.len());
    for w in sorted {
        if let Some(last) = merged.last_mut() {
            if w.start_min <= last.end_min {
                last.end_min = last.end_min.max(w.end_min);
                continue;
            }
        }
        merged.push(w);
    }
    merged
}

/// Total focus minutes in a normalized list.
pub fn total_minutes(windows: &[MinuteWindow]) -> u32 {
    windows.iter().map(MinuteWindow::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fw(s: &str, e: &str) -> FocusWindow {
        FocusWindow::new(s, e)
    }

    fn mw(s: u32, e: u32) -> MinuteWindow {
        MinuteWindow {
            start_min: s,
            end_min: e,
        }
    }

    #[test]
    fn merges_overlapping_evening_blocks() {
        let out = normalize_windows(&[fw("19:00", "21:00"), fw("18:00", "19:30")]);
        assert_eq!(out, vec![mw(18 * 60, 21 * 60)]);
    }

    #[test]
    fn merges_adjacent_windows() {
        let out = normalize_windows(&[fw("09:00", "10:00"), fw("10:00", "11:00")]);
        assert_eq!(out, vec![mw(540, 660)]);
    }

    #[test]
    fn keeps_disjoint_windows_sorted() {
        let out = normalize_windows(&[fw("18:00", "20:00"), fw("07:00", "08:00")]);
        assert_eq!(out, vec![mw(420, 480), mw(1080, 1200)]);
    }

    #[test]
    fn contained_window_does_not_shrink_outer() {
        let out = normalize_windows(&[fw("08:00", "12:00"), fw("09:00", "10:00")]);
        assert_eq!(out, vec![mw(480, 720)]);
    }

    #[test]
    fn drops_invalid_and_inverted() {
        let out = normalize_windows(&[
            fw("20:00", "18:00"),
            fw("10:00", "10:00"),
            fw("25:00", "26:00"),
            fw("9:7", "10:00"),
            fw("evening", "late"),
            fw("06:00", "06:45"),
        ]);
        assert_eq!(out, vec![mw(360, 405)]);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_windows(&[
            fw("13:00", "15:00"),
            fw("08:00", "09:30"),
            fw("09:00", "10:00"),
        ]);
        let again: Vec<FocusWindow> = once
            .iter()
            .map(|w| {
                fw(
                    &crate::time::format_clock(w.start_min),
                    &crate::time::format_clock(w.end_min),
                )
            })
            .collect();
        assert_eq!(normalize_windows(&again), once);
    }

    #[test]
    fn total_minutes_sums_lengths() {
        assert_eq!(total_minutes(&[mw(0, 30), mw(60, 120)]), 90);
    }
}
