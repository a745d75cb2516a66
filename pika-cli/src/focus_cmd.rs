use anyhow::{Result, bail};
use clap::Subcommand;
use pika_core::focus::{normalize_windows, parse_window, total_minutes};
use pika_core::settings::{MAX_SESSION_MINUTES, MIN_SESSION_MINUTES};
use pika_core::time::format_clock;
use pika_core::{FocusWindow, PlannerSettings};
use std::fmt::Write as _;

use crate::state::Store;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Subcommand, Debug)]
pub enum FocusCommand {
    /// Show session length and weekly focus windows
    Show,

    /// Set the study session length in minutes (15-240)
    Session { minutes: u32 },

    /// Replace one weekday's windows, e.g. `pika focus set mon 07:00-08:00 18:00-20:00`
    Set {
        #[arg(value_parser = parse_weekday)]
        weekday: u8,

        #[arg(required = true, value_name = "HH:MM-HH:MM")]
        windows: Vec<String>,
    },

    /// Remove all windows on a weekday
    Clear {
        #[arg(value_parser = parse_weekday)]
        weekday: u8,
    },

    /// Restore the default schedule
    Reset,
}

pub fn run(store: &Store, cmd: FocusCommand) -> Result<()> {
    let settings = store.load_settings()?;

    let updated = match cmd {
        FocusCommand::Show => {
            print!("{}", render_focus(&settings));
            return Ok(());
        }
        FocusCommand::Session { minutes } => {
            let next = settings.with_session_minutes(minutes);
            if next.session_minutes() != minutes {
                println!(
                    "Session length must be {MIN_SESSION_MINUTES}-{MAX_SESSION_MINUTES} minutes; using {}.",
                    next.session_minutes()
                );
            }
            next
        }
        FocusCommand::Set { weekday, windows } => {
            let parsed = parse_ranges(&windows)?;
            settings.with_windows(weekday, parsed)
        }
        FocusCommand::Clear { weekday } => settings.with_windows(weekday, Vec::new()),
        FocusCommand::Reset => PlannerSettings::default(),
    };

    store.save_settings(&updated)?;
    print!("{}", render_focus(&updated));
    Ok(())
}

/// Weekday as `0`-`6` (Sunday first) or an English name / 3-letter prefix.
pub fn parse_weekday(s: &str) -> Result<u8, String> {
    let s = s.trim().to_lowercase();
    if let Ok(n) = s.parse::<u8>() {
        return if n <= 6 {
            Ok(n)
        } else {
            Err(format!("weekday {n} out of range (0 = Sunday .. 6 = Saturday)"))
        };
    }
    let full = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];
    full.iter()
        .position(|name| s.len() >= 3 && name.starts_with(s.as_str()))
        .map(|i| i as u8)
        .ok_or_else(|| format!("unknown weekday '{s}'"))
}

/// Strict parse for user input. The planner silently drops bad windows; the
/// CLI refuses them instead.
fn parse_ranges(raw: &[String]) -> Result<Vec<FocusWindow>> {
    raw.iter()
        .map(|r| {
            let Some(w) = FocusWindow::parse_range(r) else {
                bail!("'{r}' is not HH:MM-HH:MM");
            };
            if parse_window(&w).is_none() {
                bail!("'{r}' is not a valid window (24h clock, start before end)");
            }
            Ok(w)
        })
        .collect()
}

pub fn render_focus(settings: &PlannerSettings) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Session length: {} min", settings.session_minutes());

    let mut weekly = 0;
    for (day, name) in DAY_NAMES.iter().enumerate() {
        let windows = normalize_windows(settings.windows_for(day as u8));
        let total = total_minutes(&windows);
        weekly += total;
        let spans: Vec<String> = windows
            .iter()
            .map(|w| format!("{}-{}", format_clock(w.start_min), format_clock(w.end_min)))
            .collect();
        let spans = if spans.is_empty() {
            "-".to_string()
        } else {
            spans.join(", ")
        };
        let _ = writeln!(s, "  {name}  {spans}  ({total} min)");
    }
    let _ = writeln!(s, "Weekly focus time: {} h {} min", weekly / 60, weekly % 60);
    s
}
