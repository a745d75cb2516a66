//! pika-core: assignment model, weekly study planner and the read-only views
//! (grades, countdowns, deadline alerts) built on the same snapshot.

pub mod assignment;
pub mod calendar;
pub mod countdown;
pub mod error;
pub mod focus;
pub mod grades;
pub mod notify;
pub mod planner;
pub mod settings;
pub mod slots;
pub mod time;

pub use assignment::{Assignment, AssignmentKind, check_score, new_id};
pub use calendar::{CalendarEvent, escape_ics, plan_to_ics};
pub use countdown::{CountdownCard, Urgency, countdown_board, format_dhm};
pub use error::{Error, Result};
pub use focus::{MinuteWindow, normalize_windows};
pub use grades::{GradeProjection, KindSummary, NeededAverage, project_grades, summarize_by_kind};
pub use notify::{NotificationSettings, SmsPayload, build_sms_payload, due_within_24h};
pub use planner::{
    DayPlan, EventKind, HORIZON_DAYS, PlanStats, PlannedEvent, build_weekly_plan,
    scheduled_minutes, total_overflow,
};
pub use settings::{FocusWindow, PlannerSettings};
pub use slots::{Slot, generate_slots};
