//! Deadline notifications. Nothing is delivered from here: we only build the
//! payload an SMS provider would receive.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;

pub const SIMULATED_FROM: &str = "+15551234567";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub phone_number: String,
    pub alert_24h_deadlines: bool,
    pub daily_study_reminders: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            phone_number: String::new(),
            alert_24h_deadlines: true,
            daily_study_reminders: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[serde(rename = "deadline_24h")]
    Deadline24h,
    DailyStudyReminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub kind: MessageKind,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMeta {
    pub app: String,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsPayload {
    pub to: String,
    pub from: String,
    pub messages: Vec<SmsMessage>,
    pub provider: String,
    pub meta: SmsMeta,
}

/// Assignments whose deadline (23:59:59 on the due date) is less than a day
/// away and not yet passed.
pub fn due_within_24h(assignments: &[Assignment], now: NaiveDateTime) -> Vec<&Assignment> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    assignments
        .iter()
        .filter(|a| {
            let left = a.due_date.and_time(end_of_day) - now;
            left > Duration::zero() && left < Duration::days(1)
        })
        .collect()
}

pub fn build_sms_payload(
    settings: &NotificationSettings,
    assignments: &[Assignment],
    now: NaiveDateTime,
) -> SmsPayload {
    let mut messages = Vec::new();

    if settings.alert_24h_deadlines {
        let soon = due_within_24h(assignments, now);
        let body = if soon.is_empty() {
            "Pika: No assignments due in the next 24 hours.".to_string()
        } else {
            let names: Vec<&str> = soon.iter().map(|a| a.name.as_str()).collect();
            format!("Pika: Due soon - {}.", names.join(", "))
        };
        messages.push(SmsMessage {
            kind: MessageKind::Deadline24h,
            body,
        });
    }

    if settings.daily_study_reminders {
        messages.push(SmsMessage {
            kind: MessageKind::DailyStudyReminder,
            body: "Pika: Your daily study plan is ready. Open the study planner to begin."
                .to_string(),
        });
    }

    SmsPayload {
        to: settings.phone_number.clone(),
        from: SIMULATED_FROM.to_string(),
        messages,
        provider: "twilio".to_string(),
        meta: SmsMeta {
            app: "pika".to_string(),
            generated_at: now,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::AssignmentKind;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 16)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn due(name: &str, days: i64) -> Assignment {
        Assignment::new(name, name, AssignmentKind::Homework, at(0).date() + Duration::days(days))
    }

    #[test]
    fn only_the_next_day_counts() {
        let list = [due("today", 0), due("tomorrow", 1), due("later", 3), due("past", -1)];
        let names: Vec<_> = due_within_24h(&list, at(9)).iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, ["today"]);

        // At 23:00, tomorrow's deadline is under 25h away but not under 24h.
        let names: Vec<_> = due_within_24h(&list, at(23)).iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, ["today"]);
    }

    #[test]
    fn payload_lists_due_names() {
        let settings = NotificationSettings {
            phone_number: "+15550001111".to_string(),
            alert_24h_deadlines: true,
            daily_study_reminders: true,
        };
        let p = build_sms_payload(&settings, &[due("Calc HW", 0), due("Essay", 0)], at(10));
        assert_eq!(p.to, "+15550001111");
        assert_eq!(p.from, SIMULATED_FROM);
        assert_eq!(p.messages.len(), 2);
        assert_eq!(p.messages[0].body, "Pika: Due soon - Calc HW, Essay.");
        assert_eq!(p.messages[1].kind, MessageKind::DailyStudyReminder);
    }

    #[test]
    fn disabled_alerts_produce_no_messages() {
        let settings = NotificationSettings {
            alert_24h_deadlines: false,
            ..NotificationSettings::default()
        };
        let p = build_sms_payload(&settings, &[due("x", 0)], at(10));
        assert!(p.messages.is_empty());
    }

    #[test]
    fn quiet_day_message() {
        let p = build_sms_payload(&NotificationSettings::default(), &[due("x", 4)], at(10));
        assert_eq!(p.messages[0].body, "Pika: No assignments due in the next 24 hours.");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["messages"][0]["kind"], "deadline_24h");
    }
}
