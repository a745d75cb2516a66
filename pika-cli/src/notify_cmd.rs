use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use clap::Subcommand;
use pika_core::{NotificationSettings, build_sms_payload, due_within_24h};

use crate::clock::{parse_now, resolve_now};
use crate::state::Store;

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// Show notification settings and what is due in the next 24 hours
    Show {
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Update notification settings
    Set {
        /// Phone number messages are addressed to
        #[arg(long)]
        phone: Option<String>,

        /// Alert for deadlines in the next 24 hours
        #[arg(long)]
        alert_24h: Option<bool>,

        /// Send a daily study reminder
        #[arg(long)]
        daily_reminders: Option<bool>,
    },

    /// Print the SMS payload that would be sent now. Nothing is delivered.
    Simulate {
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },
}

pub fn run(store: &Store, cmd: NotifyCommand) -> Result<()> {
    match cmd {
        NotifyCommand::Show { now } => {
            let settings = store.load_notifications()?;
            let assignments = store.load_assignments()?;
            let now = resolve_now(now);

            print_settings(&settings);
            let soon = due_within_24h(&assignments, now);
            if soon.is_empty() {
                println!("\nNothing due in the next 24 hours.");
            } else {
                println!("\nDue in the next 24 hours:");
                for a in soon {
                    println!("- {} ({})", a.name, a.due_date);
                }
            }
            Ok(())
        }
        NotifyCommand::Set {
            phone,
            alert_24h,
            daily_reminders,
        } => {
            let settings = apply(store.load_notifications()?, phone, alert_24h, daily_reminders);
            store.save_notifications(&settings)?;
            print_settings(&settings);
            Ok(())
        }
        NotifyCommand::Simulate { now } => {
            let settings = store.load_notifications()?;
            if settings.phone_number.trim().is_empty() {
                bail!("no phone number set; run `pika notify set --phone <number>` first");
            }
            let assignments = store.load_assignments()?;
            let payload = build_sms_payload(&settings, &assignments, resolve_now(now));
            tracing::info!(messages = payload.messages.len(), "simulated SMS payload");
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
    }
}

fn apply(
    mut settings: NotificationSettings,
    phone: Option<String>,
    alert_24h: Option<bool>,
    daily_reminders: Option<bool>,
) -> NotificationSettings {
    if let Some(phone) = phone {
        settings.phone_number = phone.trim().to_string();
    }
    if let Some(on) = alert_24h {
        settings.alert_24h_deadlines = on;
    }
    if let Some(on) = daily_reminders {
        settings.daily_study_reminders = on;
    }
    settings
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

fn print_settings(s: &NotificationSettings) {
    let phone = if s.phone_number.is_empty() {
        "(not set)"
    } else {
        s.phone_number.as_str()
    };
    println!("Phone:                {phone}");
    println!("24h deadline alerts:  {}", on_off(s.alert_24h_deadlines));
    println!("Daily study reminder: {}", on_off(s.daily_study_reminders));
}
