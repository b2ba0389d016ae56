use std::{fmt::Display, path::Path};

use anyhow::Result;
use chrono::{Local, Utc};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{
    stats,
    store::{
        entities::IntakeEvent,
        intake::{DayFileIntakeStore, IntakeStore},
        settings::{JsonSettingsStore, SettingsStore},
    },
    utils::{
        dir::{records_dir, settings_path},
        time::day_of,
    },
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(help = "Amount of water to log, in the configured units")]
    amount: u32,
    #[arg(
        long = "at",
        help = "Moment to log at. Examples are \"yesterday 14:00\", \"2 hours ago\", \"15/03/2025\""
    )]
    at: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Command to process `log`. Appends one intake event and echoes the new
/// today-total against the goal.
pub async fn process_log_command(
    app_dir: &Path,
    LogCommand {
        amount,
        at,
        date_style,
    }: LogCommand,
) -> Result<()> {
    let dialect: chrono_english::Dialect = date_style.into();
    let timestamp = match at.map(|s| parse_date_string(&s, Local::now(), dialect)) {
        Some(Ok(v)) => v.with_timezone(&Utc),
        Some(Err(e)) => {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::ValueValidation,
                    format!("Failed to validate log moment {e}"),
                )
                .into());
        }
        None => Utc::now(),
    };

    let store = DayFileIntakeStore::new(records_dir(app_dir))?;
    store.append(IntakeEvent::new(amount, timestamp)).await?;

    let settings = JsonSettingsStore::new(settings_path(app_dir)).load().await?;
    let now_ms = Utc::now().timestamp_millis();
    let today = store.events_for(day_of(now_ms)).await?;
    let total = stats::total_today(&today, now_ms);

    println!(
        "Logged {amount} {units}. Today: {total} / {goal} {units}",
        units = settings.units,
        goal = settings.daily_goal,
    );
    Ok(())
}
