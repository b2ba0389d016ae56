use std::path::Path;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    store::{
        entities::{Settings, Units},
        settings::{JsonSettingsStore, SettingsStore},
    },
    utils::dir::settings_path,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(value: Toggle) -> Self {
        matches!(value, Toggle::On)
    }
}

#[derive(Debug, Parser)]
pub struct SettingsCommand {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), help = "Daily goal in the configured units")]
    goal: Option<u32>,
    #[arg(long, help = "Volume units used everywhere")]
    units: Option<Units>,
    #[arg(long, help = "Turn periodic reminders on or off")]
    reminders: Option<Toggle>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6), help = "Hours between reminders")]
    interval: Option<u8>,
}

/// Command to process `settings`. Without flags the current record is
/// printed; with flags the changes are applied and the record saved
/// wholesale.
pub async fn process_settings_command(
    app_dir: &Path,
    SettingsCommand {
        goal,
        units,
        reminders,
        interval,
    }: SettingsCommand,
) -> Result<()> {
    let store = JsonSettingsStore::new(settings_path(app_dir));
    let mut settings = store.load().await?;

    if goal.is_none() && units.is_none() && reminders.is_none() && interval.is_none() {
        print_settings(&settings);
        return Ok(());
    }

    if let Some(goal) = goal {
        settings.daily_goal = goal;
    }
    if let Some(units) = units {
        settings.units = units;
    }
    if let Some(reminders) = reminders {
        settings.reminders_enabled = reminders.into();
    }
    if let Some(interval) = interval {
        settings.reminder_interval_hours = interval;
    }

    store.save(settings).await?;
    print_settings(&settings);
    Ok(())
}

/// Command to process `goal`, a shorthand for `settings --goal`.
pub async fn process_goal_command(app_dir: &Path, value: u32) -> Result<()> {
    let store = JsonSettingsStore::new(settings_path(app_dir));
    let mut settings = store.load().await?;
    settings.daily_goal = value;
    store.save(settings).await?;

    println!("Daily goal set to {value} {}", settings.units);
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("  {:<20}{} {}", "Daily goal", settings.daily_goal, settings.units);
    println!("  {:<20}{}", "Units", settings.units);
    println!(
        "  {:<20}{}",
        "Reminders",
        if settings.reminders_enabled { "on" } else { "off" }
    );
    println!(
        "  {:<20}every {} h",
        "Reminder interval", settings.reminder_interval_hours
    );
}
