use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Utc};
use futures::TryStreamExt;

use crate::{
    stats::{self, MONTH_DAYS, WEEK_DAYS},
    store::{
        entities::{IntakeEvent, Settings},
        intake::{events_between, DayFileIntakeStore},
        settings::{JsonSettingsStore, SettingsStore},
    },
    utils::{
        dir::{records_dir, settings_path},
        time::day_of,
    },
};

/// Command to process `week`: the trailing 7-day summary.
pub async fn process_week_command(app_dir: &Path) -> Result<()> {
    let (events, settings, now_ms) = load_window(app_dir, WEEK_DAYS).await?;
    let summary = stats::compute_weekly_summary(&events, settings.daily_goal, now_ms);

    println!("This week");
    print_row("Goal days", format!("{} / {WEEK_DAYS}", summary.days_goal_met));
    print_row("Current streak", format!("{} days", summary.current_goal_streak));
    print_row("Days logged", format!("{}", summary.days_logged));
    print_row(
        "Total",
        format!("{} {}", summary.total_week_amount, settings.units),
    );
    print_row(
        "Best day",
        format!("{} {}", summary.best_day_amount, settings.units),
    );
    Ok(())
}

/// Command to process `month`: the trailing 30-day summary.
pub async fn process_month_command(app_dir: &Path) -> Result<()> {
    let (events, settings, now_ms) = load_window(app_dir, MONTH_DAYS).await?;
    let summary = stats::compute_monthly_summary(&events, settings.daily_goal, now_ms);

    println!("This month");
    print_row("Goal days", format!("{} / {MONTH_DAYS}", summary.days_goal_met));
    print_row("Longest streak", format!("{} days", summary.longest_goal_streak));
    print_row("Days logged", format!("{}", summary.days_logged));
    print_row(
        "Total",
        format!("{} {}", summary.total_month_amount, settings.units),
    );
    print_row(
        "Best day",
        format!("{} {}", summary.best_day_amount, settings.units),
    );
    Ok(())
}

fn print_row(label: &str, value: String) {
    println!("  {label:<16}{value}");
}

/// Reads the trailing window of day files plus the settings snapshot the
/// summaries are derived from.
pub(super) async fn load_window(
    app_dir: &Path,
    window_days: usize,
) -> Result<(Vec<IntakeEvent>, Settings, i64)> {
    let store = DayFileIntakeStore::new(records_dir(app_dir))?;
    let settings = JsonSettingsStore::new(settings_path(app_dir)).load().await?;

    let now_ms = Utc::now().timestamp_millis();
    let today = day_of(now_ms);
    let start = today - Duration::days(window_days as i64 - 1);

    let events = events_between(store, start, today).try_collect().await?;
    Ok((events, settings, now_ms))
}
