use std::path::Path;

use ansi_term::Colour;
use anyhow::Result;
use chrono::Utc;

use crate::{
    stats::{self, badges::BADGES},
    store::{
        intake::{DayFileIntakeStore, IntakeStore},
        settings::{JsonSettingsStore, SettingsStore},
    },
    utils::{
        dir::{records_dir, settings_path},
        time::day_of,
    },
};

use super::render::progress_bar;

const PROGRESS_BAR_WIDTH: usize = 24;

/// Command to process `status`: today's total against the goal, the progress
/// bar and the locked/unlocked achievement badges.
pub async fn process_status_command(app_dir: &Path) -> Result<()> {
    let store = DayFileIntakeStore::new(records_dir(app_dir))?;
    let settings = JsonSettingsStore::new(settings_path(app_dir)).load().await?;

    let now_ms = Utc::now().timestamp_millis();
    let today = store.events_for(day_of(now_ms)).await?;
    let total = stats::total_today(&today, now_ms);
    let progress = stats::progress_ratio(total, settings.daily_goal);

    println!(
        "Today: {total} / {} {}",
        settings.daily_goal, settings.units
    );
    println!(
        "{} {}%",
        Colour::Cyan.paint(progress_bar(progress, PROGRESS_BAR_WIDTH)),
        (progress * 100.0).round() as u32
    );
    if progress >= 1.0 {
        println!("{}", Colour::Green.bold().paint("Goal reached"));
    }

    println!();
    println!("Today's achievements");
    for badge in &BADGES {
        if badge.unlocked(total, progress) {
            println!(
                "  {} {:<14}{}",
                Colour::Green.paint("[x]"),
                badge.title,
                badge.description
            );
        } else {
            println!("  [ ] {:<14}Locked", badge.title);
        }
    }
    Ok(())
}
