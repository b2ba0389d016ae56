use std::path::Path;

use ansi_term::Colour;
use anyhow::Result;
use chrono::Duration;
use clap::CommandFactory;

use crate::{
    stats,
    utils::time::{date_to_record_name, day_of},
};

use super::{render::amount_bar, summary::load_window, Args};

const HISTORY_BAR_WIDTH: usize = 20;

/// Command to process `history`: one line per trailing day with the logged
/// amount, a proportional bar and a goal-met mark.
pub async fn process_history_command(app_dir: &Path, days: u32) -> Result<()> {
    if days == 0 {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                "History needs at least one day",
            )
            .into());
    }

    let (events, settings, now_ms) = load_window(app_dir, days as usize).await?;
    let daily = stats::daily_intake(&events, days, now_ms);

    let goal = settings.daily_goal as u64;
    let best = daily.values().copied().max().unwrap_or(0);
    // Scale bars against the larger of the goal and the best day, so a goal
    // day always draws a visibly full bar.
    let scale = best.max(goal).max(1);

    let today = day_of(now_ms);
    let start = today - Duration::days(days as i64 - 1);

    for offset in 0..days as i64 {
        let date = start + Duration::days(offset);
        let amount = daily.get(&date).copied().unwrap_or(0);
        let met = settings.daily_goal > 0 && amount >= goal;
        let mark = if met {
            Colour::Green.paint("met").to_string()
        } else {
            String::new()
        };
        println!(
            "  {}  {amount:>6} {}  {:<width$}  {mark}",
            date_to_record_name(date),
            settings.units,
            amount_bar(amount, scale, HISTORY_BAR_WIDTH),
            width = HISTORY_BAR_WIDTH,
        );
    }
    Ok(())
}
