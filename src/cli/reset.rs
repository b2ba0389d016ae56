use std::{
    io::{BufRead, Write},
    path::Path,
};

use anyhow::Result;
use chrono::Utc;

use crate::{
    store::intake::{DayFileIntakeStore, IntakeStore},
    utils::{dir::records_dir, time::day_of},
};

/// Command to process `reset-today`: bulk-deletes today's day file after a
/// confirmation. Past history is never touched.
pub async fn process_reset_today_command(app_dir: &Path, yes: bool) -> Result<()> {
    if !yes && !confirm()? {
        println!("Cancelled");
        return Ok(());
    }

    let store = DayFileIntakeStore::new(records_dir(app_dir))?;
    store.clear_day(day_of(Utc::now().timestamp_millis())).await?;
    println!("Cleared today's log");
    Ok(())
}

fn confirm() -> Result<bool> {
    println!("This will delete all water entries you logged today. Your past history will stay safe.");
    print!("Reset today's log? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
