use std::path::Path;

use anyhow::Result;
use chrono::{Duration, Utc};
use rand::Rng;

use crate::{
    store::{
        entities::IntakeEvent,
        intake::{DayFileIntakeStore, IntakeStore},
    },
    utils::dir::records_dir,
};

/// Command to process `seed`: fills the previous `days` days (today excluded)
/// with one random 40-120 entry each, for demoing the summary views.
pub async fn process_seed_command(app_dir: &Path, days: u32) -> Result<()> {
    let store = DayFileIntakeStore::new(records_dir(app_dir))?;
    let now = Utc::now();

    for day in 1..=days as i64 {
        let amount = rand::thread_rng().gen_range(40..=120);
        let timestamp = now - Duration::days(day);
        store.append(IntakeEvent::new(amount, timestamp)).await?;
    }

    println!("Seeded {days} days of demo history");
    Ok(())
}
