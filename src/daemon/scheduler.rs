use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    store::{entities::Settings, settings::SettingsStore},
    utils::clock::Clock,
};

use super::notify::Reminder;

/// How often the scheduler re-checks the settings snapshot while reminders
/// are disabled. The daemon stays alive but idle in that state.
const DISABLED_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub struct ReminderScheduler<S> {
    next: mpsc::Sender<Reminder>,
    settings: S,
    shutdown: CancellationToken,
    clock: Box<dyn Clock>,
}

impl<S: SettingsStore> ReminderScheduler<S> {
    pub fn new(
        next: mpsc::Sender<Reminder>,
        settings: S,
        shutdown: CancellationToken,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            next,
            settings,
            shutdown,
            clock,
        }
    }

    /// The settings document is re-read lazily each cycle; there is no
    /// subscription machinery, edits simply apply on the next wake-up.
    async fn snapshot(&self) -> Settings {
        match self.settings.load().await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to read settings snapshot, using defaults {e:?}");
                Settings::default()
            }
        }
    }

    /// Executes the scheduler event loop.
    pub async fn run(self) -> Result<()> {
        loop {
            let settings = self.snapshot().await;

            let wait = if settings.reminders_enabled {
                Duration::from_secs(settings.reminder_interval_hours as u64 * 60 * 60)
            } else {
                DISABLED_POLL_INTERVAL
            };
            let wake_point = self.clock.instant() + wait;

            tokio::select! {
                // Cancelation means we stop execution of the event loop. Which
                // means we also drop the sender channel and consequently stop
                // the delivery module.
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                _ = self.clock.sleep_until(wake_point) => ()
            }

            if settings.reminders_enabled {
                let reminder = Reminder::hydration(self.clock.time());
                debug!("Sending reminder {:?}", reminder);
                self.next
                    .send(reminder)
                    .await
                    .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
                info!("Successfully sent reminder")
            }
        }
    }
}
