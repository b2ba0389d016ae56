use std::path::PathBuf;

use anyhow::Result;
use delivery::DeliveryModule;
use notify::{default_notifier, Reminder};
use scheduler::ReminderScheduler;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    store::settings::{JsonSettingsStore, SettingsStore},
    utils::{
        clock::{Clock, DefaultClock},
        dir::settings_path,
    },
};

pub mod args;
pub mod delivery;
pub mod notify;
pub mod scheduler;
pub mod shutdown;

/// Represents the starting point for the daemon
pub async fn start_daemon(dir: PathBuf) -> Result<()> {
    std::env::set_current_dir("/")?;

    let (sender, receiver) = mpsc::channel::<Reminder>(4);

    let shutdown_token = CancellationToken::new();

    let scheduler = create_scheduler(
        sender,
        JsonSettingsStore::new(settings_path(&dir)),
        &shutdown_token,
        DefaultClock,
    );

    let delivery = DeliveryModule::new(receiver, default_notifier());

    let (_, scheduler_result, delivery_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token),
        scheduler.run(),
        delivery.run(),
    );

    if let Err(scheduler_result) = scheduler_result {
        error!("Scheduler module got an error {:?}", scheduler_result);
    }

    if let Err(delivery_result) = delivery_result {
        error!("Delivery module got an error {:?}", delivery_result);
    }

    Ok(())
}

fn create_scheduler<S: SettingsStore>(
    sender: mpsc::Sender<Reminder>,
    settings: S,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
) -> ReminderScheduler<S> {
    ReminderScheduler::new(sender, settings, shutdown_token.clone(), Box::new(clock))
}

#[cfg(test)]
mod daemon_tests {
    use std::time::Duration;

    use anyhow::Result;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use crate::{
        daemon::{
            create_scheduler,
            delivery::DeliveryModule,
            notify::{MockNotifier, Reminder},
        },
        store::{entities::Settings, settings::SettingsStore},
        utils::{clock::DefaultClock, logging::TEST_LOGGING},
    };

    /// In-memory snapshot source, keeps the paused-clock tests free of file
    /// I/O so time warping stays deterministic.
    struct FixedSettings(Settings);

    impl SettingsStore for FixedSettings {
        async fn load(&self) -> Result<Settings> {
            Ok(self.0)
        }

        async fn save(&self, _settings: Settings) -> Result<()> {
            Ok(())
        }
    }

    /// Smoke test for the whole scheduler/delivery pipeline with warped time:
    /// three one-hour cycles pass before shutdown, so exactly three reminders
    /// reach the notifier.
    #[tokio::test(start_paused = true)]
    async fn smoke_test_daemon() -> Result<()> {
        *TEST_LOGGING;
        let mut mock_notifier = MockNotifier::new();
        mock_notifier
            .expect_deliver()
            .withf(|reminder: &Reminder| reminder.title == "Time to hydrate")
            .times(3)
            .returning(|_| Ok(()));

        let shutdown_token = CancellationToken::new();

        let (sender, receiver) = mpsc::channel::<Reminder>(4);
        let scheduler = create_scheduler(
            sender,
            FixedSettings(Settings {
                reminder_interval_hours: 1,
                ..Settings::default()
            }),
            &shutdown_token,
            DefaultClock,
        );

        let delivery = DeliveryModule::new(receiver, Box::new(mock_notifier));

        let (_, scheduler_result, delivery_result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(3 * 60 * 60 + 30 * 60)).await;
                shutdown_token.cancel()
            },
            scheduler.run(),
            delivery.run(),
        );

        scheduler_result?;
        delivery_result?;

        Ok(())
    }

    /// Disabled reminders keep the daemon alive but idle.
    #[tokio::test(start_paused = true)]
    async fn test_disabled_reminders_stay_silent() -> Result<()> {
        *TEST_LOGGING;
        let mut mock_notifier = MockNotifier::new();
        mock_notifier.expect_deliver().times(0);

        let shutdown_token = CancellationToken::new();

        let (sender, receiver) = mpsc::channel::<Reminder>(4);
        let scheduler = create_scheduler(
            sender,
            FixedSettings(Settings {
                reminders_enabled: false,
                ..Settings::default()
            }),
            &shutdown_token,
            DefaultClock,
        );

        let delivery = DeliveryModule::new(receiver, Box::new(mock_notifier));

        let (_, scheduler_result, delivery_result) = tokio::join!(
            async {
                tokio::time::sleep(Duration::from_secs(2 * 60 * 60)).await;
                shutdown_token.cancel()
            },
            scheduler.run(),
            delivery.run(),
        );

        scheduler_result?;
        delivery_result?;

        Ok(())
    }
}
