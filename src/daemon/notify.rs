use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

/// A reminder ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
    pub at: DateTime<Utc>,
}

impl Reminder {
    pub fn hydration(at: DateTime<Utc>) -> Self {
        Self {
            title: "Time to hydrate".into(),
            body: "Take a quick sip of water and stay on track!".into(),
            at,
        }
    }
}

/// Delivery seam for reminders. The daemon never depends on a concrete
/// notification transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, reminder: &Reminder) -> Result<()>;
}

/// Shells out to `notify-send`, the common desktop notification entry point.
#[cfg(unix)]
pub struct CommandNotifier;

#[cfg(unix)]
#[async_trait]
impl Notifier for CommandNotifier {
    async fn deliver(&self, reminder: &Reminder) -> Result<()> {
        let output = tokio::process::Command::new("notify-send")
            .arg(&reminder.title)
            .arg(&reminder.body)
            .output()
            .await?;
        if !output.status.success() {
            anyhow::bail!(
                "notify-send exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }
}

/// Fallback transport that writes the reminder to stdout and the log.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, reminder: &Reminder) -> Result<()> {
        println!("{}: {}", reminder.title, reminder.body);
        info!("Printed reminder scheduled at {}", reminder.at);
        Ok(())
    }
}

/// Serves as a cross-compatible [Notifier] selection.
pub fn default_notifier() -> Box<dyn Notifier> {
    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            Box::new(CommandNotifier)
        } else {
            Box::new(ConsoleNotifier)
        }
    }
}
