use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info};

use super::notify::{Notifier, Reminder};

/// Consumes scheduled reminders and hands each one to the configured
/// [Notifier]. A failed delivery is logged and never brings the daemon down.
pub struct DeliveryModule {
    receiver: Receiver<Reminder>,
    notifier: Box<dyn Notifier>,
}

impl DeliveryModule {
    pub fn new(receiver: Receiver<Reminder>, notifier: Box<dyn Notifier>) -> Self {
        Self { receiver, notifier }
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(reminder) = self.receiver.recv().await {
            debug!("Delivering reminder {:?}", reminder);
            match self.notifier.deliver(&reminder).await {
                Ok(_) => {
                    info!("Delivered reminder {:?}", reminder)
                }
                Err(e) => {
                    error!("Error delivering reminder {:?}: {e:?}", reminder)
                }
            }
        }

        self.receiver.close();
        Ok(())
    }
}
