use std::{future::Future, io::ErrorKind, ops::Deref, path::PathBuf};

use anyhow::Result;
use tracing::warn;

use super::entities::Settings;

/// Interface over the singleton settings record.
pub trait SettingsStore {
    /// Current settings snapshot. An absent document reads as the defaults
    /// without creating anything.
    fn load(&self) -> impl Future<Output = Result<Settings>> + Send;

    /// Replaces the stored record wholesale.
    fn save(&self, settings: Settings) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Deref> SettingsStore for T
where
    T::Target: SettingsStore,
{
    fn load(&self) -> impl Future<Output = Result<Settings>> + Send {
        self.deref().load()
    }

    fn save(&self, settings: Settings) -> impl Future<Output = Result<()>> + Send {
        self.deref().save(settings)
    }
}

/// The main realization of [SettingsStore], a single JSON document.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonSettingsStore {
    async fn load(&self) -> Result<Settings> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Settings>(&content) {
            Ok(settings) => Ok(settings.clamped()),
            Err(e) => {
                // A corrupt document must not fail the caller.
                warn!(
                    "Settings document {:?} can't be parsed, falling back to defaults: {e}",
                    self.path
                );
                Ok(Settings::default())
            }
        }
    }

    async fn save(&self, settings: Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&settings.clamped())?;
        tokio::fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::store::{
        entities::{Settings, Units},
        settings::{JsonSettingsStore, SettingsStore},
    };

    #[tokio::test]
    async fn test_defaults_on_first_access() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));

        assert_eq!(store.load().await?, Settings::default());
        // First access creates nothing until the first save.
        assert!(!dir.path().join("settings.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_and_reload() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));

        let settings = Settings {
            daily_goal: 64,
            units: Units::Ml,
            reminders_enabled: false,
            reminder_interval_hours: 4,
        };
        store.save(settings).await?;

        assert_eq!(store.load().await?, settings);
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_range_interval_is_clamped_on_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"daily_goal":64,"units":"oz","reminders_enabled":true,"reminder_interval_hours":24}"#,
        )?;

        let store = JsonSettingsStore::new(path);
        assert_eq!(store.load().await?.reminder_interval_hours, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json")?;

        let store = JsonSettingsStore::new(path);
        assert_eq!(store.load().await?, Settings::default());
        Ok(())
    }
}
