use std::{
    future::{self, Future},
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use chrono::NaiveDate;
use fs4::tokio::AsyncFileExt;
use futures::{stream, Stream, StreamExt};
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, error, warn};

use crate::utils::time::date_to_record_name;

use super::entities::IntakeEvent;

/// Interface for abstracting storage of intake events.
pub trait IntakeStore {
    /// Appends one event to the day file matching its timestamp, creating the
    /// file as needed.
    fn append(&self, event: IntakeEvent) -> impl Future<Output = Result<()>>;

    /// Retrieves all events recorded for a certain day. A day that was never
    /// written reads as empty.
    fn events_for(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<IntakeEvent>>> + Send;

    /// Deletes a whole day of events. Clearing a day with no file is a no-op.
    fn clear_day(&self, date: NaiveDate) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> IntakeStore for T
where
    T::Target: IntakeStore,
{
    fn append(&self, event: IntakeEvent) -> impl Future<Output = Result<()>> {
        self.deref().append(event)
    }

    fn events_for(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<IntakeEvent>>> + Send {
        self.deref().events_for(date)
    }

    fn clear_day(&self, date: NaiveDate) -> impl Future<Output = Result<()>> {
        self.deref().clear_day(date)
    }
}

/// The main realization of [IntakeStore]: one JSON-lines file per calendar
/// day under the record directory.
pub struct DayFileIntakeStore {
    record_dir: PathBuf,
}

impl DayFileIntakeStore {
    pub fn new(record_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&record_dir)?;

        Ok(Self { record_dir })
    }

    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.record_dir.join(date_to_record_name(date))
    }

    async fn read_day(&self, path: &Path) -> Result<Vec<IntakeEvent>> {
        async fn extract(path: &Path) -> Result<Vec<IntakeEvent>, std::io::Error> {
            debug!("Extracting {path:?}");
            let file = File::open(path).await?;
            file.lock_shared()?;
            let buffer = BufReader::new(file);
            let mut lines = buffer.lines();
            let mut events = vec![];
            while let Ok(Some(line)) = lines.next_line().await {
                match serde_json::from_str::<IntakeEvent>(&line) {
                    Ok(event) => events.push(event),
                    Err(e) => {
                        // ignore illegal values. Might happen after shutdowns
                        warn!(
                            "During parsing in path {:?} found illegal json string {}: {e}",
                            path, &line
                        )
                    }
                }
            }

            lines.into_inner().into_inner().unlock_async().await?;

            Ok(events)
        }

        match extract(path).await {
            Ok(events) => Ok(events),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(vec![]),
            Err(e) => Err(e)?,
        }
    }

    async fn append_with_file(file: &mut File, event: &IntakeEvent) -> Result<()> {
        let mut buffer = serde_json::to_vec(event)?;
        buffer.push(b'\n');
        file.write_all(&buffer).await?;
        file.flush().await?;
        Ok(())
    }
}

impl IntakeStore for DayFileIntakeStore {
    async fn append(&self, event: IntakeEvent) -> Result<()> {
        let path = self.day_path(event.day());
        let mut file = File::options()
            .append(true)
            .create(true)
            .open(&path)
            .await?;

        // Semi-safe acquire-release for a file
        file.lock_exclusive()?;
        let result = Self::append_with_file(&mut file, &event).await;
        file.unlock_async().await?;
        result
    }

    async fn events_for(&self, date: NaiveDate) -> Result<Vec<IntakeEvent>> {
        let path = self.day_path(date);
        self.read_day(&path).await
    }

    async fn clear_day(&self, date: NaiveDate) -> Result<()> {
        match tokio::fs::remove_file(self.day_path(date)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Streams events for every day between `start` and `end` (both inclusive),
/// day file by day file. Every call reads a fresh snapshot of the log, so a
/// consumer re-derives its summaries simply by restarting the stream.
pub fn events_between(
    store: impl IntakeStore,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Stream<Item = Result<IntakeEvent>> {
    let store = Arc::new(store);

    let files = date_range(start, end)
        .map(move |day| {
            let store = store.clone();
            async move { (day, store.events_for(day).await) }
        })
        .buffered(4);

    files.flat_map(|(day, data)| match data {
        Ok(data) => stream::iter(data).map(Ok).boxed_local(),
        Err(e) => {
            error!("Failed to process file {day} {e}");
            stream::once(future::ready(Err(e))).boxed_local()
        }
    })
}

/// Returns a stream of dates between start (inclusive) and end (inclusive).
fn date_range(start: NaiveDate, end: NaiveDate) -> impl Stream<Item = NaiveDate> {
    stream::unfold((start, end), |(mut current, end)| {
        future::ready({
            if current <= end {
                let last_current = current;
                current = current
                    .succ_opt()
                    .expect("day files stop long before the end of the calendar");
                Some((last_current, (current, end)))
            } else {
                None
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use futures::TryStreamExt;
    use tempfile::tempdir;
    use tokio::io::AsyncWriteExt;

    use crate::store::{
        entities::IntakeEvent,
        intake::{events_between, DayFileIntakeStore, IntakeStore},
    };

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    fn event_at(amount: u32, hour: u32) -> IntakeEvent {
        IntakeEvent::new(amount, Utc.with_ymd_and_hms(2024, 4, 5, hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_append_and_read_day() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        let first = event_at(8, 9);
        let second = event_at(12, 14);
        store.append(first.clone()).await?;
        store.append(second.clone()).await?;

        let events = store.events_for(TEST_DATE).await?;
        assert_eq!(events, vec![first, second]);

        // The day file carries the record name of its calendar day.
        assert!(dir.path().join("2024-04-05").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_day_reads_empty() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        let events = store.events_for(TEST_DATE).await?;
        assert!(events.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_line_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        let good = event_at(16, 10);
        store.append(good.clone()).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .open(dir.path().join("2024-04-05"))
            .await?;
        file.write_all(b"{\"id\":\"torn wri").await?;
        file.flush().await?;

        let events = store.events_for(TEST_DATE).await?;
        assert_eq!(events, vec![good]);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_day() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        store.append(event_at(8, 9)).await?;
        assert!(dir.path().join("2024-04-05").exists());

        store.clear_day(TEST_DATE).await?;
        assert!(!dir.path().join("2024-04-05").exists());
        assert!(store.events_for(TEST_DATE).await?.is_empty());

        // Clearing an already empty day succeeds silently.
        store.clear_day(TEST_DATE).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_events_between_spans_days() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        let mut expected = vec![];
        for days_ago in (0..3).rev() {
            let timestamp = Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap()
                - Duration::days(days_ago);
            let event = IntakeEvent::new(10 + days_ago as u32, timestamp);
            store.append(event.clone()).await?;
            expected.push(event);
        }

        let start = TEST_DATE - Duration::days(2);
        let events: Vec<_> = events_between(store, start, TEST_DATE).try_collect().await?;
        assert_eq!(events, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_events_between_skips_unlogged_days() -> Result<()> {
        let dir = tempdir()?;
        let store = DayFileIntakeStore::new(dir.path().to_owned())?;

        let event = event_at(20, 8);
        store.append(event.clone()).await?;

        let start = TEST_DATE - Duration::days(6);
        let events: Vec<_> = events_between(store, start, TEST_DATE).try_collect().await?;
        assert_eq!(events, vec![event]);
        Ok(())
    }
}
