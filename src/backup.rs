//! Saving and restoring copies of every collection.

use std::sync::Mutex;

use time::OffsetDateTime;

use crate::{Error, store::Snapshot};

/// A saved copy of the stores and when it was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Backup {
    pub snapshot: Snapshot,
    pub saved_at: OffsetDateTime,
}

/// Somewhere to keep the latest backup.
pub trait SnapshotStore: std::fmt::Debug + Send + Sync {
    /// Save `snapshot`, replacing any earlier backup.
    ///
    /// # Errors
    /// Returns an error if the backup could not be written.
    fn save(&self, snapshot: Snapshot, saved_at: OffsetDateTime) -> Result<(), Error>;

    /// The latest backup.
    ///
    /// # Errors
    /// Returns [Error::NoBackup] if nothing has been saved yet.
    fn load(&self) -> Result<Backup, Error>;
}

/// Keeps the latest backup in memory, so it is lost when the server stops.
#[derive(Debug, Default)]
pub struct InMemoryBackup {
    latest: Mutex<Option<Backup>>,
}

impl SnapshotStore for InMemoryBackup {
    fn save(&self, snapshot: Snapshot, saved_at: OffsetDateTime) -> Result<(), Error> {
        let mut latest = self.latest.lock().map_err(|error| {
            tracing::error!("could not acquire backup lock: {error}");
            Error::StoreLockError
        })?;

        tracing::info!(
            "saving backup of {} donors, {} volunteers, {} events and {} expenses",
            snapshot.donors.len(),
            snapshot.volunteers.len(),
            snapshot.events.len(),
            snapshot.expenses.len()
        );

        *latest = Some(Backup { snapshot, saved_at });

        Ok(())
    }

    fn load(&self) -> Result<Backup, Error> {
        let latest = self.latest.lock().map_err(|error| {
            tracing::error!("could not acquire backup lock: {error}");
            Error::StoreLockError
        })?;

        latest.clone().ok_or(Error::NoBackup)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{Error, seed::sample_data, store::Snapshot};

    use super::{InMemoryBackup, SnapshotStore};

    #[test]
    fn load_without_backup_fails() {
        let backups = InMemoryBackup::default();

        assert_eq!(backups.load(), Err(Error::NoBackup));
    }

    #[test]
    fn load_returns_latest_save() {
        let backups = InMemoryBackup::default();
        let saved_at = datetime!(2024-05-01 12:00 UTC);

        backups
            .save(Snapshot::default(), datetime!(2024-04-01 12:00 UTC))
            .unwrap();
        backups.save(sample_data(), saved_at).unwrap();

        let backup = backups.load().unwrap();
        assert_eq!(backup.snapshot, sample_data());
        assert_eq!(backup.saved_at, saved_at);
    }
}
