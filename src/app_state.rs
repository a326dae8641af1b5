//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error,
    backup::{InMemoryBackup, SnapshotStore},
    communication::{CommunicationLog, LogNotifier, Notifier},
    store::{Snapshot, Stores},
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,

    /// The records the stores started with, used to reseed them.
    pub seed: Arc<Snapshot>,

    /// Where backups are saved to and restored from.
    pub backups: Arc<dyn SnapshotStore>,

    /// Sends messages from the communication hub.
    pub notifier: Arc<dyn Notifier>,

    /// The messages sent since the server started.
    pub communication_log: Arc<Mutex<CommunicationLog>>,
}

impl AppState {
    /// Create a new [AppState] with the stores filled from `seed`.
    ///
    /// Backups are kept in memory and messages are only logged.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a valid timezone or if a
    /// record in `seed` is invalid.
    pub fn new(seed: Snapshot, local_timezone: &str) -> Result<Self, Error> {
        Self::with_collaborators(
            seed,
            local_timezone,
            Arc::new(InMemoryBackup::default()),
            Arc::new(LogNotifier),
        )
    }

    /// Create a new [AppState] with a custom backup store and notifier.
    ///
    /// # Errors
    /// Returns an error if `local_timezone` is not a valid timezone or if a
    /// record in `seed` is invalid.
    pub fn with_collaborators(
        seed: Snapshot,
        local_timezone: &str,
        backups: Arc<dyn SnapshotStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        let stores = Stores::from_snapshot(seed.clone())?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            stores: Arc::new(Mutex::new(stores)),
            seed: Arc::new(seed),
            backups,
            notifier,
            communication_log: Arc::new(Mutex::new(CommunicationLog::default())),
        })
    }
}

/// Lock `mutex`, logging and converting lock poisoning into [Error::StoreLockError].
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, Error> {
    mutex.lock().map_err(|error| {
        tracing::error!("could not acquire store lock: {error}");
        Error::StoreLockError
    })
}

#[cfg(test)]
mod tests {
    use crate::{Error, seed::sample_data, store::Snapshot};

    use super::{AppState, lock};

    #[test]
    fn new_fills_stores_from_seed() {
        let state = AppState::new(sample_data(), "Etc/UTC").unwrap();

        let stores = lock(&state.stores).unwrap();
        assert_eq!(stores.snapshot(), sample_data());
        assert_eq!(*state.seed, sample_data());
    }

    #[test]
    fn new_rejects_invalid_timezone() {
        let result = AppState::new(Snapshot::default(), "Not/A_Zone");

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }
}
