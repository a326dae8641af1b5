//! The four collections kept for the lifetime of the process.

use serde::{Deserialize, Serialize};

use crate::{
    record::{Donor, Event, Expense, ValidationError, Volunteer},
    store::CollectionStore,
};

/// The contents of every collection at one point in time.
///
/// This is the shape handed to the seed loader, backups and restores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Every donation, in the order they were added.
    pub donors: Vec<Donor>,
    /// Every volunteering record, in the order they were added.
    pub volunteers: Vec<Volunteer>,
    /// Every event, in the order they were added.
    pub events: Vec<Event>,
    /// Every expense, in the order they were added.
    pub expenses: Vec<Expense>,
}

/// The donor, volunteer, event and expense collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stores {
    pub donors: CollectionStore<Donor>,
    pub volunteers: CollectionStore<Volunteer>,
    pub events: CollectionStore<Event>,
    pub expenses: CollectionStore<Expense>,
}

impl Stores {
    /// Create the stores from a snapshot, e.g. the seed data.
    ///
    /// # Errors
    /// Returns a [ValidationError] if any record in `snapshot` is invalid.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ValidationError> {
        let mut stores = Self::default();
        stores.reseed(snapshot)?;

        Ok(stores)
    }

    /// Copy the current contents of every collection.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            donors: self.donors.list().to_vec(),
            volunteers: self.volunteers.list().to_vec(),
            events: self.events.list().to_vec(),
            expenses: self.expenses.list().to_vec(),
        }
    }

    /// Replace the contents of every collection with `snapshot`.
    ///
    /// # Errors
    /// Returns a [ValidationError] if any record is invalid, in which case
    /// none of the collections are changed.
    pub fn reseed(&mut self, snapshot: Snapshot) -> Result<(), ValidationError> {
        let mut reseeded = Self::default();
        reseeded.donors.replace_all(snapshot.donors)?;
        reseeded.volunteers.replace_all(snapshot.volunteers)?;
        reseeded.events.replace_all(snapshot.events)?;
        reseeded.expenses.replace_all(snapshot.expenses)?;

        *self = reseeded;

        tracing::info!(
            "reseeded stores with {} donors, {} volunteers, {} events and {} expenses",
            self.donors.len(),
            self.volunteers.len(),
            self.events.len(),
            self.expenses.len()
        );

        Ok(())
    }

    /// Whether every collection is empty.
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
            && self.volunteers.is_empty()
            && self.events.is_empty()
            && self.expenses.is_empty()
    }
}
