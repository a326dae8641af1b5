//! An ordered, in-memory collection of one record kind.

use std::collections::HashSet;

use crate::record::{FieldValue, Record, ValidationError};

/// One ordered sequence of records of a single kind.
///
/// Insertion order is the display order. Natural keys are not unique, so
/// updates and deletes apply to every record with a matching key.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStore<R> {
    records: Vec<R>,
}

impl<R> Default for CollectionStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> CollectionStore<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records` in the given order.
    ///
    /// # Errors
    /// Returns the [ValidationError] of the first invalid record.
    pub fn from_records(records: Vec<R>) -> Result<Self, ValidationError> {
        let mut store = Self::new();
        store.replace_all(records)?;

        Ok(store)
    }

    /// The records in display order.
    pub fn list(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append `record` to the end of the store and return it.
    ///
    /// Records with a key that is already in the store are accepted.
    ///
    /// # Errors
    /// Returns a [ValidationError] and leaves the store unchanged if the
    /// record breaks an invariant, e.g. a negative amount.
    pub fn create(&mut self, record: R) -> Result<&R, ValidationError> {
        record.validate()?;

        tracing::debug!("appending record with key {:?}", record.key());
        self.records.push(record);

        Ok(&self.records[self.records.len() - 1])
    }

    /// Every record whose natural key equals `key`, in display order.
    pub fn find_by_key(&self, key: &str) -> Vec<&R> {
        self.records
            .iter()
            .filter(|record| record.key() == key)
            .collect()
    }

    /// Set `field` to `value` on every record whose natural key equals `key`.
    ///
    /// Returns the number of records updated, which is zero if no record has
    /// the key.
    ///
    /// # Errors
    /// Returns a [ValidationError] if `value` cannot be stored in `field`.
    /// The value is checked before any record is touched, so on error no
    /// record is changed, even if no record has the key.
    pub fn update_field(
        &mut self,
        key: &str,
        field: R::Field,
        value: FieldValue,
    ) -> Result<usize, ValidationError> {
        value.check(field)?;

        let mut updated = Vec::new();

        for (index, record) in self.records.iter().enumerate() {
            if record.key() == key {
                let mut record = record.clone();
                record.set(field, value.clone())?;
                updated.push((index, record));
            }
        }

        let count = updated.len();

        for (index, record) in updated {
            self.records[index] = record;
        }

        tracing::debug!("updated {field:?} on {count} record(s) with key {key:?}");

        Ok(count)
    }

    /// Remove every record whose natural key equals `key`.
    ///
    /// Returns the number of records removed. Deleting a key that is not in
    /// the store is not an error.
    pub fn delete_by_key(&mut self, key: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.key() != key);
        let count = before - self.records.len();

        tracing::debug!("deleted {count} record(s) with key {key:?}");

        count
    }

    /// The distinct natural keys in the order they first appear.
    pub fn selectable_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.records
            .iter()
            .map(Record::key)
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Replace every record in the store with `records`.
    ///
    /// # Errors
    /// Returns the [ValidationError] of the first invalid record and leaves
    /// the store unchanged.
    pub fn replace_all(&mut self, records: Vec<R>) -> Result<(), ValidationError> {
        records.iter().try_for_each(Record::validate)?;
        self.records = records;

        Ok(())
    }
}
