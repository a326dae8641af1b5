//! The four record kinds kept by the dashboard and the trait the stores use
//! to work with them generically.

pub(crate) mod donor;
pub(crate) mod event;
pub(crate) mod expense;
mod field;
pub(crate) mod volunteer;

use serde::{Serialize, de::DeserializeOwned};
use time::Date;

pub use donor::{Donor, DonorType};
pub use event::Event;
pub use expense::Expense;
pub use field::{FieldKind, FieldValue, RecordField, ValidationError, iso_date};
pub use volunteer::Volunteer;

pub(crate) use field::check_amount;

/// A record that can be kept in a [CollectionStore](crate::store::CollectionStore).
///
/// Records are plain values. A store changes a record by overwriting its
/// fields in place, so the same record is never shared between stores.
pub trait Record:
    Clone + std::fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The fields of this record kind.
    type Field: RecordField;

    /// The field holding the natural key.
    const KEY_FIELD: Self::Field;

    /// The natural key, e.g. the donor's name.
    ///
    /// Keys identify records for selection, update and delete but are not
    /// guaranteed to be unique.
    fn key(&self) -> &str;

    /// The date the record happened on, if it has one.
    fn date(&self) -> Option<Date>;

    /// Read a single field.
    fn get(&self, field: Self::Field) -> FieldValue;

    /// Overwrite a single field.
    ///
    /// # Errors
    /// Returns a [ValidationError] and leaves the record unchanged if `value`
    /// cannot be stored in `field`.
    fn set(&mut self, field: Self::Field, value: FieldValue) -> Result<(), ValidationError>;

    /// Build a record from a value for each field.
    ///
    /// # Errors
    /// Returns the first [ValidationError] raised by a field value.
    fn from_values(
        value_of: impl FnMut(Self::Field) -> FieldValue,
    ) -> Result<Self, ValidationError>;

    /// Check the invariants the type system does not enforce, e.g. that
    /// amounts are not negative.
    fn validate(&self) -> Result<(), ValidationError>;
}
