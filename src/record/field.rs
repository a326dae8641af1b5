//! Typed field values and the validation rules shared by every record kind.

use std::{fmt::Display, hash::Hash};

use time::{Date, macros::format_description};

use crate::record::DonorType;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// The shape of a field's value, used to parse form input and to choose an
/// input control when rendering forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, e.g. a name or role.
    Text,
    /// A non-negative decimal amount of money.
    Decimal,
    /// A non-negative whole number, e.g. hours or attendees.
    Integer,
    /// A calendar date written as `YYYY-MM-DD`.
    Date,
    /// One of [DonorType].
    DonorType,
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            FieldKind::Text => "text",
            FieldKind::Decimal => "decimal",
            FieldKind::Integer => "whole number",
            FieldKind::Date => "date",
            FieldKind::DonorType => "donor type",
        };

        write!(f, "{kind}")
    }
}

/// The errors that make a record or field value unacceptable to a store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A numeric field was given a value below zero.
    #[error("{field} cannot be negative, got {value}")]
    Negative {
        /// The label of the field.
        field: &'static str,
        /// The rejected value as it was given.
        value: String,
    },

    /// A decimal field was given NaN or infinity.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    /// A whole number field was given a value too large to store.
    #[error("{field} is too large, got {value}")]
    OutOfRange {
        /// The label of the field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// The text could not be parsed as a `YYYY-MM-DD` date.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    MalformedDate(String),

    /// The text could not be parsed as a number.
    #[error("\"{value}\" is not a valid {kind}")]
    MalformedNumber {
        /// The rejected text.
        value: String,
        /// The kind of number that was expected.
        kind: FieldKind,
    },

    /// The text did not name a donor type.
    #[error("\"{0}\" is not a valid donor type, expected Individual or Corporate")]
    UnknownDonorType(String),

    /// A required field was left empty.
    #[error("{0} is required")]
    MissingValue(&'static str),

    /// The value has a different kind than the field stores.
    #[error("{field} expects a {expected} value")]
    TypeMismatch {
        /// The label of the field.
        field: &'static str,
        /// The kind of value the field stores.
        expected: FieldKind,
    },

    /// No field of the record kind has the given name.
    #[error("there is no field called \"{0}\"")]
    UnknownField(String),
}

/// The fields of one record kind.
///
/// Implemented by a plain enum per record kind so that field names are
/// checked at compile time rather than looked up by string.
pub trait RecordField: Copy + Eq + Hash + std::fmt::Debug + Send + Sync + 'static {
    /// Every field in display order.
    fn all() -> &'static [Self];

    /// The human readable column title, e.g. "Amount Donated".
    fn label(self) -> &'static str;

    /// The name used for form inputs, e.g. "amount_donated".
    fn name(self) -> &'static str;

    /// The kind of value stored in the field.
    fn kind(self) -> FieldKind;

    /// Whether the field must have a value.
    fn is_required(self) -> bool;

    /// Look up a field by its form name.
    fn from_name(name: &str) -> Result<Self, ValidationError> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| ValidationError::UnknownField(name.to_owned()))
    }
}

/// A single field value in transit between a form, a store and a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value was given.
    Empty,
    Text(String),
    Decimal(f64),
    Integer(i64),
    Date(Date),
    DonorType(DonorType),
}

impl FieldValue {
    /// Parse the raw text of a form input as a value of `kind`.
    ///
    /// Blank input parses as [FieldValue::Empty] for every kind except
    /// [FieldKind::Text], which keeps the (possibly empty) string.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the text is not a valid value of `kind`.
    pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let malformed_number = || ValidationError::MalformedNumber {
            value: raw.to_owned(),
            kind,
        };

        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_owned())),
            _ if raw.is_empty() => Ok(FieldValue::Empty),
            FieldKind::Decimal => raw
                .parse()
                .map(FieldValue::Decimal)
                .map_err(|_| malformed_number()),
            FieldKind::Integer => raw
                .parse()
                .map(FieldValue::Integer)
                .map_err(|_| malformed_number()),
            FieldKind::Date => parse_date(raw).map(FieldValue::Date),
            FieldKind::DonorType => raw.parse().map(FieldValue::DonorType),
        }
    }

    /// Check that the value could be stored in `field` without storing it.
    pub fn check(&self, field: impl RecordField) -> Result<(), ValidationError> {
        let value = self.clone();

        match (field.kind(), field.is_required()) {
            (FieldKind::Text, _) => value.into_text(field).map(drop),
            (FieldKind::Decimal, _) => value.into_amount(field).map(drop),
            (FieldKind::Integer, _) => value.into_count(field).map(drop),
            (FieldKind::Date, true) => value.into_date(field).map(drop),
            (FieldKind::Date, false) => value.into_optional_date(field).map(drop),
            (FieldKind::DonorType, _) => value.into_donor_type(field).map(drop),
        }
    }

    /// Convert into text. An empty value becomes the empty string.
    pub fn into_text(self, field: impl RecordField) -> Result<String, ValidationError> {
        match self {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Empty => Ok(String::new()),
            _ => Err(mismatch(field)),
        }
    }

    /// Convert into a finite, non-negative amount.
    pub fn into_amount(self, field: impl RecordField) -> Result<f64, ValidationError> {
        match self {
            FieldValue::Decimal(amount) => check_amount(field.label(), amount),
            FieldValue::Integer(amount) => check_amount(field.label(), amount as f64),
            FieldValue::Empty => Err(ValidationError::MissingValue(field.label())),
            _ => Err(mismatch(field)),
        }
    }

    /// Convert into a non-negative whole number.
    pub fn into_count(self, field: impl RecordField) -> Result<u32, ValidationError> {
        match self {
            FieldValue::Integer(count) if count < 0 => Err(ValidationError::Negative {
                field: field.label(),
                value: count.to_string(),
            }),
            FieldValue::Integer(count) => {
                u32::try_from(count).map_err(|_| ValidationError::OutOfRange {
                    field: field.label(),
                    value: count,
                })
            }
            FieldValue::Empty => Err(ValidationError::MissingValue(field.label())),
            _ => Err(mismatch(field)),
        }
    }

    /// Convert into a date that must be present.
    pub fn into_date(self, field: impl RecordField) -> Result<Date, ValidationError> {
        self.into_optional_date(field)?
            .ok_or(ValidationError::MissingValue(field.label()))
    }

    /// Convert into a date that may be absent.
    pub fn into_optional_date(
        self,
        field: impl RecordField,
    ) -> Result<Option<Date>, ValidationError> {
        match self {
            FieldValue::Date(date) => Ok(Some(date)),
            FieldValue::Empty => Ok(None),
            _ => Err(mismatch(field)),
        }
    }

    /// Convert into a donor type that may be absent.
    pub fn into_donor_type(
        self,
        field: impl RecordField,
    ) -> Result<Option<DonorType>, ValidationError> {
        match self {
            FieldValue::DonorType(donor_type) => Ok(Some(donor_type)),
            FieldValue::Empty => Ok(None),
            _ => Err(mismatch(field)),
        }
    }
}

impl From<Option<Date>> for FieldValue {
    fn from(value: Option<Date>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::Date)
    }
}

impl From<Option<DonorType>> for FieldValue {
    fn from(value: Option<DonorType>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::DonorType)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Decimal(amount) => write!(f, "{amount:.2}"),
            FieldValue::Integer(count) => write!(f, "{count}"),
            FieldValue::Date(date) => write!(f, "{date}"),
            FieldValue::DonorType(donor_type) => write!(f, "{donor_type}"),
        }
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<Date, ValidationError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::MalformedDate(raw.to_owned()))
}

/// Check that `amount` may be stored in a decimal field.
pub(crate) fn check_amount(field: &'static str, amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        Err(ValidationError::NotFinite(field))
    } else if amount < 0.0 {
        Err(ValidationError::Negative {
            field,
            value: amount.to_string(),
        })
    } else {
        Ok(amount)
    }
}

fn mismatch(field: impl RecordField) -> ValidationError {
    ValidationError::TypeMismatch {
        field: field.label(),
        expected: field.kind(),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::record::{
        DonorType, donor::DonorField, event::EventField, volunteer::VolunteerField,
    };

    use super::{FieldKind, FieldValue, RecordField, ValidationError};

    #[test]
    fn parses_each_kind() {
        assert_eq!(
            FieldValue::parse(FieldKind::Text, "  Jane  "),
            Ok(FieldValue::Text("Jane".to_owned()))
        );
        assert_eq!(
            FieldValue::parse(FieldKind::Decimal, "12.5"),
            Ok(FieldValue::Decimal(12.5))
        );
        assert_eq!(
            FieldValue::parse(FieldKind::Integer, "8"),
            Ok(FieldValue::Integer(8))
        );
        assert_eq!(
            FieldValue::parse(FieldKind::Date, "2024-01-15"),
            Ok(FieldValue::Date(date!(2024 - 01 - 15)))
        );
        assert_eq!(
            FieldValue::parse(FieldKind::DonorType, "Corporate"),
            Ok(FieldValue::DonorType(DonorType::Corporate))
        );
    }

    #[test]
    fn blank_input_is_empty_except_for_text() {
        assert_eq!(
            FieldValue::parse(FieldKind::Date, "  "),
            Ok(FieldValue::Empty)
        );
        assert_eq!(
            FieldValue::parse(FieldKind::Text, ""),
            Ok(FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn rejects_malformed_date() {
        assert_eq!(
            FieldValue::parse(FieldKind::Date, "15/01/2024"),
            Err(ValidationError::MalformedDate("15/01/2024".to_owned()))
        );
    }

    #[test]
    fn rejects_malformed_number() {
        assert_eq!(
            FieldValue::parse(FieldKind::Integer, "1.5"),
            Err(ValidationError::MalformedNumber {
                value: "1.5".to_owned(),
                kind: FieldKind::Integer,
            })
        );
    }

    #[test]
    fn negative_amount_fails_check() {
        let got = FieldValue::Decimal(-1.0).check(DonorField::AmountDonated);

        assert_eq!(
            got,
            Err(ValidationError::Negative {
                field: "Amount Donated",
                value: "-1".to_owned(),
            })
        );
    }

    #[test]
    fn non_finite_amount_fails_check() {
        let got = FieldValue::Decimal(f64::NAN).check(DonorField::AmountDonated);

        assert_eq!(got, Err(ValidationError::NotFinite("Amount Donated")));
    }

    #[test]
    fn negative_count_fails_check() {
        let got = FieldValue::Integer(-3).check(EventField::Attendees);

        assert!(matches!(got, Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn oversized_count_fails_check() {
        let got = FieldValue::Integer(i64::from(u32::MAX) + 1).check(VolunteerField::Hours);

        assert!(matches!(got, Err(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn optional_date_accepts_empty() {
        assert_eq!(FieldValue::Empty.check(VolunteerField::Date), Ok(()));
        assert_eq!(
            FieldValue::Empty.check(EventField::Date),
            Err(ValidationError::MissingValue("Date"))
        );
    }

    #[test]
    fn wrong_kind_is_a_mismatch() {
        let got = FieldValue::Text("lots".to_owned()).check(DonorField::AmountDonated);

        assert_eq!(
            got,
            Err(ValidationError::TypeMismatch {
                field: "Amount Donated",
                expected: FieldKind::Decimal,
            })
        );
    }

    #[test]
    fn looks_up_fields_by_name() {
        assert_eq!(
            DonorField::from_name("amount_donated"),
            Ok(DonorField::AmountDonated)
        );
        assert_eq!(
            DonorField::from_name("shoe_size"),
            Err(ValidationError::UnknownField("shoe_size".to_owned()))
        );
    }
}
