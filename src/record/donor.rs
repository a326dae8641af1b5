//! Donors and their donations.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::record::{
    FieldKind, FieldValue, Record, RecordField, ValidationError, check_amount, iso_date,
};

/// Whether a donation came from a person or an organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DonorType {
    Individual,
    Corporate,
}

impl DonorType {
    /// Every donor type in display order.
    pub const ALL: [DonorType; 2] = [DonorType::Individual, DonorType::Corporate];
}

impl Display for DonorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonorType::Individual => write!(f, "Individual"),
            DonorType::Corporate => write!(f, "Corporate"),
        }
    }
}

impl FromStr for DonorType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Individual" => Ok(DonorType::Individual),
            "Corporate" => Ok(DonorType::Corporate),
            other => Err(ValidationError::UnknownDonorType(other.to_owned())),
        }
    }
}

/// A donation from a named donor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount Donated")]
    pub amount_donated: f64,
    #[serde(rename = "Date", with = "iso_date")]
    pub date: Date,
    #[serde(rename = "Donor Type", default)]
    pub donor_type: Option<DonorType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DonorField {
    Name,
    AmountDonated,
    Date,
    DonorType,
}

impl RecordField for DonorField {
    fn all() -> &'static [Self] {
        &[
            DonorField::Name,
            DonorField::AmountDonated,
            DonorField::Date,
            DonorField::DonorType,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            DonorField::Name => "Name",
            DonorField::AmountDonated => "Amount Donated",
            DonorField::Date => "Date",
            DonorField::DonorType => "Donor Type",
        }
    }

    fn name(self) -> &'static str {
        match self {
            DonorField::Name => "name",
            DonorField::AmountDonated => "amount_donated",
            DonorField::Date => "date",
            DonorField::DonorType => "donor_type",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            DonorField::Name => FieldKind::Text,
            DonorField::AmountDonated => FieldKind::Decimal,
            DonorField::Date => FieldKind::Date,
            DonorField::DonorType => FieldKind::DonorType,
        }
    }

    fn is_required(self) -> bool {
        self != DonorField::DonorType
    }
}

impl Record for Donor {
    type Field = DonorField;

    const KEY_FIELD: DonorField = DonorField::Name;

    fn key(&self) -> &str {
        &self.name
    }

    fn date(&self) -> Option<Date> {
        Some(self.date)
    }

    fn get(&self, field: DonorField) -> FieldValue {
        match field {
            DonorField::Name => FieldValue::Text(self.name.clone()),
            DonorField::AmountDonated => FieldValue::Decimal(self.amount_donated),
            DonorField::Date => FieldValue::Date(self.date),
            DonorField::DonorType => self.donor_type.into(),
        }
    }

    fn set(&mut self, field: DonorField, value: FieldValue) -> Result<(), ValidationError> {
        match field {
            DonorField::Name => self.name = value.into_text(field)?,
            DonorField::AmountDonated => self.amount_donated = value.into_amount(field)?,
            DonorField::Date => self.date = value.into_date(field)?,
            DonorField::DonorType => self.donor_type = value.into_donor_type(field)?,
        }

        Ok(())
    }

    fn from_values(
        mut value_of: impl FnMut(DonorField) -> FieldValue,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: value_of(DonorField::Name).into_text(DonorField::Name)?,
            amount_donated: value_of(DonorField::AmountDonated)
                .into_amount(DonorField::AmountDonated)?,
            date: value_of(DonorField::Date).into_date(DonorField::Date)?,
            donor_type: value_of(DonorField::DonorType).into_donor_type(DonorField::DonorType)?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_amount(DonorField::AmountDonated.label(), self.amount_donated).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::record::{FieldValue, Record, ValidationError};

    use super::{Donor, DonorField, DonorType};

    fn john_doe() -> Donor {
        Donor {
            name: "John Doe".to_owned(),
            amount_donated: 500.0,
            date: date!(2024 - 01 - 15),
            donor_type: None,
        }
    }

    #[test]
    fn set_overwrites_field() {
        let mut donor = john_doe();

        donor
            .set(DonorField::DonorType, FieldValue::DonorType(DonorType::Corporate))
            .unwrap();

        assert_eq!(donor.donor_type, Some(DonorType::Corporate));
    }

    #[test]
    fn set_rejects_negative_amount_and_keeps_old_value() {
        let mut donor = john_doe();

        let result = donor.set(DonorField::AmountDonated, FieldValue::Decimal(-5.0));

        assert!(matches!(result, Err(ValidationError::Negative { .. })));
        assert_eq!(donor, john_doe());
    }

    #[test]
    fn builds_from_values() {
        let donor = Donor::from_values(|field| match field {
            DonorField::Name => FieldValue::Text("John Doe".to_owned()),
            DonorField::AmountDonated => FieldValue::Decimal(500.0),
            DonorField::Date => FieldValue::Date(date!(2024 - 01 - 15)),
            DonorField::DonorType => FieldValue::Empty,
        });

        assert_eq!(donor, Ok(john_doe()));
    }

    #[test]
    fn build_requires_date() {
        let donor = Donor::from_values(|field| match field {
            DonorField::Name => FieldValue::Text("John Doe".to_owned()),
            DonorField::AmountDonated => FieldValue::Decimal(500.0),
            _ => FieldValue::Empty,
        });

        assert_eq!(donor, Err(ValidationError::MissingValue("Date")));
    }

    #[test]
    fn parses_donor_type() {
        assert_eq!("Individual".parse(), Ok(DonorType::Individual));
        assert_eq!(
            "Alien".parse::<DonorType>(),
            Err(ValidationError::UnknownDonorType("Alien".to_owned()))
        );
    }

    #[test]
    fn serializes_with_column_titles() {
        let json = serde_json::to_value(john_doe()).unwrap();

        assert_eq!(json["Name"], "John Doe");
        assert_eq!(json["Amount Donated"], 500.0);
        assert_eq!(json["Date"], "2024-01-15");
        assert!(json["Donor Type"].is_null());
    }
}
