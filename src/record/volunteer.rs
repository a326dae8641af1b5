//! Volunteers and the hours they contribute.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::record::{FieldKind, FieldValue, Record, RecordField, ValidationError, iso_date};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Hours Volunteered")]
    pub hours_volunteered: u32,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Date", default, with = "iso_date::option")]
    pub date: Option<Date>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolunteerField {
    Name,
    Hours,
    Role,
    Date,
}

impl RecordField for VolunteerField {
    fn all() -> &'static [Self] {
        &[
            VolunteerField::Name,
            VolunteerField::Hours,
            VolunteerField::Role,
            VolunteerField::Date,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            VolunteerField::Name => "Name",
            VolunteerField::Hours => "Hours Volunteered",
            VolunteerField::Role => "Role",
            VolunteerField::Date => "Date",
        }
    }

    fn name(self) -> &'static str {
        match self {
            VolunteerField::Name => "name",
            VolunteerField::Hours => "hours_volunteered",
            VolunteerField::Role => "role",
            VolunteerField::Date => "date",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            VolunteerField::Name | VolunteerField::Role => FieldKind::Text,
            VolunteerField::Hours => FieldKind::Integer,
            VolunteerField::Date => FieldKind::Date,
        }
    }

    fn is_required(self) -> bool {
        self != VolunteerField::Date
    }
}

impl Record for Volunteer {
    type Field = VolunteerField;

    const KEY_FIELD: VolunteerField = VolunteerField::Name;

    fn key(&self) -> &str {
        &self.name
    }

    fn date(&self) -> Option<Date> {
        self.date
    }

    fn get(&self, field: VolunteerField) -> FieldValue {
        match field {
            VolunteerField::Name => FieldValue::Text(self.name.clone()),
            VolunteerField::Hours => FieldValue::Integer(i64::from(self.hours_volunteered)),
            VolunteerField::Role => FieldValue::Text(self.role.clone()),
            VolunteerField::Date => self.date.into(),
        }
    }

    fn set(&mut self, field: VolunteerField, value: FieldValue) -> Result<(), ValidationError> {
        match field {
            VolunteerField::Name => self.name = value.into_text(field)?,
            VolunteerField::Hours => self.hours_volunteered = value.into_count(field)?,
            VolunteerField::Role => self.role = value.into_text(field)?,
            VolunteerField::Date => self.date = value.into_optional_date(field)?,
        }

        Ok(())
    }

    fn from_values(
        mut value_of: impl FnMut(VolunteerField) -> FieldValue,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: value_of(VolunteerField::Name).into_text(VolunteerField::Name)?,
            hours_volunteered: value_of(VolunteerField::Hours).into_count(VolunteerField::Hours)?,
            role: value_of(VolunteerField::Role).into_text(VolunteerField::Role)?,
            date: value_of(VolunteerField::Date).into_optional_date(VolunteerField::Date)?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
