//! Fundraising and community events.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::record::{FieldKind, FieldValue, Record, RecordField, ValidationError, iso_date};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "Event Name")]
    pub event_name: String,
    #[serde(rename = "Date", with = "iso_date")]
    pub date: Date,
    #[serde(rename = "Attendees")]
    pub attendees: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    EventName,
    Date,
    Attendees,
}

impl RecordField for EventField {
    fn all() -> &'static [Self] {
        &[EventField::EventName, EventField::Date, EventField::Attendees]
    }

    fn label(self) -> &'static str {
        match self {
            EventField::EventName => "Event Name",
            EventField::Date => "Date",
            EventField::Attendees => "Attendees",
        }
    }

    fn name(self) -> &'static str {
        match self {
            EventField::EventName => "event_name",
            EventField::Date => "date",
            EventField::Attendees => "attendees",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            EventField::EventName => FieldKind::Text,
            EventField::Date => FieldKind::Date,
            EventField::Attendees => FieldKind::Integer,
        }
    }

    fn is_required(self) -> bool {
        true
    }
}

impl Record for Event {
    type Field = EventField;

    const KEY_FIELD: EventField = EventField::EventName;

    fn key(&self) -> &str {
        &self.event_name
    }

    fn date(&self) -> Option<Date> {
        Some(self.date)
    }

    fn get(&self, field: EventField) -> FieldValue {
        match field {
            EventField::EventName => FieldValue::Text(self.event_name.clone()),
            EventField::Date => FieldValue::Date(self.date),
            EventField::Attendees => FieldValue::Integer(i64::from(self.attendees)),
        }
    }

    fn set(&mut self, field: EventField, value: FieldValue) -> Result<(), ValidationError> {
        match field {
            EventField::EventName => self.event_name = value.into_text(field)?,
            EventField::Date => self.date = value.into_date(field)?,
            EventField::Attendees => self.attendees = value.into_count(field)?,
        }

        Ok(())
    }

    fn from_values(
        mut value_of: impl FnMut(EventField) -> FieldValue,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            event_name: value_of(EventField::EventName).into_text(EventField::EventName)?,
            date: value_of(EventField::Date).into_date(EventField::Date)?,
            attendees: value_of(EventField::Attendees).into_count(EventField::Attendees)?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
