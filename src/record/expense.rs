//! Money spent by the organisation.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::record::{
    FieldKind, FieldValue, Record, RecordField, ValidationError, check_amount, iso_date,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Expense Name")]
    pub expense_name: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Date", with = "iso_date")]
    pub date: Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseField {
    ExpenseName,
    Amount,
    Date,
}

impl RecordField for ExpenseField {
    fn all() -> &'static [Self] {
        &[ExpenseField::ExpenseName, ExpenseField::Amount, ExpenseField::Date]
    }

    fn label(self) -> &'static str {
        match self {
            ExpenseField::ExpenseName => "Expense Name",
            ExpenseField::Amount => "Amount",
            ExpenseField::Date => "Date",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ExpenseField::ExpenseName => "expense_name",
            ExpenseField::Amount => "amount",
            ExpenseField::Date => "date",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            ExpenseField::ExpenseName => FieldKind::Text,
            ExpenseField::Amount => FieldKind::Decimal,
            ExpenseField::Date => FieldKind::Date,
        }
    }

    fn is_required(self) -> bool {
        true
    }
}

impl Record for Expense {
    type Field = ExpenseField;

    const KEY_FIELD: ExpenseField = ExpenseField::ExpenseName;

    fn key(&self) -> &str {
        &self.expense_name
    }

    fn date(&self) -> Option<Date> {
        Some(self.date)
    }

    fn get(&self, field: ExpenseField) -> FieldValue {
        match field {
            ExpenseField::ExpenseName => FieldValue::Text(self.expense_name.clone()),
            ExpenseField::Amount => FieldValue::Decimal(self.amount),
            ExpenseField::Date => FieldValue::Date(self.date),
        }
    }

    fn set(&mut self, field: ExpenseField, value: FieldValue) -> Result<(), ValidationError> {
        match field {
            ExpenseField::ExpenseName => self.expense_name = value.into_text(field)?,
            ExpenseField::Amount => self.amount = value.into_amount(field)?,
            ExpenseField::Date => self.date = value.into_date(field)?,
        }

        Ok(())
    }

    fn from_values(
        mut value_of: impl FnMut(ExpenseField) -> FieldValue,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            expense_name: value_of(ExpenseField::ExpenseName).into_text(ExpenseField::ExpenseName)?,
            amount: value_of(ExpenseField::Amount).into_amount(ExpenseField::Amount)?,
            date: value_of(ExpenseField::Date).into_date(ExpenseField::Date)?,
        })
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_amount(ExpenseField::Amount.label(), self.amount).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::record::{Record, ValidationError};

    use super::Expense;

    #[test]
    fn validate_rejects_negative_amount() {
        let expense = Expense {
            expense_name: "Refund".to_owned(),
            amount: -20.0,
            date: date!(2024 - 03 - 15),
        };

        assert_eq!(
            expense.validate(),
            Err(ValidationError::Negative {
                field: "Amount",
                value: "-20".to_owned(),
            })
        );
    }
}
