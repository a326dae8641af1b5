//! The records the stores hold when the server starts.
//!
//! Records either come from the built-in sample data or from a directory of
//! CSV files, one per collection, with the column titles as headers.

use std::{fs, io::ErrorKind, path::Path};

use time::macros::date;

use crate::{
    Error,
    record::{Donor, DonorType, Event, Expense, Record, Volunteer},
    store::Snapshot,
};

/// The file name for each collection in a seed directory.
pub const DONORS_FILE: &str = "donors.csv";
pub const VOLUNTEERS_FILE: &str = "volunteers.csv";
pub const EVENTS_FILE: &str = "events.csv";
pub const EXPENSES_FILE: &str = "expenses.csv";

/// A small set of demo records covering every collection.
pub fn sample_data() -> Snapshot {
    Snapshot {
        donors: vec![
            Donor {
                name: "John Doe".to_owned(),
                amount_donated: 500.0,
                date: date!(2024 - 01 - 15),
                donor_type: Some(DonorType::Individual),
            },
            Donor {
                name: "Jane Smith".to_owned(),
                amount_donated: 300.0,
                date: date!(2024 - 02 - 20),
                donor_type: Some(DonorType::Corporate),
            },
        ],
        volunteers: vec![
            Volunteer {
                name: "Alice Johnson".to_owned(),
                hours_volunteered: 10,
                role: "Coordinator".to_owned(),
                date: Some(date!(2024 - 01 - 20)),
            },
            Volunteer {
                name: "Bob Brown".to_owned(),
                hours_volunteered: 8,
                role: "Volunteer".to_owned(),
                date: Some(date!(2024 - 02 - 10)),
            },
        ],
        events: vec![
            Event {
                event_name: "Gala".to_owned(),
                date: date!(2024 - 03 - 10),
                attendees: 150,
            },
            Event {
                event_name: "Fundraiser".to_owned(),
                date: date!(2024 - 04 - 05),
                attendees: 200,
            },
        ],
        expenses: vec![
            Expense {
                expense_name: "Office Supplies".to_owned(),
                amount: 200.0,
                date: date!(2024 - 01 - 20),
            },
            Expense {
                expense_name: "Event Catering".to_owned(),
                amount: 500.0,
                date: date!(2024 - 03 - 15),
            },
        ],
    }
}

/// Load every collection from the CSV files in `dir`.
///
/// A missing file loads as an empty collection.
///
/// # Errors
/// Returns [Error::InvalidCSV] if a file cannot be read or has a row that
/// is not a valid record.
pub fn load_csv_dir(dir: &Path) -> Result<Snapshot, Error> {
    tracing::info!("loading seed data from {}", dir.display());

    Ok(Snapshot {
        donors: read_csv_file(&dir.join(DONORS_FILE))?,
        volunteers: read_csv_file(&dir.join(VOLUNTEERS_FILE))?,
        events: read_csv_file(&dir.join(EVENTS_FILE))?,
        expenses: read_csv_file(&dir.join(EXPENSES_FILE))?,
    })
}

fn read_csv_file<R: Record>(path: &Path) -> Result<Vec<R>, Error> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::info!("{} not found, starting with no records", path.display());
            return Ok(Vec::new());
        }
        Err(error) => {
            return Err(Error::InvalidCSV(format!(
                "could not read {}: {error}",
                path.display()
            )));
        }
    };

    parse_csv(&text)
        .map_err(|error| Error::InvalidCSV(format!("{}: {error}", path.display())))
        .inspect(|records| tracing::debug!("read {} records from {}", records.len(), path.display()))
}

/// Parse CSV text with a header row into records.
///
/// Headers are the column titles, e.g. "Amount Donated", and may come in any
/// order. Optional columns may be left out or left blank.
///
/// # Errors
/// Returns an error message naming the first row that could not be parsed
/// or that breaks a record invariant.
pub fn parse_csv<R: Record>(text: &str) -> Result<Vec<R>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<R>().enumerate() {
        // Row 1 is the header.
        let row_number = index + 2;
        let record = row.map_err(|error| format!("row {row_number}: {error}"))?;
        record
            .validate()
            .map_err(|error| format!("row {row_number}: {error}"))?;

        records.push(record);
    }

    Ok(records)
}
