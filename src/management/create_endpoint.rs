//! Defines the endpoint for creating a record.

use std::collections::HashMap;

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::lock,
    management::{ManagedRecord, ManagementState},
    record::{FieldValue, Record, RecordField},
};

/// A route handler for creating a record from a form with one input per
/// field, redirects to the management page on success.
pub async fn create_record_endpoint<R: ManagedRecord>(
    State(state): State<ManagementState>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    match create_record::<R>(&state, &form) {
        Ok(()) => (HxRedirect(R::PAGE.to_owned()), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn create_record<R: ManagedRecord>(
    state: &ManagementState,
    form: &HashMap<String, String>,
) -> Result<(), Error> {
    let record = parse_record::<R>(form)?;
    let mut stores = lock(&state.stores)?;

    R::collection_mut(&mut stores)
        .create(record)
        .inspect_err(|error| tracing::debug!("rejected new {}: {error}", R::SINGULAR))?;

    Ok(())
}

/// Build a record from raw form input, treating missing inputs as blank.
fn parse_record<R: Record>(form: &HashMap<String, String>) -> Result<R, Error> {
    let mut values = HashMap::new();

    for &field in R::Field::all() {
        let raw = form.get(field.name()).map(String::as_str).unwrap_or_default();
        values.insert(field, FieldValue::parse(field.kind(), raw)?);
    }

    let record = R::from_values(|field| values.remove(&field).unwrap_or(FieldValue::Empty))?;

    Ok(record)
}
