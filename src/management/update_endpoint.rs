//! Defines the endpoint for updating one field of every record with a key.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    Error,
    alert::Alert,
    app_state::lock,
    management::{ManagedRecord, ManagementState},
    record::{FieldValue, RecordField},
};

/// The form data for updating a field.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    /// The natural key of the records to update, e.g. a donor's name.
    pub key: String,
    /// The form name of the field to update, e.g. "amount_donated".
    pub field: String,
    /// The new value as typed by the user.
    pub value: String,
}

/// A route handler for updating a field on every record matching a key,
/// redirects to the management page on success.
///
/// Responds with an informational alert if no record has the key.
pub async fn update_record_endpoint<R: ManagedRecord>(
    State(state): State<ManagementState>,
    Form(form): Form<UpdateForm>,
) -> Response {
    match update_record::<R>(&state, &form) {
        Ok(0) => Alert::Info {
            message: "Nothing to update".to_owned(),
            details: format!("There is no {} called \"{}\".", R::SINGULAR, form.key),
        }
        .into_response(),
        Ok(_) => (HxRedirect(R::PAGE.to_owned()), StatusCode::SEE_OTHER).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn update_record<R: ManagedRecord>(
    state: &ManagementState,
    form: &UpdateForm,
) -> Result<usize, Error> {
    let field = R::Field::from_name(&form.field)?;
    let value = FieldValue::parse(field.kind(), &form.value)?;
    let mut stores = lock(&state.stores)?;

    let count = R::collection_mut(&mut stores).update_field(&form.key, field, value)?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use axum::{Form, extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        app_state::lock,
        endpoints,
        management::get_test_state,
        record::{Donor, Volunteer},
        test_utils::{assert_hx_redirect, parse_html_fragment},
    };

    use super::{UpdateForm, update_record_endpoint};

    fn form(key: &str, field: &str, value: &str) -> Form<UpdateForm> {
        Form(UpdateForm {
            key: key.to_owned(),
            field: field.to_owned(),
            value: value.to_owned(),
        })
    }

    #[test]
    fn form_keeps_value_as_typed() {
        let form: UpdateForm =
            serde_html_form::from_str("key=Jane+Smith&field=date&value=2024-03-01").unwrap();

        assert_eq!(form.key, "Jane Smith");
        assert_eq!(form.field, "date");
        assert_eq!(form.value, "2024-03-01");
    }

    #[tokio::test]
    async fn can_update_field() {
        let state = get_test_state();

        let response = update_record_endpoint::<Donor>(
            State(state.clone()),
            form("John Doe", "amount_donated", "750"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DONORS_VIEW);
        let stores = lock(&state.stores).unwrap();
        let donors = stores.donors.find_by_key("John Doe");
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].amount_donated, 750.0);
    }

    #[tokio::test]
    async fn can_clear_optional_date() {
        let state = get_test_state();

        let response = update_record_endpoint::<Volunteer>(
            State(state.clone()),
            form("Bob Brown", "date", ""),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let stores = lock(&state.stores).unwrap();
        assert_eq!(stores.volunteers.find_by_key("Bob Brown")[0].date, None);
    }

    #[tokio::test]
    async fn can_update_date() {
        let state = get_test_state();

        update_record_endpoint::<Donor>(
            State(state.clone()),
            form("Jane Smith", "date", "2024-03-01"),
        )
        .await;

        let stores = lock(&state.stores).unwrap();
        assert_eq!(
            stores.donors.find_by_key("Jane Smith")[0].date,
            date!(2024 - 03 - 01)
        );
    }

    #[tokio::test]
    async fn unknown_key_is_info_alert() {
        let state = get_test_state();
        let before = lock(&state.stores).unwrap().clone();

        let response = update_record_endpoint::<Donor>(
            State(state.clone()),
            form("nonexistent-name", "amount_donated", "100"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing to update"), "got {text:?}");
        assert_eq!(*lock(&state.stores).unwrap(), before);
    }

    #[tokio::test]
    async fn invalid_value_is_bad_request() {
        let state = get_test_state();

        let response = update_record_endpoint::<Donor>(
            State(state),
            form("John Doe", "amount_donated", "-1"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_field_is_bad_request() {
        let state = get_test_state();

        let response =
            update_record_endpoint::<Donor>(State(state), form("John Doe", "shoe_size", "9")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
