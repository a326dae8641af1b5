//! Defines the endpoint for deleting every record with a key.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    alert::Alert,
    app_state::lock,
    management::{ManagedRecord, ManagementState},
};

/// The form data for deleting records.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    /// The natural key of the records to delete, e.g. a donor's name.
    pub key: String,
}

/// A route handler for deleting every record matching a key, redirects to
/// the management page on success.
///
/// Responds with an informational alert if no record has the key.
pub async fn delete_record_endpoint<R: ManagedRecord>(
    State(state): State<ManagementState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let count = match lock(&state.stores) {
        Ok(mut stores) => R::collection_mut(&mut stores).delete_by_key(&form.key),
        Err(error) => return error.into_alert_response(),
    };

    if count == 0 {
        return Alert::Info {
            message: "Nothing to delete".to_owned(),
            details: format!("There is no {} called \"{}\".", R::SINGULAR, form.key),
        }
        .into_response();
    }

    tracing::info!("deleted {count} {} record(s) named {:?}", R::SINGULAR, form.key);

    (HxRedirect(R::PAGE.to_owned()), StatusCode::SEE_OTHER).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{Form, extract::State, http::StatusCode};

    use crate::{
        app_state::lock,
        endpoints,
        management::get_test_state,
        record::Expense,
        test_utils::{assert_hx_redirect, parse_html_fragment},
    };

    use super::{DeleteForm, delete_record_endpoint};

    fn form(key: &str) -> Form<DeleteForm> {
        Form(DeleteForm {
            key: key.to_owned(),
        })
    }

    #[tokio::test]
    async fn can_delete_record() {
        let state = get_test_state();

        let response =
            delete_record_endpoint::<Expense>(State(state.clone()), form("Office Supplies")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::EXPENSES_VIEW);
        let stores = lock(&state.stores).unwrap();
        assert!(stores.expenses.find_by_key("Office Supplies").is_empty());
        assert_eq!(stores.expenses.len(), 1);
    }

    #[tokio::test]
    async fn unknown_key_is_info_alert() {
        let state = get_test_state();

        let response =
            delete_record_endpoint::<Expense>(State(state.clone()), form("Rent")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Nothing to delete"), "got {text:?}");
        assert_eq!(lock(&state.stores).unwrap().expenses.len(), 2);
    }
}
