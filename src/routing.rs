//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    communication::{get_communications_page, send_message_endpoint},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    management::{
        ManagedRecord, create_record_endpoint, delete_record_endpoint, get_records_page,
        update_record_endpoint,
    },
    not_found::get_404_not_found,
    record::{Donor, Event, Expense, Volunteer},
    reports::get_reports_page,
    settings::{
        backup_endpoint, export_endpoint, get_settings_page, reseed_endpoint, restore_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::COMMUNICATIONS_VIEW, get(get_communications_page))
        .route(endpoints::COMMUNICATIONS_API, post(send_message_endpoint))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page))
        .route(endpoints::BACKUP, post(backup_endpoint))
        .route(endpoints::RESTORE, post(restore_endpoint))
        .route(endpoints::RESEED, post(reseed_endpoint))
        .route(endpoints::EXPORT, get(export_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let router = management_routes::<Donor>(router);
    let router = management_routes::<Volunteer>(router);
    let router = management_routes::<Event>(router);
    let router = management_routes::<Expense>(router);

    router.fallback(get_404_not_found).with_state(state)
}

/// Add the page and endpoints for managing the records of `R`.
fn management_routes<R: ManagedRecord>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(R::PAGE, get(get_records_page::<R>))
        .route(
            R::API,
            post(create_record_endpoint::<R>).put(update_record_endpoint::<R>),
        )
        .route(R::DELETE_API, post(delete_record_endpoint::<R>))
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}


#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde::Serialize;

    use crate::{AppState, endpoints, routing::build_router, seed::sample_data, store::Snapshot};

    fn get_test_server() -> TestServer {
        let state = AppState::new(sample_data(), "Etc/UTC").unwrap();
        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[derive(Serialize)]
    struct NewEvent<'a> {
        event_name: &'a str,
        date: &'a str,
        attendees: &'a str,
    }

    #[derive(Serialize)]
    struct Update<'a> {
        key: &'a str,
        field: &'a str,
        value: &'a str,
    }

    #[derive(Serialize)]
    struct Delete<'a> {
        key: &'a str,
    }

    #[tokio::test]
    async fn every_page_renders() {
        let server = get_test_server();

        for page in [
            endpoints::DASHBOARD_VIEW,
            endpoints::DONORS_VIEW,
            endpoints::VOLUNTEERS_VIEW,
            endpoints::EVENTS_VIEW,
            endpoints::EXPENSES_VIEW,
            endpoints::REPORTS_VIEW,
            endpoints::COMMUNICATIONS_VIEW,
            endpoints::SETTINGS_VIEW,
        ] {
            let response = server.get(page).await;
            assert_eq!(response.status_code(), StatusCode::OK, "GET {page}");
        }
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/not-a-page").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn unknown_report_category_is_bad_request() {
        let server = get_test_server();

        let response = server
            .get(endpoints::REPORTS_VIEW)
            .add_query_param("category", "Bananas")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn created_event_appears_on_events_page() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EVENTS_API)
            .form(&NewEvent {
                event_name: "Spring Picnic",
                date: "2024-09-01",
                attendees: "75",
            })
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("hx-redirect"), endpoints::EVENTS_VIEW);
        let page = server.get(endpoints::EVENTS_VIEW).await.text();
        assert!(page.contains("Spring Picnic"));
    }

    #[tokio::test]
    async fn update_uses_put_on_collection_endpoint() {
        let server = get_test_server();

        let response = server
            .put(endpoints::DONORS_API)
            .form(&Update {
                key: "John Doe",
                field: "amount_donated",
                value: "42",
            })
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let page = server.get(endpoints::DONORS_VIEW).await.text();
        assert!(page.contains("42.00"));
    }

    #[tokio::test]
    async fn export_then_reseed_round_trip() {
        let server = get_test_server();

        server
            .post(endpoints::DELETE_DONORS)
            .form(&Delete { key: "John Doe" })
            .await
            .assert_status(StatusCode::SEE_OTHER);
        server.post(endpoints::RESEED).await.assert_status_ok();

        let snapshot: Snapshot = server.get(endpoints::EXPORT).await.json();
        assert_eq!(snapshot, sample_data());
    }
}
