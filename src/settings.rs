//! The settings page with backup, restore, reseed and export of every collection.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{OffsetDateTime, macros::format_description};

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock,
    backup::SnapshotStore,
    endpoints,
    html::{BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, link, section},
    navigation::NavBar,
    store::{Snapshot, Stores},
};

/// The file name suggested to the browser when exporting data.
const EXPORT_FILE_NAME: &str = "father_first_backup.json";

/// The state needed for the settings page and its endpoints.
#[derive(Debug, Clone)]
pub struct SettingsState {
    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,
    /// The records the stores started with.
    pub seed: Arc<Snapshot>,
    /// Where backups are saved to and restored from.
    pub backups: Arc<dyn SnapshotStore>,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            stores: state.stores.clone(),
            seed: state.seed.clone(),
            backups: state.backups.clone(),
        }
    }
}

/// Display the settings page.
pub async fn get_settings_page() -> Response {
    settings_view().into_response()
}

fn settings_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl mb-6"
            {
                h1 class="text-3xl font-bold" { "Settings" }
            }

            (section(
                "Backup and Restore",
                "Backups are kept until the server stops. Restoring replaces every \
                donor, volunteer, event and expense with the latest backup.",
                &html! {
                    div class="flex flex-col gap-4 sm:flex-row"
                    {
                        (action_button(endpoints::BACKUP, "Backup Data", BUTTON_PRIMARY_STYLE, None))
                        (action_button(
                            endpoints::RESTORE,
                            "Restore Data",
                            BUTTON_PRIMARY_STYLE,
                            Some("Replace all data with the latest backup?"),
                        ))
                    }
                },
            ))

            (section(
                "Sample Data",
                "Put back the data the server started with.",
                &action_button(
                    endpoints::RESEED,
                    "Reset to Start-up Data",
                    BUTTON_DELETE_STYLE,
                    Some("Replace all data with the start-up data?"),
                ),
            ))

            (section(
                "Export",
                "",
                &html! {
                    p
                    {
                        "Download every collection as "
                        (link(endpoints::EXPORT, "JSON"))
                        "."
                    }
                },
            ))
        }
    };

    base("Settings", &[], &content)
}

fn action_button(endpoint: &str, text: &str, style: &str, confirm: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoint)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-confirm=[confirm]
            class="flex-1"
        {
            button type="submit" class=(style) { (text) }
        }
    }
}

/// A route handler that saves a backup of every collection.
pub async fn backup_endpoint(State(state): State<SettingsState>) -> Response {
    let saved_at = OffsetDateTime::now_utc();
    let result = lock(&state.stores)
        .map(|stores| stores.snapshot())
        .and_then(|snapshot| state.backups.save(snapshot, saved_at))
        .inspect_err(|error| tracing::error!("could not save backup: {error}"));

    match result {
        Ok(()) => Alert::Success {
            message: "Data backed up successfully!".to_owned(),
            details: format!("Backup saved at {} UTC.", format_timestamp(saved_at)),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler that replaces every collection with the latest backup.
pub async fn restore_endpoint(State(state): State<SettingsState>) -> Response {
    let result = state.backups.load().and_then(|backup| {
        lock(&state.stores)?.reseed(backup.snapshot)?;
        Ok(backup.saved_at)
    });

    match result {
        Ok(saved_at) => Alert::Success {
            message: "Data restored successfully!".to_owned(),
            details: format!("Restored the backup saved at {} UTC.", format_timestamp(saved_at)),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler that replaces every collection with the start-up data.
pub async fn reseed_endpoint(State(state): State<SettingsState>) -> Response {
    let result = lock(&state.stores)
        .and_then(|mut stores| stores.reseed(state.seed.as_ref().clone()).map_err(Error::from));

    match result {
        Ok(()) => Alert::SuccessSimple {
            message: "Data reset to the start-up data.".to_owned(),
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

/// A route handler that downloads every collection as a JSON file.
pub async fn export_endpoint(State(state): State<SettingsState>) -> Result<Response, Error> {
    let snapshot = lock(&state.stores)?.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).map_err(|error| {
        tracing::error!("could not serialize snapshot: {error}");
        Error::JSONSerializationError(error.to_string())
    })?;

    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_str(&disposition)
                    .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
            ),
        ],
        json,
    )
        .into_response())
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_else(|_| timestamp.to_string())
}
