//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    record::ValidationError, reports::ReportCategory,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A record or field value broke a record invariant, e.g. a negative
    /// amount or a malformed date.
    #[error(transparent)]
    InvalidRecord(#[from] ValidationError),

    /// Could not acquire the lock on the stores.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// Tried to restore before any backup was saved.
    #[error("there is no backup to restore")]
    NoBackup,

    /// An empty or whitespace only message was given to send.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// The report category in the query string is not one of [ReportCategory].
    #[error("\"{0}\" is not a report category")]
    UnknownCategory(String),

    /// The seed CSV files had issues that prevented them from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The notifier could not send a message.
    #[error("could not send message: {0}")]
    NotificationFailed(String),

    /// A request or response body could not be read.
    #[error("could not read body: {0}")]
    BodyReadError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::UnknownCategory(category) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Bad Request",
                    "400",
                    &format!("There is no report for \"{category}\"."),
                    &format!("Choose one of {}.", ReportCategory::names()),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidRecord(error) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid value".to_owned(),
                    details: capitalize(&error.to_string()),
                },
            ),
            Error::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Message cannot be empty".to_owned(),
                    details: "Write a message before sending.".to_owned(),
                },
            ),
            Error::UnknownCategory(category) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Unknown report category".to_owned(),
                    details: format!(
                        "There is no report for \"{category}\". Choose one of {}.",
                        ReportCategory::names()
                    ),
                },
            ),
            Error::NoBackup => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not restore data".to_owned(),
                    details: "No backup has been saved yet. Back up your data first.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::NotificationFailed(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not send message".to_owned(),
                    details: reason,
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
