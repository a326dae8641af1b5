//! Alert system for displaying success, info and error messages to users.
//!
//! Alerts are returned as HTML fragments from form endpoints and are swapped
//! into the `#alert-container` element by HTMX.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message with its styling.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    /// Something the user should know that is not an error, e.g. that
    /// nothing matched their selection.
    Info { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Info { message, details } => (INFO_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html! {
            div
                role="alert"
                class=(container_style)
            {
                div class="flex items-center justify-between gap-4"
                {
                    span class="font-medium" { (message) }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="text-lg leading-none opacity-70 hover:opacity-100"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm rounded-lg shadow text-green-800 \
    bg-green-50 dark:bg-gray-800 dark:text-green-400";
const INFO_STYLE: &str = "p-4 mb-4 text-sm rounded-lg shadow text-blue-800 \
    bg-blue-50 dark:bg-gray-800 dark:text-blue-400";
const ERROR_STYLE: &str = "p-4 mb-4 text-sm rounded-lg shadow text-red-800 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400";

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::test_utils::{assert_valid_html, parse_html_fragment};

    use super::Alert;

    #[tokio::test]
    async fn renders_message_and_details() {
        let response = Alert::Info {
            message: "Nothing changed".to_owned(),
            details: "No donor is called \"Nobody\".".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        let text = alert.text().collect::<String>();
        assert!(text.contains("Nothing changed"));
        assert!(text.contains("No donor is called \"Nobody\"."));
    }

    #[tokio::test]
    async fn simple_alert_has_no_details() {
        let response = Alert::SuccessSimple {
            message: "Saved".to_owned(),
        }
        .into_response();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("p").unwrap()).next().is_none(),
            "want no details paragraph"
        );
    }
}
