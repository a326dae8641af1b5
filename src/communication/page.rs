//! The communication hub page and the endpoint for sending messages.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset, macros::format_description};

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock,
    communication::{Channel, CommunicationLog, Message, Notifier, RecipientGroup, SentMessage},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_count, section,
    },
    navigation::NavBar,
    store::Stores,
    timezone::get_local_offset,
};

const HISTORY_ID: &str = "communication-history";

/// The state needed for the communication hub.
#[derive(Debug, Clone)]
pub struct CommunicationsState {
    /// The donor, volunteer, event and expense collections.
    pub stores: Arc<Mutex<Stores>>,
    /// Sends the messages.
    pub notifier: Arc<dyn Notifier>,
    /// The messages sent since the server started.
    pub communication_log: Arc<Mutex<CommunicationLog>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CommunicationsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            stores: state.stores.clone(),
            notifier: state.notifier.clone(),
            communication_log: state.communication_log.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageForm {
    pub recipient_group: RecipientGroup,
    pub message: String,
    pub channel: Channel,
}

/// Display the form for sending messages and the history of sent messages.
pub async fn get_communications_page(
    State(state): State<CommunicationsState>,
) -> Result<Response, Error> {
    let offset = local_offset(&state.local_timezone)?;
    let log = lock(&state.communication_log)?;

    Ok(communications_view(&log, offset).into_response())
}

/// A route handler for sending a message to a recipient group.
///
/// Responds with an alert describing the result and an updated history table.
pub async fn send_message_endpoint(
    State(state): State<CommunicationsState>,
    Form(form): Form<SendMessageForm>,
) -> Response {
    match send_message(&state, form) {
        Ok((alert, history)) => html! {
            (alert.into_html())
            (history)
        }
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn send_message(
    state: &CommunicationsState,
    form: SendMessageForm,
) -> Result<(Alert, Markup), Error> {
    let message = Message::new(&form.message)?;
    let offset = local_offset(&state.local_timezone)?;
    let recipient_count = form.recipient_group.recipients(&*lock(&state.stores)?).len();

    state
        .notifier
        .send(form.recipient_group, &message, form.channel)
        .inspect_err(|error| tracing::error!("could not send message: {error}"))?;

    let mut log = lock(&state.communication_log)?;
    log.record(SentMessage {
        group: form.recipient_group,
        channel: form.channel,
        message,
        recipient_count,
        sent_at: OffsetDateTime::now_utc(),
    });

    let alert = Alert::Success {
        message: format!(
            "Message sent to {} via {}!",
            form.recipient_group, form.channel
        ),
        details: format!("{} recipient(s) in the group.", format_count(recipient_count as f64)),
    };

    Ok((alert, history_table(&log, offset, true)))
}

fn local_offset(local_timezone: &str) -> Result<UtcOffset, Error> {
    get_local_offset(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })
}

fn communications_view(log: &CommunicationLog, offset: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::COMMUNICATIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl mb-6"
            {
                h1 class="text-3xl font-bold" { "Communication Hub" }
                p class="text-gray-600 dark:text-gray-400"
                {
                    "Send updates to donors and volunteers."
                }
            }

            (section("Send a Message", "", &send_message_form()))
            (section(
                "Communication History",
                "Messages sent since the server started, newest first.",
                &history_table(log, offset, false),
            ))
        }
    };

    base("Communications", &[], &content)
}

fn send_message_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::COMMUNICATIONS_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="recipient_group" class=(FORM_LABEL_STYLE) { "Select Recipient" }

                select name="recipient_group" id="recipient_group" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for group in RecipientGroup::ALL {
                        option value=(group) { (group) }
                    }
                }
            }

            div
            {
                label for="message" class=(FORM_LABEL_STYLE) { "Message" }

                textarea
                    name="message"
                    id="message"
                    rows="4"
                    required
                    placeholder="Write your message"
                    class=(FORM_TEXT_INPUT_STYLE)
                {}
            }

            div
            {
                label for="channel" class=(FORM_LABEL_STYLE) { "Select Communication Type" }

                select name="channel" id="channel" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for channel in Channel::ALL {
                        option value=(channel) { (channel) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Send Message" }
        }
    }
}

/// The table of sent messages.
///
/// Set `swap_out_of_band` when the table is returned next to an alert so that
/// HTMX replaces the table already on the page.
fn history_table(log: &CommunicationLog, offset: UtcOffset, swap_out_of_band: bool) -> Markup {
    let time_format = format_description!("[year]-[month]-[day] [hour]:[minute]");

    html! {
        div
            id=(HISTORY_ID)
            hx-swap-oob=[swap_out_of_band.then_some("true")]
            class="relative overflow-x-auto"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sent" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Recipients" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Channel" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Message" }
                    }
                }

                tbody
                {
                    @for sent in log.history() {
                        tr class=(TABLE_ROW_STYLE) data-message-row="true"
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                (sent.sent_at.to_offset(offset).format(time_format).unwrap_or_default())
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                (sent.group) " (" (format_count(sent.recipient_count as f64)) ")"
                            }
                            td class=(TABLE_CELL_STYLE) { (sent.channel) }
                            td class=(TABLE_CELL_STYLE) title=(sent.message) { (sent.preview()) }
                        }
                    }

                    @if log.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No messages sent yet."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use scraper::Selector;

    use crate::{
        Error,
        app_state::lock,
        communication::{Channel, CommunicationLog, LogNotifier, Message, Notifier, RecipientGroup},
        endpoints,
        seed::sample_data,
        store::Stores,
        test_utils::{
            assert_form_submit_button_with_text, assert_hx_endpoint, assert_status_ok,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{
        CommunicationsState, SendMessageForm, get_communications_page, send_message_endpoint,
    };

    #[derive(Debug)]
    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn send(&self, _: RecipientGroup, _: &Message, _: Channel) -> Result<(), Error> {
            Err(Error::NotificationFailed("gateway unavailable".to_owned()))
        }
    }

    fn get_test_state(notifier: Arc<dyn Notifier>) -> CommunicationsState {
        CommunicationsState {
            stores: Arc::new(Mutex::new(Stores::from_snapshot(sample_data()).unwrap())),
            notifier,
            communication_log: Arc::new(Mutex::new(CommunicationLog::default())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn form(group: RecipientGroup, message: &str, channel: Channel) -> Form<SendMessageForm> {
        Form(SendMessageForm {
            recipient_group: group,
            message: message.to_owned(),
            channel,
        })
    }

    #[test]
    fn form_accepts_group_and_channel_names() {
        let form: SendMessageForm =
            serde_html_form::from_str("recipient_group=All&message=Hi+there&channel=SMS").unwrap();

        assert_eq!(form.recipient_group, RecipientGroup::All);
        assert_eq!(form.channel, Channel::Sms);
        assert_eq!(form.message, "Hi there");
    }

    #[tokio::test]
    async fn page_has_send_form() {
        let state = get_test_state(Arc::new(LogNotifier));

        let response = get_communications_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::COMMUNICATIONS_API, "hx-post");
        assert_form_submit_button_with_text(&form, "Send Message");
        assert!(
            html.root_element()
                .text()
                .collect::<String>()
                .contains("No messages sent yet.")
        );
    }

    #[tokio::test]
    async fn sending_message_reports_success_and_logs_it() {
        let state = get_test_state(Arc::new(LogNotifier));

        let response = send_message_endpoint(
            State(state.clone()),
            form(RecipientGroup::Donors, "Thank you!", Channel::Email),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Message sent to Donors via Email!"), "got {text:?}");

        let log = lock(&state.communication_log).unwrap();
        assert_eq!(log.len(), 1);
        let sent = log.history().next().unwrap();
        assert_eq!(sent.recipient_count, 2);
        assert_eq!(sent.message.as_ref(), "Thank you!");
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let state = get_test_state(Arc::new(LogNotifier));
        send_message_endpoint(
            State(state.clone()),
            form(RecipientGroup::All, "First", Channel::Sms),
        )
        .await;
        send_message_endpoint(
            State(state.clone()),
            form(RecipientGroup::Volunteers, "Second", Channel::Email),
        )
        .await;

        let response = get_communications_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let rows: Vec<String> = html
            .select(&Selector::parse("tr[data-message-row]").unwrap())
            .map(|row| row.text().collect())
            .collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Second"), "got {rows:?}");
        assert!(rows[1].contains("All (4)"), "got {rows:?}");
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let state = get_test_state(Arc::new(LogNotifier));

        let response = send_message_endpoint(
            State(state.clone()),
            form(RecipientGroup::All, "   ", Channel::Email),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(lock(&state.communication_log).unwrap().is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_is_reported_and_not_logged() {
        let state = get_test_state(Arc::new(FailingNotifier));

        let response = send_message_endpoint(
            State(state.clone()),
            form(RecipientGroup::All, "Hello", Channel::Email),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(lock(&state.communication_log).unwrap().is_empty());
    }
}
