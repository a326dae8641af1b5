//! Messages sent to donors and volunteers and the history of what was sent.

mod notifier;
mod page;

use std::{collections::HashSet, fmt::Display};

use serde::Deserialize;
use time::OffsetDateTime;
use unicode_segmentation::UnicodeSegmentation;

use crate::{Error, store::Stores};

pub use notifier::{LogNotifier, Notifier};
pub use page::{get_communications_page, send_message_endpoint};

/// The max number of graphemes shown of a message in the history table before
/// truncating and displaying ellipses.
const MAX_PREVIEW_GRAPHEMES: usize = 80;

/// Who a message is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RecipientGroup {
    Donors,
    Volunteers,
    All,
}

impl RecipientGroup {
    pub const ALL: [RecipientGroup; 3] = [
        RecipientGroup::Donors,
        RecipientGroup::Volunteers,
        RecipientGroup::All,
    ];

    /// The distinct names in the group, donors before volunteers.
    pub fn recipients<'a>(&self, stores: &'a Stores) -> Vec<&'a str> {
        let mut names = match self {
            RecipientGroup::Donors => stores.donors.selectable_keys(),
            RecipientGroup::Volunteers => stores.volunteers.selectable_keys(),
            RecipientGroup::All => {
                let mut names = stores.donors.selectable_keys();
                names.extend(stores.volunteers.selectable_keys());
                names
            }
        };

        let mut seen = HashSet::new();
        names.retain(|name| seen.insert(*name));
        names
    }
}

impl Display for RecipientGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipientGroup::Donors => write!(f, "Donors"),
            RecipientGroup::Volunteers => write!(f, "Volunteers"),
            RecipientGroup::All => write!(f, "All"),
        }
    }
}

/// How a message is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Channel {
    Email,
    #[serde(rename = "SMS")]
    Sms,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Email, Channel::Sms];
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "Email"),
            Channel::Sms => write!(f, "SMS"),
        }
    }
}

/// The text of a message, guaranteed not to be blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Create a message.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyMessage] if `text` is empty
    /// or only whitespace.
    pub fn new(text: &str) -> Result<Self, Error> {
        let text = text.trim();

        if text.is_empty() {
            Err(Error::EmptyMessage)
        } else {
            Ok(Self(text.to_owned()))
        }
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message that was handed to the notifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub group: RecipientGroup,
    pub channel: Channel,
    pub message: Message,
    /// How many people the group resolved to when the message was sent.
    pub recipient_count: usize,
    pub sent_at: OffsetDateTime,
}

impl SentMessage {
    /// The message shortened to fit in a table cell.
    pub fn preview(&self) -> String {
        let text = self.message.as_ref();

        if text.graphemes(true).count() <= MAX_PREVIEW_GRAPHEMES {
            text.to_owned()
        } else {
            let truncated: String = text.graphemes(true).take(MAX_PREVIEW_GRAPHEMES - 3).collect();
            truncated + "..."
        }
    }
}

/// Every message sent since the server started.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationLog {
    sent: Vec<SentMessage>,
}

impl CommunicationLog {
    pub fn record(&mut self, message: SentMessage) {
        self.sent.push(message);
    }

    /// The sent messages, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &SentMessage> {
        self.sent.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}
