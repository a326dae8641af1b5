//! Delivery of messages to recipient groups.

use crate::{
    Error,
    communication::{Channel, Message, RecipientGroup},
};

/// Sends a message to every member of a recipient group.
pub trait Notifier: std::fmt::Debug + Send + Sync {
    /// Send `message` to `group` over `channel`.
    ///
    /// # Errors
    /// Returns [Error::NotificationFailed] if the message could not be sent.
    fn send(&self, group: RecipientGroup, message: &Message, channel: Channel)
    -> Result<(), Error>;
}

/// A notifier that writes each message to the log instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(
        &self,
        group: RecipientGroup,
        message: &Message,
        channel: Channel,
    ) -> Result<(), Error> {
        tracing::info!("sending {channel} to {group}: {message}");

        Ok(())
    }
}
