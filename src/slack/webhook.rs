//! HTTP client for Slack incoming webhooks.
//!
//! This module provides the [`SlackWebhook`] struct posting [`SlackMessage`]s
//! to a webhook URL.

use log::{debug, info};
use reqwest::Client;

use crate::slack::{DeliveryError, Notifier, SlackMessage};

/// Posts messages to a Slack incoming webhook.
///
/// # Examples
///
/// ```no_run
/// let webhook = SlackWebhook::new("https://hooks.slack.com/services/T/B/X");
/// webhook.notify(&message).await.unwrap();
/// ```
pub struct SlackWebhook {
    /// Incoming-webhook URL, it embeds the workspace secret
    url: String,
    /// HTTP client
    client: Client,
}

impl SlackWebhook {
    /// Create a new [SlackWebhook].
    ///
    /// # Arguments
    ///
    /// * `url` - The incoming-webhook URL.
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::new();
        SlackWebhook {
            url: url.to_string(),
            client,
        }
    }
}

impl Notifier for SlackWebhook {
    /// POST the message as JSON. Slack answers `200 ok` on success.
    async fn notify(&self, message: &SlackMessage) -> Result<(), DeliveryError> {
        info!("post match update to {}", &message.channel);
        debug!("webhook payload {:?}", message);

        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("response from webhook -> {} {}", status, body);

        if !status.is_success() {
            return Err(DeliveryError::Rejected(status.as_u16(), body));
        }

        Ok(())
    }
}
