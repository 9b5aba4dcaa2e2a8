//! Slack notification delivery.
//!
//! # Modules
//!
//! - `message` - Payload posted to Slack
//! - `webhook` - Incoming-webhook client implementing [`Notifier`]

use mockall::automock;

mod message;
mod webhook;

pub use crate::slack::message::SlackMessage;
pub use crate::slack::webhook::SlackWebhook;

/// Errors raised while delivering a notification.
#[derive(Debug)]
pub enum DeliveryError {
    /// The request could not be sent or its response could not be read
    Request(reqwest::Error),
    /// Slack answered with a non-success status
    Rejected(u16, String),
}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::Request(e) => write!(f, "notification could not be sent: {}", e),
            DeliveryError::Rejected(status, body) => {
                write!(f, "notification rejected with status {}: {}", status, body)
            }
        }
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        DeliveryError::Request(e)
    }
}

/// Delivers rendered match updates.
#[automock]
pub trait Notifier {
    /// Sends `message` to the configured channel.
    async fn notify(&self, message: &SlackMessage) -> Result<(), DeliveryError>;
}
