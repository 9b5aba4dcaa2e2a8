//! Payload of a Slack incoming-webhook message.

use serde::Serialize;

use crate::{config::Slack, rating::Attachment};

/// Message posted to Slack after a match was recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlackMessage {
    /// Name the bot posts as
    pub username: String,
    /// Emoji used as the bot avatar, e.g. `:soccer:`
    pub icon_emoji: String,
    /// Target channel
    pub channel: String,
    /// One attachment per participant
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    /// Builds a message carrying `attachments` with the identity set in `config`.
    pub fn new(config: &Slack, attachments: Vec<Attachment>) -> Self {
        SlackMessage {
            username: config.username.clone(),
            icon_emoji: config.icon_emoji.clone(),
            channel: config.channel.clone(),
            attachments,
        }
    }
}
