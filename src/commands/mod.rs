//! Match command parsing and execution.
//!
//! This module turns the text of a `/csocso` slash command into persisted
//! ratings and a Slack notification.
//!
//! # Architecture
//!
//! ```text
//! Slash command text
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Commander  │  ← Entry point: handle()
//! └─────────────┘
//!      │
//!      ├── command::parse() ──────────► MatchResult (unrated)
//!      ├── RatingStore::load() ───────► MatchResult (hydrated)
//!      ├── rating::update_ratings() ──► MatchResult (rated)
//!      ├── RatingStore::save()
//!      └── Notifier::notify() ────────► Slack attachments
//!                                     │
//!                                     ▼
//!                          ┌────────────────────┐
//!                          │  CommandOutcome    │
//!                          └────────────────────┘
//! ```
//!
//! # Command Structure
//!
//! | Shape | Example |
//! |-------|---------|
//! | 1v1 | `<@U1\|alice> vs <@U2\|bob>` |
//! | 2v2 | `<@U1\|alice> <@U2\|bob> vs <@U3\|chloe> <@U4\|dave>` |
//!
//! Winners always come first.
//!
//! # Error Handling
//!
//! Every failure is turned into a [`CommandOutcome`] once, in
//! [`Commander::handle`]:
//!
//! - Malformed text → [`CommandOutcome::RejectedFormat`], nothing is loaded,
//!   saved or sent
//! - Storage or delivery failure → [`CommandOutcome::RejectedInternal`]

use serde::Deserialize;

pub mod command;
mod commander;
pub mod slack_response;

pub use crate::commands::commander::Commander;

/// Result of handling one match command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Ratings were persisted and the notification delivered
    Accepted,
    /// The command text was not understood, with a message for its author
    RejectedFormat(String),
    /// The command was understood but could not be completed
    RejectedInternal(String),
}

impl CommandOutcome {
    /// HTTP status returned to the slash-command caller.
    ///
    /// Internal failures are reported as `400` like format failures.
    pub fn status_code(&self) -> u16 {
        match self {
            CommandOutcome::Accepted => 200,
            CommandOutcome::RejectedFormat(_) | CommandOutcome::RejectedInternal(_) => 400,
        }
    }

    /// Whether the command was fully processed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, CommandOutcome::Accepted)
    }
}

/// Slack slash-command payload.
///
/// Only `text` drives the command, `command`, `user_name` and
/// `channel_name` are logged. Other Slack fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct SlashCommand {
    /// Channel the command was typed in
    pub channel_name: Option<String>,
    /// Author of the command
    pub user_name: Option<String>,
    /// The command itself, e.g. `/csocso`
    pub command: Option<String>,
    /// Everything after the command, e.g. `<@U1|alice> vs <@U2|bob>`
    pub text: Option<String>,
}
