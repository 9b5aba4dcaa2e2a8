//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which runs a match command
//! through the whole pipeline:
//!
//! ```text
//! text → parse() → load() → update_ratings() → save() → notify() → CommandOutcome
//! ```
//!
//! Ratings are persisted before the notification is sent, so a delivered
//! notification always describes stored ratings. A failed delivery leaves
//! the saved ratings in place.

use log::{debug, error, info, warn};

use crate::{
    commands::{
        CommandOutcome,
        command::{format_command_error, parse},
        slack_response::format_internal_error,
    },
    config::Slack,
    rating::{MatchResult, render_match_update, update_ratings},
    slack::{Notifier, SlackMessage},
    store::RatingStore,
};

/// Command orchestrator for match results.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let commander = Commander::new(store, webhook, config.slack);
/// let outcome = commander.handle(Some("<@U1|alice> vs <@U2|bob>")).await;
/// println!("status {}", outcome.status_code());
/// # }
/// ```
pub struct Commander<S: RatingStore, N: Notifier> {
    /// Ratings persistence
    store: S,
    /// Notification delivery
    notifier: N,
    /// Identity and channel of the outgoing messages
    slack: Slack,
}

impl<S: RatingStore, N: Notifier> Commander<S, N> {
    /// Creates a new [`Commander`].
    ///
    /// # Arguments
    ///
    /// * `store` - Store the ratings are loaded from and saved to
    /// * `notifier` - Channel receiving the rendered rating changes
    /// * `slack` - Slack configuration used to build the messages
    pub fn new(store: S, notifier: N, slack: Slack) -> Self {
        Commander {
            store,
            notifier,
            slack,
        }
    }

    /// Handles the text of a match command.
    ///
    /// Returns [`CommandOutcome::Accepted`] only once the new ratings are
    /// saved and the notification is delivered.
    pub async fn handle(&self, text: Option<&str>) -> CommandOutcome {
        debug!("handling match command {:?}", text);

        let unrated = match parse(text) {
            Ok(result) => result,
            Err(e) => {
                warn!("rejected match command {:?}: {}", text, e);
                return CommandOutcome::RejectedFormat(format_command_error(&e));
            }
        };

        match self.record(unrated).await {
            Ok(()) => CommandOutcome::Accepted,
            Err(reason) => {
                error!("failed to record match: {}", reason);
                CommandOutcome::RejectedInternal(format_internal_error(&reason))
            }
        }
    }

    /// Hydrates, rates, persists and announces a parsed match.
    async fn record(&self, mut result: MatchResult) -> Result<(), String> {
        let ratings = self
            .store
            .load(&result.player_ids())
            .await
            .map_err(|e| e.to_string())?;

        for entry in result.participants_mut() {
            let Some(rating) = ratings.get(&entry.player.id) else {
                return Err(format!("no rating loaded for player {}", entry.player.id));
            };
            entry.old_rating = *rating;
            entry.new_rating = *rating;
        }

        let rated = update_ratings(result.winners, result.losers);

        self.store.save(&rated).await.map_err(|e| e.to_string())?;
        info!("saved new ratings for {:?}", rated.player_ids());

        let message = SlackMessage::new(&self.slack, render_match_update(&rated));
        self.notifier
            .notify(&message)
            .await
            .map_err(|e| e.to_string())?;
        info!("delivered match update to {}", self.slack.channel);

        Ok(())
    }
}
