//! Slack response texts for the match command.
//!
//! These messages are returned to the author of the slash command when the
//! command is rejected. The rating update itself is rendered as attachments,
//! see [`render_match_update`](crate::rating::render_match_update).

/// Formats the usage message for a command that does not match any shape.
///
/// # Examples
///
/// ```no_run
/// let msg = format_invalid_format();
/// assert!(msg.contains("Usage:"));
/// ```
pub fn format_invalid_format() -> String {
    "Invalid match format. Usage: `/csocso @winner vs @loser` or \
     `/csocso @winner1 @winner2 vs @loser1 @loser2`"
        .to_owned()
}

/// Formats the message for a command whose mentions could not be read.
pub fn format_unparsable_players() -> String {
    "The players could not be parsed. Mention each player with `@name`.".to_owned()
}

/// Formats the message for a failure after the command was understood.
///
/// # Arguments
///
/// * `reason` - Description of the failure
pub fn format_internal_error(reason: &str) -> String {
    format!("The match could not be recorded: {}", reason)
}
