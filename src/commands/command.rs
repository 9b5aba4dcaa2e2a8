//! Match command parsing.
//!
//! This module converts the text of a `/csocso` slash command into a
//! [`MatchResult`] whose rosters are waiting for their ratings.
//!
//! Accepted shapes, where every mention is a Slack token `<@ID|NAME>`:
//!
//! ```text
//! <@U1|alice> vs <@U2|bob>
//! <@U1|alice> <@U2|bob> vs <@U3|chloe> <@U4|dave>
//! ```

use std::{collections::HashSet, sync::OnceLock};

use log::debug;
use regex::Regex;

use crate::{
    commands::slack_response::{format_invalid_format, format_unparsable_players},
    rating::{MatchResult, PlayerRef, RosterEntry},
};

/// Separator between the winning and the losing roster.
const VERSUS_DELIMITER: &str = " vs ";

/// Rating given to every parsed entry until the store hydrates it.
const UNRATED: f64 = 0.0;

static ONE_VS_ONE_REGEX: OnceLock<Regex> = OnceLock::new();
static TWO_VS_TWO_REGEX: OnceLock<Regex> = OnceLock::new();
static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();

// Shapes only look at the token boundaries, the mention content is
// checked token by token afterwards.
fn one_vs_one_regex() -> &'static Regex {
    ONE_VS_ONE_REGEX
        .get_or_init(|| Regex::new(r"^<[^<>\s]*> vs <[^<>\s]*>$").expect("valid 1v1 regex"))
}

fn two_vs_two_regex() -> &'static Regex {
    TWO_VS_TWO_REGEX.get_or_init(|| {
        Regex::new(r"^<[^<>\s]*> <[^<>\s]*> vs <[^<>\s]*> <[^<>\s]*>$").expect("valid 2v2 regex")
    })
}

fn mention_regex() -> &'static Regex {
    MENTION_REGEX.get_or_init(|| Regex::new(r"^<@([^|<>]*)\|([^<>]*)>$").expect("valid mention regex"))
}

/// Errors that can occur while parsing a match command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandParsingError {
    /// The command has no text
    NoText,
    /// The text matches neither the 1v1 nor the 2v2 shape
    InvalidFormat,
    /// A mention token is malformed or has an empty id or name
    UnparsablePlayers,
    /// The same player appears twice in the command
    DuplicatePlayer(String),
}

impl std::fmt::Display for CommandParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandParsingError::NoText => write!(f, "no text"),
            CommandParsingError::InvalidFormat => write!(f, "invalid format"),
            CommandParsingError::UnparsablePlayers => write!(f, "players could not be parsed"),
            CommandParsingError::DuplicatePlayer(id) => write!(f, "player {} appears twice", id),
        }
    }
}

/// Parses the text of a match command.
///
/// # Errors
///
/// - [`CommandParsingError::NoText`] if the text is absent or empty
/// - [`CommandParsingError::InvalidFormat`] if the text is not `A vs B` or `A B vs C D`
/// - [`CommandParsingError::UnparsablePlayers`] if a token is not a valid `<@ID|NAME>` mention
/// - [`CommandParsingError::DuplicatePlayer`] if a player is mentioned twice
///
/// # Examples
///
/// ```no_run
/// let result = parse(Some("<@U1|alice> vs <@U2|bob>")).unwrap();
/// assert_eq!(result.winners[0].player.name, "alice");
/// assert_eq!(result.losers[0].player.name, "bob");
/// ```
pub fn parse(text: Option<&str>) -> Result<MatchResult, CommandParsingError> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(CommandParsingError::NoText),
    };

    if !one_vs_one_regex().is_match(text) && !two_vs_two_regex().is_match(text) {
        return Err(CommandParsingError::InvalidFormat);
    }

    let Some((raw_winners, raw_losers)) = text.split_once(VERSUS_DELIMITER) else {
        return Err(CommandParsingError::InvalidFormat);
    };

    let winners = parse_roster(raw_winners)?;
    let losers = parse_roster(raw_losers)?;

    let mut seen = HashSet::new();
    for entry in winners.iter().chain(losers.iter()) {
        if !seen.insert(entry.player.id.as_str()) {
            return Err(CommandParsingError::DuplicatePlayer(entry.player.id.clone()));
        }
    }

    debug!("parsed winners {:?} and losers {:?}", winners, losers);

    Ok(MatchResult { winners, losers })
}

fn parse_roster(raw_roster: &str) -> Result<Vec<RosterEntry>, CommandParsingError> {
    raw_roster
        .split(' ')
        .map(|token| parse_mention(token).map(|player| RosterEntry::new(player, UNRATED)))
        .collect()
}

fn parse_mention(token: &str) -> Result<PlayerRef, CommandParsingError> {
    let captures = mention_regex()
        .captures(token)
        .ok_or(CommandParsingError::UnparsablePlayers)?;

    let id = &captures[1];
    let name = &captures[2];
    if id.is_empty() || name.is_empty() {
        return Err(CommandParsingError::UnparsablePlayers);
    }

    Ok(PlayerRef {
        id: id.to_string(),
        name: name.to_string(),
    })
}

/// Formats a parsing error into the message shown to the command's author.
pub fn format_command_error(error: &CommandParsingError) -> String {
    match error {
        CommandParsingError::UnparsablePlayers => format_unparsable_players(),
        _ => format_invalid_format(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(roster: &[RosterEntry]) -> Vec<&str> {
        roster.iter().map(|e| e.player.id.as_str()).collect()
    }

    #[test]
    fn test_parse_one_vs_one() {
        let result = parse(Some("<@U1|alice> vs <@U2|bob>")).unwrap();

        assert_eq!(ids(&result.winners), vec!["U1"]);
        assert_eq!(ids(&result.losers), vec!["U2"]);
        assert_eq!(result.winners[0].player.name, "alice");
        assert_eq!(result.losers[0].player.name, "bob");
    }

    #[test]
    fn test_parse_two_vs_two() {
        let result = parse(Some("<@U1|alice> <@U2|bob> vs <@U3|chloe> <@U4|dave>")).unwrap();

        assert_eq!(ids(&result.winners), vec!["U1", "U2"]);
        assert_eq!(ids(&result.losers), vec!["U3", "U4"]);
        assert_eq!(result.losers[1].player.name, "dave");
    }

    #[test]
    fn test_parse_defaults_ratings_to_unrated() {
        let result = parse(Some("<@U1|alice> vs <@U2|bob>")).unwrap();

        for entry in result.participants() {
            assert_eq!(entry.old_rating, 0.0);
            assert_eq!(entry.new_rating, 0.0);
        }
    }

    #[test]
    fn test_parse_keeps_every_mentioned_id() {
        let text = "<@UA1|a> <@UB2|b> vs <@UC3|c> <@UD4|d>";
        let result = parse(Some(text)).unwrap();

        let parsed: HashSet<String> = result.player_ids().into_iter().collect();
        let expected: HashSet<String> =
            ["UA1", "UB2", "UC3", "UD4"].iter().map(|s| s.to_string()).collect();
        assert_eq!(parsed, expected);
        assert_eq!(result.player_ids().len(), 4);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let text = "<@U1|alice> <@U2|bob> vs <@U3|chloe> <@U4|dave>";
        assert_eq!(parse(Some(text)), parse(Some(text)));
    }

    #[test]
    fn test_parse_no_text() {
        assert_eq!(parse(None), Err(CommandParsingError::NoText));
        assert_eq!(parse(Some("")), Err(CommandParsingError::NoText));
    }

    #[test]
    fn test_parse_invalid_format() {
        let texts = [
            "<@U1|alice> versus <@U2|bob>",
            "<@U1|alice> vs. <@U2|bob>",
            "<@U1|alice> <@U2|bob> <@U3|chloe> vs <@U4|dave>",
            "<@U1|alice> <@U2|bob> vs <@U3|chloe>",
            "<@U1|alice> vs <@U2|bob> 9-2",
            "@alice vs @bob",
            "<@U1|alice>",
            " vs ",
        ];

        for text in texts {
            assert_eq!(
                parse(Some(text)),
                Err(CommandParsingError::InvalidFormat),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_parse_unparsable_players() {
        let texts = [
            "<@U1|alice> <@U2|bob> vs <@U3chloe> <@U4|dave>",
            "<U1|alice> vs <@U2|bob>",
            "<@|alice> vs <@U2|bob>",
            "<@U1|> vs <@U2|bob>",
            "<> vs <@U2|bob>",
        ];

        for text in texts {
            assert_eq!(
                parse(Some(text)),
                Err(CommandParsingError::UnparsablePlayers),
                "{} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_parse_duplicate_player() {
        assert_eq!(
            parse(Some("<@U1|alice> vs <@U1|alice>")),
            Err(CommandParsingError::DuplicatePlayer("U1".to_string()))
        );
        assert_eq!(
            parse(Some("<@U1|alice> <@U2|bob> vs <@U3|chloe> <@U2|bob>")),
            Err(CommandParsingError::DuplicatePlayer("U2".to_string()))
        );
    }

    #[test]
    fn test_format_command_error_unparsable_players() {
        let message = format_command_error(&CommandParsingError::UnparsablePlayers);
        assert!(message.contains("could not be parsed"));
    }

    #[test]
    fn test_format_command_error_invalid_format() {
        for error in [
            CommandParsingError::NoText,
            CommandParsingError::InvalidFormat,
            CommandParsingError::DuplicatePlayer("U1".to_string()),
        ] {
            assert!(format_command_error(&error).contains("Usage:"));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CommandParsingError::NoText.to_string(), "no text");
        assert_eq!(CommandParsingError::InvalidFormat.to_string(), "invalid format");
    }
}
