//! Render model of a rating update.
//!
//! Every participant of a match becomes one Slack [`Attachment`], colored by
//! the direction its rating moved.

use serde::{Serialize, Serializer};

use crate::{
    rating::structs::{MatchResult, RosterEntry},
    utils::{format_rating, format_rating_change, rating_precision},
};

/// Color of an attachment, derived from the direction of a rating change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachmentColor {
    /// The rating went up
    Green,
    /// The rating did not move
    Yellow,
    /// The rating went down
    Red,
}

impl AttachmentColor {
    /// Classifies a rating change.
    pub fn classify(old_rating: f64, new_rating: f64) -> Self {
        if new_rating > old_rating {
            AttachmentColor::Green
        } else if new_rating == old_rating {
            AttachmentColor::Yellow
        } else {
            AttachmentColor::Red
        }
    }

    /// Hex code understood by Slack attachments.
    pub fn hex(&self) -> &'static str {
        match self {
            AttachmentColor::Green => "#36a64f",
            AttachmentColor::Yellow => "#ffef60",
            AttachmentColor::Red => "#ff6060",
        }
    }
}

impl Serialize for AttachmentColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

/// A render-ready unit of the outgoing notification, one per participant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attachment {
    /// Direction of the rating change
    pub color: AttachmentColor,
    /// `"<name>: <old> → <new> (<signed delta>)"`
    pub text: String,
    /// Match summary, only set on the first attachment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
}

fn roster_names(roster: &[RosterEntry]) -> String {
    roster
        .iter()
        .map(|e| e.player.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Old rating, new rating and change share one precision, so a rating that
/// moved never renders as unchanged.
fn render_entry_text(entry: &RosterEntry) -> String {
    let precision = rating_precision(entry.old_rating, entry.new_rating);
    format!(
        "{}: {} → {} ({})",
        entry.player.name,
        format_rating(entry.old_rating, precision),
        format_rating(entry.new_rating, precision),
        format_rating_change(entry.delta(), precision)
    )
}

/// Builds one attachment per participant, winners first.
pub fn render_match_update(result: &MatchResult) -> Vec<Attachment> {
    let pretext = format!(
        "Rating changes after {} vs {} match:",
        roster_names(&result.winners),
        roster_names(&result.losers)
    );

    result
        .participants()
        .enumerate()
        .map(|(index, entry)| Attachment {
            color: AttachmentColor::classify(entry.old_rating, entry.new_rating),
            text: render_entry_text(entry),
            pretext: (index == 0).then(|| pretext.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::structs::PlayerRef;

    fn entry(name: &str, old_rating: f64, new_rating: f64) -> RosterEntry {
        RosterEntry {
            player: PlayerRef {
                id: format!("U_{}", name),
                name: name.to_string(),
            },
            old_rating,
            new_rating,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(AttachmentColor::classify(1000.0, 1016.0), AttachmentColor::Green);
        assert_eq!(AttachmentColor::classify(1000.0, 1000.0), AttachmentColor::Yellow);
        assert_eq!(AttachmentColor::classify(1000.0, 984.0), AttachmentColor::Red);
        assert_eq!(AttachmentColor::classify(-5.0, -4.5), AttachmentColor::Green);
    }

    #[test]
    fn test_render_one_vs_one() {
        let result = MatchResult {
            winners: vec![entry("alice", 1000.0, 1016.0)],
            losers: vec![entry("bob", 1000.0, 984.0)],
        };

        let attachments = render_match_update(&result);

        assert_eq!(
            attachments,
            vec![
                Attachment {
                    color: AttachmentColor::Green,
                    text: "alice: 1000 → 1016 (+16)".to_string(),
                    pretext: Some("Rating changes after alice vs bob match:".to_string()),
                },
                Attachment {
                    color: AttachmentColor::Red,
                    text: "bob: 1000 → 984 (-16)".to_string(),
                    pretext: None,
                },
            ]
        );
    }

    #[test]
    fn test_render_two_vs_two_only_first_has_pretext() {
        let result = MatchResult {
            winners: vec![entry("alice", 1000.0, 1000.0), entry("bob", 900.0, 900.0)],
            losers: vec![entry("chloe", 1100.0, 1100.0), entry("dave", 800.0, 800.0)],
        };

        let attachments = render_match_update(&result);

        assert_eq!(attachments.len(), 4);
        assert_eq!(
            attachments[0].pretext.as_deref(),
            Some("Rating changes after alice bob vs chloe dave match:")
        );
        assert!(attachments[1..].iter().all(|a| a.pretext.is_none()));
        assert!(attachments.iter().all(|a| a.color == AttachmentColor::Yellow));
        assert_eq!(attachments[3].text, "dave: 800 → 800 (+0)");
    }

    #[test]
    fn test_render_tiny_change_stays_visible() {
        let result = MatchResult {
            winners: vec![entry("alice", 1029.999, 1030.0001)],
            losers: vec![entry("bob", 1000.0, 970.5)],
        };

        let attachments = render_match_update(&result);

        assert_eq!(attachments[0].color, AttachmentColor::Green);
        assert_eq!(attachments[0].text, "alice: 1029.999 → 1030.000 (+0.001)");
        assert_eq!(attachments[1].color, AttachmentColor::Red);
        assert_eq!(attachments[1].text, "bob: 1000.00 → 970.50 (-29.50)");
    }

    #[test]
    fn test_serialize_attachment() {
        let attachment = Attachment {
            color: AttachmentColor::Yellow,
            text: "alice: 1000 → 1000 (+0)".to_string(),
            pretext: None,
        };

        let json = serde_json::to_value(&attachment).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "color": "#ffef60", "text": "alice: 1000 → 1000 (+0)" })
        );
    }
}
